use std::{
    fs,
    io::{Seek, SeekFrom, Write},
};

use lembar::{
    storage::pager::Pager,
    types::{PAGE_SIZE, error::DatabaseError},
    utils::mock::TempDatabase,
};

#[test]
fn test_open_empty_file() {
    let temp_db = TempDatabase::with_prefix("pager_empty").unwrap();
    let pager = Pager::open(temp_db.path(), 10).unwrap();
    assert_eq!(pager.num_pages(), 0);
    assert_eq!(pager.max_pages(), 10);
    assert!(!pager.is_loaded(0));
}

#[test]
fn test_open_creates_missing_file() {
    let temp_db = TempDatabase::with_prefix("pager_missing").unwrap();
    let path = temp_db.path().with_extension("fresh");
    assert!(!path.exists());
    {
        let pager = Pager::open(&path, 10).unwrap();
        assert_eq!(pager.num_pages(), 0);
        pager.close().unwrap();
    }
    assert!(path.exists());
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_open_rejects_partial_page_file() {
    let temp_db = TempDatabase::with_prefix("pager_corrupt").unwrap();
    fs::write(temp_db.path(), vec![0u8; PAGE_SIZE + 100]).unwrap();
    let result = Pager::open(temp_db.path(), 10);
    assert!(matches!(
        result,
        Err(DatabaseError::CorruptFile { length }) if length == (PAGE_SIZE + 100) as u64
    ));
    // The file is left as it was.
    assert_eq!(temp_db.file_len().unwrap(), (PAGE_SIZE + 100) as u64);
}

#[test]
fn test_new_page_is_zeroed_and_extends_page_count() {
    let temp_db = TempDatabase::with_prefix("pager_new_page").unwrap();
    let mut pager = Pager::open(temp_db.path(), 10).unwrap();
    let page = pager.get_page(2).unwrap();
    assert!(page.as_bytes().iter().all(|&b| b == 0));
    assert_eq!(pager.num_pages(), 3);
    assert!(pager.is_loaded(2));
    assert!(!pager.is_loaded(0));
}

#[test]
fn test_page_beyond_max_is_rejected() {
    let temp_db = TempDatabase::with_prefix("pager_bounds").unwrap();
    let mut pager = Pager::open(temp_db.path(), 4).unwrap();
    assert!(pager.get_page(3).is_ok());
    assert!(matches!(
        pager.get_page(4),
        Err(DatabaseError::PageOutOfBounds {
            page_num: 4,
            max_pages: 4
        })
    ));
}

#[test]
fn test_flush_unloaded_page_is_rejected() {
    let temp_db = TempDatabase::with_prefix("pager_flush_unloaded").unwrap();
    let mut pager = Pager::open(temp_db.path(), 4).unwrap();
    assert!(matches!(
        pager.flush(1),
        Err(DatabaseError::FlushUnloadedPage { page_num: 1 })
    ));
}

#[test]
fn test_get_page_returns_cached_buffer() {
    let temp_db = TempDatabase::with_prefix("pager_cache").unwrap();
    let mut pager = Pager::open(temp_db.path(), 4).unwrap();
    pager.get_page(0).unwrap().write_u32(100, 1234).unwrap();
    assert_eq!(pager.get_page(0).unwrap().read_u32(100).unwrap(), 1234);
    // Nothing reaches the file before a flush.
    assert_eq!(temp_db.file_len().unwrap(), 0);
}

#[test]
fn test_flush_and_close_persist_pages() {
    let temp_db = TempDatabase::with_prefix("pager_persist").unwrap();
    {
        let mut pager = Pager::open(temp_db.path(), 4).unwrap();
        pager.get_page(0).unwrap().write_u32(0, 11).unwrap();
        pager.get_page(1).unwrap().write_u32(8, 22).unwrap();
        pager.flush(0).unwrap();
        assert_eq!(temp_db.file_len().unwrap(), PAGE_SIZE as u64);
        pager.close().unwrap();
    }
    assert_eq!(temp_db.file_len().unwrap(), 2 * PAGE_SIZE as u64);

    let mut pager = Pager::open(temp_db.path(), 4).unwrap();
    assert_eq!(pager.num_pages(), 2);
    assert_eq!(pager.get_page(0).unwrap().read_u32(0).unwrap(), 11);
    assert_eq!(pager.get_page(1).unwrap().read_u32(8).unwrap(), 22);
}

#[test]
fn test_unloaded_pages_are_not_rewritten_on_close() {
    let temp_db = TempDatabase::with_prefix("pager_untouched").unwrap();
    let mut contents = vec![0u8; 2 * PAGE_SIZE];
    contents[PAGE_SIZE] = 0xEE;
    fs::write(temp_db.path(), &contents).unwrap();

    let mut pager = Pager::open(temp_db.path(), 4).unwrap();
    pager.get_page(0).unwrap().write_u8(0, 0x11).unwrap();

    // Change page 1 behind the pager's back; it was never loaded, so close
    // must leave it alone.
    let mut file = fs::OpenOptions::new()
        .write(true)
        .open(temp_db.path())
        .unwrap();
    file.seek(SeekFrom::Start(PAGE_SIZE as u64)).unwrap();
    file.write_all(&[0xAB]).unwrap();
    drop(file);

    pager.close().unwrap();
    let bytes = fs::read(temp_db.path()).unwrap();
    assert_eq!(bytes[0], 0x11);
    assert_eq!(bytes[PAGE_SIZE], 0xAB);
}

#[test]
fn test_short_read_leaves_tail_zeroed() {
    let temp_db = TempDatabase::with_prefix("pager_short_read").unwrap();
    fs::write(temp_db.path(), vec![0xAAu8; 2 * PAGE_SIZE]).unwrap();

    let mut pager = Pager::open(temp_db.path(), 4).unwrap();
    // Truncate page 1 after open so the read comes up short.
    let file = fs::OpenOptions::new()
        .write(true)
        .open(temp_db.path())
        .unwrap();
    file.set_len((PAGE_SIZE + 100) as u64).unwrap();
    drop(file);

    let page = pager.get_page(1).unwrap();
    let bytes = page.as_bytes();
    assert!(bytes[..100].iter().all(|&b| b == 0xAA));
    assert!(bytes[100..].iter().all(|&b| b == 0));
}
