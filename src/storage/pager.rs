use std::{
    fs::{File, OpenOptions},
    io::{ErrorKind, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::types::{
    PAGE_SIZE, PageNum,
    error::{DatabaseError, Result},
    page::Page,
};

/// Owns the database file and an in-memory cache of its pages.
///
/// Slot `n` of `pages` holds page `n` once it has been faulted in. The cache
/// is bounded by `max_pages`; asking for a page at or beyond that bound is an
/// error rather than a reason to grow.
pub struct Pager {
    path: PathBuf,
    file: File,
    file_length: u64,
    num_pages: u32,
    max_pages: usize,
    pages: Vec<Option<Page>>,
}

impl Pager {
    pub fn open<P: AsRef<Path>>(path: P, max_pages: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        let file_length = file.metadata()?.len();

        if file_length % PAGE_SIZE as u64 != 0 {
            return Err(DatabaseError::CorruptFile {
                length: file_length,
            });
        }

        let num_pages = (file_length / PAGE_SIZE as u64) as u32;
        info!(
            path = %path.display(),
            num_pages,
            max_pages,
            "opened database file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            file,
            file_length,
            num_pages,
            max_pages,
            pages: (0..max_pages).map(|_| None).collect(),
        })
    }

    /// Highest known page index plus one: pages on disk plus any new pages
    /// handed out since open.
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn is_loaded(&self, page_num: PageNum) -> bool {
        matches!(self.pages.get(page_num as usize), Some(Some(_)))
    }

    fn check_bounds(&self, page_num: PageNum) -> Result<usize> {
        let index = page_num as usize;
        if index >= self.max_pages {
            return Err(DatabaseError::PageOutOfBounds {
                page_num,
                max_pages: self.max_pages,
            });
        }
        Ok(index)
    }

    fn page_offset(page_num: PageNum) -> u64 {
        page_num as u64 * PAGE_SIZE as u64
    }

    /// Return the cached page, reading it from disk on first touch.
    pub fn get_page(&mut self, page_num: PageNum) -> Result<&mut Page> {
        let index = self.check_bounds(page_num)?;

        let page = match self.pages[index].take() {
            Some(page) => page,
            None => {
                let page = self.load_page(page_num)?;
                if page_num >= self.num_pages {
                    self.num_pages = page_num + 1;
                }
                page
            }
        };

        Ok(self.pages[index].insert(page))
    }

    fn load_page(&mut self, page_num: PageNum) -> Result<Page> {
        let mut page = Page::new();
        let persisted_pages = self.file_length.div_ceil(PAGE_SIZE as u64);

        if (page_num as u64) < persisted_pages {
            self.file.seek(SeekFrom::Start(Self::page_offset(page_num)))?;
            let read = read_up_to(&mut self.file, page.as_bytes_mut())?;
            debug!(page_num, bytes = read, "faulted in page from disk");
        } else {
            debug!(page_num, "allocated new page");
        }

        Ok(page)
    }

    /// Write page `page_num` back to its slot in the file.
    pub fn flush(&mut self, page_num: PageNum) -> Result<()> {
        let index = self.check_bounds(page_num)?;
        let page = self.pages[index]
            .as_ref()
            .ok_or(DatabaseError::FlushUnloadedPage { page_num })?;

        self.file.seek(SeekFrom::Start(Self::page_offset(page_num)))?;
        self.file.write_all(page.as_bytes())?;

        let end = Self::page_offset(page_num) + PAGE_SIZE as u64;
        if end > self.file_length {
            self.file_length = end;
        }
        debug!(page_num, "flushed page");
        Ok(())
    }

    /// Flush every loaded page and release the file and the cache.
    pub fn close(mut self) -> Result<()> {
        for page_num in 0..self.num_pages {
            if self.is_loaded(page_num) {
                self.flush(page_num)?;
            }
        }
        self.file.flush()?;
        self.file.sync_all()?;
        info!(path = %self.path.display(), num_pages = self.num_pages, "closed database file");
        Ok(())
    }
}

// Fills as much of `buffer` as the file provides. A short read at end of file
// leaves the rest zeroed.
fn read_up_to(file: &mut File, buffer: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match file.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
