use std::fmt;

use crate::types::error::{DatabaseError, Result};

pub const COLUMN_USERNAME_SIZE: usize = 32;
pub const COLUMN_EMAIL_SIZE: usize = 255;

// Each text column reserves its last byte for the terminator.
pub const USERNAME_MAX_LEN: usize = COLUMN_USERNAME_SIZE - 1;
pub const EMAIL_MAX_LEN: usize = COLUMN_EMAIL_SIZE - 1;

pub const ID_SIZE: usize = size_of::<u32>();
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE;
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE;
pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

/*
 * Row Layout (fixed width, 291 bytes)
 * ┌──────────┬────────────────────────┬──────────────────────────────┐
 * │ id (4)   │ username (32)          │ email (255)                  │
 * │ u32 LE   │ utf-8, NUL padded      │ utf-8, NUL padded            │
 * └──────────┴────────────────────────┴──────────────────────────────┘
 */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    /// True when both text columns fit their usable capacity and will
    /// survive an encode/decode round trip unchanged.
    pub fn fits(&self) -> bool {
        self.username.len() <= USERNAME_MAX_LEN && self.email.len() <= EMAIL_MAX_LEN
    }

    pub fn to_bytes(&self) -> [u8; ROW_SIZE] {
        let mut buffer = [0u8; ROW_SIZE];
        self.write_to(&mut buffer);
        buffer
    }

    /// Serialize into `destination`, which must be exactly `ROW_SIZE` bytes.
    /// Text beyond a column's usable capacity is dropped.
    pub fn write_to(&self, destination: &mut [u8; ROW_SIZE]) {
        destination.fill(0);
        destination[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        write_text(
            &mut destination[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE],
            &self.username,
        );
        write_text(
            &mut destination[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE],
            &self.email,
        );
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ROW_SIZE {
            return Err(DatabaseError::InvalidRowSize {
                expected: ROW_SIZE,
                actual: bytes.len(),
            });
        }

        let id = u32::from_le_bytes([
            bytes[ID_OFFSET],
            bytes[ID_OFFSET + 1],
            bytes[ID_OFFSET + 2],
            bytes[ID_OFFSET + 3],
        ]);
        let username = read_text(&bytes[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]);
        let email = read_text(&bytes[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]);

        Ok(Row {
            id,
            username,
            email,
        })
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

// Copies at most `field.len() - 1` bytes, backing off to a char boundary so
// the stored prefix is still valid utf-8.
fn write_text(field: &mut [u8], text: &str) {
    let mut end = text.len().min(field.len() - 1);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    field[..end].copy_from_slice(&text.as_bytes()[..end]);
}

// Bytes up to the first NUL. Invalid utf-8 from a foreign file decodes with
// U+FFFD replacements instead of failing the scan.
fn read_text(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
