use std::io;

use thiserror::Error;

use crate::constants::MAX_PROGRAM_SIZE;

/// Reasons a ROM could not be copied into memory.
///
/// A failed load never touches the machine; it keeps whatever it held before.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read ROM: {0}")]
    Io(#[from] io::Error),

    #[error("ROM is {size} bytes but at most {max} fit above 0x200")]
    TooLarge { size: usize, max: usize },
}

impl LoadError {
    pub(crate) fn too_large(size: usize) -> Self {
        LoadError::TooLarge {
            size,
            max: MAX_PROGRAM_SIZE,
        }
    }
}
