//! Errors raised by preference storage backends.
//!
//! Widgets themselves never fail; only [`crate::preference::KeyValueStore`] implementations do,
//! and [`crate::preference::ThemePreference`] logs those failures instead of surfacing them.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt preference file {}: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },

    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
