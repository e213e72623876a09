use std::path::PathBuf;

use thiserror::Error;

/// Error type returned by [`crate::Fetch`] implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch radar listing page {url}")]
    Listing {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to download radar frame {filename} from {url}")]
    Frame {
        filename: String,
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to create output directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write radar frame to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("failed to read preview directory {}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preview window failed")]
    Window(#[source] minifb::Error),
}
