mod config;
mod downloader;
mod error;
mod extractor;
mod listing;
mod preview;
mod requests;

pub use config::{BOM_ROOT, DEFAULT_TIMEOUT, FetchConfig, LoadFromEnv, RADAR_LISTING_PATH, RadarEnv};
pub use downloader::{download_frames, fetch_radar_frames};
pub use error::{BoxError, FetchError, PreviewError};
pub use extractor::{ImagePathExtractor, frame_file_name};
pub use listing::fetch_listing;
pub use preview::{
    DEFAULT_FRAME_DELAY, FrameDisplay, PreviewSummary, WindowDisplay, list_frames, preview_frames,
};
pub use requests::{Fetch, RequestClient};
