use log::{info, warn};

use crate::{
    FetchConfig,
    error::FetchError,
    extractor::{ImagePathExtractor, frame_file_name},
    listing::fetch_listing,
    requests::Fetch,
};

/// Scrapes the radar loop page and downloads every frame it lists into
/// `config.output_dir`. Returns how many frames were downloaded.
pub async fn fetch_radar_frames<F: Fetch>(
    fetcher: &F,
    extractor: &ImagePathExtractor,
    config: &FetchConfig,
) -> Result<usize, FetchError> {
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|source| FetchError::CreateDir {
            path: config.output_dir.clone(),
            source,
        })?;

    let html = fetch_listing(fetcher, config).await?;
    let image_paths = extractor.extract(&html);
    if image_paths.is_empty() {
        warn!("No radar frames found in {}", config.listing_url());
    } else {
        info!("Found {} radar frames", image_paths.len());
    }

    download_frames(fetcher, config, &image_paths).await
}

/// Downloads each path in order into `config.output_dir`, stopping at the
/// first failure. Frames written before the failure are left on disk, and a
/// frame whose name is already present is overwritten.
pub async fn download_frames<F: Fetch>(
    fetcher: &F,
    config: &FetchConfig,
    image_paths: &[String],
) -> Result<usize, FetchError> {
    let to_fetch = match config.limit {
        Some(limit) => &image_paths[..limit.min(image_paths.len())],
        None => image_paths,
    };

    for image_path in to_fetch {
        let filename = frame_file_name(image_path);
        let url = config.frame_url(image_path);
        let bytes = fetcher
            .fetch_bytes(&url, config.timeout)
            .await
            .map_err(|source| FetchError::Frame {
                filename: filename.to_string(),
                url: url.clone(),
                source,
            })?;

        let path = config.output_dir.join(filename);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| FetchError::Write {
                path: path.clone(),
                source,
            })?;
        info!("Saved {} ({} bytes)", path.display(), bytes.len());
    }

    Ok(to_fetch.len())
}
