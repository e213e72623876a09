use log::{debug, info};

use crate::{FetchConfig, error::FetchError, requests::Fetch};

/// Downloads the radar loop page. Invalid UTF-8 is replaced rather than
/// rejected since only the script block matters.
pub async fn fetch_listing<F: Fetch>(
    fetcher: &F,
    config: &FetchConfig,
) -> Result<String, FetchError> {
    let url = config.listing_url();
    info!("Fetching radar listing from {url}");
    let body = fetcher
        .fetch_bytes(&url, config.timeout)
        .await
        .map_err(|source| FetchError::Listing {
            url: url.clone(),
            source,
        })?;
    debug!("Radar listing is {} bytes", body.len());
    Ok(String::from_utf8_lossy(&body).into_owned())
}
