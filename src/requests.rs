use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::error::BoxError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Something that can turn a URL into a response body.
///
/// The radar pipeline only ever has one request in flight, so implementors
/// don't need to be `Send` or `Sync`.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, BoxError>;
}

pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    pub fn new() -> anyhow::Result<Self> {
        let client = ClientBuilder::new().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl Fetch for RequestClient {
    async fn fetch_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, BoxError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use reqwest::StatusCode;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use crate::{FetchConfig, FetchError, ImagePathExtractor, fetch_radar_frames};

    use super::*;

    const LISTING_PATH: &str = "/products/IDR663.loop.shtml";
    const LISTING_HTML: &str = r#"<script>
theImageNames[0] = "/radar/IDR663.T.202405220000.png";
theImageNames[1] = "/radar/IDR663.T.202405220030.png";
theImageNames[2] = "/radar/IDR663.T.202405220100.png";
</script>"#;

    fn config_for(server: &MockServer, dir: &std::path::Path) -> FetchConfig {
        FetchConfig {
            site_root: server.uri(),
            output_dir: dir.to_path_buf(),
            timeout: Duration::from_secs(5),
            ..FetchConfig::default()
        }
    }

    async fn mount_frame(server: &MockServer, name: &str, response: ResponseTemplate, hits: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/radar/{name}")))
            .respond_with(response)
            .expect(hits)
            .mount(server)
            .await;
    }

    async fn run(config: &FetchConfig) -> Result<usize, FetchError> {
        let client = RequestClient::new().unwrap();
        let extractor = ImagePathExtractor::new().unwrap();
        fetch_radar_frames(&client, &extractor, config).await
    }

    fn reqwest_source(err: &FetchError) -> &reqwest::Error {
        err.source()
            .and_then(|source| source.downcast_ref::<reqwest::Error>())
            .expect("fetch error should wrap a reqwest error")
    }

    #[tokio::test]
    async fn downloads_frames_over_http() {
        let server = MockServer::start().await;
        let tmp_dir = tempfile::tempdir().unwrap();
        Mock::given(method("GET"))
            .and(path(LISTING_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_HTML))
            .expect(1)
            .mount(&server)
            .await;
        for name in [
            "IDR663.T.202405220000.png",
            "IDR663.T.202405220030.png",
            "IDR663.T.202405220100.png",
        ] {
            let body = ResponseTemplate::new(200).set_body_bytes(name.as_bytes());
            mount_frame(&server, name, body, 1).await;
        }

        let frame_count = run(&config_for(&server, tmp_dir.path())).await.unwrap();

        assert_eq!(frame_count, 3);
        let written = std::fs::read(tmp_dir.path().join("IDR663.T.202405220030.png")).unwrap();
        assert_eq!(written, b"IDR663.T.202405220030.png");
    }

    #[tokio::test]
    async fn listing_not_found_is_a_listing_error() {
        let server = MockServer::start().await;
        let tmp_dir = tempfile::tempdir().unwrap();
        Mock::given(method("GET"))
            .and(path(LISTING_PATH))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = run(&config_for(&server, tmp_dir.path())).await.unwrap_err();

        assert!(matches!(err, FetchError::Listing { .. }));
        assert_eq!(reqwest_source(&err).status(), Some(StatusCode::NOT_FOUND));
        // Only the listing was requested.
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn server_error_on_second_frame_stops_the_run() {
        let server = MockServer::start().await;
        let tmp_dir = tempfile::tempdir().unwrap();
        Mock::given(method("GET"))
            .and(path(LISTING_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_HTML))
            .mount(&server)
            .await;
        mount_frame(
            &server,
            "IDR663.T.202405220000.png",
            ResponseTemplate::new(200).set_body_bytes(b"first".to_vec()),
            1,
        )
        .await;
        mount_frame(
            &server,
            "IDR663.T.202405220030.png",
            ResponseTemplate::new(500),
            1,
        )
        .await;
        mount_frame(
            &server,
            "IDR663.T.202405220100.png",
            ResponseTemplate::new(200),
            0,
        )
        .await;

        let err = run(&config_for(&server, tmp_dir.path())).await.unwrap_err();

        match &err {
            FetchError::Frame { filename, .. } => {
                assert_eq!(filename, "IDR663.T.202405220030.png")
            }
            other => panic!("expected frame error, got {other:?}"),
        }
        assert_eq!(
            reqwest_source(&err).status(),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
        assert_eq!(
            std::fs::read(tmp_dir.path().join("IDR663.T.202405220000.png")).unwrap(),
            b"first"
        );
        assert!(!tmp_dir.path().join("IDR663.T.202405220030.png").exists());
    }

    #[tokio::test]
    async fn slow_listing_times_out() {
        let server = MockServer::start().await;
        let tmp_dir = tempfile::tempdir().unwrap();
        Mock::given(method("GET"))
            .and(path(LISTING_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(LISTING_HTML)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;
        let config = FetchConfig {
            timeout: Duration::from_millis(200),
            ..config_for(&server, tmp_dir.path())
        };

        let err = run(&config).await.unwrap_err();

        assert!(matches!(err, FetchError::Listing { .. }));
        assert!(reqwest_source(&err).is_timeout());
        assert_eq!(std::fs::read_dir(tmp_dir.path()).unwrap().count(), 0);
    }
}
