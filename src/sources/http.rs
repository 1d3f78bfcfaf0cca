use std::time::Duration;

use crate::error::ResolveError;
use crate::models::Manifest;
use crate::sources::MetadataSource;

/// Applies to the manifest and the cover art request alike.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP source. No retries: a failed or timed out request is
/// reported straight back to the caller.
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, ResolveError> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ResolveError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(ResolveError::Client)?;

        Ok(Self { client })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, ResolveError> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ResolveError::network(url, e))?
            .error_for_status()
            .map_err(|e| ResolveError::network(url, e))?;
        log::debug!("GET {} -> {}", url, response.status());
        Ok(response)
    }
}

impl MetadataSource for HttpSource {
    fn name(&self) -> &str {
        "HTTP"
    }

    fn fetch_manifest(&self, url: &str) -> Result<Manifest, ResolveError> {
        let body = self
            .get(url)?
            .text()
            .map_err(|e| ResolveError::network(url, e))?;

        let manifest = Manifest::from_json(&body).map_err(|e| ResolveError::parse(url, e))?;
        log::info!(
            "fetched manifest from {} ({} tracks)",
            url,
            manifest.tracks().len()
        );
        Ok(manifest)
    }

    fn fetch_cover_art(&self, url: &str) -> Result<Vec<u8>, ResolveError> {
        let data = self
            .get(url)?
            .bytes()
            .map_err(|e| ResolveError::network(url, e))?
            .to_vec();

        log::info!("downloaded cover art from {} ({} bytes)", url, data.len());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::Sender;
    use std::thread::JoinHandle;

    use rouille::{Request, Response};

    use super::*;
    use crate::sources::testing::png_bytes;

    struct TestServer {
        base_url: String,
        stop: Option<(JoinHandle<()>, Sender<()>)>,
    }

    impl TestServer {
        fn start<F>(handler: F) -> Self
        where
            F: Fn(&Request) -> Response + Send + Sync + 'static,
        {
            let server = rouille::Server::new("127.0.0.1:0", handler).expect("bind test server");
            let base_url = format!("http://{}", server.server_addr());
            Self {
                base_url,
                stop: Some(server.stoppable()),
            }
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }
    }

    impl Drop for TestServer {
        fn drop(&mut self) {
            if let Some((handle, tx)) = self.stop.take() {
                let _ = tx.send(());
                let _ = handle.join();
            }
        }
    }

    fn album_server() -> TestServer {
        let cover = png_bytes();
        TestServer::start(move |request| match request.url().as_str() {
            "/evtracks.json" => Response::text(
                r#"{
                    "metadata": {
                        "album_name": "Remixes",
                        "artist_name": "Danny",
                        "cover_art_url": ""
                    },
                    "tracks": [
                        {"track_number": 1, "track_name": "Song", "file_url": "http://x/a.wav", "inst_url": "http://x/b.wav"}
                    ]
                }"#,
            ),
            "/broken.json" => Response::text("<html>oops</html>"),
            "/cover.png" => Response::from_data("image/png", cover.clone()),
            _ => Response::empty_404(),
        })
    }

    #[test]
    fn test_fetch_manifest() {
        let server = album_server();
        let source = HttpSource::new().expect("client");

        let manifest = source
            .fetch_manifest(&server.url("/evtracks.json"))
            .expect("manifest");
        assert_eq!(manifest.metadata().album_name, "Remixes");
        assert_eq!(manifest.tracks().len(), 1);
        assert_eq!(manifest.tracks()[0].inst_url(), "http://x/b.wav");
    }

    #[test]
    fn test_fetch_manifest_invalid_json_is_parse_error() {
        let server = album_server();
        let source = HttpSource::new().expect("client");

        let err = source
            .fetch_manifest(&server.url("/broken.json"))
            .unwrap_err();
        assert!(matches!(err, ResolveError::Parse { .. }));
    }

    #[test]
    fn test_fetch_manifest_404_is_network_error() {
        let server = album_server();
        let source = HttpSource::new().expect("client");

        let err = source
            .fetch_manifest(&server.url("/missing.json"))
            .unwrap_err();
        match err {
            ResolveError::Network { url, .. } => assert!(url.ends_with("/missing.json")),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[test]
    fn test_connection_refused_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let source = HttpSource::new().expect("client");
        let err = source
            .fetch_manifest(&format!("http://{addr}/evtracks.json"))
            .unwrap_err();
        assert!(matches!(err, ResolveError::Network { .. }));
    }

    #[test]
    fn test_timeout_is_network_error() {
        let server = TestServer::start(|_| {
            std::thread::sleep(Duration::from_millis(1500));
            Response::text("{}")
        });
        let source = HttpSource::with_timeout(Duration::from_millis(200)).expect("client");

        let err = source
            .fetch_manifest(&server.url("/evtracks.json"))
            .unwrap_err();
        match err {
            ResolveError::Network { source, .. } => assert!(source.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_fetch_cover_art_returns_raw_bytes() {
        let server = album_server();
        let source = HttpSource::new().expect("client");

        let data = source
            .fetch_cover_art(&server.url("/cover.png"))
            .expect("cover");
        assert_eq!(data, png_bytes());
    }
}
