use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid manifest JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cover art could not be decoded: {0}")]
    ImageDecode(#[source] image::ImageError),

    #[error("cover art could not be encoded as JPEG: {0}")]
    ImageEncode(#[source] image::ImageError),
}

impl ResolveError {
    pub(crate) fn network(url: &str, source: reqwest::Error) -> Self {
        ResolveError::Network {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn parse(url: &str, source: serde_json::Error) -> Self {
        ResolveError::Parse {
            url: url.to_string(),
            source,
        }
    }
}
