pub mod http;

use crate::core::cover;
use crate::error::ResolveError;
use crate::models::Manifest;

/// Where the album manifest is published when no other URL is configured.
pub const DEFAULT_METADATA_URL: &str =
    "https://gitlab.dannystewart.com/danny/evremixes/raw/main/evtracks.json";

/// Manifest plus the transcoded cover art it points at.
#[derive(Debug, Clone, Default)]
pub struct FetchedMetadata {
    pub manifest: Manifest,
    /// JPEG, `COVER_SIZE` square. `None` when the manifest names no cover.
    pub cover_data: Option<Vec<u8>>,
}

/// Album metadata source.
/// The two network reads sit behind this trait so the resolver can be
/// built from any source.
pub trait MetadataSource {
    fn name(&self) -> &str;
    /// Fetches and parses the manifest document.
    fn fetch_manifest(&self, url: &str) -> Result<Manifest, ResolveError>;
    /// Fetches raw cover art bytes, undecoded.
    fn fetch_cover_art(&self, url: &str) -> Result<Vec<u8>, ResolveError>;

    /// Manifest first, then the cover art when `metadata.cover_art_url` is
    /// non-empty. Errors from either step are returned as-is.
    fn fetch_all_metadata(&self, url: &str) -> Result<FetchedMetadata, ResolveError> {
        let manifest = self.fetch_manifest(url)?;

        let cover_art_url = manifest.metadata().cover_art_url;
        let cover_data = if cover_art_url.is_empty() {
            log::debug!("manifest has no cover art url");
            None
        } else {
            let raw = self.fetch_cover_art(&cover_art_url)?;
            Some(cover::transcode_cover(&raw)?)
        };

        Ok(FetchedMetadata {
            manifest,
            cover_data,
        })
    }
}
