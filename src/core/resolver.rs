use crate::core::filename::FileAttributes;
use crate::error::ResolveError;
use crate::models::{AlbumMetadata, Manifest, TrackBinding, TrackRecord};
use crate::sources::{FetchedMetadata, MetadataSource};

const INSTRUMENTAL_SUFFIX: &str = " (Instrumental)";

/// A local audio file together with the album manifest it belongs to.
///
/// Built in two phases: [`AudioTrack::new`] takes already fetched metadata
/// and derives the filename attributes, then [`AudioTrack::bind_track`]
/// attaches one track record and derives the title and download URL.
#[derive(Debug, Clone)]
pub struct AudioTrack {
    pub filename: String,
    pub metadata_url: String,
    pub append_text: String,

    file: FileAttributes,
    all_metadata: Manifest,
    cover_data: Option<Vec<u8>>,
    tracks: Vec<TrackRecord>,
    binding: Option<TrackBinding>,
}

impl AudioTrack {
    pub fn new(
        filename: &str,
        metadata_url: &str,
        append_text: &str,
        fetched: FetchedMetadata,
    ) -> Self {
        let file = FileAttributes::from_filename(filename);
        let tracks = fetched.manifest.tracks();

        Self {
            filename: file.filename(),
            metadata_url: metadata_url.to_string(),
            append_text: append_text.to_string(),
            file,
            all_metadata: fetched.manifest,
            cover_data: fetched.cover_data,
            tracks,
            binding: None,
        }
    }

    /// Fetches the manifest and cover art from `source`, then builds the track.
    pub fn fetch(
        source: &dyn MetadataSource,
        filename: &str,
        metadata_url: &str,
        append_text: &str,
    ) -> Result<Self, ResolveError> {
        log::debug!("resolving {} against {} ({})", filename, metadata_url, source.name());
        let fetched = source.fetch_all_metadata(metadata_url)?;
        Ok(Self::new(filename, metadata_url, append_text, fetched))
    }

    /// Stores `track_metadata` and derives every album and track field from
    /// it and the manifest. Missing keys resolve to empty strings or zero.
    /// Binding again replaces the previous binding.
    pub fn bind_track(&mut self, track_metadata: TrackRecord) {
        let album = self.album_metadata();

        let file_url = track_metadata.file_url();
        let inst_url = track_metadata.inst_url();
        let url = if self.file.is_instrumental {
            inst_url.clone()
        } else {
            file_url.clone()
        };
        let track_name = track_metadata.track_name();
        let track_title = self.build_title(&track_name);

        self.binding = Some(TrackBinding {
            track_number: track_metadata.track_number(),
            track_name,
            track_title,
            file_url,
            inst_url,
            url,
            album_name: album.album_name,
            album_artist: album.album_artist,
            artist_name: album.artist_name,
            genre: album.genre,
            year: album.year,
            track_metadata,
        });
    }

    /// Track name, then the append text, then the instrumental label.
    fn build_title(&self, track_name: &str) -> String {
        let mut title = track_name.to_string();
        if !self.append_text.is_empty() {
            title.push(' ');
            title.push_str(&self.append_text);
        }
        if self.file.is_instrumental {
            title.push_str(INSTRUMENTAL_SUFFIX);
        }
        title
    }

    pub fn binding(&self) -> Option<&TrackBinding> {
        self.binding.as_ref()
    }

    /// First manifest track whose `track_number` equals `number`.
    pub fn track_by_number(&self, number: i64) -> Option<&TrackRecord> {
        self.tracks.iter().find(|t| t.track_number() == number)
    }

    pub fn is_instrumental(&self) -> bool {
        self.file.is_instrumental
    }

    pub fn file_extension(&self) -> &str {
        &self.file.file_extension
    }

    pub fn file_format(&self) -> &str {
        &self.file.file_format
    }

    pub fn album_metadata(&self) -> AlbumMetadata {
        self.all_metadata.metadata()
    }

    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }

    pub fn cover_data(&self) -> Option<&[u8]> {
        self.cover_data.as_deref()
    }
}
