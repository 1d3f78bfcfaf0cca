use serde::de::Error as _;
use serde_json::{Map, Value};

pub type JsonMap = Map<String, Value>;

/// Get-with-default accessors over a JSON object.
/// Manifest fields are optional: a missing or mistyped value resolves to an
/// empty string, zero, or an empty collection instead of an error.
pub trait LenientMap {
    /// Strings as-is, numbers rendered in decimal, anything else `""`.
    fn str_or_default(&self, key: &str) -> String;
    /// Integers as-is, decimal strings parsed, anything else `0`.
    fn int_or_default(&self, key: &str) -> i64;
    fn object_or_empty(&self, key: &str) -> JsonMap;
    fn array_or_empty(&self, key: &str) -> Vec<Value>;
}

impl LenientMap for JsonMap {
    fn str_or_default(&self, key: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    fn int_or_default(&self, key: &str) -> i64 {
        match self.get(key) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    fn object_or_empty(&self, key: &str) -> JsonMap {
        match self.get(key) {
            Some(Value::Object(map)) => map.clone(),
            _ => JsonMap::new(),
        }
    }

    fn array_or_empty(&self, key: &str) -> Vec<Value> {
        match self.get(key) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    }
}

/// The album manifest: a `metadata` object plus an ordered `tracks` list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    root: JsonMap,
}

impl Manifest {
    /// Parses a manifest body. Fails only when the text is not JSON or its
    /// root is not an object; every field inside is optional.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(serde_json::Error::custom(
                "manifest root is not a JSON object",
            )),
        }
    }

    pub fn metadata(&self) -> AlbumMetadata {
        AlbumMetadata::from_map(&self.root.object_or_empty("metadata"))
    }

    pub fn tracks(&self) -> Vec<TrackRecord> {
        self.root
            .array_or_empty("tracks")
            .into_iter()
            .map(TrackRecord::from_value)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumMetadata {
    pub album_name: String,
    pub album_artist: String,
    pub artist_name: String,
    pub genre: String,
    pub year: String,
    pub cover_art_url: String,
}

impl AlbumMetadata {
    pub fn from_map(map: &JsonMap) -> Self {
        Self {
            album_name: map.str_or_default("album_name"),
            album_artist: map.str_or_default("album_artist"),
            artist_name: map.str_or_default("artist_name"),
            genre: map.str_or_default("genre"),
            year: map.str_or_default("year"),
            cover_art_url: map.str_or_default("cover_art_url"),
        }
    }
}

/// One entry of the manifest's track list, kept as the raw JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackRecord(JsonMap);

impl TrackRecord {
    /// Non-object entries become empty records so list positions survive.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn track_number(&self) -> i64 {
        self.0.int_or_default("track_number")
    }

    pub fn track_name(&self) -> String {
        self.0.str_or_default("track_name")
    }

    pub fn file_url(&self) -> String {
        self.0.str_or_default("file_url")
    }

    pub fn inst_url(&self) -> String {
        self.0.str_or_default("inst_url")
    }
}

/// Fields derived when a track record is bound onto an `AudioTrack`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackBinding {
    pub track_metadata: TrackRecord,

    // Album
    pub album_name: String,
    pub album_artist: String,
    pub artist_name: String,
    pub genre: String,
    pub year: String,

    // Track
    pub track_number: i64,
    pub track_name: String,
    pub track_title: String,
    pub file_url: String,
    pub inst_url: String,
    pub url: String,
}

impl TrackBinding {
    pub fn summary(&self) -> String {
        format!(
            "{:02}. {} - {} [{}]",
            self.track_number, self.artist_name, self.track_title, self.album_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> JsonMap {
        match value {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_str_or_default_coerces_numbers() {
        let m = map(json!({"year": 2023, "genre": "Electronic", "flag": true}));
        assert_eq!(m.str_or_default("year"), "2023");
        assert_eq!(m.str_or_default("genre"), "Electronic");
        assert_eq!(m.str_or_default("flag"), "");
        assert_eq!(m.str_or_default("missing"), "");
    }

    #[test]
    fn test_int_or_default() {
        let m = map(json!({"a": 7, "b": "12", "c": "x", "d": null, "e": 1.5}));
        assert_eq!(m.int_or_default("a"), 7);
        assert_eq!(m.int_or_default("b"), 12);
        assert_eq!(m.int_or_default("c"), 0);
        assert_eq!(m.int_or_default("d"), 0);
        assert_eq!(m.int_or_default("e"), 0);
        assert_eq!(m.int_or_default("missing"), 0);
    }

    #[test]
    fn test_manifest_missing_tracks_is_empty() {
        let manifest = Manifest::from_json(r#"{"metadata": {"album_name": "Remixes"}}"#)
            .expect("valid manifest");
        assert!(manifest.tracks().is_empty());
        assert_eq!(manifest.metadata().album_name, "Remixes");
    }

    #[test]
    fn test_manifest_missing_metadata_is_default() {
        let manifest = Manifest::from_json(r#"{"tracks": []}"#).expect("valid manifest");
        assert_eq!(manifest.metadata(), AlbumMetadata::default());
    }

    #[test]
    fn test_manifest_rejects_invalid_json() {
        assert!(Manifest::from_json("<html>not json</html>").is_err());
    }

    #[test]
    fn test_manifest_rejects_non_object_root() {
        assert!(Manifest::from_json("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_tracks_keep_positions() {
        let manifest = Manifest::from_json(
            r#"{"tracks": [{"track_number": 1, "track_name": "One"}, "junk", {"track_number": 3}]}"#,
        )
        .expect("valid manifest");
        let tracks = manifest.tracks();
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[0].track_name(), "One");
        assert_eq!(tracks[1], TrackRecord::default());
        assert_eq!(tracks[2].track_number(), 3);
        assert_eq!(tracks[2].track_name(), "");
    }

    #[test]
    fn test_track_record_accessors() {
        let record = TrackRecord::from_value(json!({
            "track_number": 2,
            "track_name": "Song",
            "file_url": "http://x/a.wav",
            "inst_url": "http://x/b.wav"
        }));
        assert_eq!(record.track_number(), 2);
        assert_eq!(record.track_name(), "Song");
        assert_eq!(record.file_url(), "http://x/a.wav");
        assert_eq!(record.inst_url(), "http://x/b.wav");
    }
}
