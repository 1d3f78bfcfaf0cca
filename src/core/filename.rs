use std::path::{Component, Path, PathBuf};

/// Marker in a file name that selects the instrumental mix.
pub const INSTRUMENTAL_MARKER: &str = "No Vocals";

/// Attributes derived from a local filename. No I/O: the file need not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttributes {
    pub file_path: PathBuf,
    pub is_instrumental: bool,
    pub file_extension: String,
    pub file_format: String,
}

impl FileAttributes {
    pub fn from_filename(filename: &str) -> Self {
        let file_path = normalize_path(filename);

        let is_instrumental = file_path
            .file_name()
            .map(|name| name.to_string_lossy().contains(INSTRUMENTAL_MARKER))
            .unwrap_or(false);

        let file_extension = file_path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let file_format = format_for_extension(&file_extension).to_string();

        Self {
            file_path,
            is_instrumental,
            file_extension,
            file_format,
        }
    }

    /// The normalized path rendered back to a string.
    pub fn filename(&self) -> String {
        self.file_path.to_string_lossy().into_owned()
    }
}

/// Drops redundant separators, `.` components and trailing slashes.
fn normalize_path(filename: &str) -> PathBuf {
    Path::new(filename)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// `m4a` files carry ALAC audio; every other extension names its own format.
pub fn format_for_extension(extension: &str) -> &str {
    if extension == "m4a" {
        "alac"
    } else {
        extension
    }
}
