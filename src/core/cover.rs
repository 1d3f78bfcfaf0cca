use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};

use crate::error::ResolveError;

/// Edge length of the square cover art handed to taggers.
pub const COVER_SIZE: u32 = 800;

pub const JPEG_QUALITY: u8 = 75;

/// Decodes cover art of any supported format, drops alpha/palette data,
/// scales it to `COVER_SIZE`×`COVER_SIZE` and re-encodes it as JPEG.
pub fn transcode_cover(data: &[u8]) -> Result<Vec<u8>, ResolveError> {
    let decoded = image::load_from_memory(data).map_err(ResolveError::ImageDecode)?;
    log::debug!(
        "cover art decoded: {}x{} {:?}",
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    let rgb = decoded.to_rgb8();
    let resized = imageops::resize(&rgb, COVER_SIZE, COVER_SIZE, FilterType::CatmullRom);

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&resized)
        .map_err(ResolveError::ImageEncode)?;

    Ok(jpeg)
}
