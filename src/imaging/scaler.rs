//! Nearest-neighbor downscaling.

use super::PixelBuffer;
use crate::error::RatioError;

/// Downscale `source` by an integer divisor.
///
/// The destination is `floor(W / ratio)` x `floor(H / ratio)`. A non-positive
/// ratio, or one that leaves either side at zero, is rejected.
pub fn scale_down(source: &PixelBuffer, ratio: i64) -> Result<PixelBuffer, RatioError> {
    if ratio <= 0 {
        return Err(RatioError::NonPositive(ratio));
    }

    let (width, height) = (source.width(), source.height());
    let dest_width = (i64::from(width) / ratio) as u32;
    let dest_height = (i64::from(height) / ratio) as u32;

    if dest_width == 0 || dest_height == 0 {
        return Err(RatioError::Degenerate {
            ratio,
            width,
            height,
            dest_width,
            dest_height,
        });
    }

    tracing::debug!(
        width,
        height,
        ratio,
        dest_width,
        dest_height,
        "Scaling image"
    );

    Ok(resample_nearest(source, dest_width, dest_height))
}

/// Resample to `dest_width` x `dest_height` by picking, for each destination
/// pixel (dx, dy), the source pixel at (dx * W / dest_width, dy * H / dest_height).
///
/// Channels are copied verbatim. An empty source has nothing to sample, so
/// the result is a fully transparent buffer of the requested size.
pub fn resample_nearest(source: &PixelBuffer, dest_width: u32, dest_height: u32) -> PixelBuffer {
    if source.width() == 0 || source.height() == 0 || dest_width == 0 || dest_height == 0 {
        return PixelBuffer::new(dest_width, dest_height);
    }

    let (width, height) = (u64::from(source.width()), u64::from(source.height()));
    let src = source.as_rgba();
    let src_stride = width as usize * PixelBuffer::CHANNELS;

    // Column offsets are identical for every row
    let columns: Vec<usize> = (0..u64::from(dest_width))
        .map(|dx| (dx * width / u64::from(dest_width)) as usize * PixelBuffer::CHANNELS)
        .collect();

    let mut data =
        Vec::with_capacity(dest_width as usize * dest_height as usize * PixelBuffer::CHANNELS);
    for dy in 0..u64::from(dest_height) {
        let sy = (dy * height / u64::from(dest_height)) as usize;
        let row = &src[sy * src_stride..(sy + 1) * src_stride];
        for &sx in &columns {
            data.extend_from_slice(&row[sx..sx + PixelBuffer::CHANNELS]);
        }
    }

    PixelBuffer::from_rgba(dest_width, dest_height, data)
        .expect("one RGBA pixel per destination coordinate")
}
