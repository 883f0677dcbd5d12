//! PNG decoding and encoding between raw bytes and [`PixelBuffer`]s.

use std::io::Cursor;

use super::PixelBuffer;

/// Raw bytes could not be turned into a pixel buffer.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Png(#[from] png::DecodingError),

    #[error("unsupported pixel layout {color_type:?} at {bit_depth:?}")]
    UnsupportedLayout {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },
}

/// Decode PNG bytes into an RGBA8 buffer.
///
/// Palette and sub-byte images are expanded, 16-bit samples are stripped to
/// 8 bits, and layouts without alpha get an opaque alpha channel.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let samples = &buf[..info.buffer_size()];

    if info.bit_depth != png::BitDepth::Eight {
        return Err(DecodeError::UnsupportedLayout {
            color_type: info.color_type,
            bit_depth: info.bit_depth,
        });
    }

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => samples.to_vec(),
        png::ColorType::Rgb => samples
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => samples
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => samples.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(DecodeError::UnsupportedLayout {
                color_type: info.color_type,
                bit_depth: info.bit_depth,
            })
        }
    };

    PixelBuffer::from_rgba(info.width, info.height, rgba).ok_or(DecodeError::UnsupportedLayout {
        color_type: info.color_type,
        bit_depth: info.bit_depth,
    })
}

/// Encode a buffer as an 8-bit PNG.
///
/// Fully opaque buffers are written as RGB, everything else as RGBA.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, png::EncodingError> {
    let opaque = buffer.is_opaque();
    let rgb: Vec<u8>;
    let (color_type, data) = if opaque {
        rgb = buffer
            .as_rgba()
            .chunks_exact(PixelBuffer::CHANNELS)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect();
        (png::ColorType::Rgb, rgb.as_slice())
    } else {
        (png::ColorType::Rgba, buffer.as_rgba())
    };

    let mut out = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut out, buffer.width(), buffer.height());
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(data)?;
        writer.finish()?;
    }
    Ok(out.into_inner())
}
