//! Test fixtures and constants.

use faas_fixtures::imaging::{encode_png, PixelBuffer};

/// Origin paths served by the mock origin
pub mod paths {
    pub const PHOTO: &str = "/images/photo.png";
    pub const SMALL: &str = "/images/small.png";
    pub const NOT_AN_IMAGE: &str = "/index.html";
    pub const MISSING: &str = "/images/missing.png";
}

/// Host header used for invocations routed through the test app
pub const TEST_HOST: &str = "example.test";

/// Opaque RGB gradient: red follows x, green follows y, blue is constant
pub fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            buffer.set_pixel(x, y, [r, g, 0x40, 0xff]);
        }
    }
    buffer
}

/// PNG encoding of [`gradient`]
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(&gradient(width, height)).expect("Failed to encode fixture PNG")
}

/// PNG with a transparent left half and an opaque right half
pub fn half_transparent_png(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in width / 2..width {
            buffer.set_pixel(x, y, [0x20, 0x80, 0xc0, 0xff]);
        }
    }
    encode_png(&buffer).expect("Failed to encode fixture PNG")
}

pub const HTML_PAGE: &str = "<!doctype html><html><body>Not found</body></html>";

/// Resize invocation path for an origin path and ratio
pub fn resize_path(origin_path: &str, ratio: impl std::fmt::Display) -> String {
    format!("/.netlify/functions/resize{origin_path}/ratio/{ratio}")
}
