pub mod codec;
pub mod pixel_buffer;
pub mod scaler;

pub use codec::{decode_png, encode_png, DecodeError};
pub use pixel_buffer::PixelBuffer;
pub use scaler::{resample_nearest, scale_down};
