//! Audio decoding, trimming, and encoding.

mod buffer;
mod decode;
mod encode;
mod resample;
mod trim;

pub use buffer::AudioBuffer;
pub use decode::{DecodeStrategy, decode_audio_bytes};
pub use encode::encode_wav;
pub use resample::resample;
pub use trim::{time_to_sample_index, trim};
