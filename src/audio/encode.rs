//! WAV encoding of clips into memory.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use super::AudioBuffer;
use crate::constants::WAV_BITS_PER_SAMPLE;
use crate::error::{Error, Result};

/// Encode a buffer as 16-bit PCM WAV at its own rate and channel count.
pub fn encode_wav(buffer: &AudioBuffer) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: buffer.channels,
        sample_rate: buffer.sample_rate,
        bits_per_sample: WAV_BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut bytes = Vec::new();
    let mut writer =
        WavWriter::new(Cursor::new(&mut bytes), spec).map_err(|e| Error::WavEncode { source: e })?;

    for &sample in &buffer.samples {
        writer
            .write_sample(to_i16(sample))
            .map_err(|e| Error::WavEncode { source: e })?;
    }

    writer
        .finalize()
        .map_err(|e| Error::WavEncode { source: e })?;

    Ok(bytes)
}

#[allow(clippy::cast_possible_truncation)]
fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}
