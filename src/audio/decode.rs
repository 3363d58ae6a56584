//! Audio decoding using symphonia.
//!
//! Sources arrive as whole objects in memory, so decoding runs over a
//! byte cursor rather than a file handle.

use super::{AudioBuffer, resample};
use crate::error::{Error, Result};
use std::io::Cursor;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

/// How decoded audio is normalised before trimming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// Keep the file's own sample rate and channel layout.
    #[default]
    Native,
    /// Mix down to mono and resample to a fixed rate.
    Resample {
        /// Output sample rate in Hz.
        target_rate: u32,
    },
}

/// Decode an in-memory audio object.
///
/// `name` is used as the format hint (by extension) and in error messages.
/// Supports WAV, FLAC, MP3, and AAC.
pub fn decode_audio_bytes(
    bytes: Vec<u8>,
    name: &str,
    strategy: DecodeStrategy,
) -> Result<AudioBuffer> {
    let native = decode_native(bytes, name)?;

    match strategy {
        DecodeStrategy::Native => Ok(native),
        DecodeStrategy::Resample { target_rate } => {
            let mono = native.to_mono();
            debug!(
                "Resampling '{name}' from {} Hz to {target_rate} Hz",
                mono.sample_rate
            );
            let samples = resample(mono.samples, mono.sample_rate, target_rate)?;
            Ok(AudioBuffer::mono(samples, target_rate))
        }
    }
}

fn decode_native(bytes: Vec<u8>, name: &str) -> Result<AudioBuffer> {
    let mss = MediaSourceStream::new(
        Box::new(Cursor::new(bytes)),
        MediaSourceStreamOptions::default(),
    );

    let mut hint = Hint::new();
    if let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioOpen {
            name: name.to_string(),
            source: Box::new(e),
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTracks {
            name: name.to_string(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::AudioDecode {
            name: name.to_string(),
            source: "missing sample rate".into(),
        })?;
    let mut channels = track
        .codec_params
        .channels
        .map_or(1, symphonia::core::audio::Channels::count);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode {
            name: name.to_string(),
            source: Box::new(e),
        })?;

    let mut samples = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    name: name.to_string(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // Skip corrupt frames
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                warn!("Skipping undecodable packet in '{name}': {e}");
                continue;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    name: name.to_string(),
                    source: Box::new(e),
                });
            }
        };

        let spec = *decoded.spec();
        channels = spec.channels.count();
        let frames = decoded.capacity();
        if sample_buf
            .as_ref()
            .is_none_or(|buf| buf.capacity() < frames * channels)
        {
            sample_buf = Some(SampleBuffer::new(frames as u64, spec));
        }
        if let Some(buf) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    let channels = u16::try_from(channels).map_err(|_| Error::AudioDecode {
        name: name.to_string(),
        source: format!("unsupported channel count {channels}").into(),
    })?;

    Ok(AudioBuffer::new(samples, channels, sample_rate))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::audio::encode_wav;

    fn sine(frames: usize, sample_rate: u32) -> Vec<f32> {
        #[allow(clippy::cast_precision_loss)]
        (0..frames)
            .map(|i| (i as f32 * 440.0 * std::f32::consts::TAU / sample_rate as f32).sin() * 0.5)
            .collect()
    }

    #[test]
    fn test_decode_native_keeps_rate_and_channels() {
        let stereo: Vec<f32> = sine(800, 8000)
            .into_iter()
            .flat_map(|s| [s, -s])
            .collect();
        let wav = encode_wav(&AudioBuffer::new(stereo, 2, 8000)).unwrap();

        let decoded = decode_audio_bytes(wav, "rec.wav", DecodeStrategy::Native).unwrap();
        assert_eq!(decoded.sample_rate, 8000);
        assert_eq!(decoded.channels, 2);
        assert_eq!(decoded.frames(), 800);
    }

    #[test]
    fn test_decode_resample_outputs_mono_at_target() {
        let wav = encode_wav(&AudioBuffer::mono(sine(48_000, 48_000), 48_000)).unwrap();

        let decoded = decode_audio_bytes(
            wav,
            "rec.wav",
            DecodeStrategy::Resample { target_rate: 16_000 },
        )
        .unwrap();
        assert_eq!(decoded.sample_rate, 16_000);
        assert_eq!(decoded.channels, 1);
        // Roughly a third of the frames
        assert!(decoded.frames() > 14_000);
        assert!(decoded.frames() < 18_000);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_audio_bytes(
            b"definitely not audio".to_vec(),
            "rec.wav",
            DecodeStrategy::Native,
        );
        assert!(matches!(result, Err(Error::AudioOpen { .. })));
    }
}
