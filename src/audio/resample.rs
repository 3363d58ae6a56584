//! Audio resampling using rubato.

use crate::constants::resample::{CHUNK_SIZE, SUB_CHUNKS};
use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

/// Resample mono audio to the target sample rate.
///
/// Returns the input unchanged if already at the target rate. Otherwise the
/// output has exactly `ceil(len * to / from)` frames and is time-aligned
/// with the input: the resampler delay is dropped from the head and the
/// tail is flushed with zero-padded chunks.
pub fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples);
    }
    if from_rate == 0 || to_rate == 0 {
        return Err(Error::Resample {
            reason: format!("cannot resample between {from_rate} Hz and {to_rate} Hz"),
        });
    }

    let channels = 1;
    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        SUB_CHUNKS,
        channels,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let frames_per_chunk = resampler.input_frames_next();
    let delay = resampler.output_delay();
    let target_len = expected_len(samples.len(), from_rate, to_rate);
    let mut output = Vec::with_capacity(delay + target_len + resampler.output_frames_max());

    let mut chunks = samples.chunks_exact(frames_per_chunk);
    for chunk in chunks.by_ref() {
        let resampled = process_chunk(&mut resampler, chunk, frames_per_chunk)?;
        output.extend_from_slice(&resampled);
    }

    // Remainder first, then silence until the delayed tail is out
    let mut padded = chunks.remainder().to_vec();
    while output.len() < delay + target_len {
        padded.resize(frames_per_chunk, 0.0);
        let resampled = process_chunk(&mut resampler, &padded, frames_per_chunk)?;
        output.extend_from_slice(&resampled);
        padded.clear();
    }

    output.drain(..delay);
    output.truncate(target_len);
    Ok(output)
}

fn process_chunk(resampler: &mut Fft<f32>, chunk: &[f32], frames: usize) -> Result<Vec<f32>> {
    let input = SequentialSlice::new(chunk, 1, frames).map_err(|e| Error::Resample {
        reason: format!("failed to create input adapter: {e}"),
    })?;

    let resampled = resampler
        .process(&input, 0, None)
        .map_err(|e| Error::Resample {
            reason: e.to_string(),
        })?;

    Ok(resampled.take_data())
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn expected_len(input_len: usize, from_rate: u32, to_rate: u32) -> usize {
    ((input_len as f64) * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_same_rate_returns_input() {
        let samples = vec![0.1, 0.2, 0.3, 0.4, 0.5];
        assert_eq!(resample(samples.clone(), 48000, 48000).unwrap(), samples);
    }

    #[test]
    fn test_resample_empty_input() {
        assert!(resample(Vec::new(), 48000, 16000).unwrap().is_empty());
    }

    #[test]
    fn test_resample_zero_rate_rejected() {
        assert!(resample(vec![0.0; 10], 0, 16000).is_err());
    }

    #[test]
    fn test_resample_output_length_is_exact() {
        let output = resample(vec![0.0; 160_000], 16_000, 8_000).unwrap();
        assert_eq!(output.len(), 80_000);

        let output = resample(vec![0.0; 1_001], 16_000, 8_000).unwrap();
        assert_eq!(output.len(), 501);
    }

    #[test]
    fn test_resample_keeps_impulse_in_place() {
        let mut samples = vec![0.0; 160_000];
        samples[16_000] = 1.0;
        let output = resample(samples, 16_000, 8_000).unwrap();

        let peak = output
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 8_000);
    }

    #[test]
    fn test_resample_keeps_tail() {
        let mut samples = vec![0.0; 48_000];
        samples[47_997] = 1.0;
        let output = resample(samples, 48_000, 16_000).unwrap();

        assert_eq!(output.len(), 16_000);
        assert!(output[15_990..].iter().any(|s| s.abs() > 0.1));
    }

    #[test]
    fn test_resample_downsample() {
        #[allow(clippy::cast_precision_loss)]
        let samples: Vec<f32> = (0..48000).map(|i| (i as f32 * 0.001).sin()).collect();
        let output = resample(samples, 48000, 16000).unwrap();
        assert!(output.len() > 14000);
        assert!(output.len() < 18000);
    }

    #[test]
    fn test_resample_upsample() {
        #[allow(clippy::cast_precision_loss)]
        let samples: Vec<f32> = (0..32000).map(|i| (i as f32 * 0.001).sin()).collect();
        let output = resample(samples, 32000, 48000).unwrap();
        assert!(output.len() > 45000);
        assert!(output.len() < 55000);
    }
}
