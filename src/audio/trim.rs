//! Time-based trimming of decoded audio.

use super::AudioBuffer;

/// Convert a time in seconds to a frame index.
///
/// The index is `floor(seconds * sample_rate)`, so a boundary that falls
/// between two frames snaps to the earlier one. Negative and NaN times map
/// to 0; the conversion saturates instead of wrapping.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn time_to_sample_index(seconds: f64, sample_rate: u32) -> usize {
    (seconds * f64::from(sample_rate)).floor() as usize
}

/// Cut the frames in `[onset, offset)` out of `buffer`.
///
/// Never fails: an offset past the end is truncated to the buffer length,
/// and an onset at or past the offset (or past the end) gives an empty
/// buffer. Rate and channel count are carried over.
pub fn trim(buffer: &AudioBuffer, onset: f64, offset: f64) -> AudioBuffer {
    let frames = buffer.frames();
    let start = time_to_sample_index(onset, buffer.sample_rate).min(frames);
    let end = time_to_sample_index(offset, buffer.sample_rate)
        .min(frames)
        .max(start);

    let channels = usize::from(buffer.channels);
    AudioBuffer::new(
        buffer.samples[start * channels..end * channels].to_vec(),
        buffer.channels,
        buffer.sample_rate,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::cast_precision_loss)]
    fn ramp(frames: usize, sample_rate: u32) -> AudioBuffer {
        AudioBuffer::mono((0..frames).map(|i| i as f32).collect(), sample_rate)
    }

    #[test]
    fn test_index_floors() {
        assert_eq!(time_to_sample_index(1.0, 16_000), 16_000);
        assert_eq!(time_to_sample_index(0.99999, 10), 9);
        assert_eq!(time_to_sample_index(0.15, 10), 1);
    }

    #[test]
    fn test_index_negative_and_nan_saturate_to_zero() {
        assert_eq!(time_to_sample_index(-2.5, 16_000), 0);
        assert_eq!(time_to_sample_index(f64::NAN, 16_000), 0);
    }

    #[test]
    fn test_index_monotonic() {
        let mut previous = 0;
        for step in 0..2_000 {
            let t = f64::from(step) * 0.001_7;
            let index = time_to_sample_index(t, 22_050);
            assert!(index >= previous, "index decreased at t={t}");
            previous = index;
        }
    }

    #[test]
    fn test_trim_length_matches_index_difference() {
        let buffer = ramp(10 * 16_000, 16_000);
        for (onset, offset) in [(0.0, 0.0), (1.0, 2.0), (0.123, 4.567), (3.25, 10.0)] {
            let clip = trim(&buffer, onset, offset);
            let expected = time_to_sample_index(offset, 16_000) - time_to_sample_index(onset, 16_000);
            assert_eq!(clip.frames(), expected, "interval {onset}..{offset}");
        }
    }

    #[test]
    fn test_trim_is_half_open_slice() {
        let buffer = ramp(100, 10);
        let clip = trim(&buffer, 1.0, 2.0);
        assert_eq!(clip.samples.first().copied(), Some(10.0));
        assert_eq!(clip.samples.last().copied(), Some(19.0));
        assert_eq!(clip.sample_rate, 10);
    }

    #[test]
    fn test_trim_truncates_past_end() {
        let buffer = ramp(100, 10);
        let clip = trim(&buffer, 8.0, 50.0);
        assert_eq!(clip.frames(), 20);
    }

    #[test]
    fn test_trim_onset_past_end_is_empty() {
        let buffer = ramp(100, 10);
        assert!(trim(&buffer, 20.0, 30.0).is_empty());
    }

    #[test]
    fn test_trim_inverted_interval_is_empty() {
        let buffer = ramp(100, 10);
        assert!(trim(&buffer, 5.0, 2.0).is_empty());
    }

    #[test]
    fn test_trim_stereo_keeps_frames_together() {
        let buffer = AudioBuffer::new(vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5], 2, 4);
        let clip = trim(&buffer, 0.25, 0.75);
        assert_eq!(clip.channels, 2);
        assert_eq!(clip.samples, vec![1.0, 1.5, 2.0, 2.5]);
    }
}
