//! Full-resolution mono sample storage.
//!
//! `SampleBuffer` owns every decoded sample of the file being edited. It is the
//! only place audio data lives; the peak cache and the view only ever read from
//! it through slices. Growth is fallible so a decoder feeding a very long file
//! can be told to stop without the buffer ending up half-extended.

use crate::error::{EditorError, EditorResult};
use std::ops::Range;

#[derive(Debug, Default, Clone)]
pub struct SampleBuffer {
    samples: Vec<f32>,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read-only view of the samples, in temporal order
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Replace the whole contents, returning the previous samples
    pub fn replace(&mut self, samples: Vec<f32>) -> Vec<f32> {
        std::mem::replace(&mut self.samples, samples)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Append decoded samples.
    ///
    /// Capacity is reserved up front; if the allocator refuses, the buffer is
    /// untouched and `BufferExhausted` is returned.
    pub fn try_extend(&mut self, incoming: &[f32]) -> EditorResult<()> {
        self.try_reserve(incoming.len())?;
        self.samples.extend_from_slice(incoming);
        Ok(())
    }

    /// Make room for `additional` more samples without changing the contents
    pub fn try_reserve(&mut self, additional: usize) -> EditorResult<()> {
        self.samples
            .try_reserve(additional)
            .map_err(|_| EditorError::BufferExhausted {
                requested: additional,
                current: self.samples.len(),
            })
    }

    /// Clamp a range to the current bounds. Empty results yield `None`.
    pub fn clamp_range(&self, range: Range<usize>) -> Option<Range<usize>> {
        let len = self.samples.len();
        let start = range.start.min(len);
        let end = range.end.min(len);
        (start < end).then_some(start..end)
    }

    /// Remove `range` and return how many samples were removed.
    ///
    /// The range is clamped first, so a range computed against a longer buffer
    /// removes only what still exists.
    pub fn remove_range(&mut self, range: Range<usize>) -> usize {
        match self.clamp_range(range) {
            Some(range) => {
                let removed = range.len();
                self.samples.drain(range);
                removed
            }
            None => 0,
        }
    }

    /// Largest absolute sample value in `range` (0.0 for an empty range)
    pub fn peak(&self, range: Range<usize>) -> f32 {
        self.clamp_range(range)
            .map(|range| peak_magnitude(&self.samples[range]))
            .unwrap_or(0.0)
    }

    /// Divide every sample in `range` by `divisor`
    pub fn attenuate_range(&mut self, range: Range<usize>, divisor: f32) {
        if let Some(range) = self.clamp_range(range) {
            for sample in &mut self.samples[range] {
                *sample /= divisor;
            }
        }
    }

    /// Snapshot converted to 16-bit PCM for an encoder
    pub fn to_pcm16(&self) -> Vec<i16> {
        self.samples.iter().map(|&s| sample_to_pcm16(s)).collect()
    }
}

/// Maximum absolute value of a slice, 0.0 when empty
pub fn peak_magnitude(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()))
}

/// Convert a normalized float sample to 16-bit PCM, saturating at full scale
pub fn sample_to_pcm16(sample: f32) -> i16 {
    (sample * 32767.0).clamp(-32768.0, 32767.0) as i16
}
