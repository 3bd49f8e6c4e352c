//! Fixed-Size Ring Buffer for Raw Sensor Samples
//!
//! ## Overview
//!
//! Stuck-sensor detection and smoothing both look at a sliding window of the
//! most recent raw samples. Devices report once every couple of seconds, and
//! the ingest service may keep one window per device for thousands of
//! devices, so the window is a fixed-capacity ring buffer sized at compile
//! time through const generics rather than a growing `Vec`.
//!
//! - O(1) insertion (overwrites oldest when full)
//! - O(1) access to the most recent sample
//! - O(n) iteration, oldest to newest
//! - Zero heap allocations
//!
//! ### Memory Layout
//!
//! ```text
//! SampleBuffer<5> after 7 pushes (s0..s6):
//! ┌────┬────┬────┬────┬────┐
//! │ s5 │ s6 │ s2 │ s3 │ s4 │   ← physical slots
//! └────┴────┴────┴────┴────┘
//!             ↑
//!             └── write_pos = 2, also the oldest sample
//!
//! Logical view (iter): s2, s3, s4, s5, s6
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use firewatch_core::buffer::SampleBuffer;
//!
//! let mut history: SampleBuffer<100> = SampleBuffer::new();
//! for raw in [1200.0, 1210.0, 1190.0] {
//!     history.push(raw);
//! }
//!
//! assert_eq!(history.last(), Some(1190.0));
//! assert!((history.moving_average(10) - 1200.0).abs() < 1e-3);
//! assert!(!history.is_stuck(60)); // only three samples so far
//! ```

use heapless::Vec;

use crate::{constants::buffers::ADC_HISTORY_CAPACITY, detect};

/// Per-device raw ADC history as kept by the ingest path
pub type AdcHistory = SampleBuffer<ADC_HISTORY_CAPACITY>;

/// Fixed-size circular buffer of raw samples
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - Iteration yields samples in the order they were pushed
///
/// Not thread-safe; the ingest path owns one buffer per device.
#[derive(Debug, Clone)]
pub struct SampleBuffer<const N: usize> {
    data: [f32; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Number of valid samples, saturates at N
    len: usize,
}

impl<const N: usize> SampleBuffer<N> {
    /// Creates a new empty buffer
    pub const fn new() -> Self {
        Self {
            data: [0.0; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Adds a sample, overwriting the oldest one when full
    pub fn push(&mut self, sample: f32) {
        if N == 0 {
            return;
        }

        self.data[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of stored samples
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Most recent sample
    pub fn last(&self) -> Option<f32> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        Some(self.data[idx])
    }

    /// Iterate over samples from oldest to newest
    pub fn iter(&self) -> SampleBufferIter<'_, N> {
        SampleBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Clear all samples
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.len = 0;
    }

    /// Copy the samples into a contiguous, chronologically ordered vector
    pub fn to_vec(&self) -> Vec<f32, N> {
        // Capacity equals N and len <= N, so no push can fail.
        self.iter().collect()
    }

    /// Mean of the newest `window` samples, see [`detect::apply_moving_average`]
    pub fn moving_average(&self, window: usize) -> f32 {
        detect::apply_moving_average(&self.to_vec(), window)
    }

    /// Whether the newest `min_readings` samples are all identical, see
    /// [`detect::is_sensor_stuck`]
    pub fn is_stuck(&self, min_readings: usize) -> bool {
        detect::is_sensor_stuck(&self.to_vec(), min_readings)
    }

    /// Map a logical index (0 = oldest) to its sample
    ///
    /// ```text
    /// Physical array:  [D, E, A, B, C]  (write_pos = 2)
    /// Logical view:    [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % N] once full
    /// ```
    fn get(&self, index: usize) -> Option<f32> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        Some(self.data[actual_index])
    }
}

/// Iterator over buffered samples
pub struct SampleBufferIter<'a, const N: usize> {
    buffer: &'a SampleBuffer<N>,
    index: usize,
}

impl<'a, const N: usize> Iterator for SampleBufferIter<'a, N> {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }
}

impl<const N: usize> Default for SampleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
