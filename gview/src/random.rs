//! Sources of randomness for generated styles.

use maybe_sync::{MaybeSend, MaybeSync};
use parking_lot::Mutex;

/// Provides random numbers to the style engine.
///
/// Generated default styles pick random colors. Injecting the source makes that choice
/// reproducible where needed (tests, screenshots).
pub trait RandomSource: MaybeSend + MaybeSync {
    /// Returns the next uniformly distributed `u32`.
    fn next_u32(&self) -> u32;

    /// Returns a uniformly distributed color channel value in `[0, 255]`.
    fn next_channel(&self) -> u8 {
        (self.next_u32() & 0xFF) as u8
    }
}

/// Random source backed by the operating system generator.
#[derive(Debug, Default, Copy, Clone)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_u32(&self) -> u32 {
        match getrandom::u32() {
            Ok(value) => value,
            Err(err) => {
                log::warn!("OS random generator failed: {err}");
                u32::MAX / 2
            }
        }
    }
}

/// Random source that cycles through a fixed sequence of values.
#[derive(Debug)]
pub struct FixedSequence {
    values: Vec<u32>,
    next: Mutex<usize>,
}

impl FixedSequence {
    /// Creates a new source. An empty sequence always yields zero.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            next: Mutex::new(0),
        }
    }
}

impl RandomSource for FixedSequence {
    fn next_u32(&self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }

        let mut next = self.next.lock();
        let value = self.values[*next % self.values.len()];
        *next += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sequence_cycles() {
        let source = FixedSequence::new([1, 2, 300]);
        let values: Vec<_> = (0..5).map(|_| source.next_u32()).collect();
        assert_eq!(values, vec![1, 2, 300, 1, 2]);

        assert_eq!(FixedSequence::new([0x1FF]).next_channel(), 0xFF);
        assert_eq!(FixedSequence::new([]).next_u32(), 0);
    }
}
