//! This module contains various configuration options. The default
//! configuration is sane and decodes every parameter set that is practical to
//! decode.
//!
//! All configuration options can also be set via environment variables.
//! Generally, the environment variables take precedence over the options set
//! in this module.

use std::cell::RefCell;

use arbitrary::Arbitrary;

thread_local! {
    static CONFIG: RefCell<Config> = RefCell::new(Config::new());
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct Config {
    pub max_multiplicity: MaxMultiplicity,
    pub batch_threads: BatchThreads,
}

impl Config {
    fn new() -> Self {
        Self {
            max_multiplicity: MaxMultiplicity::new(None),
            batch_threads: BatchThreads::new(None),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct MaxMultiplicity(u32);

impl MaxMultiplicity {
    const ENV_VAR: &'static str = "GS_LIST_DECODER_MAX_MULTIPLICITY";
    const DEFAULT: u32 = 16;
    const MINIMUM: u32 = 1;

    /// Creates a new `MaxMultiplicity` with the given value.
    /// Respects the precedence of the environment variable if set. Uses the
    /// default if no value is provided.
    fn new(config_value: Option<u32>) -> Self {
        let max = std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .or(config_value)
            .unwrap_or(Self::DEFAULT)
            .max(Self::MINIMUM);

        Self(max)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct BatchThreads(usize);

impl BatchThreads {
    const ENV_VAR: &'static str = "GS_LIST_DECODER_BATCH_THREADS";
    const DEFAULT: usize = 0;

    fn new(config_value: Option<usize>) -> Self {
        let threads = std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .or(config_value)
            .unwrap_or(Self::DEFAULT);

        Self(threads)
    }
}

/// Sets the largest root multiplicity the Guruswami–Sudan decoder tries when
/// searching for interpolation parameters.
///
/// Larger multiplicities allow decoding closer to the Johnson bound, but the
/// interpolation cost grows with the fourth power of the multiplicity.
///
/// Can also be set via the environment variable
/// `GS_LIST_DECODER_MAX_MULTIPLICITY`. The environment variable has higher
/// precedence than this function.
///
/// The default is 16. The minimum is always 1.
pub fn set_max_multiplicity(max_multiplicity: u32) {
    let max_multiplicity = MaxMultiplicity::new(Some(max_multiplicity));
    CONFIG.with(|c| c.borrow_mut().max_multiplicity = max_multiplicity);
}

pub(crate) fn max_multiplicity() -> u32 {
    CONFIG.with(|c| c.borrow().max_multiplicity).0
}

/// Sets the number of worker threads used by
/// [`decode_batch`](crate::decoding::batch::decode_batch).
///
/// A value of 0 uses rayon's global thread pool.
///
/// Can also be set via the environment variable
/// `GS_LIST_DECODER_BATCH_THREADS`. The environment variable has higher
/// precedence than this function.
pub fn set_batch_threads(threads: usize) {
    let threads = BatchThreads::new(Some(threads));
    CONFIG.with(|c| c.borrow_mut().batch_threads = threads);
}

pub(crate) fn batch_threads() -> usize {
    CONFIG.with(|c| c.borrow().batch_threads).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_multiplicity_never_drops_below_minimum() {
        if std::env::var(MaxMultiplicity::ENV_VAR).is_ok() {
            return;
        }

        set_max_multiplicity(0);
        assert_eq!(MaxMultiplicity::MINIMUM, max_multiplicity());

        set_max_multiplicity(7);
        assert_eq!(7, max_multiplicity());
    }

    #[test]
    fn configuration_is_thread_local() {
        if std::env::var(BatchThreads::ENV_VAR).is_ok() {
            return;
        }

        set_batch_threads(3);
        let other_thread = std::thread::spawn(batch_threads).join().unwrap();
        assert_eq!(BatchThreads::DEFAULT, other_thread);
        assert_eq!(3, batch_threads());
    }
}
