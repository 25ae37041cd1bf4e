//! Data-parallel list decoding of many independent received words.

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use rayon::prelude::*;
use tracing::debug;
use tracing::instrument;

use super::interpolation::Root;
use super::list_decoder::ListDecoder;
use crate::config;
use crate::error::BatchError;
use crate::error::DecodingError;
use crate::math::polynomial::Polynomial;

/// The outcome of list decoding one received word.
pub type DecodingResult<'f> = Result<Vec<Polynomial<'f>>, DecodingError>;

/// List decode every noisy codeword with the same radius, in parallel.
///
/// The results are in the order of the input. Every decoding is independent:
/// a failing word does not affect the others. Progress is reported through
/// `tracing` at debug level.
///
/// The number of worker threads is taken from the
/// [configuration](config::set_batch_threads); zero uses rayon's global
/// thread pool.
///
/// # Errors
///
/// Fails only if a dedicated thread pool cannot be built.
#[instrument(name = "decode_batch", level = "debug", skip_all, fields(
    num_words = noisy_codewords.len(),
    list_decoding_radius = list_decoding_radius,
))]
pub fn decode_batch<'f, D>(
    decoder: &D,
    noisy_codewords: &[Vec<Root<'f>>],
    list_decoding_radius: usize,
) -> Result<Vec<DecodingResult<'f>>, BatchError>
where
    D: ListDecoder + Sync,
{
    let num_words = noisy_codewords.len();
    let num_decoded = AtomicUsize::new(0);
    let decode_all = || {
        noisy_codewords
            .par_iter()
            .map(|noisy_codeword| {
                let result = decoder.decode_via_list(noisy_codeword, list_decoding_radius);
                let decoded = num_decoded.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(decoded, num_words, "decoded word");
                result
            })
            .collect::<Vec<_>>()
    };

    let results = match config::batch_threads() {
        0 => decode_all(),
        num_threads => rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?
            .install(decode_all),
    };

    Ok(results)
}
