//! The generic list decoding contract and its implementations.

use itertools::Itertools;
use tracing::debug;

use super::encoder::agreement;
use super::factorisator::InterpolationPolynomialFactorisator;
use super::factorisator::RothRuckensteinFactorisator;
use super::gs_decoder::GsDecoder;
use super::interpolation::InterpolationPolynomialBuilder;
use super::interpolation::KotterBuilder;
use super::interpolation::Root;
use crate::error::DecodingError;
use crate::math::polynomial::Polynomial;

pub trait ListDecoder {
    /// All information polynomials whose codewords lie within Hamming
    /// distance `list_decoding_radius` of the noisy codeword.
    fn decode_via_list<'f>(
        &self,
        noisy_codeword: &[Root<'f>],
        list_decoding_radius: usize,
    ) -> Result<Vec<Polynomial<'f>>, DecodingError>;

    /// The single information polynomial within `list_decoding_radius`.
    ///
    /// # Errors
    ///
    /// Fails with [`DecodingError::NotUnique`] if the list is empty or holds
    /// more than one candidate, and with any error of
    /// [`decode_via_list`](Self::decode_via_list).
    fn decode_unique<'f>(
        &self,
        noisy_codeword: &[Root<'f>],
        list_decoding_radius: usize,
    ) -> Result<Polynomial<'f>, DecodingError> {
        let candidates = self.decode_via_list(noisy_codeword, list_decoding_radius)?;
        match <[_; 1]>::try_from(candidates) {
            Ok([candidate]) => Ok(candidate),
            Err(candidates) => Err(DecodingError::NotUnique(candidates.len())),
        }
    }
}

/// Convert the radius into the minimum number of agreeing positions.
fn min_agreement(n: usize, list_decoding_radius: usize) -> Result<usize, DecodingError> {
    n.checked_sub(list_decoding_radius)
        .ok_or(DecodingError::RadiusTooLarge {
            n,
            radius: list_decoding_radius,
        })
}

/// List decoding of a Reed–Solomon code with information length `k` through
/// the [Guruswami–Sudan decoder](GsDecoder).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GsListDecoder<B = KotterBuilder, F = RothRuckensteinFactorisator> {
    k: usize,
    decoder: GsDecoder<B, F>,
}

impl GsListDecoder {
    pub fn new(k: usize) -> Self {
        Self::with_decoder(k, GsDecoder::new())
    }
}

impl<B, F> GsListDecoder<B, F>
where
    B: InterpolationPolynomialBuilder,
    F: InterpolationPolynomialFactorisator,
{
    pub fn with_decoder(k: usize, decoder: GsDecoder<B, F>) -> Self {
        Self { k, decoder }
    }

    pub fn information_length(&self) -> usize {
        self.k
    }
}

impl<B, F> ListDecoder for GsListDecoder<B, F>
where
    B: InterpolationPolynomialBuilder,
    F: InterpolationPolynomialFactorisator,
{
    fn decode_via_list<'f>(
        &self,
        noisy_codeword: &[Root<'f>],
        list_decoding_radius: usize,
    ) -> Result<Vec<Polynomial<'f>>, DecodingError> {
        let n = noisy_codeword.len();
        let min_agreement_count = min_agreement(n, list_decoding_radius)?;
        self.decoder
            .decode(n, self.k, noisy_codeword, min_agreement_count)
    }
}

/// Nearest-codeword search: tries every information polynomial of degree
/// less than `k`.
///
/// Serves as the reference for the list decoding contract. The search space
/// has `q^k` elements and is capped at [`Self::MAX_SEARCH_SPACE`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ExhaustiveListDecoder {
    k: usize,
}

impl ExhaustiveListDecoder {
    pub const MAX_SEARCH_SPACE: u128 = 1 << 24;

    pub const fn new(k: usize) -> Self {
        Self { k }
    }

    pub fn information_length(&self) -> usize {
        self.k
    }
}

impl ListDecoder for ExhaustiveListDecoder {
    fn decode_via_list<'f>(
        &self,
        noisy_codeword: &[Root<'f>],
        list_decoding_radius: usize,
    ) -> Result<Vec<Polynomial<'f>>, DecodingError> {
        let n = noisy_codeword.len();
        let k = self.k;
        if k == 0 || k > n {
            return Err(DecodingError::InvalidInformationLength { n, k });
        }
        let min_agreement_count = min_agreement(n, list_decoding_radius)?;

        let field = noisy_codeword[0].0.field();
        let all_in_field = noisy_codeword
            .iter()
            .all(|(x, y)| x.belongs_to(field) && y.belongs_to(field));
        if !all_in_field {
            return Err(DecodingError::FieldMismatch);
        }

        let order = u128::from(field.order());
        let search_space = u32::try_from(k)
            .ok()
            .and_then(|k| order.checked_pow(k))
            .unwrap_or(u128::MAX);
        if search_space > Self::MAX_SEARCH_SPACE {
            return Err(DecodingError::SearchSpaceTooLarge(search_space));
        }

        let elements = field.elements().collect_vec();
        let candidates = (0..k)
            .map(|_| elements.iter().copied())
            .multi_cartesian_product()
            .map(Polynomial::new)
            .filter(|f| agreement(noisy_codeword, f) >= min_agreement_count)
            .collect_vec();
        debug!(
            search_space = search_space as u64,
            num_candidates = candidates.len(),
            "exhaustive list decoding complete"
        );

        Ok(candidates)
    }
}
