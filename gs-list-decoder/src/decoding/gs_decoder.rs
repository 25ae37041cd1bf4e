use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::instrument;

use super::encoder::agreement;
use super::factorisator::InterpolationPolynomialFactorisator;
use super::factorisator::RothRuckensteinFactorisator;
use super::interpolation::InterpolationPolynomialBuilder;
use super::interpolation::KotterBuilder;
use super::interpolation::Root;
use crate::config;
use crate::error::DecodingError;
use crate::math::bivariate_polynomial::DegreeWeight;
use crate::math::polynomial::Polynomial;

/// The parameters of the Guruswami–Sudan interpolation step.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GsParameters {
    /// `(1, k - 1)`, or `(1, 1)` if `k = 1`.
    pub degree_weight: DegreeWeight,

    /// The multiplicity `m` with which every received point is a root of the
    /// interpolation polynomial.
    pub roots_multiplicity: u32,

    /// The bound `D = t·m - 1` on the interpolation polynomial's weighted
    /// degree.
    pub max_weighted_degree: u32,
}

impl GsParameters {
    /// Choose the smallest multiplicity, up to the
    /// [configured maximum](config::set_max_multiplicity), for which an
    /// interpolation polynomial exists that has every information polynomial
    /// agreeing with the received word in at least `min_agreement` positions
    /// as a y-root.
    ///
    /// For multiplicity `m`, the bound is `D = t·m - 1`: if `f` agrees in `t`
    /// positions, then `Q(x, f(x))` has degree at most `D` but at least
    /// `t·m` zeros, counted with multiplicity, and therefore vanishes. Such a
    /// `Q` exists if there are more monomials of weighted degree at most `D`
    /// than the `n·m(m+1)/2` linear conditions the roots impose.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gs_list_decoder::prelude::*;
    /// let parameters = GsParameters::select(7, 3, 4).unwrap();
    /// assert_eq!(DegreeWeight::new(1, 2), parameters.degree_weight);
    /// assert_eq!(4, parameters.roots_multiplicity);
    /// assert_eq!(15, parameters.max_weighted_degree);
    /// ```
    pub fn select(n: usize, k: usize, min_agreement: usize) -> Result<Self, DecodingError> {
        Self::select_with_limit(n, k, min_agreement, config::max_multiplicity())
    }

    /// Like [`select`](Self::select), with an explicit multiplicity limit.
    pub fn select_with_limit(
        n: usize,
        k: usize,
        min_agreement: usize,
        max_multiplicity: u32,
    ) -> Result<Self, DecodingError> {
        if k == 0 || k > n {
            return Err(DecodingError::InvalidInformationLength { n, k });
        }
        if min_agreement == 0 || min_agreement > n {
            return Err(DecodingError::InvalidAgreement { n, min_agreement });
        }

        let (n_wide, t_wide) = (n as u128, min_agreement as u128);
        if t_wide * t_wide <= n_wide * (k as u128 - 1) {
            return Err(DecodingError::AgreementTooLow {
                n,
                k,
                min_agreement,
            });
        }

        let exceeded = DecodingError::MultiplicityLimitExceeded { max_multiplicity };
        let y_weight = u32::try_from(k - 1).map_err(|_| exceeded.clone())?.max(1);
        let degree_weight = DegreeWeight::new(1, y_weight);

        for m in 1..=max_multiplicity {
            let Ok(max_weighted_degree) = u32::try_from(t_wide * u128::from(m) - 1) else {
                break;
            };
            let num_conditions = n_wide * u128::from(m) * u128::from(m + 1) / 2;
            let num_monomials = degree_weight.count_monomials_up_to(max_weighted_degree);
            if u128::from(num_monomials) > num_conditions {
                return Ok(Self {
                    degree_weight,
                    roots_multiplicity: m,
                    max_weighted_degree,
                });
            }
        }

        Err(exceeded)
    }
}

/// The Guruswami–Sudan list decoder for Reed–Solomon codes.
///
/// Decoding interpolates the received points with a bivariate polynomial `Q`
/// of bounded weighted degree, then collects the y-roots of `Q` of degree
/// less than `k`. Every information polynomial whose codeword agrees with the
/// received word in at least `min_agreement_count` positions is among them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GsDecoder<B = KotterBuilder, F = RothRuckensteinFactorisator> {
    builder: B,
    factorisator: F,
    max_multiplicity: u32,
}

impl Default for GsDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl GsDecoder {
    /// A decoder using [Kötter's algorithm](KotterBuilder) and the
    /// [Roth–Ruckenstein algorithm](RothRuckensteinFactorisator).
    pub fn new() -> Self {
        Self::with_parts(KotterBuilder::new(), RothRuckensteinFactorisator::new())
    }
}

impl<B, F> GsDecoder<B, F>
where
    B: InterpolationPolynomialBuilder,
    F: InterpolationPolynomialFactorisator,
{
    /// The multiplicity limit is taken from the
    /// [configuration](config::set_max_multiplicity) of the current thread.
    pub fn with_parts(builder: B, factorisator: F) -> Self {
        Self {
            builder,
            factorisator,
            max_multiplicity: config::max_multiplicity(),
        }
    }

    #[must_use]
    pub fn with_max_multiplicity(mut self, max_multiplicity: u32) -> Self {
        self.max_multiplicity = max_multiplicity.max(1);
        self
    }

    pub fn max_multiplicity(&self) -> u32 {
        self.max_multiplicity
    }

    /// All polynomials of degree less than `k` whose evaluations agree with
    /// the `n` received points in at least `min_agreement_count` positions.
    ///
    /// # Errors
    ///
    /// Fails on invalid arguments, if no suitable parameters exist (see
    /// [`GsParameters::select`]), or if interpolation fails.
    #[instrument(name = "GsDecoder::decode", level = "debug", skip_all, fields(
        n = n,
        k = k,
        min_agreement_count = min_agreement_count,
    ))]
    pub fn decode<'f>(
        &self,
        n: usize,
        k: usize,
        received: &[Root<'f>],
        min_agreement_count: usize,
    ) -> Result<Vec<Polynomial<'f>>, DecodingError> {
        if received.len() != n {
            return Err(DecodingError::WordLength {
                expected: n,
                actual: received.len(),
            });
        }
        let parameters =
            GsParameters::select_with_limit(n, k, min_agreement_count, self.max_multiplicity)?;
        debug!(?parameters, "selected interpolation parameters");

        let field = received[0].0.field();
        let all_in_field = received
            .iter()
            .all(|(x, y)| x.belongs_to(field) && y.belongs_to(field));
        if !all_in_field {
            return Err(DecodingError::FieldMismatch);
        }

        let interpolation_polynomial = self.builder.build(
            parameters.degree_weight,
            parameters.max_weighted_degree,
            received,
            parameters.roots_multiplicity,
        )?;
        let y_roots = self.factorisator.factor(&interpolation_polynomial, k - 1)?;
        let num_y_roots = y_roots.len();

        let candidates = y_roots
            .into_iter()
            .filter(|f| agreement(received, f) >= min_agreement_count)
            .collect_vec();
        debug!(
            num_y_roots,
            num_candidates = candidates.len(),
            "decoding complete"
        );

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;
    use crate::decoding::encoder::encode;
    use crate::decoding::interpolation::LinearSystemBuilder;
    use crate::math::galois_field::GaloisField;

    fn gf8() -> GaloisField {
        GaloisField::prime_power(8, &[1, 1, 0, 1]).unwrap()
    }

    /// Add one to the value at each of the given positions.
    fn add_noise<'f>(codeword: &mut [Root<'f>], positions: &[usize]) {
        for &position in positions {
            let (_, y) = &mut codeword[position];
            let one = y.field().one();
            *y += one;
        }
    }

    #[test]
    fn parameters_for_gf9_example() {
        let parameters = GsParameters::select_with_limit(8, 5, 6, 16).unwrap();
        assert_eq!(DegreeWeight::new(1, 4), parameters.degree_weight);
        assert_eq!(3, parameters.roots_multiplicity);
        assert_eq!(17, parameters.max_weighted_degree);
    }

    #[test]
    fn information_length_one_uses_unit_weight() {
        let parameters = GsParameters::select_with_limit(5, 1, 3, 16).unwrap();
        assert_eq!(DegreeWeight::new(1, 1), parameters.degree_weight);
    }

    #[test]
    fn agreement_below_johnson_bound_is_rejected() {
        let expected = DecodingError::AgreementTooLow {
            n: 7,
            k: 3,
            min_agreement: 3,
        };
        assert_eq!(Err(expected), GsParameters::select_with_limit(7, 3, 3, 16));
    }

    #[test]
    fn too_low_multiplicity_limit_is_reported() {
        let expected = DecodingError::MultiplicityLimitExceeded {
            max_multiplicity: 3,
        };
        assert_eq!(Err(expected), GsParameters::select_with_limit(7, 3, 4, 3));
    }

    #[test]
    fn invalid_lengths_are_rejected() {
        assert_eq!(
            Err(DecodingError::InvalidInformationLength { n: 4, k: 0 }),
            GsParameters::select_with_limit(4, 0, 3, 16)
        );
        assert_eq!(
            Err(DecodingError::InvalidInformationLength { n: 4, k: 5 }),
            GsParameters::select_with_limit(4, 5, 3, 16)
        );
        assert_eq!(
            Err(DecodingError::InvalidAgreement {
                n: 4,
                min_agreement: 5
            }),
            GsParameters::select_with_limit(4, 2, 5, 16)
        );
    }

    #[proptest(cases = 50)]
    fn selected_parameters_admit_an_interpolation_polynomial(
        #[strategy(1_usize..12)] n: usize,
        #[strategy(1_usize..=#n)] k: usize,
        #[strategy(1_usize..=#n)] min_agreement: usize,
    ) {
        let Ok(parameters) = GsParameters::select_with_limit(n, k, min_agreement, 16) else {
            return Ok(());
        };

        let GsParameters {
            degree_weight,
            roots_multiplicity: m,
            max_weighted_degree,
        } = parameters;
        let num_conditions = (n as u64) * u64::from(m) * u64::from(m + 1) / 2;
        prop_assert!(degree_weight.count_monomials_up_to(max_weighted_degree) > num_conditions);
        prop_assert_eq!(min_agreement as u32 * m - 1, max_weighted_degree);
    }

    #[test]
    fn wrong_word_length_is_rejected() {
        let field = gf8();
        let information_polynomial = Polynomial::from_values(&field, &[1, 2, 3]);
        let codeword = encode(&field, 6, &information_polynomial).unwrap();
        let expected = DecodingError::WordLength {
            expected: 7,
            actual: 6,
        };
        assert_eq!(Err(expected), GsDecoder::new().decode(7, 3, &codeword, 4));
    }

    #[test]
    fn mixed_fields_are_rejected() {
        let gf8 = gf8();
        let gf9 = GaloisField::prime_power(9, &[1, 0, 1]).unwrap();
        let mut received = vec![(gf8.one(), gf8.one()); 3];
        received.push((gf9.one(), gf9.one()));
        assert_eq!(
            Err(DecodingError::FieldMismatch),
            GsDecoder::new().decode(4, 1, &received, 4)
        );
    }

    #[test]
    fn decoding_with_three_errors_in_gf8() {
        let field = gf8();
        let information_polynomial = Polynomial::from_values(&field, &[1, 2, 3]);
        let mut received = encode(&field, 7, &information_polynomial).unwrap();
        add_noise(&mut received, &[2, 3, 6]);

        let candidates = GsDecoder::new().decode(7, 3, &received, 4).unwrap();
        assert!(candidates.contains(&information_polynomial));
        assert!(candidates.iter().all(|f| agreement(&received, f) >= 4));
    }

    #[test]
    fn decoders_with_different_builders_agree() {
        let field = gf8();
        let information_polynomial = Polynomial::from_values(&field, &[7, 4, 1]);
        let mut received = encode(&field, 7, &information_polynomial).unwrap();
        add_noise(&mut received, &[0, 1, 5]);

        let kotter = GsDecoder::new().decode(7, 3, &received, 4).unwrap();
        let linear_system =
            GsDecoder::with_parts(LinearSystemBuilder::new(), RothRuckensteinFactorisator::new())
                .decode(7, 3, &received, 4)
                .unwrap();

        assert!(kotter.contains(&information_polynomial));
        assert_eq!(kotter.len(), linear_system.len());
        assert!(kotter.iter().all(|f| linear_system.contains(f)));
    }

    #[test]
    fn multiplicity_limit_can_be_lowered() {
        let decoder = GsDecoder::new().with_max_multiplicity(0);
        assert_eq!(1, decoder.max_multiplicity());

        let field = gf8();
        let information_polynomial = Polynomial::from_values(&field, &[1, 2, 3]);
        let received = encode(&field, 7, &information_polynomial).unwrap();
        let expected = DecodingError::MultiplicityLimitExceeded {
            max_multiplicity: 1,
        };
        assert_eq!(Err(expected), decoder.decode(7, 3, &received, 4));
    }
}
