use itertools::Itertools;
use tracing::debug;
use tracing::instrument;
use tracing::trace;

use super::InterpolationPolynomialBuilder;
use super::Root;
use super::validate_arguments;
use crate::error::InterpolationError;
use crate::math::bivariate_polynomial::BivariatePolynomial;
use crate::math::bivariate_polynomial::DegreeWeight;
use crate::math::bivariate_polynomial::Monomial;
use crate::math::bivariate_polynomial::MonomialOrder;
use crate::math::combinations::CombinationsCache;
use crate::math::combinations::CombinationsCountCalculator;
use crate::math::combinations::PascalsTriangleCalculator;

/// Kötter's iterative interpolation algorithm.
///
/// Maintains one candidate polynomial per y-degree `0..=D/w_y`, starting
/// with `y^i`. Every condition `D_(r,s) Q (x0, y0) = 0` is imposed in turn:
/// the candidate of smallest lead monomial among those violating the
/// condition becomes the pivot, is used to fix all other violating
/// candidates, and is then multiplied by `(x - x0)`. After all conditions,
/// the candidate of smallest lead monomial is the interpolation polynomial.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct KotterBuilder<C = PascalsTriangleCalculator> {
    calculator: C,
}

impl KotterBuilder {
    pub const fn new() -> Self {
        Self {
            calculator: PascalsTriangleCalculator,
        }
    }
}

impl<C: CombinationsCountCalculator> KotterBuilder<C> {
    pub const fn with_calculator(calculator: C) -> Self {
        Self { calculator }
    }
}

impl<C: CombinationsCountCalculator> InterpolationPolynomialBuilder for KotterBuilder<C> {
    #[instrument(name = "KotterBuilder::build", level = "debug", skip_all, fields(
        num_roots = roots.len(),
        max_weighted_degree = max_weighted_degree,
        roots_multiplicity = roots_multiplicity,
    ))]
    fn build<'f>(
        &self,
        degree_weight: DegreeWeight,
        max_weighted_degree: u32,
        roots: &[Root<'f>],
        roots_multiplicity: u32,
    ) -> Result<BivariatePolynomial<'f>, InterpolationError> {
        let field = validate_arguments(degree_weight, roots, roots_multiplicity)?;
        let no_polynomial = InterpolationError::NoNonTrivialPolynomial {
            max_weighted_degree,
        };

        let order = MonomialOrder::new(degree_weight);
        let bound = u64::from(max_weighted_degree);
        let within_bound = |lead: Monomial| degree_weight.weighted_degree(lead) <= bound;

        let max_x_degree = max_weighted_degree / degree_weight.x;
        let max_y_degree = max_weighted_degree / degree_weight.y;
        let mut cache = CombinationsCache::new(max_x_degree.max(max_y_degree) as usize + 1);

        // The lead monomials are tracked alongside the candidates. Elimination
        // only subtracts multiples of candidates with smaller lead monomial,
        // and multiplication by `(x - x0)` increments the lead's x-degree.
        let mut lead_monomials = (0..=max_y_degree)
            .map(|y_degree| Monomial::new(0, y_degree))
            .collect_vec();
        let mut candidates = lead_monomials
            .iter()
            .map(|&lead| BivariatePolynomial::monomial(field, lead))
            .collect_vec();

        for (root_index, &(x0, y0)) in roots.iter().enumerate() {
            trace!(root_index, %x0, %y0, "imposing conditions of root");
            for r in 0..roots_multiplicity {
                for s in 0..roots_multiplicity - r {
                    let eligible = (0..candidates.len())
                        .filter(|&i| within_bound(lead_monomials[i]))
                        .collect_vec();
                    if eligible.is_empty() {
                        return Err(no_polynomial);
                    }

                    let non_zero_derivatives = eligible
                        .into_iter()
                        .map(|i| {
                            let derivative = candidates[i].hasse_derivative(
                                r,
                                s,
                                x0,
                                y0,
                                &self.calculator,
                                &mut cache,
                            );
                            (i, derivative)
                        })
                        .filter(|(_, derivative)| !derivative.is_zero())
                        .collect_vec();

                    let Some(&(pivot_index, pivot_derivative)) = non_zero_derivatives
                        .iter()
                        .min_by(|(lhs, _), (rhs, _)| {
                            order.compare(&lead_monomials[*lhs], &lead_monomials[*rhs])
                        })
                    else {
                        continue;
                    };

                    let pivot = candidates[pivot_index].clone();
                    for &(i, derivative) in &non_zero_derivatives {
                        if i != pivot_index {
                            candidates[i].subtract_scaled(derivative / pivot_derivative, &pivot);
                        }
                    }

                    let multiplier = BivariatePolynomial::from_terms(
                        field,
                        [
                            (Monomial::new(1, 0), pivot_derivative),
                            (Monomial::new(0, 0), -(pivot_derivative * x0)),
                        ],
                    );
                    candidates[pivot_index] = &pivot * &multiplier;
                    lead_monomials[pivot_index] = lead_monomials[pivot_index].times_x();
                }
            }
        }

        let Some((result_index, &lead)) = lead_monomials
            .iter()
            .enumerate()
            .min_by(|(_, lhs), (_, rhs)| order.compare(lhs, rhs))
        else {
            return Err(no_polynomial);
        };
        if !within_bound(lead) {
            return Err(no_polynomial);
        }

        let polynomial = candidates.swap_remove(result_index).into_monic(&order);
        debug!(%lead, num_terms = polynomial.num_terms(), "found interpolation polynomial");

        Ok(polynomial)
    }
}
