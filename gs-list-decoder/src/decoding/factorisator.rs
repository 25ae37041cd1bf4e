//! Extraction of the y-roots of an interpolation polynomial.

use itertools::Itertools;
use num_traits::Zero;
use tracing::debug;
use tracing::instrument;

use crate::error::FactorisationError;
use crate::math::bivariate_polynomial::BivariatePolynomial;
use crate::math::bivariate_polynomial::Monomial;
use crate::math::combinations::CombinationsCache;
use crate::math::combinations::CombinationsCountCalculator;
use crate::math::combinations::PascalsTriangleCalculator;
use crate::math::field_element::FieldElement;
use crate::math::polynomial::Polynomial;

pub trait InterpolationPolynomialFactorisator {
    /// Every polynomial `f` of degree at most `max_degree` with
    /// `Q(x, f(x)) = 0`, without duplicates and in no particular order.
    ///
    /// # Errors
    ///
    /// Fails if `polynomial` is zero, since every `f` would be a y-root.
    fn factor<'f>(
        &self,
        polynomial: &BivariatePolynomial<'f>,
        max_degree: usize,
    ) -> Result<Vec<Polynomial<'f>>, FactorisationError>;
}

/// The Roth–Ruckenstein algorithm.
///
/// The coefficients of a y-root `f = f_0 + f_1·x + …` are found one at a
/// time. `f_0` must be a root of `Q(0, y)`. Substituting `y ↦ x·y + f_0` and
/// dividing out the largest power of `x` gives a polynomial whose y-roots are
/// exactly `(f - f_0) / x` for the y-roots `f` of `Q` with constant term `f_0`.
/// The search over all branches is depth-first.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct RothRuckensteinFactorisator<C = PascalsTriangleCalculator> {
    calculator: C,
}

impl RothRuckensteinFactorisator {
    pub const fn new() -> Self {
        Self {
            calculator: PascalsTriangleCalculator,
        }
    }
}

impl<C: CombinationsCountCalculator> RothRuckensteinFactorisator<C> {
    pub const fn with_calculator(calculator: C) -> Self {
        Self { calculator }
    }

    /// Compute `Q(x, x·y + shift)`.
    fn shift_and_scale<'f>(
        &self,
        polynomial: &BivariatePolynomial<'f>,
        shift: FieldElement<'f>,
        cache: &mut CombinationsCache<'f>,
    ) -> BivariatePolynomial<'f> {
        let field = polynomial.field();

        // c·x^i·(x·y + γ)^j = Σ_t C(j, t)·γ^(j-t)·c · x^(i+t)·y^t
        let mut terms = vec![];
        for (monomial, coefficient) in polynomial.terms() {
            let Monomial { x_degree, y_degree } = monomial;
            for t in 0..=y_degree {
                let binomial = self
                    .calculator
                    .calculate(field, y_degree.into(), t.into(), cache);
                if binomial.is_zero() {
                    continue;
                }

                let coefficient = coefficient * binomial * shift.mod_pow((y_degree - t).into());
                terms.push((Monomial::new(x_degree + t, t), coefficient));
            }
        }

        BivariatePolynomial::from_terms(field, terms)
    }
}

/// Divide by the largest power of `x` dividing the polynomial.
fn divide_out_x(polynomial: BivariatePolynomial<'_>) -> BivariatePolynomial<'_> {
    let Some(shift) = polynomial.terms().map(|(m, _)| m.x_degree).min() else {
        return polynomial;
    };
    if shift == 0 {
        return polynomial;
    }

    let terms = polynomial
        .terms()
        .map(|(m, c)| (Monomial::new(m.x_degree - shift, m.y_degree), c))
        .collect_vec();
    BivariatePolynomial::from_terms(polynomial.field(), terms)
}

/// `Q(0, y)` as a univariate polynomial in `y`.
fn restrict_to_x_zero<'f>(polynomial: &BivariatePolynomial<'f>) -> Polynomial<'f> {
    let field = polynomial.field();
    let y_degree = polynomial.y_degree().unwrap_or(0) as usize;
    let mut coefficients = vec![field.zero(); y_degree + 1];
    for (monomial, coefficient) in polynomial.terms() {
        if monomial.x_degree == 0 {
            coefficients[monomial.y_degree as usize] = coefficient;
        }
    }

    Polynomial::new(coefficients)
}

impl<C: CombinationsCountCalculator> InterpolationPolynomialFactorisator
    for RothRuckensteinFactorisator<C>
{
    #[instrument(name = "RothRuckensteinFactorisator::factor", level = "debug", skip_all, fields(
        num_terms = polynomial.num_terms(),
        max_degree = max_degree,
    ))]
    fn factor<'f>(
        &self,
        polynomial: &BivariatePolynomial<'f>,
        max_degree: usize,
    ) -> Result<Vec<Polynomial<'f>>, FactorisationError> {
        if polynomial.is_zero() {
            return Err(FactorisationError::ZeroPolynomial);
        }

        let field = polynomial.field();
        let cache_size = polynomial.y_degree().unwrap_or(0) as usize + 1;
        let mut cache = CombinationsCache::new(cache_size);

        // Each stack entry is a reduced polynomial and the coefficients of
        // the y-root found so far.
        let mut stack = vec![(divide_out_x(polynomial.clone()), vec![])];
        let mut y_roots = vec![];
        while let Some((reduced, prefix)) = stack.pop() {
            let at_x_zero = restrict_to_x_zero(&reduced);
            for gamma in field.elements() {
                if !at_x_zero.evaluate(gamma).is_zero() {
                    continue;
                }

                let mut coefficients: Vec<FieldElement<'f>> = prefix.clone();
                coefficients.push(gamma);

                let next = divide_out_x(self.shift_and_scale(&reduced, gamma, &mut cache));
                let y_divides_next = next.terms().all(|(m, _)| m.y_degree > 0);
                if y_divides_next {
                    y_roots.push(Polynomial::new(coefficients.clone()));
                }
                if coefficients.len() <= max_degree {
                    stack.push((next, coefficients));
                }
            }
        }

        let y_roots = y_roots
            .into_iter()
            .unique()
            .filter(|f| polynomial.substitute_y(f).is_zero())
            .collect_vec();
        debug!(num_y_roots = y_roots.len(), "factorisation complete");

        Ok(y_roots)
    }
}
