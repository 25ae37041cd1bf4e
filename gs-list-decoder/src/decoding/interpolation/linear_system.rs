use itertools::Itertools;
use tracing::debug;
use tracing::instrument;

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
use crate::math::field_element::FieldElement;
use crate::math::galois_field::GaloisField;
use crate::math::linear_system::GaussianEliminationSolver;
use crate::math::linear_system::LinearSystemSolver;

/// Interpolation by solving one homogeneous linear equation per condition
/// `D_(r,s) Q (x0, y0) = 0`.
///
/// The unknowns are the coefficients of all monomials of weighted degree at
/// most `D`, indexed in ascending [monomial order](MonomialOrder). With that
/// indexing, the first vector of the null space basis is the solution with
/// the smallest lead monomial.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct LinearSystemBuilder<C = PascalsTriangleCalculator, S = GaussianEliminationSolver> {
    calculator: C,
    solver: S,
}

impl LinearSystemBuilder {
    pub const fn new() -> Self {
        Self {
            calculator: PascalsTriangleCalculator,
            solver: GaussianEliminationSolver,
        }
    }
}

impl<C, S> LinearSystemBuilder<C, S>
where
    C: CombinationsCountCalculator,
    S: LinearSystemSolver,
{
    pub const fn with_parts(calculator: C, solver: S) -> Self {
        Self { calculator, solver }
    }

    /// The coefficient of the unknown belonging to `monomial` in the equation
    /// `D_(r,s) Q (x0, y0) = 0`.
    fn equation_coefficient<'f>(
        &self,
        field: &'f GaloisField,
        monomial: Monomial,
        (r, s): (u32, u32),
        (x0, y0): Root<'f>,
        cache: &mut CombinationsCache<'f>,
    ) -> FieldElement<'f> {
        let Monomial { x_degree, y_degree } = monomial;
        if x_degree < r || y_degree < s {
            return field.zero();
        }

        let x_binomial = self
            .calculator
            .calculate(field, x_degree.into(), r.into(), cache);
        let y_binomial = self
            .calculator
            .calculate(field, y_degree.into(), s.into(), cache);

        x_binomial
            * y_binomial
            * x0.mod_pow((x_degree - r).into())
            * y0.mod_pow((y_degree - s).into())
    }
}

impl<C, S> InterpolationPolynomialBuilder for LinearSystemBuilder<C, S>
where
    C: CombinationsCountCalculator,
    S: LinearSystemSolver,
{
    #[instrument(name = "LinearSystemBuilder::build", level = "debug", skip_all, fields(
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
        let order = MonomialOrder::new(degree_weight);

        let mut monomials = degree_weight
            .monomials_up_to(max_weighted_degree)
            .collect_vec();
        order.sort(&mut monomials);

        let max_x_degree = max_weighted_degree / degree_weight.x;
        let max_y_degree = max_weighted_degree / degree_weight.y;
        let mut cache = CombinationsCache::new(max_x_degree.max(max_y_degree) as usize + 1);

        let derivative_orders = (0..roots_multiplicity)
            .flat_map(|r| (0..roots_multiplicity - r).map(move |s| (r, s)))
            .collect_vec();
        let mut matrix = vec![];
        for &root in roots {
            for &derivative_order in &derivative_orders {
                let equation = monomials
                    .iter()
                    .map(|&monomial| {
                        self.equation_coefficient(field, monomial, derivative_order, root, &mut cache)
                    })
                    .collect_vec();
                matrix.push(equation);
            }
        }
        debug!(
            num_equations = matrix.len(),
            num_unknowns = monomials.len(),
            "assembled linear system"
        );

        let rhs = vec![field.zero(); matrix.len()];
        let solution = self.solver.solve(&matrix, &rhs)?;
        let Some(minimal_solution) = solution.null_space_basis().first() else {
            return Err(InterpolationError::NoNonTrivialPolynomial {
                max_weighted_degree,
            });
        };

        let terms = monomials.into_iter().zip(minimal_solution.iter().copied());
        let polynomial = BivariatePolynomial::from_terms(field, terms).into_monic(&order);

        Ok(polynomial)
    }
}

#[cfg(test)]
mod tests {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;
    use crate::decoding::interpolation::KotterBuilder;

    #[test]
    fn points_on_a_parabola_give_the_parabola() {
        let field = GaloisField::prime(13).unwrap();
        let parabola = |x: u32| (2 * x * x + 7) % 13;
        let roots = (0..9)
            .map(|x| (field.element(x), field.element(parabola(x))))
            .collect_vec();

        // weight (1, 2), bound 2: the candidates are a + bx + cx^2 + dy
        let polynomial = LinearSystemBuilder::new()
            .build(DegreeWeight::new(1, 2), 2, &roots, 1)
            .unwrap();
        let expected =
            BivariatePolynomial::from_values(&field, &[(0, 1, 1), (2, 0, 11), (0, 0, 6)]);
        assert_eq!(expected, polynomial);
    }

    #[test]
    fn too_tight_bound_is_reported() {
        let field = GaloisField::prime(5).unwrap();
        let roots = [(0, 1), (1, 2), (2, 0), (3, 3)]
            .map(|(x, y)| (field.element(x), field.element(y)));

        // 4 roots with multiplicity 2 give 12 conditions on 6 unknowns
        let result = LinearSystemBuilder::new().build(DegreeWeight::new(1, 1), 2, &roots, 2);
        let expected = InterpolationError::NoNonTrivialPolynomial {
            max_weighted_degree: 2,
        };
        assert_eq!(Err(expected), result);
    }

    #[test]
    fn empty_roots_are_rejected() {
        let result = LinearSystemBuilder::new().build(DegreeWeight::new(1, 1), 2, &[], 1);
        assert_eq!(Err(InterpolationError::EmptyRoots), result);
    }

    #[proptest(cases = 30)]
    fn linear_system_and_kotter_builders_agree(
        #[strategy(vec(0_u32..8, 1..6))] xs: Vec<u32>,
        #[strategy(vec(0_u32..8, #xs.len()))] ys: Vec<u32>,
        #[strategy(1_u32..3)] multiplicity: u32,
        #[strategy(1_u32..4)] y_weight: u32,
        #[strategy(0_u32..4)] slack: u32,
    ) {
        let field = GaloisField::prime_power(8, &[1, 1, 0, 1]).unwrap();
        let roots = xs
            .into_iter()
            .unique()
            .zip(ys)
            .map(|(x, y)| (field.element(x), field.element(y)))
            .collect_vec();
        let weight = DegreeWeight::new(1, y_weight);

        let num_conditions = roots.len() as u32 * multiplicity * (multiplicity + 1) / 2;
        let bound = (0..)
            .find(|&d| weight.count_monomials_up_to(d) > u64::from(num_conditions))
            .unwrap()
            + slack;

        let kotter = KotterBuilder::new().build(weight, bound, &roots, multiplicity);
        let linear_system = LinearSystemBuilder::new().build(weight, bound, &roots, multiplicity);
        prop_assert_eq!(kotter, linear_system);
    }
}
