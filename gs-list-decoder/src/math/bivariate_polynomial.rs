use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Mul;

use arbitrary::Arbitrary;
use itertools::Itertools;
use num_traits::Zero;
use serde::Deserialize;
use serde::Serialize;

use super::combinations::CombinationsCache;
use super::combinations::CombinationsCountCalculator;
use super::field_element::FieldElement;
use super::galois_field::GaloisField;
use super::polynomial::Polynomial;
use super::traits::Inverse;

/// The monomial `x^x_degree · y^y_degree`.
///
/// The derived [`Ord`] is lexicographic and only used for storage. For the
/// order relevant to interpolation, see [`MonomialOrder`].
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    Arbitrary,
)]
pub struct Monomial {
    pub x_degree: u32,
    pub y_degree: u32,
}

impl Monomial {
    pub const fn new(x_degree: u32, y_degree: u32) -> Self {
        Self { x_degree, y_degree }
    }

    /// Multiply by `x`.
    #[must_use]
    pub const fn times_x(self) -> Self {
        Self::new(self.x_degree + 1, self.y_degree)
    }
}

impl Display for Monomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.x_degree, self.y_degree) {
            (0, 0) => write!(f, "1"),
            (x, 0) => write_power(f, "x", x),
            (0, y) => write_power(f, "y", y),
            (x, y) => {
                write_power(f, "x", x)?;
                write_power(f, "y", y)
            }
        }
    }
}

fn write_power(f: &mut Formatter<'_>, variable: &str, power: u32) -> std::fmt::Result {
    match power {
        1 => write!(f, "{variable}"),
        _ => write!(f, "{variable}^{power}"),
    }
}

/// The weights `(w_x, w_y)` of the two variables. The weighted degree of
/// `x^i · y^j` is `w_x · i + w_y · j`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Arbitrary)]
pub struct DegreeWeight {
    pub x: u32,
    pub y: u32,
}

impl DegreeWeight {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Both weights are positive.
    pub const fn is_valid(&self) -> bool {
        self.x > 0 && self.y > 0
    }

    pub fn weighted_degree(&self, monomial: Monomial) -> u64 {
        u64::from(self.x) * u64::from(monomial.x_degree)
            + u64::from(self.y) * u64::from(monomial.y_degree)
    }

    /// All monomials of weighted degree at most `max_weighted_degree`.
    ///
    /// # Panics
    ///
    /// Panics if the weight is not [valid](Self::is_valid).
    pub fn monomials_up_to(&self, max_weighted_degree: u32) -> impl Iterator<Item = Monomial> {
        assert!(self.is_valid(), "degree weights must be positive: {self:?}");
        let weight = *self;
        (0..=max_weighted_degree / weight.y).flat_map(move |y_degree| {
            let remaining = max_weighted_degree - weight.y * y_degree;
            (0..=remaining / weight.x).map(move |x_degree| Monomial::new(x_degree, y_degree))
        })
    }

    /// The number of monomials of weighted degree at most
    /// `max_weighted_degree`, without enumerating them.
    pub fn count_monomials_up_to(&self, max_weighted_degree: u32) -> u64 {
        assert!(self.is_valid(), "degree weights must be positive: {self:?}");
        (0..=max_weighted_degree / self.y)
            .map(|y_degree| u64::from((max_weighted_degree - self.y * y_degree) / self.x) + 1)
            .sum()
    }
}

/// The weighted monomial order: monomials are compared by weighted degree
/// first; among monomials of equal weighted degree, the one with the lower
/// y-degree is smaller.
///
/// This is a strict total order compatible with multiplication, _i.e._,
/// `a < b` implies `a·c < b·c`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Arbitrary)]
pub struct MonomialOrder {
    weight: DegreeWeight,
}

impl MonomialOrder {
    pub const fn new(weight: DegreeWeight) -> Self {
        Self { weight }
    }

    pub const fn weight(&self) -> DegreeWeight {
        self.weight
    }

    pub fn compare(&self, lhs: &Monomial, rhs: &Monomial) -> Ordering {
        let lhs_weight = self.weight.weighted_degree(*lhs);
        let rhs_weight = self.weight.weighted_degree(*rhs);
        lhs_weight
            .cmp(&rhs_weight)
            .then_with(|| lhs.y_degree.cmp(&rhs.y_degree))
    }

    /// Sort monomials ascending.
    pub fn sort(&self, monomials: &mut [Monomial]) {
        monomials.sort_by(|lhs, rhs| self.compare(lhs, rhs));
    }
}

/// A sparse polynomial in `x` and `y` over a [finite field](GaloisField).
///
/// Only non-zero coefficients are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BivariatePolynomial<'f> {
    field: &'f GaloisField,
    terms: BTreeMap<Monomial, FieldElement<'f>>,
}

impl Display for BivariatePolynomial<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut terms = self.terms.iter().rev().map(|(monomial, coefficient)| {
            match (coefficient.is_one(), *monomial == Monomial::default()) {
                (true, false) => format!("{monomial}"),
                (_, true) => format!("{coefficient}"),
                (false, false) => format!("{coefficient}{monomial}"),
            }
        });
        write!(f, "{}", terms.join(" + "))
    }
}

impl<'f> BivariatePolynomial<'f> {
    pub fn zero(field: &'f GaloisField) -> Self {
        Self {
            field,
            terms: BTreeMap::new(),
        }
    }

    /// Sum up the given terms. Repeated monomials are added.
    ///
    /// # Panics
    ///
    /// Panics if a coefficient does not belong to `field`.
    pub fn from_terms(
        field: &'f GaloisField,
        terms: impl IntoIterator<Item = (Monomial, FieldElement<'f>)>,
    ) -> Self {
        let mut polynomial = Self::zero(field);
        for (monomial, coefficient) in terms {
            let sum = polynomial.coefficient(monomial) + coefficient;
            polynomial.set_coefficient(monomial, sum);
        }

        polynomial
    }

    /// Convenience constructor from `(x_degree, y_degree, value)` triples.
    ///
    /// # Panics
    ///
    /// Panics if any value is not an element of `field`.
    pub fn from_values(field: &'f GaloisField, terms: &[(u32, u32, u32)]) -> Self {
        let terms = terms
            .iter()
            .map(|&(x, y, value)| (Monomial::new(x, y), field.element(value)));
        Self::from_terms(field, terms)
    }

    /// The polynomial `x^x_degree · y^y_degree`.
    pub fn monomial(field: &'f GaloisField, monomial: Monomial) -> Self {
        Self::from_terms(field, [(monomial, field.one())])
    }

    pub fn field(&self) -> &'f GaloisField {
        self.field
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// The coefficient of `monomial`; zero if the term is absent.
    pub fn coefficient(&self, monomial: Monomial) -> FieldElement<'f> {
        self.terms
            .get(&monomial)
            .copied()
            .unwrap_or_else(|| self.field.zero())
    }

    /// Set the coefficient of `monomial`. Setting zero removes the term.
    ///
    /// # Panics
    ///
    /// Panics if `coefficient` is not an element of this polynomial's field.
    pub fn set_coefficient(&mut self, monomial: Monomial, coefficient: FieldElement<'f>) {
        self.assert_field(coefficient);
        if coefficient.is_zero() {
            self.terms.remove(&monomial);
        } else {
            self.terms.insert(monomial, coefficient);
        }
    }

    /// The non-zero terms, in storage order.
    pub fn terms(&self) -> impl Iterator<Item = (Monomial, FieldElement<'f>)> + '_ {
        self.terms.iter().map(|(&m, &c)| (m, c))
    }

    /// The largest power of `x` appearing in any term. `None` for zero.
    pub fn x_degree(&self) -> Option<u32> {
        self.terms.keys().map(|m| m.x_degree).max()
    }

    /// The largest power of `y` appearing in any term. `None` for zero.
    pub fn y_degree(&self) -> Option<u32> {
        self.terms.keys().map(|m| m.y_degree).max()
    }

    /// Compute `self -= scale · other` in place.
    pub fn subtract_scaled(&mut self, scale: FieldElement<'f>, other: &Self) {
        self.assert_field(scale);
        if scale.is_zero() {
            return;
        }

        for (&monomial, &coefficient) in &other.terms {
            let difference = self.coefficient(monomial) - scale * coefficient;
            self.set_coefficient(monomial, difference);
        }
    }

    pub fn scalar_mul(&self, scalar: FieldElement<'f>) -> Self {
        let terms = self.terms().map(|(m, c)| (m, c * scalar));
        Self::from_terms(self.field, terms)
    }

    pub fn multiply(&self, other: &Self) -> Self {
        assert_eq!(
            self.field, other.field,
            "cannot multiply polynomials over different fields"
        );

        let products = self
            .terms()
            .cartesian_product(other.terms().collect_vec())
            .map(|((lhs_monomial, lhs), (rhs_monomial, rhs))| {
                let monomial = Monomial::new(
                    lhs_monomial.x_degree + rhs_monomial.x_degree,
                    lhs_monomial.y_degree + rhs_monomial.y_degree,
                );
                (monomial, lhs * rhs)
            });
        Self::from_terms(self.field, products)
    }

    /// The greatest monomial with non-zero coefficient. `None` for zero.
    pub fn lead_monomial(&self, order: &MonomialOrder) -> Option<Monomial> {
        self.terms.keys().copied().max_by(|l, r| order.compare(l, r))
    }

    pub fn leading_coefficient(&self, order: &MonomialOrder) -> Option<FieldElement<'f>> {
        self.lead_monomial(order).map(|m| self.coefficient(m))
    }

    /// Scale the polynomial such that the coefficient of its lead monomial
    /// is one. The zero polynomial stays zero.
    #[must_use]
    pub fn into_monic(self, order: &MonomialOrder) -> Self {
        match self.leading_coefficient(order) {
            Some(lc) if !lc.is_one() => self.scalar_mul(lc.inverse()),
            _ => self,
        }
    }

    pub fn evaluate(&self, x: FieldElement<'f>, y: FieldElement<'f>) -> FieldElement<'f> {
        self.assert_field(x);
        self.assert_field(y);
        self.terms()
            .map(|(m, c)| c * x.mod_pow(m.x_degree.into()) * y.mod_pow(m.y_degree.into()))
            .fold(self.field.zero(), |acc, term| acc + term)
    }

    /// The univariate polynomial `Q(x, f(x))`.
    pub fn substitute_y(&self, f: &Polynomial<'f>) -> Polynomial<'f> {
        let Some(y_degree) = self.y_degree() else {
            return Polynomial::zero();
        };

        let one = Polynomial::from_constant(self.field.one());
        let powers_of_f = std::iter::successors(Some(one), |power| Some(power.clone() * f.clone()))
            .take(y_degree as usize + 1)
            .collect_vec();

        let mut result = Polynomial::zero();
        for (monomial, coefficient) in self.terms() {
            let term = Polynomial::monomial(coefficient, monomial.x_degree as usize);
            result += term * powers_of_f[monomial.y_degree as usize].clone();
        }

        result
    }

    /// The `(r, s)`-th Hasse derivative evaluated at `(x0, y0)`:
    ///
    /// `Σ_{i ≥ r, j ≥ s} q_{i,j} · C(i, r) · C(j, s) · x0^(i-r) · y0^(j-s)`
    pub fn hasse_derivative<C: CombinationsCountCalculator + ?Sized>(
        &self,
        r: u32,
        s: u32,
        x0: FieldElement<'f>,
        y0: FieldElement<'f>,
        calculator: &C,
        cache: &mut CombinationsCache<'f>,
    ) -> FieldElement<'f> {
        self.assert_field(x0);
        self.assert_field(y0);

        let mut derivative = self.field.zero();
        for (monomial, coefficient) in self.terms() {
            let Monomial { x_degree, y_degree } = monomial;
            if x_degree < r || y_degree < s {
                continue;
            }

            let x_binomial = calculator.calculate(self.field, x_degree.into(), r.into(), cache);
            let y_binomial = calculator.calculate(self.field, y_degree.into(), s.into(), cache);
            if x_binomial.is_zero() || y_binomial.is_zero() {
                continue;
            }

            derivative += coefficient
                * x_binomial
                * y_binomial
                * x0.mod_pow((x_degree - r).into())
                * y0.mod_pow((y_degree - s).into());
        }

        derivative
    }

    fn assert_field(&self, element: FieldElement<'f>) {
        assert!(
            element.belongs_to(self.field),
            "element {element} of {} does not belong to {}",
            element.field(),
            self.field
        );
    }
}

impl<'f> Mul for &BivariatePolynomial<'f> {
    type Output = BivariatePolynomial<'f>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs)
    }
}
