use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Div;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Rem;
use std::ops::Sub;

use itertools::EitherOrBoth;
use itertools::Itertools;
use num_traits::Zero;

use super::field_element::FieldElement;
use super::galois_field::GaloisField;
use super::traits::Inverse;

impl Zero for Polynomial<'_> {
    fn zero() -> Self {
        Self {
            coefficients: vec![],
        }
    }

    fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }
}

/// A univariate polynomial over a [finite field](GaloisField), in monomial
/// form.
///
/// The coefficients are kept trimmed: the last coefficient, if any, is
/// non-zero. The zero polynomial has no coefficients and, consequently, no
/// field.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Polynomial<'f> {
    /// The polynomial's coefficients, in order of increasing degree.
    coefficients: Vec<FieldElement<'f>>,
}

impl Debug for Polynomial<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Polynomial")
            .field("coefficients", &self.coefficients)
            .finish()
    }
}

impl Display for Polynomial<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let degree = match self.degree() {
            -1 => return write!(f, "0"),
            d => d as usize,
        };

        for pow in (0..=degree).rev() {
            let coeff = self.coefficients[pow];
            if coeff.is_zero() {
                continue;
            }

            if pow != degree {
                write!(f, " + ")?;
            }
            if !coeff.is_one() || pow == 0 {
                write!(f, "{coeff}")?;
            }
            match pow {
                0 => (),
                1 => write!(f, "x")?,
                _ => write!(f, "x^{pow}")?,
            }
        }

        Ok(())
    }
}

impl<'f> Polynomial<'f> {
    /// The polynomial with the given coefficients, lowest degree first.
    /// Leading zeros are removed.
    pub fn new(mut coefficients: Vec<FieldElement<'f>>) -> Self {
        debug_assert!(
            coefficients
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.shares_field_with(b)),
            "all coefficients must belong to the same field"
        );

        while coefficients.last().is_some_and(FieldElement::is_zero) {
            coefficients.pop();
        }
        Self { coefficients }
    }

    /// The polynomial whose coefficients have the given representations,
    /// lowest degree first.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gs_list_decoder::prelude::*;
    /// let gf8 = GaloisField::prime_power(8, &[1, 1, 0, 1]).unwrap();
    /// let f = Polynomial::from_values(&gf8, &[1, 2, 3]);
    /// assert_eq!(2, f.degree());
    /// assert_eq!("3x^2 + 2x + 1", f.to_string());
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if any value is not an element of `field`.
    pub fn from_values(field: &'f GaloisField, values: &[u32]) -> Self {
        Self::new(values.iter().map(|&v| field.element(v)).collect())
    }

    pub fn from_constant(constant: FieldElement<'f>) -> Self {
        Self::new(vec![constant])
    }

    /// The polynomial `coefficient · x^degree`.
    pub fn monomial(coefficient: FieldElement<'f>, degree: usize) -> Self {
        let mut coefficients = vec![coefficient.field().zero(); degree];
        coefficients.push(coefficient);
        Self::new(coefficients)
    }

    pub fn coefficients(&self) -> &[FieldElement<'f>] {
        &self.coefficients
    }

    /// The coefficient of `x^index`, or `None` if `index` exceeds the degree.
    pub fn coefficient(&self, index: usize) -> Option<FieldElement<'f>> {
        self.coefficients.get(index).copied()
    }

    /// The field of the coefficients. `None` for the zero polynomial.
    pub fn field(&self) -> Option<&'f GaloisField> {
        self.coefficients.first().map(FieldElement::field)
    }

    pub fn degree(&self) -> isize {
        self.coefficients.len() as isize - 1 // -1 for the zero polynomial
    }

    /// The coefficient of the polynomial's term of highest power. `None` if
    /// (and only if) `self` [is zero](Self::is_zero). Is never `Some(0)`.
    pub fn leading_coefficient(&self) -> Option<FieldElement<'f>> {
        self.coefficients.last().copied()
    }

    pub fn evaluate(&self, x: FieldElement<'f>) -> FieldElement<'f> {
        let mut acc = x.field().zero();
        for &c in self.coefficients.iter().rev() {
            acc = c + x * acc;
        }

        acc
    }

    pub fn batch_evaluate(&self, domain: &[FieldElement<'f>]) -> Vec<FieldElement<'f>> {
        domain.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Multiply a polynomial with a scalar, _i.e._, compute `scalar · self(x)`.
    #[must_use]
    pub fn scalar_mul(&self, scalar: FieldElement<'f>) -> Self {
        Self::new(self.coefficients.iter().map(|&c| c * scalar).collect())
    }

    /// Multiply a polynomial with x^power
    #[must_use]
    pub fn shift_coefficients(&self, power: usize) -> Self {
        let Some(field) = self.field() else {
            return Self::zero();
        };

        let mut coefficients = self.coefficients.clone();
        coefficients.splice(0..0, vec![field.zero(); power]);
        Self { coefficients }
    }

    pub fn naive_multiply(&self, other: &Self) -> Self {
        let Ok(degree_lhs) = usize::try_from(self.degree()) else {
            return Self::zero();
        };
        let Ok(degree_rhs) = usize::try_from(other.degree()) else {
            return Self::zero();
        };

        let zero = self.coefficients[0].field().zero();
        let mut product = vec![zero; degree_lhs + degree_rhs + 1];
        for i in 0..=degree_lhs {
            for j in 0..=degree_rhs {
                product[i + j] += self.coefficients[i] * other.coefficients[j];
            }
        }

        Self::new(product)
    }

    /// Return (quotient, remainder).
    ///
    /// # Panics
    ///
    /// Panics if the divisor is zero.
    pub fn naive_divide(&self, divisor: &Self) -> (Self, Self) {
        let divisor_lc_inv = divisor
            .leading_coefficient()
            .unwrap_or_else(|| panic!("divisor should be non-zero"))
            .inverse();

        let Ok(quotient_degree) = usize::try_from(self.degree() - divisor.degree()) else {
            // self.degree() < divisor.degree()
            return (Self::zero(), self.to_owned());
        };

        let zero = divisor_lc_inv.field().zero();
        let divisor_degree = divisor.degree() as usize;
        let mut quotient = vec![zero; quotient_degree + 1];
        let mut remainder = self.coefficients.clone();

        for shift in (0..=quotient_degree).rev() {
            let quotient_coeff = remainder[shift + divisor_degree] * divisor_lc_inv;
            quotient[shift] = quotient_coeff;
            if quotient_coeff.is_zero() {
                continue;
            }

            for (i, &divisor_coeff) in divisor.coefficients.iter().enumerate() {
                remainder[shift + i] -= quotient_coeff * divisor_coeff;
            }
        }

        (Self::new(quotient), Self::new(remainder))
    }
}

impl<'f> Div for Polynomial<'f> {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        let (quotient, _): (Self, Self) = self.naive_divide(&other);
        quotient
    }
}

impl<'f> Rem for Polynomial<'f> {
    type Output = Self;

    fn rem(self, other: Self) -> Self {
        let (_, remainder): (Self, Self) = self.naive_divide(&other);
        remainder
    }
}

impl<'f> Add for Polynomial<'f> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let summed = self
            .coefficients
            .into_iter()
            .zip_longest(other.coefficients)
            .map(|a| match a {
                EitherOrBoth::Both(l, r) => l + r,
                EitherOrBoth::Left(l) => l,
                EitherOrBoth::Right(r) => r,
            })
            .collect();

        Self::new(summed)
    }
}

impl AddAssign for Polynomial<'_> {
    fn add_assign(&mut self, rhs: Self) {
        *self = std::mem::take(&mut self.coefficients)
            .into_iter()
            .zip_longest(rhs.coefficients)
            .map(|a| match a {
                EitherOrBoth::Both(l, r) => l + r,
                EitherOrBoth::Left(l) => l,
                EitherOrBoth::Right(r) => r,
            })
            .collect::<Vec<_>>()
            .into();
    }
}

impl<'f> Sub for Polynomial<'f> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + -other
    }
}

impl<'f> Neg for Polynomial<'f> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        let coefficients = self.coefficients.into_iter().map(|c| -c).collect();
        Self { coefficients }
    }
}

impl<'f> Mul for Polynomial<'f> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.naive_multiply(&other)
    }
}

impl<'f> Mul<FieldElement<'f>> for Polynomial<'f> {
    type Output = Self;

    fn mul(self, scalar: FieldElement<'f>) -> Self {
        self.scalar_mul(scalar)
    }
}

impl<'f> From<Vec<FieldElement<'f>>> for Polynomial<'f> {
    fn from(coefficients: Vec<FieldElement<'f>>) -> Self {
        Self::new(coefficients)
    }
}
