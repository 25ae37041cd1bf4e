use std::fmt;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;

use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

use super::field_element::FieldElement;
use crate::error::FieldError;

/// A finite field of order `p^e`.
///
/// Elements are identified by integers in `[0, order)`. For prime-power
/// fields, the integer `Σ c_i·p^i` stands for the residue `Σ c_i·x^i` modulo
/// the field's irreducible modulus. Multiplication goes through discrete
/// logarithm tables with respect to a fixed primitive element, which are
/// computed once when the field is constructed.
///
/// Fields are immutable. [Elements](FieldElement) borrow the field they belong
/// to, so a field must outlive every element, polynomial, and decoder result
/// built on top of it.
#[derive(Clone, Serialize, Deserialize)]
#[serde(into = "FieldDescription", try_from = "FieldDescription")]
pub struct GaloisField {
    order: u32,
    characteristic: u32,
    extension_degree: u32,

    /// Monic modulus, lowest degree first. Empty for prime fields.
    modulus: Vec<u32>,

    /// `powers[i]` is the `i`-th power of the generating element.
    powers: Vec<u32>,

    /// `logarithms[v]` is the discrete logarithm of the non-zero element `v`.
    logarithms: Vec<u32>,
}

/// The serialized form of a [`GaloisField`]. The lookup tables are
/// recomputed, and the modulus re-validated, on deserialization.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
struct FieldDescription {
    order: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    modulus: Vec<u32>,
}

impl From<GaloisField> for FieldDescription {
    fn from(field: GaloisField) -> Self {
        Self {
            order: field.order,
            modulus: field.modulus,
        }
    }
}

impl TryFrom<FieldDescription> for GaloisField {
    type Error = FieldError;

    fn try_from(description: FieldDescription) -> Result<Self, Self::Error> {
        if description.modulus.is_empty() {
            Self::prime(description.order)
        } else {
            Self::prime_power(description.order, &description.modulus)
        }
    }
}

impl GaloisField {
    /// The largest supported field order. Keeps the lookup tables small.
    pub const MAX_ORDER: u32 = 1 << 16;

    /// The prime field GF(p).
    ///
    /// # Examples
    ///
    /// ```
    /// # use gs_list_decoder::prelude::*;
    /// let gf7 = GaloisField::prime(7).unwrap();
    /// assert_eq!(gf7.element(3) * gf7.element(5), gf7.element(1));
    /// ```
    pub fn prime(p: u32) -> Result<Self, FieldError> {
        if p > Self::MAX_ORDER {
            return Err(FieldError::OrderTooLarge {
                order: p,
                max: Self::MAX_ORDER,
            });
        }
        if !is_prime(p) {
            return Err(FieldError::NotPrime(p));
        }

        Self::with_tables(p, p, 1, vec![])
    }

    /// The field GF(p^e), represented as GF(p)\[x\] modulo `modulus`.
    ///
    /// The coefficients of `modulus` are given lowest degree first and must
    /// be elements of GF(p). The modulus must have degree `e` and be
    /// irreducible over GF(p); it is scaled to be monic.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gs_list_decoder::prelude::*;
    /// // GF(8) = GF(2)[x] / (x³ + x + 1)
    /// let gf8 = GaloisField::prime_power(8, &[1, 1, 0, 1]).unwrap();
    /// assert_eq!(2, gf8.characteristic());
    ///
    /// // x² + 1 = (x + 1)² over GF(2)
    /// assert!(GaloisField::prime_power(4, &[1, 0, 1]).is_err());
    /// ```
    pub fn prime_power(order: u32, modulus: &[u32]) -> Result<Self, FieldError> {
        if order > Self::MAX_ORDER {
            return Err(FieldError::OrderTooLarge {
                order,
                max: Self::MAX_ORDER,
            });
        }
        let (characteristic, extension_degree) =
            prime_power_decomposition(order).ok_or(FieldError::NotPrimePower(order))?;
        if extension_degree == 1 {
            return Self::prime(order);
        }

        let modulus = gfp::trim(modulus.to_vec());
        let expected_degree = extension_degree as usize;
        if gfp::degree(&modulus) != expected_degree as isize {
            return Err(FieldError::InvalidModulusDegree {
                expected: expected_degree,
                actual: gfp::degree(&modulus),
            });
        }
        if let Some(&coefficient) = modulus.iter().find(|&&c| c >= characteristic) {
            return Err(FieldError::InvalidModulusCoefficient {
                coefficient,
                characteristic,
            });
        }
        if gfp::is_reducible(&modulus, characteristic) {
            return Err(FieldError::ReducibleModulus { characteristic });
        }

        let monic_modulus = gfp::make_monic(modulus, characteristic);
        Self::with_tables(order, characteristic, extension_degree, monic_modulus)
    }

    fn with_tables(
        order: u32,
        characteristic: u32,
        extension_degree: u32,
        modulus: Vec<u32>,
    ) -> Result<Self, FieldError> {
        let mut field = Self {
            order,
            characteristic,
            extension_degree,
            modulus,
            powers: vec![],
            logarithms: vec![],
        };

        // A primitive element exists exactly when the quotient ring is a field.
        let powers = (1..order)
            .find_map(|candidate| field.cyclic_group(candidate))
            .ok_or(FieldError::ReducibleModulus { characteristic })?;

        let mut logarithms = vec![0; order as usize];
        for (logarithm, &power) in (0..).zip(&powers) {
            logarithms[power as usize] = logarithm;
        }

        field.powers = powers;
        field.logarithms = logarithms;
        Ok(field)
    }

    /// All powers of `candidate`, if `candidate` generates the multiplicative
    /// group.
    fn cyclic_group(&self, candidate: u32) -> Option<Vec<u32>> {
        let group_order = (self.order - 1) as usize;
        let mut powers = Vec::with_capacity(group_order);
        let mut power = 1;
        for _ in 0..group_order {
            powers.push(power);
            power = self.multiply_by_reduction(power, candidate);
            if power <= 1 {
                break;
            }
        }

        (power == 1 && powers.len() == group_order).then_some(powers)
    }

    /// Multiplication without lookup tables.
    fn multiply_by_reduction(&self, lhs: u32, rhs: u32) -> u32 {
        let p = self.characteristic;
        if self.extension_degree == 1 {
            return (u64::from(lhs) * u64::from(rhs) % u64::from(p)) as u32;
        }

        let degree = self.extension_degree as usize;
        let product = gfp::multiply(&self.to_digits(lhs), &self.to_digits(rhs), p);
        let remainder = gfp::remainder(product, &self.modulus, p);
        self.from_digits(&remainder[..degree.min(remainder.len())])
    }

    fn to_digits(&self, mut value: u32) -> Vec<u32> {
        let p = self.characteristic;
        let mut digits = Vec::with_capacity(self.extension_degree as usize);
        for _ in 0..self.extension_degree {
            digits.push(value % p);
            value /= p;
        }
        digits
    }

    fn from_digits(&self, digits: &[u32]) -> u32 {
        let p = self.characteristic;
        digits.iter().rev().fold(0, |acc, &digit| acc * p + digit)
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn characteristic(&self) -> u32 {
        self.characteristic
    }

    pub fn extension_degree(&self) -> u32 {
        self.extension_degree
    }

    /// The monic irreducible modulus, lowest degree first. Empty for prime
    /// fields.
    pub fn modulus(&self) -> &[u32] {
        &self.modulus
    }

    pub fn is_prime_field(&self) -> bool {
        self.extension_degree == 1
    }

    pub fn zero(&self) -> FieldElement<'_> {
        FieldElement::new_unchecked(0, self)
    }

    pub fn one(&self) -> FieldElement<'_> {
        FieldElement::new_unchecked(1, self)
    }

    /// The element with the given representation.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not smaller than the field's order. See
    /// [`try_element`](Self::try_element) for a non-panicking alternative.
    pub fn element(&self, value: u32) -> FieldElement<'_> {
        assert!(
            value < self.order,
            "value {value} is not an element of {self}"
        );
        FieldElement::new_unchecked(value, self)
    }

    pub fn try_element(&self, value: u32) -> Result<FieldElement<'_>, FieldError> {
        if value >= self.order {
            return Err(FieldError::ValueOutOfRange {
                value,
                order: self.order,
            });
        }
        Ok(FieldElement::new_unchecked(value, self))
    }

    /// All elements of the field, in order of their representation.
    pub fn elements(&self) -> impl Iterator<Item = FieldElement<'_>> {
        (0..self.order).map(|value| FieldElement::new_unchecked(value, self))
    }

    /// The fixed primitive element whose powers enumerate the non-zero
    /// elements. It is the primitive element with the smallest representation.
    pub fn generating_element(&self) -> FieldElement<'_> {
        self.generating_element_power(1)
    }

    /// The `exponent`-th power of the [generating element](Self::generating_element).
    pub fn generating_element_power(&self, exponent: usize) -> FieldElement<'_> {
        let value = self.powers[exponent % self.powers.len()];
        FieldElement::new_unchecked(value, self)
    }

    /// An element sampled uniformly at random.
    pub fn random_element<R: Rng + ?Sized>(&self, rng: &mut R) -> FieldElement<'_> {
        FieldElement::new_unchecked(rng.random_range(0..self.order), self)
    }

    pub(crate) fn add_values(&self, lhs: u32, rhs: u32) -> u32 {
        let p = self.characteristic;
        if p == 2 {
            return lhs ^ rhs;
        }
        if self.extension_degree == 1 {
            return (lhs + rhs) % p;
        }

        let (mut lhs, mut rhs) = (lhs, rhs);
        let mut sum = 0;
        let mut place = 1;
        for _ in 0..self.extension_degree {
            sum += (lhs % p + rhs % p) % p * place;
            lhs /= p;
            rhs /= p;
            place *= p;
        }
        sum
    }

    pub(crate) fn negate_value(&self, value: u32) -> u32 {
        let p = self.characteristic;
        if p == 2 {
            return value;
        }
        if self.extension_degree == 1 {
            return (p - value) % p;
        }

        let mut value = value;
        let mut negation = 0;
        let mut place = 1;
        for _ in 0..self.extension_degree {
            negation += (p - value % p) % p * place;
            value /= p;
            place *= p;
        }
        negation
    }

    pub(crate) fn multiply_values(&self, lhs: u32, rhs: u32) -> u32 {
        if lhs == 0 || rhs == 0 {
            return 0;
        }

        let group_order = self.powers.len();
        let logarithm_sum =
            self.logarithms[lhs as usize] as usize + self.logarithms[rhs as usize] as usize;
        self.powers[logarithm_sum % group_order]
    }

    /// The multiplicative inverse of a non-zero value.
    pub(crate) fn invert_value(&self, value: u32) -> Option<u32> {
        if value == 0 {
            return None;
        }

        let group_order = self.powers.len();
        let logarithm = self.logarithms[value as usize] as usize;
        Some(self.powers[(group_order - logarithm) % group_order])
    }

    pub(crate) fn pow_value(&self, value: u32, exponent: u64) -> u32 {
        if exponent == 0 {
            return 1;
        }
        if value == 0 {
            return 0;
        }

        let group_order = self.powers.len() as u64;
        let logarithm = u64::from(self.logarithms[value as usize]);
        let reduced = logarithm * (exponent % group_order) % group_order;
        self.powers[reduced as usize]
    }
}

// Lookup tables are fully determined by order and modulus.
impl PartialEq for GaloisField {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order && self.modulus == other.modulus
    }
}

impl Eq for GaloisField {}

impl Hash for GaloisField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.order.hash(state);
        self.modulus.hash(state);
    }
}

impl fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaloisField")
            .field("order", &self.order)
            .field("modulus", &self.modulus)
            .finish()
    }
}

impl fmt::Display for GaloisField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "GF({})", self.order)
    }
}

fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

/// `Some((p, e))` if `n = p^e` for a prime `p` and `e ≥ 1`.
fn prime_power_decomposition(n: u32) -> Option<(u32, u32)> {
    if n < 2 {
        return None;
    }

    let p = (2..=n).find(|d| n % d == 0)?;
    let mut remaining = n;
    let mut exponent = 0;
    while remaining % p == 0 {
        remaining /= p;
        exponent += 1;
    }

    (remaining == 1).then_some((p, exponent))
}

/// Dense polynomial arithmetic over GF(p) on plain coefficient vectors, lowest
/// degree first. Only used to set up extension fields.
mod gfp {
    pub(super) fn trim(mut coefficients: Vec<u32>) -> Vec<u32> {
        while coefficients.last() == Some(&0) {
            coefficients.pop();
        }
        coefficients
    }

    pub(super) fn degree(coefficients: &[u32]) -> isize {
        coefficients.iter().rposition(|&c| c != 0).map_or(-1, |d| d as isize)
    }

    fn inverse(value: u32, p: u32) -> u32 {
        // Fermat's little theorem
        let (mut base, mut exponent, mut acc) = (u64::from(value), p - 2, 1_u64);
        let p = u64::from(p);
        while exponent > 0 {
            if exponent & 1 == 1 {
                acc = acc * base % p;
            }
            base = base * base % p;
            exponent >>= 1;
        }
        acc as u32
    }

    pub(super) fn make_monic(coefficients: Vec<u32>, p: u32) -> Vec<u32> {
        let Some(&leading) = coefficients.last() else {
            return coefficients;
        };
        let leading_inverse = u64::from(inverse(leading, p));
        coefficients
            .into_iter()
            .map(|c| (u64::from(c) * leading_inverse % u64::from(p)) as u32)
            .collect()
    }

    pub(super) fn multiply(lhs: &[u32], rhs: &[u32], p: u32) -> Vec<u32> {
        if lhs.is_empty() || rhs.is_empty() {
            return vec![];
        }

        let p = u64::from(p);
        let mut product = vec![0_u64; lhs.len() + rhs.len() - 1];
        for (i, &l) in lhs.iter().enumerate() {
            for (j, &r) in rhs.iter().enumerate() {
                product[i + j] = (product[i + j] + u64::from(l) * u64::from(r)) % p;
            }
        }
        product.into_iter().map(|c| c as u32).collect()
    }

    /// Remainder of the division of `dividend` by a non-zero `divisor`.
    pub(super) fn remainder(mut dividend: Vec<u32>, divisor: &[u32], p: u32) -> Vec<u32> {
        let divisor_degree = degree(divisor);
        debug_assert!(divisor_degree >= 0, "divisor must be non-zero");
        let divisor_degree = divisor_degree as usize;
        let leading_inverse = u64::from(inverse(divisor[divisor_degree], p));
        let p64 = u64::from(p);

        while let Ok(dividend_degree) = usize::try_from(degree(&dividend)) {
            if dividend_degree < divisor_degree {
                break;
            }
            let factor = u64::from(dividend[dividend_degree]) * leading_inverse % p64;
            let shift = dividend_degree - divisor_degree;
            for (i, &d) in divisor.iter().enumerate().take(divisor_degree + 1) {
                let subtrahend = factor * u64::from(d) % p64;
                let entry = &mut dividend[shift + i];
                *entry = ((u64::from(*entry) + p64 - subtrahend) % p64) as u32;
            }
        }

        trim(dividend)
    }

    /// Trial division by every monic polynomial of degree at most half the
    /// degree of `polynomial`.
    pub(super) fn is_reducible(polynomial: &[u32], p: u32) -> bool {
        let max_factor_degree = degree(polynomial) / 2;
        for factor_degree in 1..=max_factor_degree as u32 {
            let lower_coefficient_count = p.pow(factor_degree);
            for lower in 0..lower_coefficient_count {
                let mut factor = Vec::with_capacity(factor_degree as usize + 1);
                let mut rest = lower;
                for _ in 0..factor_degree {
                    factor.push(rest % p);
                    rest /= p;
                }
                factor.push(1);

                if remainder(polynomial.to_vec(), &factor, p).is_empty() {
                    return true;
                }
            }
        }

        false
    }
}
