use std::fmt;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Div;
use std::ops::Mul;
use std::ops::MulAssign;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;

use super::galois_field::GaloisField;
use super::traits::Inverse;
use super::traits::ModPowU64;
use crate::error::FieldError;

/// An element of a [`GaloisField`].
///
/// The element carries a handle to its field, which serves as the witness for
/// all arithmetic. Combining elements of different fields is a programming
/// error and panics.
#[derive(Copy, Clone)]
pub struct FieldElement<'f> {
    value: u32,
    field: &'f GaloisField,
}

impl<'f> FieldElement<'f> {
    /// Callers guarantee `value < field.order()`.
    pub(crate) const fn new_unchecked(value: u32, field: &'f GaloisField) -> Self {
        Self { value, field }
    }

    /// The element's representation, in `[0, order)`.
    pub const fn value(&self) -> u32 {
        self.value
    }

    pub const fn field(&self) -> &'f GaloisField {
        self.field
    }

    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    pub const fn is_one(&self) -> bool {
        self.value == 1
    }

    /// Whether `self` is an element of `field`.
    pub fn belongs_to(&self, field: &GaloisField) -> bool {
        std::ptr::eq(self.field, field) || self.field == field
    }

    /// Whether `self` and `other` are elements of the same field.
    pub fn shares_field_with(&self, other: &Self) -> bool {
        self.belongs_to(other.field)
    }

    #[must_use]
    pub fn mod_pow(&self, exponent: u64) -> Self {
        Self::new_unchecked(self.field.pow_value(self.value, exponent), self.field)
    }

    #[inline]
    fn assert_same_field(&self, other: &Self) {
        assert!(
            self.shares_field_with(other),
            "cannot combine an element of {} with an element of {}",
            self.field,
            other.field
        );
    }
}

// Equality requires the same field and the same value.
impl PartialEq for FieldElement<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.shares_field_with(other)
    }
}

impl Eq for FieldElement<'_> {}

impl Hash for FieldElement<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.field.order().hash(state);
    }
}

impl fmt::Debug for FieldElement<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({self})")
    }
}

impl fmt::Display for FieldElement<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Inverse for FieldElement<'_> {
    fn inverse(&self) -> Self {
        let inverse = self
            .field
            .invert_value(self.value)
            .unwrap_or_else(|| panic!("Attempted to find the multiplicative inverse of zero."));
        Self::new_unchecked(inverse, self.field)
    }

    fn try_inverse(&self) -> Result<Self, FieldError> {
        let inverse = self
            .field
            .invert_value(self.value)
            .ok_or(FieldError::ZeroInverse)?;
        Ok(Self::new_unchecked(inverse, self.field))
    }
}

impl ModPowU64 for FieldElement<'_> {
    #[inline]
    fn mod_pow_u64(&self, pow: u64) -> Self {
        self.mod_pow(pow)
    }
}

impl<'f> Add for FieldElement<'f> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.assert_same_field(&rhs);
        Self::new_unchecked(self.field.add_values(self.value, rhs.value), self.field)
    }
}

impl<'f> Sub for FieldElement<'f> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl<'f> Neg for FieldElement<'f> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new_unchecked(self.field.negate_value(self.value), self.field)
    }
}

impl<'f> Mul for FieldElement<'f> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.assert_same_field(&rhs);
        Self::new_unchecked(
            self.field.multiply_values(self.value, rhs.value),
            self.field,
        )
    }
}

impl<'f> Div for FieldElement<'f> {
    type Output = Self;

    #[expect(clippy::suspicious_arithmetic_impl)]
    #[inline]
    fn div(self, rhs: Self) -> Self {
        self * rhs.inverse()
    }
}

impl AddAssign for FieldElement<'_> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for FieldElement<'_> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for FieldElement<'_> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    fn gf8() -> GaloisField {
        GaloisField::prime_power(8, &[1, 1, 0, 1]).unwrap()
    }

    fn gf9() -> GaloisField {
        GaloisField::prime_power(9, &[1, 0, 1]).unwrap()
    }

    fn gf11() -> GaloisField {
        GaloisField::prime(11).unwrap()
    }

    #[test]
    fn element_can_be_debug_printed() {
        let field = gf9();
        assert_eq!("FieldElement(5)", format!("{:?}", field.element(5)));
    }

    #[test]
    #[should_panic(expected = "Attempted to find the multiplicative inverse of zero.")]
    fn multiplicative_inverse_of_zero_panics() {
        let field = gf8();
        let _ = field.zero().inverse();
    }

    #[test]
    fn trying_to_invert_zero_gives_error() {
        let field = gf11();
        assert_eq!(Err(FieldError::ZeroInverse), field.zero().try_inverse());
        assert_eq!(Ok(field.element(6)), field.element(2).try_inverse());
    }

    #[test]
    #[should_panic(expected = "cannot combine an element of GF(8) with an element of GF(9)")]
    fn combining_elements_of_different_fields_panics() {
        let (gf8, gf9) = (gf8(), gf9());
        let _ = gf8.one() + gf9.one();
    }

    #[test]
    fn elements_of_structurally_equal_fields_are_compatible() {
        let (field_0, field_1) = (gf9(), gf9());
        assert_eq!(field_0.element(4), field_1.element(4));
        assert_eq!(field_0.element(2), field_0.element(1) + field_1.element(1));
    }

    #[test]
    fn elements_of_different_fields_are_unequal() {
        let (gf8, gf9) = (gf8(), gf9());
        assert_ne!(gf8.element(3), gf9.element(3));
    }

    #[test]
    fn zero_to_the_zero_is_one() {
        let field = gf9();
        assert_eq!(field.one(), field.zero().mod_pow(0));
        assert_eq!(field.zero(), field.zero().mod_pow(5));
    }

    #[proptest]
    fn mod_pow_agrees_with_repeated_multiplication(
        #[strategy(0_u32..9)] value: u32,
        #[strategy(0_u64..30)] exponent: u64,
    ) {
        let field = gf9();
        let element = field.element(value);
        let expected = (0..exponent).fold(field.one(), |acc, _| acc * element);
        prop_assert_eq!(expected, element.mod_pow_u64(exponent));
    }

    #[proptest]
    fn addition_is_commutative(#[strategy(0_u32..8)] a: u32, #[strategy(0_u32..8)] b: u32) {
        let field = gf8();
        let (a, b) = (field.element(a), field.element(b));
        prop_assert_eq!(a + b, b + a);
    }

    #[proptest]
    fn multiplication_is_commutative(#[strategy(0_u32..9)] a: u32, #[strategy(0_u32..9)] b: u32) {
        let field = gf9();
        let (a, b) = (field.element(a), field.element(b));
        prop_assert_eq!(a * b, b * a);
    }

    #[proptest]
    fn multiplication_distributes_over_addition(
        #[strategy(0_u32..9)] a: u32,
        #[strategy(0_u32..9)] b: u32,
        #[strategy(0_u32..9)] c: u32,
    ) {
        let field = gf9();
        let (a, b, c) = (field.element(a), field.element(b), field.element(c));
        prop_assert_eq!(a * (b + c), a * b + a * c);
    }

    #[proptest]
    fn multiplication_is_associative_in_prime_field(
        #[strategy(0_u32..11)] a: u32,
        #[strategy(0_u32..11)] b: u32,
        #[strategy(0_u32..11)] c: u32,
    ) {
        let field = gf11();
        let (a, b, c) = (field.element(a), field.element(b), field.element(c));
        prop_assert_eq!((a * b) * c, a * (b * c));
    }

    #[proptest]
    fn additive_inverse_cancels(#[strategy(0_u32..9)] a: u32) {
        let field = gf9();
        let a = field.element(a);
        prop_assert_eq!(field.zero(), a + -a);
        prop_assert_eq!(field.zero(), a - a);
    }

    #[proptest]
    fn multiplicative_inverse_cancels(#[strategy(1_u32..8)] a: u32) {
        let field = gf8();
        let a = field.element(a);
        prop_assert_eq!(field.one(), a * a.inverse());
        prop_assert_eq!(field.one(), a / a);
    }

    #[proptest]
    fn zero_and_one_are_neutral(#[strategy(0_u32..11)] a: u32) {
        let field = gf11();
        let a = field.element(a);
        prop_assert_eq!(a, a + field.zero());
        prop_assert_eq!(a, a * field.one());
    }

    #[proptest]
    fn assigning_operators_match_binary_operators(
        #[strategy(0_u32..9)] a: u32,
        #[strategy(0_u32..9)] b: u32,
    ) {
        let field = gf9();
        let (a, b) = (field.element(a), field.element(b));

        let mut sum = a;
        sum += b;
        let mut difference = a;
        difference -= b;
        let mut product = a;
        product *= b;

        prop_assert_eq!(a + b, sum);
        prop_assert_eq!(a - b, difference);
        prop_assert_eq!(a * b, product);
    }
}
