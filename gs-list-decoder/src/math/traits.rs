use crate::error::FieldError;

pub trait Inverse
where
    Self: Sized,
{
    /// The multiplicative inverse: `a * a.inverse() == 1`
    ///
    /// # Panics
    ///
    /// Panics if `self` does not have a multiplicative inverse, that is, when
    /// `self` is zero.
    fn inverse(&self) -> Self;

    /// Like [`inverse`](Self::inverse), but reports inverting zero as an error.
    fn try_inverse(&self) -> Result<Self, FieldError>;
}

pub trait ModPowU64 {
    #[must_use]
    fn mod_pow_u64(&self, pow: u64) -> Self;
}
