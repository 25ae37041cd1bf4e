//! Construction of the bivariate interpolation polynomial `Q(x, y)`.
//!
//! Given roots `(x_i, y_i)`, a multiplicity `m`, and a bound `D` on the
//! weighted degree, a builder finds the polynomial `Q` with
//!
//! - `D_(r,s) Q (x_i, y_i) = 0` for every root and every `r + s < m`, where
//!   `D_(r,s)` is the `(r,s)`-th Hasse derivative, and
//! - the smallest lead monomial under the [weighted order](MonomialOrder)
//!   among all such polynomials of weighted degree at most `D`.
//!
//! This polynomial is unique up to a scalar factor. All builders return it
//! monic, so different builders produce identical results.

pub mod kotter;
pub mod linear_system;

pub use kotter::KotterBuilder;
pub use linear_system::LinearSystemBuilder;

use crate::error::InterpolationError;
use crate::math::bivariate_polynomial::BivariatePolynomial;
use crate::math::bivariate_polynomial::DegreeWeight;
use crate::math::field_element::FieldElement;
use crate::math::galois_field::GaloisField;

/// A point `(x, y)` through which the interpolation polynomial passes.
pub type Root<'f> = (FieldElement<'f>, FieldElement<'f>);

pub trait InterpolationPolynomialBuilder {
    /// Build the monic interpolation polynomial of minimal lead monomial.
    ///
    /// # Errors
    ///
    /// Fails if the roots are empty or span several fields, if a degree
    /// weight is zero, if the multiplicity is zero, or with
    /// [`InterpolationError::NoNonTrivialPolynomial`] if no non-zero
    /// polynomial of weighted degree at most `max_weighted_degree` vanishes
    /// on all roots with the required multiplicity.
    fn build<'f>(
        &self,
        degree_weight: DegreeWeight,
        max_weighted_degree: u32,
        roots: &[Root<'f>],
        roots_multiplicity: u32,
    ) -> Result<BivariatePolynomial<'f>, InterpolationError>;
}

/// Check the arguments common to all builders and return the roots' field.
pub(crate) fn validate_arguments<'f>(
    degree_weight: DegreeWeight,
    roots: &[Root<'f>],
    roots_multiplicity: u32,
) -> Result<&'f GaloisField, InterpolationError> {
    if !degree_weight.is_valid() {
        return Err(InterpolationError::InvalidDegreeWeight {
            x: degree_weight.x,
            y: degree_weight.y,
        });
    }
    if roots_multiplicity == 0 {
        return Err(InterpolationError::ZeroMultiplicity);
    }

    let Some(&(first_x, _)) = roots.first() else {
        return Err(InterpolationError::EmptyRoots);
    };
    let field = first_x.field();
    let all_in_field = roots
        .iter()
        .all(|(x, y)| x.belongs_to(field) && y.belongs_to(field));
    if !all_in_field {
        return Err(InterpolationError::FieldMismatch);
    }

    Ok(field)
}
