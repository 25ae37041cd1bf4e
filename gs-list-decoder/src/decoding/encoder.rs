//! Reed–Solomon encoding by evaluation.

use crate::decoding::interpolation::Root;
use crate::error::EncodingError;
use crate::math::galois_field::GaloisField;
use crate::math::polynomial::Polynomial;

/// Evaluate the information polynomial at the first `n` powers of the
/// field's [generating element](GaloisField::generating_element), giving the
/// codeword as `(evaluation point, value)` pairs.
///
/// # Examples
///
/// ```
/// # use gs_list_decoder::prelude::*;
/// let gf8 = GaloisField::prime_power(8, &[1, 1, 0, 1]).unwrap();
/// let information_polynomial = Polynomial::from_values(&gf8, &[1, 2, 3]);
/// let codeword = encode(&gf8, 7, &information_polynomial).unwrap();
///
/// assert_eq!(7, codeword.len());
/// assert_eq!((gf8.one(), gf8.zero()), codeword[0]); // 1 + 2 + 3 = 0 in GF(8)
/// ```
///
/// # Errors
///
/// Fails if `n` exceeds the number of non-zero field elements, since the
/// evaluation points would not be distinct.
pub fn encode<'f>(
    field: &'f GaloisField,
    n: usize,
    information_polynomial: &Polynomial<'f>,
) -> Result<Vec<Root<'f>>, EncodingError> {
    let available = field.order() as usize - 1;
    if n > available {
        return Err(EncodingError::TooManyPositions { n, available });
    }

    let codeword = (0..n)
        .map(|i| field.generating_element_power(i))
        .map(|x| (x, information_polynomial.evaluate(x)))
        .collect();

    Ok(codeword)
}

/// The number of positions in which the received word agrees with the
/// evaluations of `polynomial`.
pub fn agreement(received: &[Root<'_>], polynomial: &Polynomial<'_>) -> usize {
    received
        .iter()
        .filter(|&&(x, y)| polynomial.evaluate(x) == y)
        .count()
}
