pub use crate::decoding::batch::decode_batch;
pub use crate::decoding::encoder::agreement;
pub use crate::decoding::encoder::encode;
pub use crate::decoding::factorisator::InterpolationPolynomialFactorisator;
pub use crate::decoding::factorisator::RothRuckensteinFactorisator;
pub use crate::decoding::gs_decoder::GsDecoder;
pub use crate::decoding::gs_decoder::GsParameters;
pub use crate::decoding::interpolation::InterpolationPolynomialBuilder;
pub use crate::decoding::interpolation::KotterBuilder;
pub use crate::decoding::interpolation::LinearSystemBuilder;
pub use crate::decoding::interpolation::Root;
pub use crate::decoding::list_decoder::ExhaustiveListDecoder;
pub use crate::decoding::list_decoder::GsListDecoder;
pub use crate::decoding::list_decoder::ListDecoder;
pub use crate::error::DecodingError;
pub use crate::error::FieldError;
pub use crate::error::InterpolationError;
pub use crate::math::bivariate_polynomial::BivariatePolynomial;
pub use crate::math::bivariate_polynomial::DegreeWeight;
pub use crate::math::bivariate_polynomial::Monomial;
pub use crate::math::bivariate_polynomial::MonomialOrder;
pub use crate::math::combinations::CombinationsCache;
pub use crate::math::combinations::CombinationsCountCalculator;
pub use crate::math::combinations::PascalsTriangleCalculator;
pub use crate::math::field_element::FieldElement;
pub use crate::math::galois_field::GaloisField;
pub use crate::math::polynomial::Polynomial;
pub use crate::math::traits::Inverse;
pub use crate::math::traits::ModPowU64;
