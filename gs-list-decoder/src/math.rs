pub mod bivariate_polynomial;
pub mod combinations;
pub mod field_element;
pub mod galois_field;
pub mod linear_system;
pub mod polynomial;
pub mod traits;
