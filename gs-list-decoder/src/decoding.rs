//! The Guruswami–Sudan list decoding pipeline and the interfaces around it.

pub mod batch;
pub mod encoder;
pub mod factorisator;
pub mod gs_decoder;
pub mod interpolation;
pub mod list_decoder;
