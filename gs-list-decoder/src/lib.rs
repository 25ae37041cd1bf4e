#![deny(clippy::shadow_unrelated)]
//! List decoding of Reed–Solomon codes with the Guruswami–Sudan algorithm.
//!
//! The [decoder](decoding::gs_decoder::GsDecoder) recovers every information
//! polynomial whose codeword agrees with a received word in sufficiently many
//! positions, even beyond half the minimum distance of the code.
//!
//! ```
//! use gs_list_decoder::prelude::*;
//!
//! let gf8 = GaloisField::prime_power(8, &[1, 1, 0, 1]).unwrap();
//! let information_polynomial = Polynomial::from_values(&gf8, &[1, 2, 3]);
//! let mut received = encode(&gf8, 7, &information_polynomial).unwrap();
//! for position in [2, 3, 6] {
//!     received[position].1 += gf8.one();
//! }
//!
//! let candidates = GsDecoder::new().decode(7, 3, &received, 4).unwrap();
//! assert!(candidates.contains(&information_polynomial));
//! ```

pub mod config;
pub mod decoding;
pub mod error;
pub mod math;
pub mod prelude;
