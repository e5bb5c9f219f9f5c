//! Bit-flip domain generation
//!
//! A domain is encoded to its bit string, every bit is inverted in turn and
//! the results that decode to valid, registrable domains are kept.

pub mod bits;
pub mod generator;

pub use bits::BitString;
pub use generator::{flip_candidates, generate};
