mod conv;
mod document;
mod poly;
mod shamir;
mod share;

use num_bigint::BigInt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The radix is not an integer in [2, 36].
    #[error("invalid base {0:?}, expected an integer between 2 and 36")]
    InvalidBase(String),
    #[error("invalid digit {character:?} at position {position} for base {base}")]
    InvalidDigit {
        base: u32,
        character: char,
        position: usize,
    },
    #[error("empty value for base {base}")]
    EmptyValue { base: u32 },
    /// A non-metadata key that is not a positive integer.
    #[error("malformed share key {key:?}, expected an integer between 1 and 18446744073709551615")]
    MalformedKey { key: String },
    #[error("duplicate share x = {x}")]
    DuplicateX { x: u64 },
    /// A Lagrange denominator evaluated to zero.
    #[error("singular share set, denominator for x = {x} is zero")]
    SingularShareSet { x: u64 },
    #[error("no shares to interpolate")]
    EmptyShareSet,
    #[error("share index {index} out of range for {len} shares")]
    IndexOutOfRange { index: usize, len: usize },
    /// Lagrange terms that had to be truncated, rejected on request.
    #[error("lagrange terms for x = {xs:?} are not integers")]
    InexactTerms { xs: Vec<u64> },
    #[error("invalid threshold parameters: threshold {threshold}, limit {limit}")]
    InvalidThresholdParameters { threshold: u64, limit: u64 },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub use conv::*;
pub use document::*;
pub use poly::*;
pub use shamir::*;
pub use share::*;

/// Parses a JSON share document, decodes every share and returns the value of
/// the interpolated polynomial at x = 0.
pub fn recover_secret(json: &str) -> Result<BigInt, Error> {
    let document = ShareDocument::from_json(json)?;
    let shares = collect(&document)?;
    constant_term(&shares)
}
