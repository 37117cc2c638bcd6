use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use rand::Rng;

use crate::{
    poly::Polynomial,
    share::{DecodedShare, ShareSet},
    Error,
};

/// Bit length of the random non-constant coefficients sampled by the dealer.
pub const COEFFICIENT_BITS: u64 = 64;

/// The secret recovered from a share set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    /// f(0), the sum of every truncated Lagrange term.
    pub secret: BigInt,
    /// x coordinates whose term y[i] * l[i](0) was not an integer.
    pub truncated: Vec<u64>,
}

impl Reconstruction {
    pub fn is_exact(&self) -> bool {
        self.truncated.is_empty()
    }

    /// The secret, or `InexactTerms` when any term was truncated.
    pub fn into_exact(self) -> Result<BigInt, Error> {
        if self.is_exact() {
            Ok(self.secret)
        } else {
            Err(Error::InexactTerms { xs: self.truncated })
        }
    }
}

/// The j-th basis polynomial at X = 0 as a (numerator, denominator) pair
///     l[j](0) = Π (0 - x[i]) / (x[j] - x[i]),  i != j
pub fn lagrange_basis_at_zero(xs: &[u64], j: usize) -> Result<(BigInt, BigInt), Error> {
    let xj = match xs.get(j) {
        Some(&x) => BigInt::from(x),
        None => {
            return Err(Error::IndexOutOfRange {
                index: j,
                len: xs.len(),
            })
        }
    };
    let mut numerator = BigInt::one();
    let mut denominator = BigInt::one();
    for (i, &x) in xs.iter().enumerate() {
        if i != j {
            let xi = BigInt::from(x);
            numerator *= -&xi;
            denominator *= &xj - &xi;
        }
    }
    if denominator.is_zero() {
        return Err(Error::SingularShareSet { x: xs[j] });
    }
    Ok((numerator, denominator))
}

/// Lagrange interpolation at X = 0 over the integers.
///
/// Every term y[j] * l[j](0) is computed with a truncating integer division,
/// the x coordinates of the terms that did not divide evenly are reported.
pub fn interpolate(shares: &ShareSet) -> Result<Reconstruction, Error> {
    if shares.is_empty() {
        return Err(Error::EmptyShareSet);
    }

    let xs = shares.xs();
    let mut secret = BigInt::zero();
    let mut truncated = Vec::new();
    for (j, share) in shares.iter().enumerate() {
        let (numerator, denominator) = lagrange_basis_at_zero(&xs, j)?;
        let scaled = BigInt::from(share.y.clone()) * numerator;
        let term = &scaled / &denominator;
        if !(&scaled % &denominator).is_zero() {
            tracing::warn!(x = share.x, "lagrange term is not an integer, truncated");
            truncated.push(share.x);
        }
        tracing::trace!(x = share.x, term = %term, "lagrange term");
        secret += term;
    }

    Ok(Reconstruction { secret, truncated })
}

/// The constant term of the polynomial through every share.
pub fn constant_term(shares: &ShareSet) -> Result<BigInt, Error> {
    interpolate(shares).map(|r| r.secret)
}

/// Splits a secret into shares over the integers.
#[derive(Debug, Copy, Clone)]
pub struct Dealer {
    threshold: u32,
    limit: u32,
}

impl Dealer {
    /// Creates a dealer producing `limit` shares at x = 1..=limit, the first
    /// `threshold` of them recover the secret without truncation.
    pub fn create(threshold: u32, limit: u32) -> Result<Self, Error> {
        if threshold == 0 || threshold > limit {
            return Err(Error::InvalidThresholdParameters {
                threshold: threshold.into(),
                limit: limit.into(),
            });
        }
        Ok(Dealer { threshold, limit })
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn split<R: Rng + ?Sized>(
        &self,
        secret: &BigUint,
        rng: &mut R,
    ) -> Result<(ShareSet, Polynomial), Error> {
        let poly = Polynomial::random(
            BigInt::from(secret.clone()),
            self.threshold,
            COEFFICIENT_BITS,
            rng,
        );

        let mut shares = ShareSet::default();
        // x must not be zero
        for x in 1..=u64::from(self.limit) {
            // non-negative coefficients at a positive x
            let y = poly.eval_u64(x).magnitude().clone();
            shares.push(DecodedShare { x, y })?;
        }

        Ok((shares, poly))
    }
}
