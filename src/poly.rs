use num_bigint::{BigInt, RandBigInt};
use num_traits::Zero;
use rand::Rng;

/// Polynomials in Shamir’s Secret Sharing are generally of the following form:
///     y = f(x) = a[0] + a[1]x + a[2]x^2 + a[3]x^3 + ... + a[k-1]x^[k-1]
/// This structure stores all coefficients a[i] as unbounded integers, no
/// modular reduction is applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polynomial {
    /// coefficients
    cfs: Vec<BigInt>,
}

impl Polynomial {
    pub fn new() -> Self {
        let cfs = Vec::new();
        Self { cfs }
    }

    pub fn from_coefficients(cfs: Vec<BigInt>) -> Self {
        Self { cfs }
    }

    /// Samples a polynomial with k coefficients
    /// y = f(x) = a0 + a[1]x + ... + a[k-1]x^[k-1]
    /// where every a[i], i > 0, is a non-negative integer of at most `bits` bits.
    pub fn random<R: Rng + ?Sized>(a0: BigInt, k: u32, bits: u64, rng: &mut R) -> Self {
        let mut cfs = Vec::with_capacity(k as usize);
        cfs.push(a0);
        for _ in 1..k {
            cfs.push(BigInt::from(rng.gen_biguint(bits)));
        }
        Self { cfs }
    }

    pub fn coefficients(&self) -> &[BigInt] {
        &self.cfs
    }

    /// The value at x = 0, zero for an empty polynomial.
    pub fn constant_term(&self) -> BigInt {
        self.cfs.first().cloned().unwrap_or_default()
    }

    /// Number of coefficients minus one, `None` when there are none.
    pub fn degree(&self) -> Option<usize> {
        self.cfs.len().checked_sub(1)
    }

    /// Evaluates the polynomial at point x
    pub fn eval(&self, x: &BigInt) -> BigInt {
        // Horner's method
        // We will calculate a[0] + X*(a[1] + X*(a[2] + .. + X*(a[n-1]  + X*a[n]))
        self.cfs
            .iter()
            .rev()
            .fold(BigInt::zero(), |acc, cf| acc * x + cf)
    }

    pub fn eval_u64(&self, x: u64) -> BigInt {
        self.eval(&BigInt::from(x))
    }
}
