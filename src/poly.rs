use rand_core::RngCore;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::error::Result;
use crate::field::FieldTables;

/// Pull-based source of cryptographically strong random bytes
///
/// The engine only ever asks for one byte at a time and filters for
/// nonzero values itself, so implementations need only be byte-uniform.
/// Any [`rand_core::RngCore`] works out of the box; a seeded
/// [`rand_chacha::ChaCha20Rng`](https://docs.rs/rand_chacha) gives
/// deterministic shares for tests without touching the production path.
pub trait RandomSource {
    /// Returns one uniformly random byte
    fn next_byte(&mut self) -> Result<u8>;

    /// Returns one uniformly random nonzero byte, re-drawing on zero
    fn next_nonzero_byte(&mut self) -> Result<u8> {
        loop {
            let byte = self.next_byte()?;
            if byte != 0 {
                return Ok(byte);
            }
        }
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_byte(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.fill_bytes(&mut buf);
        Ok(buf[0])
    }
}

/// Evaluates a polynomial at the field point `x` using Horner's method
///
/// Coefficients are processed from highest degree down to the constant
/// term. The running value is multiplied in the log domain:
/// `exps[(logs[x] + logs[fx]) mod 255] ^ c`, except when `fx` is zero,
/// whose log is undefined, in which case the product term vanishes and
/// the step reduces to `fx = c`.
///
/// `x` must be nonzero; callers evaluate at share ids 1..=255 only.
pub fn evaluate(tables: &FieldTables, x: u8, coeffs: &[u8]) -> u8 {
    let logx = tables.log(x) as usize;
    let mut fx = 0u8;
    for &c in coeffs.iter().rev() {
        if fx != 0 {
            let sum = logx + tables.log(fx) as usize;
            fx = tables.exp(sum % FieldTables::MAX_SHARES as usize) ^ c;
        } else {
            fx = c;
        }
    }
    fx
}

/// Draws the `threshold - 1` random coefficients above degree zero
///
/// Every coefficient is forced nonzero by re-drawing, so the generated
/// polynomial always has exact degree `threshold - 1`. This is a
/// deliberate property of the scheme, not a default of the source.
pub fn random_coefficients(rng: &mut dyn RandomSource, threshold: u8) -> Result<Vec<u8>> {
    (1..threshold).map(|_| rng.next_nonzero_byte()).collect()
}

/// Generates the `(x, y)` share points for one secret byte
///
/// Builds the per-byte polynomial `[secret_byte, c1, .., c_{t-1}]` and
/// evaluates it at x = 1..=`num_shares`. The coefficient buffer exists
/// only for the duration of the call.
pub fn share_points(
    tables: &FieldTables,
    rng: &mut dyn RandomSource,
    secret_byte: u8,
    num_shares: u8,
    threshold: u8,
) -> Result<Vec<(u8, u8)>> {
    let mut coeffs = Vec::with_capacity(threshold as usize);
    coeffs.push(secret_byte);
    coeffs.extend(random_coefficients(rng, threshold)?);

    let points = (1..=num_shares)
        .map(|x| (x, evaluate(tables, x, &coeffs)))
        .collect();

    #[cfg(feature = "zeroize")]
    coeffs.zeroize();

    Ok(points)
}
