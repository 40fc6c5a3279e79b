use std::sync::Arc;

use rand::rngs::OsRng;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;
use rayon::prelude::*;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::codec;
use crate::error::{Result, ShareError};
use crate::field::FieldTables;
use crate::poly::{self, RandomSource};

/// Splits secrets into hex share tokens
///
/// A dealer is configured with the total share count and the threshold,
/// and holds the field tables plus the random source used for polynomial
/// coefficients. Splitting is a pure function of the secret, the tables
/// and the bytes drawn from the source; with a seeded source the output
/// is fully reproducible.
///
/// # Example
/// ```
/// use hexshare::{ShareCombiner, ShareDealer};
///
/// let mut dealer = ShareDealer::builder(5, 3).build().unwrap();
/// let tokens = dealer.share(b"my secret data").unwrap();
/// assert_eq!(tokens.len(), 5);
///
/// let combiner = ShareCombiner::new();
/// let secret = combiner.combine(&tokens[0..3]).unwrap();
/// assert_eq!(secret, b"my secret data");
/// ```
pub struct ShareDealer {
    /// Total number of share tokens to generate
    total_shares: u8,
    /// Minimum number of shares needed for reconstruction
    threshold: u8,
    /// GF(256) lookup tables
    tables: Arc<FieldTables>,
    /// Source of random polynomial coefficients
    rng: Box<dyn RandomSource>,
}

/// Builder for configuring a [`ShareDealer`]
///
/// Validation happens in [`build`]: the share count first, then the
/// threshold, then their relation. Both parameters are `u8`, so the upper
/// boundary of 255 is enforced by the type; the builder checks the lower
/// boundary of 2.
///
/// [`build`]: ShareDealerBuilder::build
///
/// # Example
/// ```
/// use hexshare::ShareDealer;
/// use rand_chacha::ChaCha20Rng;
/// use rand_core::SeedableRng;
///
/// // Deterministic dealer for tests
/// let dealer = ShareDealer::builder(5, 3)
///     .with_random_source(ChaCha20Rng::seed_from_u64(42))
///     .build()
///     .unwrap();
/// ```
pub struct ShareDealerBuilder {
    total_shares: u8,
    threshold: u8,
    tables: Option<Arc<FieldTables>>,
    rng: Option<Box<dyn RandomSource>>,
}

impl ShareDealerBuilder {
    /// Creates a new builder with the default tables and random source
    pub fn new(total_shares: u8, threshold: u8) -> Self {
        Self {
            total_shares,
            threshold,
            tables: None,
            rng: None,
        }
    }

    /// Uses explicit field tables instead of the shared process-wide set
    pub fn with_tables(mut self, tables: Arc<FieldTables>) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Injects a custom random source
    ///
    /// Any [`rand_core::RngCore`] qualifies; a seeded rng makes share
    /// generation deterministic for testing.
    pub fn with_random_source<R: RandomSource + 'static>(mut self, rng: R) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Builds the dealer, validating its parameters
    ///
    /// # Errors
    /// - [`ShareError::InvalidShareCount`] if `total_shares < 2`
    /// - [`ShareError::InvalidThreshold`] if `threshold < 2`
    /// - [`ShareError::ThresholdTooLarge`] if `threshold > total_shares`
    /// - [`ShareError::RandomSourceUnavailable`] if no source was injected
    ///   and the system rng cannot be reached
    pub fn build(self) -> Result<ShareDealer> {
        if self.total_shares < 2 {
            return Err(ShareError::InvalidShareCount(self.total_shares));
        }
        if self.threshold < 2 {
            return Err(ShareError::InvalidThreshold(self.threshold));
        }
        if self.threshold > self.total_shares {
            return Err(ShareError::ThresholdTooLarge {
                threshold: self.threshold,
                total_shares: self.total_shares,
            });
        }

        let rng: Box<dyn RandomSource> = match self.rng {
            Some(rng) => rng,
            None => Box::new(
                ChaCha20Rng::try_from_rng(&mut OsRng)
                    .map_err(|_| ShareError::RandomSourceUnavailable)?,
            ),
        };

        Ok(ShareDealer {
            total_shares: self.total_shares,
            threshold: self.threshold,
            tables: self.tables.unwrap_or_else(FieldTables::shared),
            rng,
        })
    }
}

impl ShareDealer {
    /// Creates a builder for configuring a dealer
    pub fn builder(total_shares: u8, threshold: u8) -> ShareDealerBuilder {
        ShareDealerBuilder::new(total_shares, threshold)
    }

    /// Total number of share tokens this dealer generates
    pub fn total_shares(&self) -> u8 {
        self.total_shares
    }

    /// Minimum number of shares needed for reconstruction
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Splits a secret into `total_shares` hex tokens
    ///
    /// Each secret byte gets its own random polynomial with the byte as
    /// the constant term; every polynomial is evaluated over the common
    /// x set 1..=`total_shares`, and the y values accumulate into one
    /// payload per share. Tokens come back in x order, each of length
    /// `2 + 2 * secret.len()`.
    ///
    /// The call is atomic: it returns the complete token list or an
    /// error, never a partial set.
    ///
    /// # Errors
    /// [`ShareError::EmptySecret`] for a zero-length secret, or any
    /// failure of the random source.
    pub fn share(&mut self, secret: &[u8]) -> Result<Vec<String>> {
        if secret.is_empty() {
            return Err(ShareError::EmptySecret);
        }

        // Draw every polynomial up front: randomness is sequential, the
        // evaluation over x values below is not
        let mut byte_coeffs: Vec<Vec<u8>> = Vec::with_capacity(secret.len());
        for &byte in secret {
            let mut coeffs = Vec::with_capacity(self.threshold as usize);
            coeffs.push(byte);
            coeffs.extend(poly::random_coefficients(self.rng.as_mut(), self.threshold)?);
            byte_coeffs.push(coeffs);
        }

        // Evaluate every polynomial for each share in parallel; all shares
        // draw from the common x set 1..=total_shares
        let x_values: Vec<u8> = (1..=self.total_shares).collect();
        let tables = &self.tables;
        let payloads: Vec<Vec<u8>> = x_values
            .into_par_iter()
            .map(|x| {
                byte_coeffs
                    .iter()
                    .map(|coeffs| poly::evaluate(tables, x, coeffs))
                    .collect()
            })
            .collect();

        #[cfg(feature = "zeroize")]
        for coeffs in byte_coeffs.iter_mut() {
            coeffs.zeroize();
        }

        Ok(payloads
            .into_iter()
            .enumerate()
            .map(|(i, payload)| codec::encode((i + 1) as u8, &payload))
            .collect())
    }
}

/// Reconstructs secrets from hex share tokens
///
/// A combiner only needs the field tables; it keeps no other state, and
/// every call is a pure function of its inputs.
///
/// No minimum share count is enforced: combining fewer than threshold
/// unique shares succeeds and deterministically returns bytes that are
/// (in general) not the secret. That is a property of the scheme, not an
/// error.
pub struct ShareCombiner {
    tables: Arc<FieldTables>,
}

impl ShareCombiner {
    /// Creates a combiner over the shared process-wide tables
    pub fn new() -> Self {
        Self {
            tables: FieldTables::shared(),
        }
    }

    /// Creates a combiner over explicit tables
    pub fn with_tables(tables: Arc<FieldTables>) -> Self {
        Self { tables }
    }

    /// Recovers the secret from the given share tokens
    ///
    /// Equivalent to [`combine_at`](Self::combine_at) with `at = 0`, the
    /// point where every per-byte polynomial stores its secret byte.
    pub fn combine<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<u8>> {
        self.combine_at(tokens, 0)
    }

    /// Evaluates the interpolation polynomials at an arbitrary point
    ///
    /// `at = 0` recovers the secret. A nonzero `at` derives the payload of
    /// share number `at` from the given shares, including a share that
    /// was never handed out, or one that is itself present in `tokens`.
    ///
    /// Every token is decoded first and the first decode failure aborts
    /// the call. A token whose id duplicates an already-seen id is
    /// silently discarded; the first occurrence wins.
    ///
    /// # Errors
    /// [`ShareError::InvalidShareFormat`] / [`ShareError::InvalidShareId`]
    /// from decoding, [`ShareError::InconsistentShareLength`] when the
    /// unique shares disagree on payload length.
    pub fn combine_at<S: AsRef<str>>(&self, tokens: &[S], at: u8) -> Result<Vec<u8>> {
        let mut xs: Vec<u8> = Vec::with_capacity(tokens.len());
        let mut payloads: Vec<Vec<u8>> = Vec::with_capacity(tokens.len());

        for token in tokens {
            let parts = codec::decode(token.as_ref())?;
            if xs.contains(&parts.id) {
                continue;
            }
            xs.push(parts.id);
            payloads.push(parts.payload_bytes());
        }

        let secret_len = payloads.first().map_or(0, Vec::len);
        if payloads.iter().any(|p| p.len() != secret_len) {
            return Err(ShareError::InconsistentShareLength);
        }

        let tables = &self.tables;
        let secret = (0..secret_len)
            .into_par_iter()
            .map(|j| {
                let ys: Vec<u8> = payloads.iter().map(|p| p[j]).collect();
                lagrange(tables, at, &xs, &ys)
            })
            .collect();

        Ok(secret)
    }

    /// Evaluates the Lagrange interpolation polynomial through the points
    /// `(xs[i], ys[i])` at `at`
    ///
    /// Exposed for white-box verification; `xs` entries must be distinct
    /// and nonzero, and `ys` must be the same length as `xs`.
    pub fn lagrange(&self, at: u8, xs: &[u8], ys: &[u8]) -> u8 {
        lagrange(&self.tables, at, xs, ys)
    }
}

impl Default for ShareCombiner {
    fn default() -> Self {
        Self::new()
    }
}

/// Lagrange interpolation in GF(256), carried out in the log domain
///
/// Each basis term is a product realized as a sum of logs: starting from
/// `logs[ys[i]]`, every other node j contributes
/// `logs[at ^ xs[j]] - logs[xs[i] ^ xs[j]]`, biased by 255 to stay
/// non-negative. Terms with `ys[i] == 0` contribute nothing. When `at`
/// coincides with another node `xs[j]`, the basis term is singular there
/// and is skipped outright: its true value is zero, and evaluating the
/// log-domain ratio would be undefined.
fn lagrange(tables: &FieldTables, at: u8, xs: &[u8], ys: &[u8]) -> u8 {
    let modulus = FieldTables::MAX_SHARES as usize;
    let mut sum = 0u8;

    for i in 0..xs.len() {
        if ys[i] == 0 {
            continue;
        }

        let mut product = tables.log(ys[i]) as usize;
        let mut singular = false;
        for j in 0..xs.len() {
            if i == j {
                continue;
            }
            if at == xs[j] {
                singular = true;
                break;
            }
            let num = tables.log(at ^ xs[j]) as usize;
            let den = tables.log(xs[i] ^ xs[j]) as usize;
            product = (product + num + modulus - den) % modulus;
        }

        if !singular {
            sum ^= tables.exp(product);
        }
    }

    sum
}
