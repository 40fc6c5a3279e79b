//! Shamir's Secret Sharing over GF(256) with compact hex share tokens
//!
//! This library splits an arbitrary byte secret into N share tokens such
//! that any T of them (the threshold) reconstruct the secret exactly via
//! Lagrange interpolation, while fewer reveal nothing. Each token is a
//! plain hex string (a two-digit share id followed by two digits per
//! secret byte), so shares can be printed, typed back in, or sent over
//! any text channel.
//!
//! # Quick Start
//!
//! ```
//! use hexshare::{ShareCombiner, ShareDealer};
//!
//! // Create a scheme with 5 shares and threshold 3
//! let mut dealer = ShareDealer::builder(5, 3).build().unwrap();
//!
//! // Split a secret into hex tokens
//! let tokens = dealer.share(b"my secret data").unwrap();
//! assert_eq!(tokens.len(), 5);
//!
//! // Reconstruct from any 3 tokens
//! let combiner = ShareCombiner::new();
//! let secret = combiner.combine(&tokens[1..4]).unwrap();
//! assert_eq!(secret, b"my secret data");
//! ```
//!
//! The scheme deliberately performs no minimum-share-count check on
//! reconstruction: combining fewer than T unique shares returns a
//! deterministic byte sequence that is simply not the secret. Detecting
//! that condition, like all recovery policy, belongs to the caller.

mod error;
mod field;
mod shamir;

pub mod codec;
pub mod poly;

pub use error::{Result, ShareError};
pub use field::{FieldTables, FIELD_SIZE, PRIMITIVE_POLY};
pub use poly::RandomSource;
pub use shamir::{ShareCombiner, ShareDealer, ShareDealerBuilder};

// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        FieldTables, RandomSource, Result, ShareCombiner, ShareDealer, ShareDealerBuilder,
        ShareError,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    #[test]
    fn test_full_workflow() -> Result<()> {
        let secret = b"This is a secret message that needs to be protected!";

        let mut dealer = ShareDealer::builder(5, 3).build()?;
        let tokens = dealer.share(secret)?;
        assert_eq!(tokens.len(), 5);

        // Every token carries the id plus two hex digits per secret byte
        for token in &tokens {
            assert_eq!(token.len(), 2 + 2 * secret.len());
            assert!(token.bytes().all(|b| b.is_ascii_hexdigit()));
        }

        let combiner = ShareCombiner::new();
        assert_eq!(combiner.combine(&tokens[0..3])?, secret);
        assert_eq!(combiner.combine(&tokens[2..5])?, secret);
        assert_eq!(combiner.combine(&tokens)?, secret);

        Ok(())
    }

    #[test]
    fn test_injected_source_and_tables() -> Result<()> {
        use std::sync::Arc;

        let tables = Arc::new(FieldTables::init()?);
        let mut dealer = ShareDealer::builder(4, 2)
            .with_tables(Arc::clone(&tables))
            .with_random_source(ChaCha20Rng::seed_from_u64(31337))
            .build()?;

        let tokens = dealer.share(b"injected")?;
        let combiner = ShareCombiner::with_tables(tables);
        assert_eq!(combiner.combine(&tokens[2..4])?, b"injected");

        Ok(())
    }

    #[test]
    fn test_error_handling() {
        assert!(matches!(
            ShareDealer::builder(3, 4).build(),
            Err(ShareError::ThresholdTooLarge { .. })
        ));

        let combiner = ShareCombiner::new();
        assert!(matches!(
            combiner.combine(&["xx"]),
            Err(ShareError::InvalidShareFormat)
        ));
    }
}
