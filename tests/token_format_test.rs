use hexshare::{codec, ShareCombiner, ShareDealer, ShareError};
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

fn seeded_dealer(n: u8, t: u8, seed: u64) -> ShareDealer {
    ShareDealer::builder(n, t)
        .with_random_source(ChaCha20Rng::seed_from_u64(seed))
        .build()
        .unwrap()
}

#[test]
fn test_token_shape_and_charset() {
    let secret = b"wire format";
    let mut dealer = seeded_dealer(9, 2, 1);
    let tokens = dealer.share(secret).unwrap();

    for (i, token) in tokens.iter().enumerate() {
        assert_eq!(token.len(), 2 + 2 * secret.len());
        assert!(token.bytes().all(|b| b.is_ascii_hexdigit()));
        // Output is lowercase hex
        assert_eq!(token.to_lowercase(), *token);

        let parts = codec::decode(token).unwrap();
        assert_eq!(parts.id as usize, i + 1);
        assert_eq!(parts.payload.len(), 2 * secret.len());
    }
}

#[test]
fn test_decode_round_trips_encode() {
    let payload = [7u8, 0, 255, 128, 63];
    let token = codec::encode(200, &payload);
    let parts = codec::decode(&token).unwrap();
    assert_eq!(parts.id, 200);
    assert_eq!(parts.payload_bytes(), payload);
    assert_eq!(codec::encode(parts.id, &parts.payload_bytes()), token);
}

#[test]
fn test_uppercase_tokens_combine() {
    let secret = b"CASE";
    let mut dealer = seeded_dealer(3, 2, 2);
    let tokens = dealer.share(secret).unwrap();

    let shouted: Vec<String> = tokens.iter().map(|t| t.to_uppercase()).collect();
    let combiner = ShareCombiner::new();
    assert_eq!(combiner.combine(&shouted[0..2]).unwrap(), secret);

    // Mixed-case input also decodes
    let mixed = [tokens[0].clone(), shouted[1].clone()];
    assert_eq!(combiner.combine(&mixed).unwrap(), secret);
}

#[test]
fn test_builder_boundary_validation() {
    assert!(matches!(
        ShareDealer::builder(0, 2).build(),
        Err(ShareError::InvalidShareCount(0))
    ));
    assert!(matches!(
        ShareDealer::builder(1, 2).build(),
        Err(ShareError::InvalidShareCount(1))
    ));
    assert!(matches!(
        ShareDealer::builder(2, 0).build(),
        Err(ShareError::InvalidThreshold(0))
    ));
    assert!(matches!(
        ShareDealer::builder(2, 1).build(),
        Err(ShareError::InvalidThreshold(1))
    ));
    assert!(matches!(
        ShareDealer::builder(10, 11).build(),
        Err(ShareError::ThresholdTooLarge {
            threshold: 11,
            total_shares: 10
        })
    ));

    // The extremes of the valid range are accepted
    assert!(ShareDealer::builder(2, 2).build().is_ok());
    assert!(ShareDealer::builder(255, 255).build().is_ok());
}

#[test]
fn test_empty_secret_is_a_validation_error() {
    let mut dealer = seeded_dealer(3, 2, 3);
    assert!(matches!(dealer.share(&[]), Err(ShareError::EmptySecret)));
}

#[test]
fn test_combine_aborts_on_first_bad_token() {
    let mut dealer = seeded_dealer(3, 2, 4);
    let tokens = dealer.share(b"abort").unwrap();
    let combiner = ShareCombiner::new();

    let with_bad_format = [tokens[0].clone(), "##".to_string(), tokens[1].clone()];
    assert!(matches!(
        combiner.combine(&with_bad_format),
        Err(ShareError::InvalidShareFormat)
    ));

    let with_zero_id = [tokens[0].clone(), format!("00{}", &tokens[1][2..])];
    assert!(matches!(
        combiner.combine(&with_zero_id),
        Err(ShareError::InvalidShareId(0))
    ));
}

#[test]
fn test_combine_rejects_length_mismatch() {
    let mut a = seeded_dealer(3, 2, 5);
    let mut b = seeded_dealer(3, 2, 6);
    let long_tokens = a.share(b"long secret").unwrap();
    let short_tokens = b.share(b"short").unwrap();

    let combiner = ShareCombiner::new();
    // Share 1 of one secret and share 2 of a shorter one
    let mismatched = [long_tokens[0].clone(), short_tokens[1].clone()];
    assert!(matches!(
        combiner.combine(&mismatched),
        Err(ShareError::InconsistentShareLength)
    ));
}

#[test]
fn test_token_ids_survive_serde() {
    let parts = codec::decode("03beef").unwrap();
    let json = serde_json::to_string(&parts).unwrap();
    let back: codec::ShareComponents = serde_json::from_str(&json).unwrap();
    assert_eq!(parts, back);
}
