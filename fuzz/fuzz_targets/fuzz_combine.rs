#![no_main]

use hexshare::ShareCombiner;
use libfuzzer_sys::fuzz_target;

// Fuzzing target for ShareCombiner::combine / combine_at
//
// Carves the fuzzer input into arbitrary token strings and feeds them to
// the combiner. Exercises malformed tokens, zero and duplicate ids,
// mismatched payload lengths, odd-length payloads, and arbitrary `at`
// points. The combiner must always return a Result and never panic.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let combiner = ShareCombiner::new();

    // First byte picks the evaluation point, second the token count
    let at = data[0];
    let num_tokens = (data[1] % 8) as usize + 1;
    let body = &data[2..];

    // Split the remaining input into token candidates. Lossy UTF-8 keeps
    // arbitrary bytes flowing into the string-level decoder.
    let mut tokens: Vec<String> = Vec::with_capacity(num_tokens);
    for chunk in body.chunks(body.len().div_ceil(num_tokens).max(1)) {
        tokens.push(String::from_utf8_lossy(chunk).into_owned());
    }

    let _result = combiner.combine(&tokens);
    let _result = combiner.combine_at(&tokens, at);

    // Hex-encoding the same chunks produces well-formed-looking tokens
    // with arbitrary ids and payloads, including duplicates
    let hex_tokens: Vec<String> = body
        .chunks(5)
        .map(|chunk| chunk.iter().map(|b| format!("{b:02x}")).collect())
        .collect();
    let _result = combiner.combine(&hex_tokens);
    let _result = combiner.combine_at(&hex_tokens, at);

    // Empty input is always accepted
    let empty: [&str; 0] = [];
    let _result = combiner.combine(&empty);
});
