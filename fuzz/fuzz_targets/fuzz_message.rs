#![no_main]

use libfuzzer_sys::fuzz_target;

use bbs_signature::{aggregate_and_sign, verify, KeyPair, Message, Parameters};
use rand::rngs::StdRng;
use rand::SeedableRng;

fuzz_target!(|data: &[u8]| {
    let params = Parameters::default();

    // Randomness source
    let seeded_rng = StdRng::seed_from_u64(123);
    let keys = KeyPair::create(&params, seeded_rng.clone());

    // Split the input into up to four messages
    let messages = Message::batch(data.chunks(data.len() / 4 + 1).map(|chunk| chunk.to_vec()));
    if messages.is_empty() {
        return;
    }

    let signature = aggregate_and_sign(&params, &keys, &messages, seeded_rng).expect("Error");
    let result = verify(&params, &keys.get_public_key(), &messages, &signature).expect("Error");

    assert!(result);
});
