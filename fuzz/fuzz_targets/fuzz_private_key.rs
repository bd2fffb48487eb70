#![no_main]

use libfuzzer_sys::fuzz_target;

use bbs_signature::{aggregate_and_sign, verify, KeyPair, Message, Parameters};
use bls12_381::Scalar;
use rand::rngs::StdRng;
use rand::SeedableRng;
use secrecy::Secret;
use sha2::{Digest, Sha512};

fuzz_target!(|data: &[u8]| {
    let params = Parameters::default();

    // Messages to be signed
    let messages = Message::batch(vec![b"Hello world".to_vec(), b"Goodbye world".to_vec()]);

    // Randomness source
    let seeded_rng = StdRng::seed_from_u64(123);

    let mut wide = [0u8; 64];
    wide.copy_from_slice(&Sha512::digest(data));
    let private_key = Secret::new(Scalar::from_bytes_wide(&wide));

    // A zero key is refused, everything else must sign and verify
    let Ok(keys) = KeyPair::create_from_private_key(&params, private_key) else {
        return;
    };

    let signature = aggregate_and_sign(&params, &keys, &messages, seeded_rng).expect("Error");
    let result = verify(&params, &keys.get_public_key(), &messages, &signature).expect("Error");

    assert!(result);
});
