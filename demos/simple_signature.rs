use bbs_signature::{BbsSignature, KeyPair, Message, Parameters};
use rand_core::OsRng;

fn main() {
    let csprng = OsRng;
    let params = Parameters::default();

    // Create signer keys
    let keys = KeyPair::create(&params, csprng);

    // Messages to be signed
    let messages = Message::batch(vec![b"Hello World".to_vec(), b"Goodbye World".to_vec()]);

    // Signature generation
    let signature = BbsSignature::sign(&params, &messages, &keys, csprng).expect("Error");

    // Verification of the signature
    let result = signature
        .verify(&params, &keys.get_public_key(), &messages)
        .expect("Error");

    println!("Verification result: {:?}", result);
    assert!(result);
}
