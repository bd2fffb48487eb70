use std::path::{Path, PathBuf};

use bbs_signature::persistence::{
    load_keypair, load_parameters, message_file_name, read_message_dir, save_keypair,
    save_parameters, save_signature, write_message_file, MESSAGE_WORDS,
};
use bbs_signature::telemetry::{get_subscriber, init_subscriber};
use bbs_signature::{aggregate_and_sign, verify, KeyPair, Parameters};
use rand_core::{OsRng, RngCore};

const MESSAGE_COUNT: u32 = 16;

/// Writes parameters, a key pair and random message files into `dir` unless
/// they are already there.
fn prepare_inputs(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;

    let params_path = dir.join("parameters.json");
    if !params_path.exists() {
        let params = Parameters::default().with_max_messages(MESSAGE_COUNT as usize)?;
        save_parameters(&params_path, &params)?;
    }
    let params = load_parameters(&params_path)?;

    let keys_path = dir.join("keys.json");
    if !keys_path.exists() {
        save_keypair(&keys_path, &KeyPair::create(&params, OsRng))?;
    }

    for slot in 0..MESSAGE_COUNT {
        let path = dir.join(message_file_name(slot));
        if !path.exists() {
            let mut payload = vec![0u8; 2 * MESSAGE_WORDS];
            OsRng.fill_bytes(&mut payload);
            write_message_file(&path, &payload)?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = get_subscriber("batch_signature".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("bbs_signature_demo"));
    prepare_inputs(&dir)?;

    // Read in system parameters, the signer's keys and the messages to sign
    let params = load_parameters(&dir.join("parameters.json"))?;
    let keys = load_keypair(&dir.join("keys.json"), &params)?;
    let messages = read_message_dir(&dir, MESSAGE_COUNT)?;

    println!("Group order: {}", params.group_order());

    let signature = aggregate_and_sign(&params, &keys, &messages, OsRng)?;
    save_signature(&dir.join("signature.json"), &signature)?;

    println!("Signature random value: {}", hex::encode(signature.e().to_bytes()));
    println!("Signature point: {}", hex::encode(signature.a().to_compressed()));
    println!(
        "Public key: {}",
        hex::encode(keys.get_public_key().to_compressed())
    );

    let result = verify(&params, &keys.get_public_key(), &messages, &signature)?;
    println!("Verification result: {:?}", result);
    assert!(result);

    let mut tampered = messages.clone();
    tampered[7].payload[0] ^= 0x01;
    let result = verify(&params, &keys.get_public_key(), &tampered, &signature)?;
    println!("Verification result with message 7 altered: {:?}", result);
    assert!(!result);

    Ok(())
}
