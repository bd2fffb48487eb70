//! Loading and storing parameters, key material, message payloads and
//! signatures.
//!
//! Parameters, keys and signatures are JSON documents with hex-encoded
//! compressed points and little-endian scalars. Message files hold 128
//! whitespace separated unsigned 16-bit integers, packed little-endian into a
//! 256-byte payload.
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::bbs_signature::BbsSignature;
use crate::encoding::{decode_scalar, encode_scalar};
use crate::error::ConfigurationError;
use crate::keys_management::{KeyPair, PublicKey};
use crate::message::Message;
use crate::parameters::Parameters;

/// Number of 16-bit words in a message file.
pub const MESSAGE_WORDS: usize = 128;

#[derive(Serialize, Deserialize)]
struct KeyFile {
    secret_key: String,
    public_key: PublicKey,
}

fn read_to_string(path: &Path) -> Result<String, ConfigurationError> {
    fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_string(path: &Path, contents: &str) -> Result<(), ConfigurationError> {
    fs::write(path, contents).map_err(|source| ConfigurationError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigurationError> {
    let contents = read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigurationError> {
    let contents = serde_json::to_string_pretty(value)?;
    write_string(path, &contents)
}

#[tracing::instrument(name = "Loading curve parameters")]
pub fn load_parameters(path: &Path) -> Result<Parameters, ConfigurationError> {
    load_json(path)
}

#[tracing::instrument(name = "Saving curve parameters", skip(params))]
pub fn save_parameters(path: &Path, params: &Parameters) -> Result<(), ConfigurationError> {
    save_json(path, params)
}

/// Reads a key pair and checks that the stored public key is `sk·G2`.
#[tracing::instrument(name = "Loading key pair", skip(params))]
pub fn load_keypair(path: &Path, params: &Parameters) -> Result<KeyPair, ConfigurationError> {
    let key_file: KeyFile = load_json(path)?;
    let private_key = Secret::new(decode_scalar("secret key", &key_file.secret_key)?);
    KeyPair::from_parts(params, private_key, key_file.public_key)
}

#[tracing::instrument(name = "Saving key pair", skip(key_pair))]
pub fn save_keypair(path: &Path, key_pair: &KeyPair) -> Result<(), ConfigurationError> {
    let key_file = KeyFile {
        secret_key: encode_scalar(key_pair.private_key.expose_secret()),
        public_key: key_pair.public_key,
    };
    save_json(path, &key_file)
}

#[tracing::instrument(name = "Loading signature")]
pub fn load_signature(path: &Path) -> Result<BbsSignature, ConfigurationError> {
    load_json(path)
}

#[tracing::instrument(name = "Saving signature", skip(signature))]
pub fn save_signature(path: &Path, signature: &BbsSignature) -> Result<(), ConfigurationError> {
    save_json(path, signature)
}

/// Parses a message file into the payload for `slot`.
pub fn read_message_file(path: &Path, slot: u32) -> Result<Message, ConfigurationError> {
    let contents = read_to_string(path)?;
    let malformed = |reason: String| ConfigurationError::MalformedMessage {
        path: path.to_path_buf(),
        reason,
    };

    let words = contents
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u16>()
                .map_err(|err| malformed(format!("invalid word {:?}: {}", token, err)))
        })
        .collect::<Result<Vec<u16>, _>>()?;

    if words.len() != MESSAGE_WORDS {
        return Err(malformed(format!(
            "expected {} words, found {}",
            MESSAGE_WORDS,
            words.len()
        )));
    }

    let payload = words.iter().flat_map(|word| word.to_le_bytes()).collect::<Vec<u8>>();
    Ok(Message::new(slot, payload))
}

pub fn message_file_name(slot: u32) -> PathBuf {
    PathBuf::from(format!("message{:02}.dat", slot))
}

/// Reads `message00.dat` through `message{count-1}.dat` from `dir`, each into
/// the slot named by its file.
#[tracing::instrument(name = "Reading message files")]
pub fn read_message_dir(dir: &Path, count: u32) -> Result<Vec<Message>, ConfigurationError> {
    (0..count)
        .map(|slot| read_message_file(&dir.join(message_file_name(slot)), slot))
        .collect()
}

/// Writes a payload of exactly 256 bytes in the message file format.
pub fn write_message_file(path: &Path, payload: &[u8]) -> Result<(), ConfigurationError> {
    if payload.len() != 2 * MESSAGE_WORDS {
        return Err(ConfigurationError::IncorrectLength {
            field: "message payload",
            expected: 2 * MESSAGE_WORDS,
            got: payload.len(),
        });
    }
    let contents = payload
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]).to_string())
        .collect::<Vec<_>>()
        .join("\n");
    write_string(path, &contents)
}
