//! # BBS Aggregate Signature Library
//!
//! This Rust library provides a BBS-style signature over a batch of messages, built on the BLS12-381 pairing-friendly curve from the zkcrypto `bls12_381` crate.
//!
//! ## Overview of BBS Signatures
//!
//! A BBS signature attests to a whole batch of independently hashed messages with a single compact value. Instead of one check per message, the verifier confirms the batch with one pairing equality.
//!
//! - Key Pair Generation: the signer holds a secret scalar sk and publishes PK = sk * G2, where G2 generates the twist group.
//! - Signing: every message slot i has its own point H_i, derived from the slot index alone. Each message is hashed to a scalar m_i and the batch is folded into an accumulator C. The signer blinds C with a fresh random scalar e.
//! - Verification: using the public key and the same batch, the verifier recomputes C and checks the pairing equation.
//!
//! ## Algorithm
//!
//! - Parameters: generators G1 (base group) and G2 (twist group) of prime order n, and a bilinear pairing e: G1 x G2 -> Gt.
//! - Message points: H_i = hash_to_curve(expand(i + 1)), independent of message content.
//! - Message scalars: m_i = SHA-512(tag || message_i) mod n.
//! - Accumulator: C = G1 + sum(m_i * H_i), summed in ascending slot order.
//!
//! The equations relevant for the signature:
//!
//! - Signing: (A, e) = (C / (e + sk), e) where e is drawn uniformly from [0, n). A draw with e + sk = 0 is discarded.
//! - Verification: e(A, e * G2 + PK) = e(C, G2)
//!
//! The equation holds exactly when A * (e + sk) = C, so the verifier never needs sk.
//!
//! ## Usage
//!
//! ```no_run
//! use bbs_signature::{aggregate_and_sign, verify, KeyPair, Message, Parameters};
//! use rand_core::OsRng;
//!
//! let params = Parameters::default();
//! let keys = KeyPair::create(&params, OsRng);
//! let messages = Message::batch(vec![b"first".to_vec(), b"second".to_vec()]);
//!
//! let signature = aggregate_and_sign(&params, &keys, &messages, OsRng).unwrap();
//! assert!(verify(&params, &keys.get_public_key(), &messages, &signature).unwrap());
//! ```
//!
//! Parameters, key pairs, message files and signatures can be stored and loaded with the functions in [`persistence`].
//!
//! ## Logging
//!
//! Signing, verification and persistence emit `tracing` spans. Enable the `tracing` feature for the `telemetry` module, which installs a bunyan-formatted JSON subscriber.

pub mod accumulator;
pub mod bbs_signature;
mod encoding;
pub mod error;
pub mod keys_management;
pub mod message;
pub mod parameters;
pub mod persistence;
pub mod signer;
pub mod verifier;

#[cfg(feature = "tracing")]
pub mod telemetry;

pub use crate::bbs_signature::{aggregate_and_sign, verify, BbsSignature};
pub use crate::error::{ArithmeticError, BbsError, ConfigurationError};
pub use crate::keys_management::{KeyPair, PublicKey};
pub use crate::message::Message;
pub use crate::parameters::Parameters;
