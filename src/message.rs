use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use bls12_381::{G1Projective, Scalar};
use sha2::{Digest, Sha512};
use sha2_09::Sha256;

use crate::parameters::Parameters;

/// Size of the buffer the slot index is expanded into before hashing to G1.
const SLOT_BUFFER_SIZE: usize = 8192;

/// One message of a batch: its content and the slot it occupies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub slot: u32,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(slot: u32, payload: impl Into<Vec<u8>>) -> Self {
        Message {
            slot,
            payload: payload.into(),
        }
    }

    /// Places each payload in the slot matching its position.
    pub fn batch<I, P>(payloads: I) -> Vec<Message>
    where
        I: IntoIterator<Item = P>,
        P: Into<Vec<u8>>,
    {
        payloads
            .into_iter()
            .zip(0u32..)
            .map(|(payload, slot)| Message::new(slot, payload))
            .collect()
    }
}

/// Derives the message point `H_i` for a slot.
///
/// The point depends only on the slot index and the parameters' message tag,
/// never on message content. `slot + 1` is repeated as 32-bit little-endian
/// words across an 8 KiB buffer (2048 copies) which is then hashed to G1.
#[tracing::instrument(name = "Deriving message point", level = "debug", skip(params))]
pub fn derive_point(params: &Parameters, slot: u32) -> G1Projective {
    let word = slot.wrapping_add(1).to_le_bytes();
    let buffer: Vec<u8> = word
        .iter()
        .copied()
        .cycle()
        .take(SLOT_BUFFER_SIZE)
        .collect();

    <G1Projective as HashToCurve<ExpandMsgXmd<Sha256>>>::hash_to_curve(
        &buffer,
        params.message_tag(),
    )
}

/// Hashes message content to a scalar modulo the group order.
///
/// SHA-512 over `scalar_tag || bytes`, reduced with a wide reduction so the
/// result is close to uniform.
pub fn hash_to_scalar(params: &Parameters, bytes: &[u8]) -> Scalar {
    let digest = Sha512::new()
        .chain_update(params.scalar_tag())
        .chain_update(bytes)
        .finalize();

    let mut wide = [0u8; 64];
    wide.copy_from_slice(&digest);
    Scalar::from_bytes_wide(&wide)
}
