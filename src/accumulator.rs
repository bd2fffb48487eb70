use std::collections::BTreeSet;

use bls12_381::{G1Affine, G1Projective, Scalar};

use crate::error::BbsError;
use crate::message::{derive_point, hash_to_scalar, Message};
use crate::parameters::Parameters;

/// The single G1 point `C = G1 + Σ m_i·H_i` summarising a batch; the value
/// that actually gets signed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accumulator(G1Projective);

impl Accumulator {
    pub fn point(&self) -> &G1Projective {
        &self.0
    }

    pub fn to_affine(&self) -> G1Affine {
        G1Affine::from(self.0)
    }
}

/// Folds `(H_i, m_i)` pairs onto the base generator in the order given.
pub fn aggregate<'a, I>(g1: &G1Projective, pairs: I) -> Accumulator
where
    I: IntoIterator<Item = &'a (G1Projective, Scalar)>,
{
    let sum = pairs.into_iter().fold(*g1, |acc, (h_i, m_i)| acc + h_i * m_i);
    Accumulator(sum)
}

/// Computes the accumulator for a batch of messages.
///
/// Messages are processed in ascending slot order regardless of the order
/// they are passed in, so a verifier recomputing `C` gets the same point.
#[tracing::instrument(
    name = "Accumulating message batch",
    skip_all,
    fields(batch_size = messages.len())
)]
pub fn accumulate(params: &Parameters, messages: &[Message]) -> Result<Accumulator, BbsError> {
    if messages.is_empty() {
        return Err(BbsError::EmptyBatch);
    }
    if messages.len() > params.max_messages() {
        return Err(BbsError::BatchTooLarge {
            len: messages.len(),
            max: params.max_messages(),
        });
    }

    let mut seen = BTreeSet::new();
    for message in messages {
        if message.slot as usize >= params.max_messages() {
            return Err(BbsError::SlotOutOfRange {
                slot: message.slot,
                max: params.max_messages(),
            });
        }
        if !seen.insert(message.slot) {
            return Err(BbsError::DuplicateSlot(message.slot));
        }
    }

    let mut ordered: Vec<&Message> = messages.iter().collect();
    ordered.sort_by_key(|message| message.slot);

    let pairs: Vec<(G1Projective, Scalar)> = ordered
        .into_iter()
        .map(|message| {
            (
                derive_point(params, message.slot),
                hash_to_scalar(params, &message.payload),
            )
        })
        .collect();

    Ok(aggregate(params.g1(), &pairs))
}
