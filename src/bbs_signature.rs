use crate::accumulator::accumulate;
use crate::encoding::{decode_g1, decode_scalar, encode_g1, encode_scalar};
use crate::encoding::{G1_COMPRESSED_SIZE, SCALAR_SIZE};
use crate::error::{BbsError, ConfigurationError};
use crate::keys_management::{KeyPair, PublicKey};
use crate::message::Message;
use crate::parameters::Parameters;
use crate::signer::sign_accumulator;
use crate::verifier::{verify_accumulator, Bls12Pairing};
use bls12_381::{G1Affine, Scalar};
use serde::{Deserialize, Serialize};

/// Length of the canonical signature encoding: compressed `A` then `e`.
pub const SIGNATURE_SIZE: usize = G1_COMPRESSED_SIZE + SCALAR_SIZE;

/// BBS signature structure: (A, e).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EncodedSignature", into = "EncodedSignature")]
pub struct BbsSignature {
    a: G1Affine,
    e: Scalar,
}

impl BbsSignature {
    pub(crate) fn new(a: G1Affine, e: Scalar) -> Self {
        BbsSignature { a, e }
    }

    pub fn a(&self) -> &G1Affine {
        &self.a
    }

    pub fn e(&self) -> &Scalar {
        &self.e
    }

    /// Signs a batch of messages with a single signature:
    /// C = G1 + Σ m_i·H_i, (A, e) = (C/(e + sk), e)
    ///
    /// # Arguments
    ///
    /// * `params` - The curve setup shared by signer and verifier.
    /// * `messages` - The batch to be signed.
    /// * `key_pair` - The key pair for signing.
    /// * `rng` - Source of the randomizer `e`.
    ///
    /// # Returns
    ///
    /// The signature, or an error if the batch is empty, too large or has
    /// clashing slots.
    ///
    #[tracing::instrument(
        name = "Signing the message batch with BBS signature",
        skip(params, messages, rng),
        fields(batch_size = messages.len())
    )]
    pub fn sign<R>(
        params: &Parameters,
        messages: &[Message],
        key_pair: &KeyPair,
        rng: R,
    ) -> Result<Self, BbsError>
    where
        R: rand::CryptoRng + rand::RngCore,
    {
        let accumulator = accumulate(params, messages)?;
        Ok(sign_accumulator(&accumulator, key_pair, rng))
    }

    /// Verifies a BBS signature using the pairing equation:
    /// e(A, e·G2 + PK) = e(C, G2)
    ///
    /// # Arguments
    ///
    /// * `params` - The curve setup shared by signer and verifier.
    /// * `public_key` - The public key to verify the signature.
    /// * `messages` - The batch that was signed.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the signature is valid, `Ok(false)` if it is not, and an
    /// error only if the batch itself is malformed.
    ///
    #[tracing::instrument(
        name = "Verifying the BBS signature over a message batch",
        skip(params, messages),
        fields(batch_size = messages.len())
    )]
    pub fn verify(
        &self,
        params: &Parameters,
        public_key: &PublicKey,
        messages: &[Message],
    ) -> Result<bool, BbsError> {
        let accumulator = accumulate(params, messages)?;
        Ok(verify_accumulator(
            params,
            &Bls12Pairing,
            self,
            &accumulator,
            public_key,
        ))
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[..G1_COMPRESSED_SIZE].copy_from_slice(&self.a.to_compressed());
        bytes[G1_COMPRESSED_SIZE..].copy_from_slice(&self.e.to_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BbsError> {
        if bytes.len() != SIGNATURE_SIZE {
            return Err(BbsError::MalformedSignature("incorrect length"));
        }
        let mut a_bytes = [0u8; G1_COMPRESSED_SIZE];
        a_bytes.copy_from_slice(&bytes[..G1_COMPRESSED_SIZE]);
        let mut e_bytes = [0u8; SCALAR_SIZE];
        e_bytes.copy_from_slice(&bytes[G1_COMPRESSED_SIZE..]);

        let a = Option::<G1Affine>::from(G1Affine::from_compressed(&a_bytes))
            .ok_or(BbsError::MalformedSignature("A is not a valid G1 point"))?;
        if bool::from(a.is_identity()) {
            return Err(BbsError::MalformedSignature("A is the identity"));
        }
        let e = Option::<Scalar>::from(Scalar::from_bytes(&e_bytes))
            .ok_or(BbsError::MalformedSignature("e is not a canonical scalar"))?;
        Ok(BbsSignature { a, e })
    }
}

/// Aggregates a batch of messages and signs it in one step.
pub fn aggregate_and_sign<R>(
    params: &Parameters,
    key_pair: &KeyPair,
    messages: &[Message],
    rng: R,
) -> Result<BbsSignature, BbsError>
where
    R: rand::CryptoRng + rand::RngCore,
{
    BbsSignature::sign(params, messages, key_pair, rng)
}

/// Recomputes the batch accumulator and checks the signature against it.
pub fn verify(
    params: &Parameters,
    public_key: &PublicKey,
    messages: &[Message],
    signature: &BbsSignature,
) -> Result<bool, BbsError> {
    signature.verify(params, public_key, messages)
}

#[derive(Serialize, Deserialize)]
struct EncodedSignature {
    a: String,
    e: String,
}

impl From<BbsSignature> for EncodedSignature {
    fn from(signature: BbsSignature) -> Self {
        EncodedSignature {
            a: encode_g1(&signature.a),
            e: encode_scalar(&signature.e),
        }
    }
}

impl TryFrom<EncodedSignature> for BbsSignature {
    type Error = ConfigurationError;

    fn try_from(encoded: EncodedSignature) -> Result<Self, Self::Error> {
        let a = decode_g1("A", &encoded.a)?;
        if bool::from(a.is_identity()) {
            return Err(ConfigurationError::IdentitySignature);
        }
        Ok(BbsSignature {
            a,
            e: decode_scalar("e", &encoded.e)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use secrecy::Secret;

    const BATCH_SIZE: usize = 16;

    /// Sixteen fixed 256-bit messages.
    fn fixed_messages() -> Vec<Message> {
        Message::batch((0..BATCH_SIZE).map(|j| {
            (0..32u8)
                .map(|i| (j as u8).wrapping_mul(37) ^ i.wrapping_mul(101))
                .collect::<Vec<u8>>()
        }))
    }

    fn fixed_keys(params: &Parameters) -> KeyPair {
        let private_key = Secret::new(Scalar::from(0x5eed_cafe_f00d_beefu64));
        KeyPair::create_from_private_key(params, private_key).unwrap()
    }

    #[test]
    fn test_valid_batch_signature() {
        let params = Parameters::default();
        let keys = fixed_keys(&params);
        let messages = fixed_messages();

        let signature =
            aggregate_and_sign(&params, &keys, &messages, StdRng::seed_from_u64(1)).unwrap();

        assert!(verify(&params, &keys.get_public_key(), &messages, &signature).unwrap());
    }

    #[test]
    fn test_altered_message_fails() {
        let params = Parameters::default();
        let keys = fixed_keys(&params);
        let messages = fixed_messages();

        let signature =
            aggregate_and_sign(&params, &keys, &messages, StdRng::seed_from_u64(2)).unwrap();

        let mut tampered = messages.clone();
        tampered[7].payload[0] ^= 0x01;

        assert!(!verify(&params, &keys.get_public_key(), &tampered, &signature).unwrap());
    }

    #[test]
    fn test_any_single_bit_flip_fails() {
        let params = Parameters::default();
        let keys = fixed_keys(&params);
        let messages = fixed_messages();
        let signature = BbsSignature::sign(&params, &messages, &keys, StdRng::seed_from_u64(3))
            .unwrap();

        // Every byte of message 7, walking the bit position along
        for byte in 0..32usize {
            let mut tampered = messages.clone();
            tampered[7].payload[byte] ^= 1 << (byte % 8);
            assert!(!signature
                .verify(&params, &keys.get_public_key(), &tampered)
                .unwrap());
        }

        // Edge bytes of the first and last message, every bit
        for (index, byte) in [(0usize, 0usize), (BATCH_SIZE - 1, 31)] {
            for bit in 0..8u8 {
                let mut tampered = messages.clone();
                tampered[index].payload[byte] ^= 1 << bit;
                assert!(!signature
                    .verify(&params, &keys.get_public_key(), &tampered)
                    .unwrap());
            }
        }
    }

    #[test]
    fn test_wrong_public_key_fails() {
        let params = Parameters::default();
        let keys = fixed_keys(&params);
        let other_keys = KeyPair::create(&params, StdRng::seed_from_u64(4));
        let messages = fixed_messages();

        let signature =
            aggregate_and_sign(&params, &keys, &messages, StdRng::seed_from_u64(5)).unwrap();

        assert!(!verify(&params, &other_keys.get_public_key(), &messages, &signature).unwrap());
    }

    #[test]
    fn test_fresh_randomizers_give_distinct_valid_signatures() {
        let params = Parameters::default();
        let keys = fixed_keys(&params);
        let messages = fixed_messages();

        let first =
            aggregate_and_sign(&params, &keys, &messages, StdRng::seed_from_u64(6)).unwrap();
        let second =
            aggregate_and_sign(&params, &keys, &messages, StdRng::seed_from_u64(7)).unwrap();

        assert_ne!(first.e(), second.e());
        assert_ne!(first.a(), second.a());
        assert!(verify(&params, &keys.get_public_key(), &messages, &first).unwrap());
        assert!(verify(&params, &keys.get_public_key(), &messages, &second).unwrap());
    }

    #[test]
    fn test_reordered_batch_still_verifies() {
        let params = Parameters::default();
        let keys = fixed_keys(&params);
        let messages = fixed_messages();

        let signature =
            aggregate_and_sign(&params, &keys, &messages, StdRng::seed_from_u64(8)).unwrap();

        let mut reordered = messages.clone();
        reordered.reverse();
        assert!(verify(&params, &keys.get_public_key(), &reordered, &signature).unwrap());
    }

    #[test]
    fn test_malformed_batch_is_an_error_not_a_rejection() {
        let params = Parameters::default();
        let keys = fixed_keys(&params);
        let messages = fixed_messages();

        let signature =
            aggregate_and_sign(&params, &keys, &messages, StdRng::seed_from_u64(9)).unwrap();

        let result = verify(&params, &keys.get_public_key(), &[], &signature);
        assert!(matches!(result, Err(BbsError::EmptyBatch)));
    }

    #[test]
    fn test_byte_encoding_is_canonical() {
        let params = Parameters::default();
        let keys = fixed_keys(&params);
        let messages = fixed_messages();
        let signature =
            aggregate_and_sign(&params, &keys, &messages, StdRng::seed_from_u64(10)).unwrap();

        let bytes = signature.to_bytes();
        assert_eq!(bytes.len(), SIGNATURE_SIZE);
        let decoded = BbsSignature::from_bytes(&bytes).unwrap();
        assert!(verify(&params, &keys.get_public_key(), &messages, &decoded).unwrap());

        assert!(matches!(
            BbsSignature::from_bytes(&bytes[..SIGNATURE_SIZE - 1]),
            Err(BbsError::MalformedSignature(_))
        ));

        let mut corrupted = bytes;
        corrupted[SIGNATURE_SIZE - 1] = 0xff;
        assert!(matches!(
            BbsSignature::from_bytes(&corrupted),
            Err(BbsError::MalformedSignature(_))
        ));
    }

    #[test]
    fn test_identity_point_is_malformed() {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[..G1_COMPRESSED_SIZE].copy_from_slice(&G1Affine::identity().to_compressed());
        bytes[G1_COMPRESSED_SIZE..].copy_from_slice(&Scalar::from(7u64).to_bytes());
        assert!(matches!(
            BbsSignature::from_bytes(&bytes),
            Err(BbsError::MalformedSignature("A is the identity"))
        ));

        let json = serde_json::json!({
            "a": encode_g1(&G1Affine::identity()),
            "e": encode_scalar(&Scalar::from(7u64)),
        });
        let err = serde_json::from_value::<BbsSignature>(json).unwrap_err();
        assert!(err.to_string().contains("must not be the identity"));
    }

    #[test]
    fn test_json_encoding() {
        let params = Parameters::default();
        let keys = fixed_keys(&params);
        let messages = fixed_messages();
        let signature =
            aggregate_and_sign(&params, &keys, &messages, StdRng::seed_from_u64(11)).unwrap();

        let json = serde_json::to_value(signature).unwrap();
        assert_eq!(json["a"].as_str().unwrap().len(), 2 * G1_COMPRESSED_SIZE);
        let decoded: BbsSignature = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, signature);
    }
}
