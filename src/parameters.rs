use bls12_381::{G1Affine, G1Projective, G2Affine, G2Projective};
use serde::{Deserialize, Serialize};

use crate::encoding::{decode_g1, decode_g2, encode_g1, encode_g2};
use crate::error::ConfigurationError;

/// Domain-separation tag for the per-slot message points `H_i`.
pub const DEFAULT_MESSAGE_TAG: &str = "BBS_BLS12381G1_XMD:SHA-256_SSWU_RO_MESSAGE_POINT_";

/// Domain-separation tag prepended to message content before hashing to a scalar.
pub const DEFAULT_SCALAR_TAG: &str = "BBS_BLS12381_SHA-512_MESSAGE_SCALAR_";

/// Default upper bound on the number of messages in a single batch.
pub const DEFAULT_MAX_MESSAGES: usize = 256;

/// Order of G1, G2 and Gt, i.e. the modulus of every scalar in the scheme.
pub const GROUP_ORDER: &str = "0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001";

/// The pairing-friendly curve setup shared read-only by every signing and
/// verification session: both group generators, the domain-separation tags
/// used when hashing messages, and the batch bound.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EncodedParameters", into = "EncodedParameters")]
pub struct Parameters {
    g1: G1Projective,
    g2: G2Projective,
    message_tag: Vec<u8>,
    scalar_tag: Vec<u8>,
    max_messages: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new()
    }
}

impl Parameters {
    /// BLS12-381 with the standard generators and the crate's default tags.
    pub fn new() -> Self {
        Self {
            g1: G1Projective::generator(),
            g2: G2Projective::generator(),
            message_tag: DEFAULT_MESSAGE_TAG.as_bytes().to_vec(),
            scalar_tag: DEFAULT_SCALAR_TAG.as_bytes().to_vec(),
            max_messages: DEFAULT_MAX_MESSAGES,
        }
    }

    /// Builds a parameter set from explicit generators and tags, rejecting
    /// anything the protocol cannot work with.
    pub fn from_parts(
        g1: G1Projective,
        g2: G2Projective,
        message_tag: impl Into<Vec<u8>>,
        scalar_tag: impl Into<Vec<u8>>,
        max_messages: usize,
    ) -> Result<Self, ConfigurationError> {
        let params = Self {
            g1,
            g2,
            message_tag: message_tag.into(),
            scalar_tag: scalar_tag.into(),
            max_messages,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_max_messages(mut self, max_messages: usize) -> Result<Self, ConfigurationError> {
        self.max_messages = max_messages;
        self.validate()?;
        Ok(self)
    }

    pub fn with_message_tag(mut self, tag: impl Into<Vec<u8>>) -> Result<Self, ConfigurationError> {
        self.message_tag = tag.into();
        self.validate()?;
        Ok(self)
    }

    pub fn with_scalar_tag(mut self, tag: impl Into<Vec<u8>>) -> Result<Self, ConfigurationError> {
        self.scalar_tag = tag.into();
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if bool::from(self.g1.is_identity()) {
            return Err(ConfigurationError::IdentityGenerator("g1"));
        }
        if bool::from(self.g2.is_identity()) {
            return Err(ConfigurationError::IdentityGenerator("g2"));
        }
        if self.message_tag.is_empty() {
            return Err(ConfigurationError::EmptyDomainTag("message"));
        }
        if self.scalar_tag.is_empty() {
            return Err(ConfigurationError::EmptyDomainTag("scalar"));
        }
        if self.max_messages == 0 {
            return Err(ConfigurationError::ZeroBatchSize);
        }
        Ok(())
    }

    pub fn g1(&self) -> &G1Projective {
        &self.g1
    }

    pub fn g2(&self) -> &G2Projective {
        &self.g2
    }

    pub fn message_tag(&self) -> &[u8] {
        &self.message_tag
    }

    pub fn scalar_tag(&self) -> &[u8] {
        &self.scalar_tag
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    pub fn group_order(&self) -> &'static str {
        GROUP_ORDER
    }
}

/// On-disk form of [`Parameters`]: compressed generators and tags as hex.
#[derive(Serialize, Deserialize)]
struct EncodedParameters {
    g1: String,
    g2: String,
    message_tag: String,
    scalar_tag: String,
    max_messages: usize,
}

impl From<Parameters> for EncodedParameters {
    fn from(params: Parameters) -> Self {
        Self {
            g1: encode_g1(&G1Affine::from(params.g1)),
            g2: encode_g2(&G2Affine::from(params.g2)),
            message_tag: hex::encode(params.message_tag),
            scalar_tag: hex::encode(params.scalar_tag),
            max_messages: params.max_messages,
        }
    }
}

impl TryFrom<EncodedParameters> for Parameters {
    type Error = ConfigurationError;

    fn try_from(encoded: EncodedParameters) -> Result<Self, Self::Error> {
        Parameters::from_parts(
            decode_g1("g1", &encoded.g1)?.into(),
            decode_g2("g2", &encoded.g2)?.into(),
            hex::decode(&encoded.message_tag)?,
            hex::decode(&encoded.scalar_tag)?,
            encoded.max_messages,
        )
    }
}
