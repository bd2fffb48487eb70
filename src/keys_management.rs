use bls12_381::{G2Affine, G2Projective, Scalar};
use ff::Field;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::encoding::{decode_g2, encode_g2};
use crate::error::ConfigurationError;
use crate::parameters::Parameters;

/// Signer's public key `PK = sk·G2`, a point in the twist group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKey(pub(crate) G2Projective);

impl PublicKey {
    /// Wraps a twist-group point. The identity is refused: it is the public
    /// key of `sk = 0` and would accept `A = C·e⁻¹` for any `e`.
    pub fn new(point: G2Projective) -> Result<Self, ConfigurationError> {
        if bool::from(point.is_identity()) {
            return Err(ConfigurationError::IdentityPublicKey);
        }
        Ok(PublicKey(point))
    }

    pub fn point(&self) -> &G2Projective {
        &self.0
    }

    pub fn to_compressed(&self) -> [u8; 96] {
        G2Affine::from(self.0).to_compressed()
    }
}

impl From<PublicKey> for String {
    fn from(public_key: PublicKey) -> Self {
        encode_g2(&G2Affine::from(public_key.0))
    }
}

impl TryFrom<String> for PublicKey {
    type Error = ConfigurationError;

    fn try_from(encoded: String) -> Result<Self, Self::Error> {
        PublicKey::new(decode_g2("public key", &encoded)?.into())
    }
}

pub struct KeyPair {
    pub(crate) private_key: Secret<Scalar>,
    pub public_key: PublicKey,
}

use std::fmt;
impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Format the KeyPair struct without including private_key
        write!(f, "KeyPair {{ public_key: {:?} }}", self.public_key)
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        let private_key_clone = Secret::new(*self.private_key.expose_secret());

        KeyPair {
            private_key: private_key_clone,
            public_key: self.public_key,
        }
    }
}

impl KeyPair {
    /// Samples a secret key uniformly from `[1, n-1]` and derives `PK = sk·G2`.
    pub fn create<R>(params: &Parameters, mut rng: R) -> KeyPair
    where
        R: rand::CryptoRng + rand::RngCore,
    {
        let private_key = loop {
            let candidate = Scalar::random(&mut rng);
            if !bool::from(candidate.is_zero()) {
                break Secret::new(candidate);
            }
        };
        let public_key = PublicKey(params.g2() * private_key.expose_secret());
        KeyPair {
            private_key,
            public_key,
        }
    }

    pub fn create_from_private_key(
        params: &Parameters,
        private_key: Secret<Scalar>,
    ) -> Result<KeyPair, ConfigurationError> {
        if bool::from(private_key.expose_secret().is_zero()) {
            return Err(ConfigurationError::ZeroSecretKey);
        }
        let public_key = PublicKey(params.g2() * private_key.expose_secret());
        Ok(KeyPair {
            private_key,
            public_key,
        })
    }

    /// Rebuilds a key pair from stored material, checking that the public
    /// half really belongs to the secret half.
    pub fn from_parts(
        params: &Parameters,
        private_key: Secret<Scalar>,
        public_key: PublicKey,
    ) -> Result<KeyPair, ConfigurationError> {
        let key_pair = Self::create_from_private_key(params, private_key)?;
        if key_pair.public_key != public_key {
            return Err(ConfigurationError::KeyMismatch);
        }
        Ok(key_pair)
    }

    pub fn get_public_key(&self) -> PublicKey {
        self.public_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_public_key_matches_secret() {
        let params = Parameters::default();
        let keys = KeyPair::create(&params, StdRng::seed_from_u64(7));
        let expected = G2Projective::generator() * keys.private_key.expose_secret();
        assert_eq!(keys.public_key.point(), &expected);
    }

    #[test]
    fn test_zero_private_key_is_rejected() {
        let params = Parameters::default();
        let result = KeyPair::create_from_private_key(&params, Secret::new(Scalar::zero()));
        assert!(matches!(result, Err(ConfigurationError::ZeroSecretKey)));
    }

    #[test]
    fn test_mismatched_public_key_is_rejected() {
        let params = Parameters::default();
        let other = KeyPair::create(&params, StdRng::seed_from_u64(1));
        let result = KeyPair::from_parts(
            &params,
            Secret::new(Scalar::from(42u64)),
            other.get_public_key(),
        );
        assert!(matches!(result, Err(ConfigurationError::KeyMismatch)));
    }

    #[test]
    fn test_debug_output_hides_private_key() {
        let params = Parameters::default();
        let keys = KeyPair::create_from_private_key(&params, Secret::new(Scalar::from(5u64)))
            .unwrap();
        let printed = format!("{:?}", keys);
        assert!(printed.starts_with("KeyPair { public_key:"));
        assert!(!printed.contains("private_key"));
    }

    #[test]
    fn test_identity_public_key_is_rejected() {
        assert!(matches!(
            PublicKey::new(G2Projective::identity()),
            Err(ConfigurationError::IdentityPublicKey)
        ));

        let encoded = hex::encode(G2Affine::identity().to_compressed());
        assert!(matches!(
            PublicKey::try_from(encoded),
            Err(ConfigurationError::IdentityPublicKey)
        ));
    }

    #[test]
    fn test_public_key_string_encoding() {
        let params = Parameters::default();
        let keys = KeyPair::create(&params, StdRng::seed_from_u64(3));
        let encoded: String = keys.get_public_key().into();
        assert_eq!(encoded.len(), 192);
        assert_eq!(PublicKey::try_from(encoded).unwrap(), keys.get_public_key());
    }
}
