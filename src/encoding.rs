// Hex helpers shared by the serde representations of parameters, keys and signatures.
use bls12_381::{G1Affine, G2Affine, Scalar};

use crate::error::ConfigurationError;

pub(crate) const G1_COMPRESSED_SIZE: usize = 48;
pub(crate) const G2_COMPRESSED_SIZE: usize = 96;
pub(crate) const SCALAR_SIZE: usize = 32;

fn decode_fixed<const N: usize>(
    field: &'static str,
    encoded: &str,
) -> Result<[u8; N], ConfigurationError> {
    let bytes = hex::decode(encoded)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| ConfigurationError::IncorrectLength {
        field,
        expected: N,
        got: bytes.len(),
    })
}

pub(crate) fn encode_g1(point: &G1Affine) -> String {
    hex::encode(point.to_compressed())
}

pub(crate) fn encode_g2(point: &G2Affine) -> String {
    hex::encode(point.to_compressed())
}

pub(crate) fn encode_scalar(scalar: &Scalar) -> String {
    hex::encode(scalar.to_bytes())
}

pub(crate) fn decode_g1(
    field: &'static str,
    encoded: &str,
) -> Result<G1Affine, ConfigurationError> {
    let bytes = decode_fixed::<G1_COMPRESSED_SIZE>(field, encoded)?;
    Option::<G1Affine>::from(G1Affine::from_compressed(&bytes))
        .ok_or(ConfigurationError::InvalidPoint(field))
}

pub(crate) fn decode_g2(
    field: &'static str,
    encoded: &str,
) -> Result<G2Affine, ConfigurationError> {
    let bytes = decode_fixed::<G2_COMPRESSED_SIZE>(field, encoded)?;
    Option::<G2Affine>::from(G2Affine::from_compressed(&bytes))
        .ok_or(ConfigurationError::InvalidPoint(field))
}

pub(crate) fn decode_scalar(
    field: &'static str,
    encoded: &str,
) -> Result<Scalar, ConfigurationError> {
    let bytes = decode_fixed::<SCALAR_SIZE>(field, encoded)?;
    Option::<Scalar>::from(Scalar::from_bytes(&bytes))
        .ok_or(ConfigurationError::InvalidScalar(field))
}
