use bls12_381::{G1Affine, Scalar};
use ff::Field;
use secrecy::ExposeSecret;

use crate::accumulator::Accumulator;
use crate::bbs_signature::BbsSignature;
use crate::error::ArithmeticError;
use crate::keys_management::KeyPair;

/// Multiplicative inverse modulo the group order.
pub(crate) fn invert(x: &Scalar) -> Result<Scalar, ArithmeticError> {
    Option::<Scalar>::from(x.invert()).ok_or(ArithmeticError::NonInvertible)
}

/// Signs an accumulator: `A = C·(e + sk)⁻¹` for a fresh `e` drawn uniformly
/// from the scalar field.
///
/// A draw with `e + sk ≡ 0` has no inverse; it is discarded and `e` is
/// sampled again.
#[tracing::instrument(name = "Signing the accumulator", skip(key_pair, rng))]
pub fn sign_accumulator<R>(
    accumulator: &Accumulator,
    key_pair: &KeyPair,
    mut rng: R,
) -> BbsSignature
where
    R: rand::CryptoRng + rand::RngCore,
{
    loop {
        let e = Scalar::random(&mut rng);
        let xe = e + key_pair.private_key.expose_secret();
        match invert(&xe) {
            Ok(ex) => {
                let a = G1Affine::from(accumulator.point() * ex);
                return BbsSignature::new(a, e);
            }
            Err(ArithmeticError::NonInvertible) => {
                tracing::warn!("blinding factor is not invertible, drawing a new randomizer");
            }
        }
    }
}
