use bls12_381::{pairing, G1Affine, G2Affine, Gt};

use crate::accumulator::Accumulator;
use crate::bbs_signature::BbsSignature;
use crate::keys_management::PublicKey;
use crate::parameters::Parameters;

/// A bilinear map `G1 × G2 → Gt`.
///
/// An engine whose pairing algorithm needs an auxiliary point draws it
/// internally; it is not part of the verification equation.
pub trait PairingEngine {
    fn pair(&self, p: &G1Affine, q: &G2Affine) -> Gt;
}

/// Optimal ate pairing over BLS12-381.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bls12Pairing;

impl PairingEngine for Bls12Pairing {
    fn pair(&self, p: &G1Affine, q: &G2Affine) -> Gt {
        pairing(p, q)
    }
}

/// Checks `e(A, e·G2 + PK) == e(C, G2)`.
///
/// The equality holds exactly when `A = C·(e + sk)⁻¹` for the secret key
/// behind `public_key`. A mismatch is a definitive rejection, and so is an
/// identity public key, under which `A = C·e⁻¹` satisfies the equation for
/// any `e`.
#[tracing::instrument(name = "Verifying the BBS signature", skip(params, engine))]
pub fn verify_accumulator<P: PairingEngine>(
    params: &Parameters,
    engine: &P,
    signature: &BbsSignature,
    accumulator: &Accumulator,
    public_key: &PublicKey,
) -> bool {
    if bool::from(public_key.point().is_identity()) {
        tracing::debug!("public key is the identity");
        return false;
    }

    let a2 = *signature.a();
    let c2 = accumulator.to_affine();
    let g2 = G2Affine::from(params.g2());

    let ev = G2Affine::from(params.g2() * signature.e() + public_key.point());

    let wa = engine.pair(&a2, &ev);
    let wc = engine.pair(&c2, &g2);

    let verified = wa == wc;
    if !verified {
        tracing::debug!("pairing equation does not hold");
    }
    verified
}
