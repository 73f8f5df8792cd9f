use super::*;
use crate::constants::ORDER_HEX;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn fixed_key() -> SigningKey {
    SigningKey::from_bytes(&[0x42; SK_SIZE]).expect("key")
}

fn order_bytes() -> [u8; SK_SIZE] {
    let mut out = [0u8; SK_SIZE];
    out.copy_from_slice(&hex::decode(ORDER_HEX).expect("hex"));
    out
}

fn scalar(v: u8) -> [u8; SK_SIZE] {
    let mut out = [0u8; SK_SIZE];
    out[SK_SIZE - 1] = v;
    out
}

fn flip(bytes: &[u8], bit: usize) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out[bit / 8] ^= 1 << (bit % 8);
    out
}

#[test]
fn test_sign_verify() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng).expect("random");
    let pk = sk.verifying_key().expect("pk");
    let msg = b"schnorr over Z_p";

    let sig = sk.sign(msg).expect("sign");
    assert!(pk.verify(msg, &sig));
}

#[test]
fn test_verify_rejects_wrong_message() {
    let sk = fixed_key();
    let pk = sk.verifying_key().expect("pk");
    let sig = sk.sign(b"message 10 11 12").expect("sign");

    assert!(!pk.verify(b"message 10 11 13", &sig));
}

#[test]
fn test_verify_rejects_wrong_key() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng).expect("random");
    let msg = b"message 21 22 23";
    let sig = sk.sign(msg).expect("sign");

    let wrong_sk = SigningKey::random(&mut rng).expect("random");
    let wrong_pk = wrong_sk.verifying_key().expect("pk");

    assert!(!wrong_pk.verify(msg, &sig));
}

#[test]
fn test_signing_is_deterministic() {
    let sk = fixed_key();
    let a = sk.sign(b"fixed message").expect("sign");
    let b = sk.sign(b"fixed message").expect("sign");
    assert_eq!(a.to_bytes(), b.to_bytes());

    let c = sk.sign(b"other message").expect("sign");
    assert_ne!(a, c);
}

#[test]
fn test_single_bit_flips_are_rejected() {
    let sk = fixed_key();
    let pk = sk.verifying_key().expect("pk");
    let msg = b"flip me";
    let sig = sk.sign(msg).expect("sign");
    assert!(pk.verify(msg, &sig));

    for bit in 0..msg.len() * 8 {
        assert!(!pk.verify(&flip(msg, bit), &sig), "message bit {bit}");
    }

    let sig_bytes = sig.to_bytes();
    for bit in 0..SIG_SIZE * 8 {
        if let Ok(bad) = Signature::from_bytes(&flip(&sig_bytes, bit)) {
            assert!(!pk.verify(msg, &bad), "signature bit {bit}");
        }
    }

    let pk_bytes = pk.to_bytes();
    for bit in 0..PK_SIZE * 8 {
        if let Ok(bad) = VerifyingKey::from_bytes(&flip(&pk_bytes, bit)) {
            assert!(!bad.verify(msg, &sig), "public key bit {bit}");
        }
    }
}

#[test]
fn test_tweaks_match_public_keys() {
    let sk = fixed_key();
    let pk = sk.verifying_key().expect("pk");
    let tweak = [0x17; SK_SIZE];

    let added = sk.tweak_add(&tweak).expect("tweak add");
    assert_eq!(
        added.verifying_key().expect("pk"),
        pk.tweak_add(&tweak).expect("pk tweak add")
    );

    let multiplied = sk.tweak_mul(&tweak).expect("tweak mul");
    assert_eq!(
        multiplied.verifying_key().expect("pk"),
        pk.tweak_mul(&tweak).expect("pk tweak mul")
    );

    let msg = b"tweaked";
    let sig = added.sign(msg).expect("sign");
    assert!(pk.tweak_add(&tweak).expect("pk").verify(msg, &sig));

    assert_eq!(sk.tweak_add(&scalar(0)).expect("zero tweak"), sk);
    assert_eq!(
        sk.tweak_mul(&scalar(0)).unwrap_err(),
        SchnorrError::InvalidScalar
    );
    assert_eq!(
        pk.tweak_mul(&scalar(0)).unwrap_err(),
        SchnorrError::InvalidScalar
    );
    assert_eq!(
        sk.tweak_add(&order_bytes()).unwrap_err(),
        SchnorrError::InvalidScalar
    );
}

#[test]
fn test_negate_and_invert() {
    let sk = fixed_key();

    let neg = sk.negate().expect("negate");
    assert_ne!(neg, sk);
    assert_eq!(neg.negate().expect("negate"), sk);
    // sk + (-sk) = 0 is not a valid key
    assert_eq!(
        sk.tweak_add(&neg.to_bytes()).unwrap_err(),
        SchnorrError::InvalidScalar
    );

    let inv = sk.invert().expect("invert");
    assert_eq!(inv.invert().expect("invert"), sk);
    let one = inv.tweak_mul(&sk.to_bytes()).expect("tweak mul");
    assert_eq!(one.to_bytes(), scalar(1));
}

#[test]
fn test_key_parsing() {
    assert_eq!(
        SigningKey::from_bytes(&[0u8; SK_SIZE]).unwrap_err(),
        SchnorrError::InvalidScalar
    );
    assert_eq!(
        SigningKey::from_bytes(&order_bytes()).unwrap_err(),
        SchnorrError::InvalidScalar
    );
    assert_eq!(
        SigningKey::from_bytes(&[1u8; 31]).unwrap_err(),
        SchnorrError::InvalidLength {
            expected: SK_SIZE,
            actual: 31
        }
    );

    // reduce wraps modulo q
    assert_eq!(
        SigningKey::reduce(&order_bytes()).unwrap_err(),
        SchnorrError::InvalidScalar
    );
    let mut q_plus_one = order_bytes();
    q_plus_one[SK_SIZE - 1] += 1;
    assert_eq!(
        SigningKey::reduce(&q_plus_one).expect("reduce").to_bytes(),
        scalar(1)
    );
    assert_eq!(
        SigningKey::reduce(&[0x42; SK_SIZE]).expect("reduce"),
        fixed_key()
    );

    let mut one = [0u8; PK_SIZE];
    one[PK_SIZE - 1] = 1;
    assert_eq!(
        VerifyingKey::from_bytes(&one).unwrap_err(),
        SchnorrError::InvalidPoint
    );
    assert_eq!(
        VerifyingKey::from_bytes(&[0xff; PK_SIZE]).unwrap_err(),
        SchnorrError::InvalidPoint
    );
    assert!(matches!(
        VerifyingKey::from_hex("zz"),
        Err(SchnorrError::InvalidHex(_))
    ));
}

#[test]
fn test_signature_parsing() {
    let sk = fixed_key();
    let sig = sk.sign(b"parse").expect("sign");

    let decoded = Signature::from_hex(&sig.to_hex()).expect("decode");
    assert_eq!(decoded, sig);

    let mut bad_s = sig.to_bytes();
    bad_s[PK_SIZE..].copy_from_slice(&order_bytes());
    assert_eq!(
        Signature::from_bytes(&bad_s).unwrap_err(),
        SchnorrError::InvalidScalar
    );

    let mut zero_r = sig.to_bytes();
    zero_r[..PK_SIZE].fill(0);
    assert_eq!(
        Signature::from_bytes(&zero_r).unwrap_err(),
        SchnorrError::InvalidPoint
    );

    assert_eq!(
        Signature::from_bytes(&[0u8; 10]).unwrap_err(),
        SchnorrError::InvalidLength {
            expected: SIG_SIZE,
            actual: 10
        }
    );
}

#[test]
fn test_serde_round_trip() {
    let sk = fixed_key();
    let vk = VerifyingKey::try_from(&sk).expect("pk");
    let sig = sk.sign(b"serde").expect("sign");

    let sk2: SigningKey = bincode::deserialize(&bincode::serialize(&sk).expect("ser")).expect("de");
    let vk2: VerifyingKey =
        bincode::deserialize(&bincode::serialize(&vk).expect("ser")).expect("de");
    let sig2: Signature =
        bincode::deserialize(&bincode::serialize(&sig).expect("ser")).expect("de");

    assert_eq!(sk2, sk);
    assert_eq!(vk2, vk);
    assert!(vk2.verify(b"serde", &sig2));
}

#[test]
fn test_debug_hides_secret() {
    assert_eq!(format!("{:?}", fixed_key()), "SigningKey(..)");
}

#[test]
fn test_public_key_negate_and_combine() {
    let a = fixed_key();
    let b = SigningKey::from_bytes(&[0x07; SK_SIZE]).expect("key");
    let pa = a.verifying_key().expect("pk");
    let pb = b.verifying_key().expect("pk");

    let neg = pa.negate().expect("negate");
    assert_eq!(neg, a.negate().expect("negate").verifying_key().expect("pk"));
    assert_eq!(neg.negate().expect("negate"), pa);

    // a + b on the secret side is a product of the public keys
    let sum = a.tweak_add(&b.to_bytes()).expect("tweak add");
    let expected = sum.verifying_key().expect("pk");
    assert_eq!(pa.add_key(&pb).expect("add"), expected);
    assert_eq!(VerifyingKey::combine(&[&pa, &pb]).expect("combine"), expected);
    assert_eq!(pa.tweak_add(&b.to_bytes()).expect("tweak add"), expected);

    let c = SigningKey::from_bytes(&[0x09; SK_SIZE]).expect("key");
    let pc = c.verifying_key().expect("pk");
    let abc = sum.tweak_add(&c.to_bytes()).expect("tweak add");
    assert_eq!(
        VerifyingKey::combine(&[&pa, &pb, &pc]).expect("combine"),
        abc.verifying_key().expect("pk")
    );
    assert_eq!(VerifyingKey::combine(&[&pa]).expect("combine"), pa);

    assert_eq!(
        VerifyingKey::combine(&[]).unwrap_err(),
        SchnorrError::InvalidPoint
    );
    assert_eq!(pa.add_key(&neg).unwrap_err(), SchnorrError::InvalidPoint);
}

#[test]
fn test_derive_shared_secret() {
    let mut rng = StdRng::seed_from_u64(7);
    let alice = SigningKey::random(&mut rng).expect("random");
    let bob = SigningKey::random(&mut rng).expect("random");
    let pa = alice.verifying_key().expect("pk");
    let pb = bob.verifying_key().expect("pk");

    let ab = alice.derive(&pb).expect("derive");
    let ba = bob.derive(&pa).expect("derive");
    assert_eq!(ab, ba);

    // g^(a*b) is the key of the product of the scalars
    let product = alice.tweak_mul(&bob.to_bytes()).expect("tweak mul");
    assert_eq!(ab, product.verifying_key().expect("pk").to_bytes());

    let carol = SigningKey::random(&mut rng).expect("random");
    assert_ne!(carol.derive(&pb).expect("derive"), ab);
}

#[test]
fn test_verify_batch() {
    let mut rng = StdRng::seed_from_u64(42);
    let keys: Vec<SigningKey> = (0..4)
        .map(|_| SigningKey::random(&mut rng).expect("random"))
        .collect();
    let pks: Vec<VerifyingKey> = keys
        .iter()
        .map(|k| k.verifying_key().expect("pk"))
        .collect();
    let msgs: Vec<Vec<u8>> = (0..4u8).map(|i| vec![i; 8 + i as usize]).collect();
    let sigs: Vec<Signature> = keys
        .iter()
        .zip(&msgs)
        .map(|(k, m)| k.sign(m).expect("sign"))
        .collect();

    let batch: Vec<(&[u8], &Signature, &VerifyingKey)> = msgs
        .iter()
        .zip(&sigs)
        .zip(&pks)
        .map(|((m, s), p)| (m.as_slice(), s, p))
        .collect();

    assert!(verify_batch(&mut rng, &batch));
    assert!(verify_batch(&mut rng, &batch[..1]));
    assert!(verify_batch(&mut rng, &[]));

    // one wrong message spoils the batch
    let mut bad = batch.clone();
    bad[2].0 = &b"something else"[..];
    assert!(!verify_batch(&mut rng, &bad));

    // swapped keys
    let mut swapped = batch.clone();
    swapped[1].2 = &pks[3];
    assert!(!verify_batch(&mut rng, &swapped));

    // a signature moved to another message
    let mut moved = batch.clone();
    moved[0].1 = &sigs[1];
    assert!(!verify_batch(&mut rng, &moved));
}
