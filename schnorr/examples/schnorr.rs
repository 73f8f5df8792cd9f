use rand::SeedableRng;
use rand::rngs::StdRng;
use schnorr::{Signature, SigningKey, VerifyingKey};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng).expect("random key");
    let vk = sk.verifying_key().expect("verifying key");

    let sk_bytes = bincode::serialize(&sk).expect("serialize sk");
    let vk_bytes = bincode::serialize(&vk).expect("serialize vk");

    let msg = b"hello schnorr";
    let sig = sk.sign(msg).expect("sign");
    let sig_bytes = bincode::serialize(&sig).expect("serialize sig");

    let sk2: SigningKey = bincode::deserialize(&sk_bytes).expect("deserialize sk");
    let vk2: VerifyingKey = bincode::deserialize(&vk_bytes).expect("deserialize vk");
    let sig2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");

    assert!(vk2.verify(msg, &sig2));
    assert_eq!(sk2.sign(msg).expect("sign"), sig2);

    println!("public key: {}", vk2.to_hex());
    println!("signature:  {}", sig2.to_hex());
}
