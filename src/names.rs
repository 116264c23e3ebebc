//! Random name source used by the name, csv and javascript generators.

use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Fork a concrete RNG for the fake crate from the caller's RNG
fn fake_rng(rng: &mut dyn RngCore) -> StdRng {
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);
    StdRng::from_seed(seed)
}

/// A random human-readable full name
pub fn human_name(rng: &mut dyn RngCore) -> String {
    Name().fake_with_rng(&mut fake_rng(rng))
}

/// A short identifier-safe token matching `[a-z][a-z0-9_]*`
pub fn identifier(rng: &mut dyn RngCore) -> String {
    let word: String = Word().fake_with_rng(&mut fake_rng(rng));
    let mut token: String = word
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if !token.starts_with(|c: char| c.is_ascii_lowercase()) {
        token.insert_str(0, "id");
    }

    let suffix: u32 = rng.random_range(0..1000);
    format!("{}_{}", token, suffix)
}
