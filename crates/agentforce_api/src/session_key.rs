use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const KEY_TEMPLATE: &str = "xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx";

/// Generate a UUID-shaped session correlation key.
///
/// The value only has to look like a v4 UUID to the remote service: each
/// `x` slot takes a random hex digit and the `y` slot a variant digit from
/// `{8, 9, a, b}`. The digits come from a non-cryptographic generator, so
/// the key carries no uniqueness or secrecy guarantee and must never be
/// used as one.
pub fn generate_session_key() -> String {
    let mut rng = SmallRng::from_entropy();
    KEY_TEMPLATE
        .chars()
        .map(|slot| match slot {
            'x' => hex_digit(rng.gen_range(0..16)),
            'y' => hex_digit(rng.gen_range(8..12)),
            other => other,
        })
        .collect()
}

fn hex_digit(value: u32) -> char {
    char::from_digit(value, 16).unwrap_or('0')
}
