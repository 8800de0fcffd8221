//! Placeholder key generation.
//!
//! Rows created in memory often need a key before a durable one is
//! assigned. Placeholder keys are drawn from a single process-wide RNG
//! behind a `Mutex` - the only shared state in the crate - and are
//! strictly negative so they can never collide with assigned
//! non-negative keys.

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, OnceLock};

/// The shared generator, seeded from entropy on first use
fn shared_rng() -> &'static Mutex<StdRng> {
    static RNG: OnceLock<Mutex<StdRng>> = OnceLock::new();
    RNG.get_or_init(|| Mutex::new(StdRng::from_entropy()))
}

/// Generate a strictly negative placeholder key
///
/// ```rust
/// use rowset::rowset::keys::{is_placeholder_key, placeholder_key};
///
/// let key = placeholder_key();
/// assert!(is_placeholder_key(key));
/// ```
pub fn placeholder_key() -> i64 {
    let mut rng = shared_rng().lock().expect("placeholder RNG lock poisoned");
    rng.gen_range(i64::MIN..0)
}

/// Generate a placeholder name: prefix plus a random alphanumeric suffix
pub fn placeholder_name(prefix: &str, suffix_len: usize) -> String {
    let mut rng = shared_rng().lock().expect("placeholder RNG lock poisoned");
    let suffix: String = (0..suffix_len)
        .map(|_| rng.sample(Alphanumeric) as char)
        .collect();
    format!("{}{}", prefix, suffix)
}

/// Whether a key is a placeholder (negative) rather than an assigned key
pub fn is_placeholder_key(key: i64) -> bool {
    key < 0
}
