//! Normalizer — rewrites volatile values in a message to placeholder tokens.
//!
//! Substitutions run most-specific first: IPv4 addresses, then `0x` hex
//! values, then any remaining digit run. Once all three have run no digits
//! are left, so normalizing twice is the same as normalizing once.

use regex::Regex;
use std::sync::LazyLock;

pub const IP_PLACEHOLDER: &str = "<IP>";
pub const MEM_PLACEHOLDER: &str = "<MEM>";
pub const NUM_PLACEHOLDER: &str = "<NUM>";

static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}").expect("ipv4 pattern must compile")
});
static HEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0x[0-9a-fA-F]+").expect("hex pattern must compile"));
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("number pattern must compile"));

/// Normalize a raw message so that structurally identical lines with
/// different concrete values compare equal.
pub fn normalize(message: &str) -> String {
    let normalized = IPV4_PATTERN.replace_all(message, IP_PLACEHOLDER);
    let normalized = HEX_PATTERN.replace_all(&normalized, MEM_PLACEHOLDER);
    NUMBER_PATTERN
        .replace_all(&normalized, NUM_PLACEHOLDER)
        .into_owned()
}
