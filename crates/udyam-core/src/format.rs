//! Display masks for captured values.

use once_cell::sync::Lazy;
use regex::Regex;

static MOBILE_MASK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{6})([0-9]{4})").expect("mobile mask pattern compiles"));
static IDENTITY_GROUPS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})([0-9]{4})([0-9]{4})").expect("identity group pattern compiles")
});

/// Hide the last four digits of a mobile number: `9876543210` → `987654****`.
///
/// Only the first run of ten digits is masked; values without one are
/// returned unchanged.
pub fn mask_mobile(mobile: &str) -> String {
    MOBILE_MASK.replacen(mobile, 1, "${1}****").into_owned()
}

/// Group an identity number in 4-4-4 clusters: `123456789012` → `1234 5678 9012`.
pub fn group_identity_number(identity_number: &str) -> String {
    IDENTITY_GROUPS
        .replacen(identity_number, 1, "${1} ${2} ${3}")
        .into_owned()
}
