//! Deterministic auto-color assignment for tags and statuses.
//!
//! Maps a name to a color from a curated palette using a simple hash, so the
//! same name always gets the same color without storing anything.

/// Curated palette of 12 colors (6-char hex without `#`), chosen to read well
/// as pill backgrounds in both light and dark themes.
const PALETTE: &[&str] = &[
    "d73a4a", // red
    "e36209", // orange
    "fbca04", // gold
    "0e8a16", // green
    "008672", // sea green
    "006b75", // teal
    "1d76db", // blue
    "0075ca", // ocean
    "5319e7", // purple
    "7057ff", // violet
    "d876e3", // pink
    "b60205", // dark red
];

/// Return a deterministic color for a name.
pub fn auto_color(name: &str) -> &'static str {
    let hash = fnv1a(name);
    PALETTE[(hash as usize) % PALETTE.len()]
}

/// FNV-1a hash (32-bit) for short strings.
fn fnv1a(s: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in s.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}
