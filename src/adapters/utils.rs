//! Shared utilities for adapter-layer validation.

/// Returns `true` if every byte of `s` is in the printable ASCII range
/// `0x20..=0x7E` (space through tilde, inclusive).
pub(super) fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// Returns `true` if `s` is exactly `len` hex digits.
pub(super) fn is_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Returns `true` for a colon-separated 48-bit MAC (`00:1A:22:0A:91:CF`).
pub(super) fn is_mac_address(s: &str) -> bool {
    let mut octets = 0;
    for part in s.split(':') {
        if !is_hex(part, 2) {
            return false;
        }
        octets += 1;
    }
    octets == 6
}
