//! Token name normalization
//!
//! Venues report asset names either already hex-encoded behind a `0x` marker
//! or as raw text. Units are always built from the hex form.

/// Marker venues put in front of an already hex-encoded name
pub const HEX_MARKER: &str = "0x";

/// Normalize a venue-reported token name to its hex-encoded on-chain form
///
/// `"0x41"` yields `"41"`; raw text such as `"AB"` is hex-encoded byte for
/// byte (`"4142"`). When the marker has nothing after it the text before it
/// is kept.
pub fn decode_token_name(raw: &str) -> String {
    if !raw.contains(HEX_MARKER) {
        return hex::encode(raw.as_bytes());
    }

    let mut segments: Vec<&str> = raw.split(HEX_MARKER).collect();
    while segments.len() > 1 && segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }

    match segments.as_slice() {
        [_, payload, ..] => payload.to_string(),
        [only] => only.to_string(),
        [] => String::new(),
    }
}
