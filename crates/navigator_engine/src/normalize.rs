//! Text normalization and message signatures.
//!
//! Signatures are content-derived so that a re-rendered node maps back to
//! the same entry: whitespace runs collapse to one space, text is trimmed
//! and case-folded, and only a capped prefix feeds the hash so a partially
//! streamed message and its settled form usually agree.

/// Number of normalized characters that feed the signature hash.
pub const SIGNATURE_PREFIX_CHARS: usize = 300;

/// Number of characters kept for a panel row preview.
pub const DISPLAY_PREVIEW_CHARS: usize = 72;

const PREVIEW_ELLIPSIS: char = '…';

/// Collapses whitespace runs to single spaces, trims, and lower-cases.
pub fn normalize_message_text(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// The capped prefix of a normalized text that identifies the message.
pub fn signature_prefix(normalized: &str) -> &str {
    match normalized.char_indices().nth(SIGNATURE_PREFIX_CHARS) {
        Some((byte_idx, _)) => &normalized[..byte_idx],
        None => normalized,
    }
}

/// Hex-formatted FNV-1a hash of the capped normalized prefix.
pub fn signature(normalized: &str) -> String {
    format!("{:016x}", fnv1a64(signature_prefix(normalized).as_bytes()))
}

/// Truncated single-paragraph preview of the raw message text.
pub fn display_preview(text: &str) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = flattened.char_indices();
    match chars.nth(DISPLAY_PREVIEW_CHARS) {
        Some((byte_idx, _)) => {
            let mut preview = flattened[..byte_idx].trim_end().to_string();
            preview.push(PREVIEW_ELLIPSIS);
            preview
        }
        None => flattened,
    }
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
