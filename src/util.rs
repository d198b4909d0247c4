use std::borrow::Cow;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Shorten `text` to at most `max_chars` characters, ending with an ellipsis
/// when cut.
pub fn truncate_label(text: &str, max_chars: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_chars {
        return Cow::Borrowed(text);
    }

    let kept = text.chars().take(max_chars.saturating_sub(1)).collect::<String>();
    Cow::Owned(format!("{kept}…"))
}

/// Value in `[0, 1]` from the 32-bit FNV-1a hash of `text`, identical on
/// every platform and toolchain.
pub fn stable_unit(text: &str) -> f32 {
    let hash = text.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    });

    (f64::from(hash) / f64::from(u32::MAX)) as f32
}
