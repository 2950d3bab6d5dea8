//! Deterministic string hashing
//!
//! The hash is the classic `h * 31 + c` rolling hash evaluated over UTF-16
//! code units in 32-bit two's-complement arithmetic. Every intermediate step
//! wraps, so results are bit-identical to any other implementation that
//! truncates to a signed 32-bit integer after each multiply-add.

/// Hash a string to a non-negative 32-bit value
///
/// `i32::MIN` has no positive counterpart in `i32`, which is why the
/// absolute value is returned as `u32`.
pub fn string_hash(s: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in s.encode_utf16() {
        // (hash << 5) - hash == hash * 31
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

/// Lowercase base-36 rendering of `n`
pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::with_capacity(13);
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    // Only ASCII digits were pushed
    String::from_utf8(buf).unwrap_or_default()
}

/// Derive a record id from its content, optionally suffixed with `-{index}`
pub fn generate_id(content: &str, index: Option<usize>) -> String {
    let hash = to_base36(u64::from(string_hash(content)));
    match index {
        Some(i) => format!("{}-{}", hash, i),
        None => hash,
    }
}
