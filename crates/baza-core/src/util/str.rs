/// Case-insensitive ASCII string comparison. Two strings compare equal only
/// if they have the same length and every byte matches case-insensitively.
pub fn str_ieq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Count UTF-8 glyphs (Unicode scalar values) in `s`, not bytes. Used for
/// padding SELECT output to a fixed display width regardless of encoding.
pub fn count_utf8_glyphs(s: &str) -> usize {
    s.chars().count()
}

/// Parse a base-10 signed 64-bit integer, used by both `Int64` columns and
/// as the intermediate form for `Int32` (range-checked by the caller).
pub fn parse_int(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok()
}

/// Parse a base-10 signed 32-bit integer.
pub fn parse_int32(s: &str) -> Option<i32> {
    s.trim().parse::<i32>().ok()
}
