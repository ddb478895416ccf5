//! UTF-8 <-> UTF-32 boundary used by the matcher and successor encoder.
//!
//! `source` and `target` strings are plain `&str`, so Rust's type system already
//! guarantees they are valid UTF-8; decoding is therefore just a thin, streaming
//! wrapper around [`str::chars`] that exposes the shape the match loop wants
//! (`has_more` / `next_code_point`) instead of an iterator.
//!
//! The encoder is a different story: the successor algorithm (C5) deliberately emits
//! code points that are not valid Unicode scalar values (the `c + 1` bump past
//! `U+10FFFF`, and values inside the surrogate range `U+D800..=U+DFFF`), because
//! successor consumers only care about byte-wise (`memcmp`) ordering, not Unicode
//! validity. `char::encode_utf8` would panic or refuse those inputs, so this module
//! hand-rolls the encoding. Do not reuse `append_code_point` as a general-purpose
//! UTF-8 emitter.

/// One past the highest valid Unicode code point. The successor algorithm may need to
/// emit exactly this value when bumping `U+10FFFF` by one.
pub const MAX_ENCODABLE_CODEPOINT: u32 = 0x110000;

/// Forward-only reader that yields UTF-32 code points from a UTF-8 string.
pub struct Utf8Reader<'a> {
    chars: std::str::Chars<'a>,
    peeked: Option<char>,
}

impl<'a> Utf8Reader<'a> {
    pub fn new(s: &'a str) -> Self {
        let mut chars = s.chars();
        let peeked = chars.next();
        Utf8Reader { chars, peeked }
    }

    #[inline]
    pub fn has_more(&self) -> bool {
        self.peeked.is_some()
    }

    /// Returns the next code point, advancing the reader. Panics if `has_more()` was
    /// false; callers are expected to check `has_more()` first (matching the
    /// `while u8_reader.hasMore()` loop shape of the original match algorithm).
    #[inline]
    pub fn next_code_point(&mut self) -> u32 {
        let current = self.peeked.take().expect("next_code_point called with no input remaining");
        self.peeked = self.chars.next();
        current as u32
    }
}

/// Encodes a single UTF-32 `codepoint` to a 1-4 byte UTF-8 sequence and appends it to
/// `out`.
///
/// This will happily encode code points that aren't technically part of the valid
/// UTF-8 range but are still correct in `memcmp`-wise byte ordering:
///   - the surrogate range `U+D800..=U+DFFF` (not representable in conformant UTF-8)
///   - `U+10FFFF + 1` (one past the maximum valid code point)
///
/// Panics if `codepoint > MAX_ENCODABLE_CODEPOINT`: any larger value indicates an
/// internal invariant violation in the successor algorithm, not malformed user input
/// (see the crate's error-handling design), so this is a hard failure rather than a
/// `Result`.
pub fn append_code_point(out: &mut Vec<u8>, codepoint: u32) {
    if codepoint < 0x80 {
        out.push(codepoint as u8);
    } else if codepoint < 0x800 {
        out.push(0xC0 | (codepoint >> 6) as u8);
        out.push(0x80 | (codepoint & 0x3F) as u8);
    } else if codepoint < 0x10000 {
        out.push(0xE0 | (codepoint >> 12) as u8);
        out.push(0x80 | ((codepoint >> 6) & 0x3F) as u8);
        out.push(0x80 | (codepoint & 0x3F) as u8);
    } else if codepoint <= MAX_ENCODABLE_CODEPOINT {
        out.push(0xF0 | (codepoint >> 18) as u8);
        out.push(0x80 | ((codepoint >> 12) & 0x3F) as u8);
        out.push(0x80 | ((codepoint >> 6) & 0x3F) as u8);
        out.push(0x80 | (codepoint & 0x3F) as u8);
    } else {
        panic!("invalid UTF-32 codepoint: U+{codepoint:04X} ({codepoint})");
    }
}

/// Lowercases a single code point for uncased matching. Mirrors `LowerCase::convert`
/// in the original source: a single-code-point mapping, not a locale-aware or
/// multi-code-point (e.g. German sharp S) case fold.
#[inline]
pub fn lowercase_codepoint(cp: u32) -> u32 {
    match char::from_u32(cp) {
        Some(c) => c.to_lowercase().next().unwrap_or(c) as u32,
        None => cp,
    }
}

/// Converts a `&str` target into its UTF-32 representation, lowercasing each code
/// point iff `lowercase` is set. Used once at `build()` time (§3: casing is applied at
/// construction, never re-derived at match time beyond per-character normalization of
/// the source).
pub fn str_to_utf32(s: &str, lowercase: bool) -> Vec<u32> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        let cp = c as u32;
        out.push(if lowercase { lowercase_codepoint(cp) } else { cp });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_yields_code_points_in_order() {
        let mut r = Utf8Reader::new("héllo");
        let mut out = Vec::new();
        while r.has_more() {
            out.push(r.next_code_point());
        }
        let expected: Vec<u32> = "héllo".chars().map(|c| c as u32).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_reader_has_no_more() {
        let r = Utf8Reader::new("");
        assert!(!r.has_more());
    }

    #[test]
    fn encodes_ascii() {
        let mut buf = Vec::new();
        append_code_point(&mut buf, b'a' as u32);
        assert_eq!(buf, b"a");
    }

    #[test]
    fn encodes_multibyte() {
        let mut buf = Vec::new();
        append_code_point(&mut buf, 'é' as u32);
        assert_eq!(String::from_utf8(buf).unwrap(), "é");
    }

    #[test]
    fn encodes_one_past_max_codepoint() {
        let mut buf = Vec::new();
        append_code_point(&mut buf, MAX_ENCODABLE_CODEPOINT);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn encodes_surrogate_range() {
        let mut buf = Vec::new();
        append_code_point(&mut buf, 0xD800);
        assert_eq!(buf.len(), 3);
    }

    #[test]
    #[should_panic]
    fn panics_above_max_codepoint() {
        let mut buf = Vec::new();
        append_code_point(&mut buf, MAX_ENCODABLE_CODEPOINT + 1);
    }

    #[test]
    fn lowercases_ascii_and_non_ascii() {
        assert_eq!(lowercase_codepoint('A' as u32), 'a' as u32);
        assert_eq!(lowercase_codepoint('É' as u32), 'é' as u32);
        assert_eq!(lowercase_codepoint('z' as u32), 'z' as u32);
    }
}
