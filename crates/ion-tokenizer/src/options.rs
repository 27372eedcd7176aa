//! Tokenizer configuration.
//!
//! A small, `Copy`-able, fully `Default`-able struct of independent boolean
//! knobs, rather than threading ad hoc flags through scanner function
//! signatures.

/// Configuration for a [`crate::Tokenizer`].
///
/// All fields default to the behavior required by Ion 1.0 text; the knobs
/// here only loosen or tighten compatibility edges left to implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzzing", derive(arbitrary::Arbitrary))]
pub struct TokenizerOptions {
    /// Accept `\U` as well as `\u` for an 8-hex-digit escape whose value is
    /// uppercase-prefixed. Ion text only distinguishes `\u`/`\U` by digit
    /// count (4 vs 8), so this defaults to `true`; set to `false` to reject
    /// escapes that don't match the exact casing most examples use.
    pub allow_uppercase_u_escape: bool,

    /// When `true` (the default), a `\xHH` escape with `HH > 0x7F` still
    /// counts toward the "all code points \u{2264} 0xFF, no `\u`/`\U` used"
    /// clob-compatibility test — i.e. it does not by itself force a
    /// `STRING_UTF8`/`STRING_UTF8_LONG` kind. This preserves round-trip
    /// compatibility with the reference tokenizer's documented quirk; set to
    /// `false` for a stricter reading where any escape above ASCII forces
    /// the UTF-8 kind.
    pub xhh_escape_preserves_clob_kind: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            allow_uppercase_u_escape: true,
            xhh_escape_preserves_clob_kind: true,
        }
    }
}
