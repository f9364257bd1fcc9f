//! Canonical lookup keys for caller-supplied paths.
//!
//! Two spellings address the same file iff they are equal after unifying separators
//! and folding case. `.` and `..` segments are kept as ordinary names.

use std::fmt;

use tracing::trace;

use crate::core::error::FsError;

const SEPARATOR: char = '\\';
const INVALID_CHARS: [char; 6] = ['<', '>', '"', '|', '?', '*'];

/// A path in canonical form: `\` separators, lowercase, no duplicate or trailing separators
/// (except the leading `\\` of a UNC path and the separator of a root such as `c:\`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unc(&self) -> bool {
        self.0.starts_with(r"\\")
    }

    /// Returns the drive letter of a path like `c:\dir`.
    pub fn drive(&self) -> Option<char> {
        let mut chars = self.0.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => Some(letter),
            _ => None,
        }
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Converts `path` into its lookup key.
///
/// Rejects empty paths, control characters, wildcard/redirection characters
/// and a `:` anywhere except right after a leading drive letter.
pub fn normalize<P: AsRef<str>>(path: P) -> Result<NormalizedPath, FsError> {
    let raw = path.as_ref();
    validate(raw)?;

    let mut key = String::with_capacity(raw.len());
    let mut rest = raw;
    if starts_with_two_separators(raw) {
        key.push_str(r"\\");
        rest = raw.trim_start_matches(is_separator);
    }

    for c in rest.chars() {
        if is_separator(c) {
            if !key.ends_with(SEPARATOR) {
                key.push(SEPARATOR);
            }
        } else {
            key.push(fold_case(c));
        }
    }

    if key.len() > 1 && key.ends_with(SEPARATOR) && key != r"\\" && !is_drive_root(&key) {
        key.pop();
    }

    trace!(path = raw, key = %key, "normalized path");
    Ok(NormalizedPath(key))
}

fn validate(raw: &str) -> Result<(), FsError> {
    let malformed = |reason| FsError::Malformed {
        path: raw.to_string(),
        reason,
    };

    if raw.trim().is_empty() {
        return Err(malformed("empty"));
    }
    for (i, c) in raw.chars().enumerate() {
        if c.is_control() {
            return Err(malformed("contains control characters"));
        }
        if INVALID_CHARS.contains(&c) {
            return Err(malformed("contains invalid characters"));
        }
        if c == ':' && !(i == 1 && raw.starts_with(|l: char| l.is_ascii_alphabetic())) {
            return Err(malformed("colon is only allowed after a drive letter"));
        }
    }
    Ok(())
}

/// Ordinal, one-to-one case fold.
///
/// Chars are matched by their simple (single-char) uppercase mapping. The key spells the
/// class in lowercase when lowercasing maps back onto the same uppercase char, so `K` and
/// `k` share a key while the Kelvin sign and the dotted capital I keep their own.
fn fold_case(c: char) -> char {
    let upper = single(c.to_uppercase()).unwrap_or(c);
    match single(upper.to_lowercase()) {
        Some(lower) if single(lower.to_uppercase()) == Some(upper) => lower,
        _ => upper,
    }
}

fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

fn starts_with_two_separators(raw: &str) -> bool {
    let mut chars = raw.chars();
    matches!((chars.next(), chars.next()), (Some(a), Some(b)) if is_separator(a) && is_separator(b))
}

fn is_drive_root(key: &str) -> bool {
    let bytes = key.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'\\'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn key(path: &str) -> String {
        normalize(path).unwrap().as_str().to_string()
    }

    #[test]
    fn test_case_is_folded() {
        assert_eq!(key(r"C:\SomeThing\Other.GIF"), r"c:\something\other.gif");
        assert_eq!(key(r"c:\something\other.gif"), key(r"C:\SOMETHING\OTHER.GIF"));
    }

    #[test]
    fn test_separators_are_unified() {
        assert_eq!(key("c:/something/demo.txt"), r"c:\something\demo.txt");
        assert_eq!(key(r"c:/something\demo.txt"), r"c:\something\demo.txt");
    }

    #[test]
    fn test_duplicate_separators_collapse() {
        assert_eq!(key(r"c:\\something\\\demo.txt"), r"c:\something\demo.txt");
        assert_eq!(key("c://a//b"), r"c:\a\b");
    }

    #[test]
    fn test_trailing_separator_dropped() {
        assert_eq!(key(r"c:\something\"), r"c:\something");
        assert_eq!(key("/home/user/"), r"\home\user");
    }

    #[test]
    fn test_roots_keep_separator() {
        assert_eq!(key(r"C:\"), r"c:\");
        assert_eq!(key("/"), r"\");
        assert_eq!(key("c:/"), r"c:\");
    }

    #[test]
    fn test_unc_prefix_is_preserved() {
        let path = normalize(r"\\Server\Share\Dir\File.txt").unwrap();
        assert_eq!(path.as_str(), r"\\server\share\dir\file.txt");
        assert!(path.is_unc());
        assert_eq!(key("//server/share/file.txt"), r"\\server\share\file.txt");
        assert_eq!(key(r"\\\server\share"), r"\\server\share");
    }

    #[test]
    fn test_unc_and_rooted_paths_differ() {
        assert_ne!(key(r"\\server\share"), key(r"\server\share"));
    }

    #[test]
    fn test_different_locations_do_not_collide() {
        assert_ne!(key(r"c:\something\demo.txt"), key(r"d:\something\demo.txt"));
        assert_ne!(key(r"c:\something\demo.txt"), key(r"c:\somethingelse\demo.txt"));
        assert_ne!(key(r"c:\a\b"), key(r"c:\ab"));
    }

    #[test]
    fn test_dots_are_not_resolved() {
        assert_eq!(key(r"c:\a\..\b"), r"c:\a\..\b");
        assert_ne!(key(r"c:\a\..\b"), key(r"c:\b"));
    }

    #[test]
    fn test_drive() {
        assert_eq!(normalize(r"C:\x").unwrap().drive(), Some('c'));
        assert_eq!(normalize(r"\x").unwrap().drive(), None);
        assert_eq!(normalize(r"\\server\share").unwrap().drive(), None);
    }

    #[test]
    fn test_unicode_case_folding() {
        assert_eq!(key(r"c:\ÄPFEL\Über.txt"), r"c:\äpfel\über.txt");
        assert_eq!(key("c:\\ΩMEGA"), key("c:\\ωmega"));
    }

    #[test]
    fn test_case_fold_is_one_to_one() {
        // Kelvin sign, Ohm sign and dotted capital I only lowercase into other letters
        assert_ne!(key("c:\\\u{212A}.txt"), key("c:\\k.txt"));
        assert_ne!(key("c:\\\u{212A}.txt"), key("c:\\K.txt"));
        assert_ne!(key("c:\\\u{2126}"), key("c:\\\u{3C9}"));
        assert_ne!(key("\u{130}"), key("i\u{307}"));
        assert_ne!(key("\u{130}"), key("i"));
        assert_eq!(key("c:\\STRASSE"), key("c:\\strasse"));
        assert_ne!(key("c:\\straße"), key("c:\\strasse"));
    }

    #[test]
    fn test_malformed_paths() {
        let bad_paths = [
            "",
            "   ",
            "c:\\a\0b",
            "c:\\a*.txt",
            "c:\\a?.txt",
            "c:\\a|b",
            "c:\\<b>",
            "c:\\a:b",
            "1:\\x",
        ];
        for bad in bad_paths {
            let err = normalize(bad).unwrap_err();
            assert!(err.is_malformed(), "{bad:?} should be rejected");
        }
    }

    proptest! {
        #[test]
        fn prop_case_and_separator_variants_share_a_key(path in r"[a-zA-Z0-9_. /\\]{1,24}") {
            prop_assume!(!path.trim().is_empty());
            let base = normalize(&path).unwrap();
            prop_assert_eq!(&normalize(path.to_ascii_uppercase()).unwrap(), &base);
            prop_assert_eq!(&normalize(path.to_ascii_lowercase()).unwrap(), &base);
            prop_assert_eq!(&normalize(path.replace('/', "\\")).unwrap(), &base);
            prop_assert_eq!(&normalize(path.replace('\\', "/")).unwrap(), &base);
        }

        #[test]
        fn prop_normalize_is_idempotent(path in r"[a-zA-Z]:[a-zA-Z0-9_ /\\]{0,24}") {
            let once = normalize(&path).unwrap();
            let twice = normalize(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
