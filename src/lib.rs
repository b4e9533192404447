//! Character predicates for symbolic automata.
//! Sets of 16-bit characters are stored as normalized lists of closed intervals, see [IntervalCharSet].

pub mod charset;
mod error;

pub use charset::{CharRange, IntervalCharSet};
pub use error::Error;

use std::fmt::Display;

use num_traits::Bounded;
use quickcheck::Arbitrary;

/// A character of the predicate domain, i.e., a 16-bit code unit in the range 0x0000 to 0xFFFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Char16(u16);

/// The smallest character of the domain.
pub const MIN_CHAR: Char16 = Char16(0x0000);

/// The largest character of the domain.
pub const MAX_CHAR: Char16 = Char16(0xFFFF);

/// Characters that render as a two-character escape sequence.
static SHORT_ESCAPES: [(u16, &str); 7] = [
    (0x09, "\\t"),
    (0x08, "\\b"),
    (0x0A, "\\n"),
    (0x0D, "\\r"),
    (0x0C, "\\f"),
    (0x27, "\\'"),
    (0x22, "\\\""),
];

impl Char16 {
    /// The maximum `Char16`.
    pub const MAX: Self = MAX_CHAR;

    /// The minimum `Char16`.
    pub const MIN: Self = MIN_CHAR;

    /// Create a new `Char16` from its code unit.
    /// Use [Char16::try_from] to convert a `char`, which fails for characters above 0xFFFF.
    pub const fn new(code: u16) -> Self {
        Char16(code)
    }

    /// Get the `char` representation of this `Char16`, if it can be represented as a `char`.
    ///
    /// # Examples
    /// ```
    /// use char_pred::Char16;
    /// assert_eq!(Char16::new(0x61).as_char(), Some('a'));
    /// // A lone surrogate is a valid code unit but not a `char`.
    /// assert_eq!(Char16::from(0xD800u16).as_char(), None);
    /// ```
    pub fn as_char(self) -> Option<char> {
        char::from_u32(self.0 as u32)
    }

    /// Get the numeric value of this `Char16`.
    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns the next `Char16`, or `None` if this is [MAX_CHAR].
    ///
    /// # Examples
    /// ```
    /// use char_pred::{Char16, MAX_CHAR};
    /// assert_eq!(Char16::new(0x61).next(), Some(Char16::new(0x62)));
    /// assert_eq!(MAX_CHAR.next(), None);
    /// ```
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Char16)
    }

    /// Like `next`, but returns [MAX_CHAR] instead of `None` at the upper end of the domain.
    pub fn saturating_next(self) -> Self {
        Char16(self.0.saturating_add(1))
    }

    /// Returns the previous `Char16`, or `None` if this is [MIN_CHAR].
    ///
    /// # Examples
    /// ```
    /// use char_pred::{Char16, MIN_CHAR};
    /// assert_eq!(Char16::new(0x62).prev(), Some(Char16::new(0x61)));
    /// assert_eq!(MIN_CHAR.prev(), None);
    /// ```
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(Char16)
    }

    /// Like `prev`, but returns [MIN_CHAR] instead of `None` at the lower end of the domain.
    pub fn saturating_prev(self) -> Self {
        Char16(self.0.saturating_sub(1))
    }

    /// Returns `true` if this character is rendered literally, i.e., lies in the range 0x20 to 0x7F.
    ///
    /// # Examples
    /// ```
    /// use char_pred::Char16;
    /// assert!(Char16::new(0x61).printable());
    /// assert!(!Char16::new(0x0A).printable());
    /// assert!(!Char16::new(0xE9).printable());
    /// ```
    pub fn printable(self) -> bool {
        (0x20..=0x7F).contains(&self.0)
    }

    /// Escape this `Char16` as a Unicode escape sequence of the form `\uXXXX`, with exactly four lowercase hexadecimal digits.
    ///
    /// # Examples
    /// ```
    /// use char_pred::{Char16, MAX_CHAR};
    /// assert_eq!(Char16::new(0x61).escape(), r#"\u0061"#);
    /// assert_eq!(Char16::new(0xE9).escape(), r#"\u00e9"#);
    /// assert_eq!(MAX_CHAR.escape(), r#"\uffff"#);
    /// ```
    pub fn escape(self) -> String {
        format!("\\u{:04x}", self.0)
    }

    /// The two-character escape sequence of this character, if it has one.
    fn short_escape(self) -> Option<&'static str> {
        SHORT_ESCAPES
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, escaped)| *escaped)
    }
}

impl TryFrom<char> for Char16 {
    type Error = Error;

    /// Fails with [Error::OutOfDomain] for characters outside the basic multilingual plane.
    ///
    /// # Examples
    /// ```
    /// use char_pred::{Char16, Error};
    /// assert_eq!(Char16::try_from('a'), Ok(Char16::new(0x61)));
    /// assert_eq!(Char16::try_from('\u{10000}'), Err(Error::OutOfDomain(0x10000)));
    /// ```
    fn try_from(c: char) -> Result<Self, Self::Error> {
        Char16::try_from(c as u32)
    }
}

impl From<u16> for Char16 {
    fn from(c: u16) -> Self {
        Char16(c)
    }
}

impl TryFrom<u32> for Char16 {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        u16::try_from(code)
            .map(Char16)
            .map_err(|_| Error::OutOfDomain(code))
    }
}

impl From<Char16> for u16 {
    fn from(c: Char16) -> Self {
        c.0
    }
}

impl From<Char16> for u32 {
    fn from(c: Char16) -> Self {
        c.0 as u32
    }
}

impl Bounded for Char16 {
    fn min_value() -> Self {
        MIN_CHAR
    }

    fn max_value() -> Self {
        MAX_CHAR
    }
}

/// Renders the character for diagnostics.
/// Control characters with a short escape (`\t`, `\b`, `\n`, `\r`, `\f`) and quotes are rendered as such,
/// characters outside 0x20 to 0x7F as `\uXXXX`, and everything else literally.
/// There is no parser for this format.
impl Display for Char16 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(escaped) = self.short_escape() {
            f.write_str(escaped)
        } else if self.printable() {
            // everything in 0x20..=0x7F is ASCII
            write!(f, "{}", self.0 as u8 as char)
        } else {
            f.write_str(&self.escape())
        }
    }
}

/// An iterator over the characters in the range `start` to `end`.
#[derive(Debug, Clone)]
pub struct CharIterator {
    current: Option<Char16>,
    end: Char16,
}

impl CharIterator {
    /// Create a new iterator over the characters in the range `start` to `end` (both inclusively).
    pub fn new(start: Char16, end: Char16) -> Self {
        CharIterator {
            current: Some(start),
            end,
        }
    }
}

impl Iterator for CharIterator {
    type Item = Char16;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.current.filter(|c| *c <= self.end)?;
        // `None` once we step past MAX_CHAR
        self.current = c.next();
        Some(c)
    }
}

impl Arbitrary for Char16 {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Char16(u16::arbitrary(g))
    }
}

#[cfg(test)]
mod tests {

    use quickcheck_macros::quickcheck;

    use super::*;

    fn ch(c: char) -> Char16 {
        Char16::try_from(c).unwrap()
    }

    #[quickcheck]
    fn next_prev_within_domain(s: Char16) {
        match s.next() {
            Some(next) => {
                assert_eq!(u32::from(next), u32::from(s) + 1);
                assert_eq!(next.prev(), Some(s));
            }
            None => assert_eq!(s, MAX_CHAR),
        }
        match s.prev() {
            Some(prev) => assert_eq!(prev.next(), Some(s)),
            None => assert_eq!(s, MIN_CHAR),
        }
    }

    #[test]
    fn next_prev_at_domain_edges() {
        assert_eq!(MAX_CHAR.next(), None);
        assert_eq!(MIN_CHAR.prev(), None);
        assert_eq!(MAX_CHAR.prev(), Some(Char16::new(0xFFFE)));
        assert_eq!(MIN_CHAR.next(), Some(Char16::new(0x0001)));
        assert_eq!(MAX_CHAR.saturating_next(), MAX_CHAR);
        assert_eq!(MIN_CHAR.saturating_prev(), MIN_CHAR);
        assert_eq!(Char16::min_value(), MIN_CHAR);
        assert_eq!(Char16::max_value(), MAX_CHAR);
    }

    #[test]
    fn test_try_from_code_point() {
        assert_eq!(Char16::try_from(0x41u32), Ok(ch('A')));
        assert_eq!(Char16::try_from(0xFFFFu32), Ok(MAX_CHAR));
        assert_eq!(Char16::try_from(0x10000u32), Err(Error::OutOfDomain(0x10000)));
    }

    #[test]
    fn test_try_from_char_outside_domain() {
        assert_eq!(Char16::try_from('\u{ffff}'), Ok(MAX_CHAR));
        assert_eq!(Char16::try_from('🦀'), Err(Error::OutOfDomain(0x1F980)));
        assert_eq!(Char16::try_from(char::MAX), Err(Error::OutOfDomain(0x10FFFF)));
    }

    #[test]
    fn test_display_short_escapes() {
        assert_eq!(ch('\t').to_string(), r#"\t"#);
        assert_eq!(ch('\u{8}').to_string(), r#"\b"#);
        assert_eq!(ch('\n').to_string(), r#"\n"#);
        assert_eq!(ch('\r').to_string(), r#"\r"#);
        assert_eq!(ch('\u{c}').to_string(), r#"\f"#);
        assert_eq!(ch('\'').to_string(), r#"\'"#);
        assert_eq!(ch('"').to_string(), r#"\""#);
    }

    #[test]
    fn test_display_unicode_escapes() {
        assert_eq!(MIN_CHAR.to_string(), r#"\u0000"#);
        assert_eq!(ch('\u{1f}').to_string(), r#"\u001f"#);
        assert_eq!(ch('\u{80}').to_string(), r#"\u0080"#);
        assert_eq!(ch('λ').to_string(), r#"\u03bb"#);
        assert_eq!(MAX_CHAR.to_string(), r#"\uffff"#);
    }

    #[test]
    fn test_display_literal() {
        assert_eq!(ch(' ').to_string(), " ");
        assert_eq!(ch('a').to_string(), "a");
        assert_eq!(ch('\\').to_string(), "\\");
        assert_eq!(ch('~').to_string(), "~");
        // DEL is at the inclusive upper end of the literal range
        assert_eq!(ch('\u{7f}').to_string(), "\u{7f}");
    }

    #[test]
    fn test_char_iterator() {
        let chars: Vec<_> = CharIterator::new(ch('a'), ch('d')).collect();
        assert_eq!(chars, vec![ch('a'), ch('b'), ch('c'), ch('d')]);
        assert_eq!(CharIterator::new(ch('b'), ch('a')).count(), 0);
    }

    #[test]
    fn test_char_iterator_at_max() {
        let chars: Vec<_> = CharIterator::new(Char16::new(0xFFFE), MAX_CHAR).collect();
        assert_eq!(chars, vec![Char16::new(0xFFFE), MAX_CHAR]);
    }
}
