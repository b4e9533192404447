//! Sets of characters represented as normalized lists of closed intervals.
//!
//! An [IntervalCharSet] stores its characters as [CharRange]s that are sorted, pairwise disjoint, and never adjacent.
//! Every set of characters has exactly one such representation, so structural equality of two sets coincides with equality of the characters they contain.

use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

use itertools::Itertools;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{Char16, CharIterator, Error, MAX_CHAR, MIN_CHAR};

/// A closed range of characters, covering all [Char16]s between `start` and `end`, both inclusive.
/// The start is never greater than the end, so a range is never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(Char16, Char16)", into = "(Char16, Char16)")
)]
pub struct CharRange {
    start: Char16,
    end: Char16,
}

impl CharRange {
    /// Create a new range of characters.
    /// Returns [Error::InvalidInterval] if the start character is greater than the end character,
    /// and [Error::OutOfDomain] if a bound does not fit into 16 bits.
    ///
    /// # Example
    /// ```
    /// use char_pred::{CharRange, Error};
    ///
    /// assert!(CharRange::new('a', 'z').is_ok());
    /// assert!(CharRange::new('a', 'a').is_ok());
    /// assert!(matches!(CharRange::new('z', 'a'), Err(Error::InvalidInterval { .. })));
    /// assert_eq!(CharRange::new('a', '\u{1F980}'), Err(Error::OutOfDomain(0x1F980)));
    /// ```
    pub fn new<L, H>(l: L, r: H) -> Result<Self, Error>
    where
        L: TryInto<Char16>,
        H: TryInto<Char16>,
        Error: From<L::Error> + From<H::Error>,
    {
        let (start, end) = (l.try_into()?, r.try_into()?);
        if start > end {
            debug!(low = %start, high = %end, "rejecting character interval");
            return Err(Error::InvalidInterval {
                low: start,
                high: end,
            });
        }
        Ok(CharRange { start, end })
    }

    /// Create a range that contains a single character.
    pub fn singleton(c: impl Into<Char16>) -> Self {
        let c = c.into();
        CharRange { start: c, end: c }
    }

    /// Create a range that covers the whole character domain.
    pub fn all() -> Self {
        CharRange {
            start: MIN_CHAR,
            end: MAX_CHAR,
        }
    }

    /// Returns the lower bound of the range.
    pub fn start(&self) -> Char16 {
        self.start
    }

    /// Returns the upper bound of the range.
    pub fn end(&self) -> Char16 {
        self.end
    }

    /// Return the number of characters in the range.
    ///
    /// # Example
    /// ```
    /// use char_pred::CharRange;
    ///
    /// assert_eq!(CharRange::new('a', 'z').unwrap().size(), 26);
    /// assert_eq!(CharRange::singleton(0x61u16).size(), 1);
    /// assert_eq!(CharRange::all().size(), 0x10000);
    /// ```
    pub fn size(&self) -> usize {
        (self.end.as_u16() - self.start.as_u16()) as usize + 1
    }

    /// Check if the range contains a single character.
    pub fn is_singleton(&self) -> bool {
        self.start == self.end
    }

    /// Check if a character is in the range.
    /// Characters outside the 16-bit domain are never contained.
    pub fn contains(&self, c: impl TryInto<Char16>) -> bool {
        c.try_into()
            .is_ok_and(|c: Char16| self.start <= c && c <= self.end)
    }

    /// Return an iterator over all characters in the range.
    pub fn iter(&self) -> impl Iterator<Item = Char16> {
        CharIterator::new(self.start, self.end)
    }

    /// Checks whether `next`, which must not start before this range, overlaps this range or directly follows it.
    /// Computed in `u32` so that a range ending at [MAX_CHAR] is never considered adjacent to anything.
    fn touches(&self, next: &Self) -> bool {
        u32::from(next.start) <= u32::from(self.end) + 1
    }

    /// Checks whether at least one character lies strictly between this range and `next`.
    fn separated_from(&self, next: &Self) -> bool {
        u32::from(self.end) + 1 < u32::from(next.start)
    }
}

impl TryFrom<(Char16, Char16)> for CharRange {
    type Error = Error;

    fn try_from((l, r): (Char16, Char16)) -> Result<Self, Self::Error> {
        CharRange::new(l, r)
    }
}

impl From<CharRange> for (Char16, Char16) {
    fn from(r: CharRange) -> Self {
        (r.start, r.end)
    }
}

impl Display for CharRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_singleton() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A set of characters, stored as a normalized list of [CharRange]s.
///
/// The ranges are sorted by their start, and any two consecutive ranges are separated by at least one character that is in neither of them.
/// Sets are immutable once constructed.
/// Any two sets containing the same characters have the same ranges, hence compare and hash equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<CharRange>", into = "Vec<CharRange>")
)]
pub struct IntervalCharSet {
    ranges: SmallVec<[CharRange; 4]>,
}

impl IntervalCharSet {
    /// Returns the empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the set of all characters in the domain.
    pub fn full() -> Self {
        Self::from_iter([CharRange::all()])
    }

    /// The set containing only the character `c`.
    /// Returns [Error::OutOfDomain] if `c` does not fit into 16 bits.
    pub fn from_char<C>(c: C) -> Result<Self, Error>
    where
        C: TryInto<Char16>,
        Error: From<C::Error>,
    {
        Ok(Self::from_iter([CharRange::singleton(c.try_into()?)]))
    }

    /// The set containing all characters between `low` and `high`, both inclusive.
    /// Returns [Error::InvalidInterval] if `low` is greater than `high`.
    pub fn from_range<L, H>(low: L, high: H) -> Result<Self, Error>
    where
        L: TryInto<Char16>,
        H: TryInto<Char16>,
        Error: From<L::Error> + From<H::Error>,
    {
        Ok(Self::from_iter([CharRange::new(low, high)?]))
    }

    /// The set containing exactly the given characters.
    /// Duplicates and consecutive characters are merged into ranges.
    /// Returns [Error::OutOfDomain] for the first character that does not fit into 16 bits.
    ///
    /// # Example
    /// ```
    /// use char_pred::IntervalCharSet;
    ///
    /// let set = IntervalCharSet::from_chars(['c', 'a', 'b', 'x', 'a']).unwrap();
    /// assert_eq!(set.num_ranges(), 2);
    /// assert_eq!(set.to_string(), "[a-cx]");
    /// ```
    pub fn from_chars<C>(chars: impl IntoIterator<Item = C>) -> Result<Self, Error>
    where
        C: TryInto<Char16>,
        Error: From<C::Error>,
    {
        chars
            .into_iter()
            .map(|c| Ok(CharRange::singleton(c.try_into()?)))
            .collect()
    }

    /// The set containing all characters in any of the given `(low, high)` intervals.
    /// The intervals may be given in any order and may overlap, repeat, or be adjacent.
    /// Returns [Error::InvalidInterval] for the first interval whose lower bound is greater than its upper bound,
    /// or [Error::OutOfDomain] for the first bound that does not fit into 16 bits. In both cases no set is created.
    ///
    /// # Example
    /// ```
    /// use char_pred::{CharRange, IntervalCharSet};
    ///
    /// let set = IntervalCharSet::from_ranges([('x', 'z'), ('a', 'b'), ('c', 'd')]).unwrap();
    /// let mut ranges = set.iter_ranges();
    /// assert_eq!(ranges.next(), Some(CharRange::new('a', 'd').unwrap()));
    /// assert_eq!(ranges.next(), Some(CharRange::new('x', 'z').unwrap()));
    /// assert_eq!(ranges.next(), None);
    ///
    /// assert!(IntervalCharSet::from_ranges([('a', 'b'), ('z', 'a')]).is_err());
    /// ```
    pub fn from_ranges<L, H>(ranges: impl IntoIterator<Item = (L, H)>) -> Result<Self, Error>
    where
        L: TryInto<Char16>,
        H: TryInto<Char16>,
        Error: From<L::Error> + From<H::Error>,
    {
        ranges
            .into_iter()
            .map(|(l, h)| CharRange::new(l, h))
            .collect()
    }

    /// Sorts the ranges by their start and merges overlapping and adjacent ranges in a single sweep.
    fn normalize(input: Vec<CharRange>) -> SmallVec<[CharRange; 4]> {
        let count = input.len();
        let ranges: SmallVec<[CharRange; 4]> = input
            .into_iter()
            .sorted_unstable_by_key(|r| r.start)
            .coalesce(|current, next| {
                if current.touches(&next) {
                    Ok(CharRange {
                        start: current.start,
                        end: current.end.max(next.end),
                    })
                } else {
                    Err((current, next))
                }
            })
            .collect();
        debug_assert!(
            ranges.iter().tuple_windows().all(|(l, r)| l.separated_from(r)),
            "normalized ranges overlap or are adjacent: {:?}",
            ranges
        );
        trace!(input = count, output = ranges.len(), "normalized character ranges");
        ranges
    }

    /// Check if a character is in the set.
    /// Characters outside the 16-bit domain are never contained.
    ///
    /// # Example
    /// ```
    /// use char_pred::IntervalCharSet;
    ///
    /// let set = IntervalCharSet::from_ranges([('a', 'c'), ('x', 'z')]).unwrap();
    /// assert!(set.contains('b'));
    /// assert!(set.contains('x'));
    /// assert!(!set.contains('d'));
    /// assert!(!IntervalCharSet::empty().contains('a'));
    /// assert!(!IntervalCharSet::full().contains('\u{1F980}'));
    /// ```
    pub fn contains(&self, c: impl TryInto<Char16>) -> bool {
        let Ok(c) = c.try_into() else {
            return false;
        };
        // The ranges are sorted, so the only candidate is the last one starting at or before `c`
        let idx = self.ranges.partition_point(|r| r.start <= c);
        idx.checked_sub(1)
            .and_then(|i| self.ranges.get(i))
            .is_some_and(|r| r.contains(c))
    }

    /// The normalized ranges of the set, in ascending order.
    pub fn ranges(&self) -> &[CharRange] {
        &self.ranges
    }

    /// Return an iterator over the normalized ranges of the set, in ascending order.
    pub fn iter_ranges(&self) -> impl Iterator<Item = CharRange> + '_ {
        self.ranges.iter().copied()
    }

    /// Return an iterator over all characters in the set, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Char16> + '_ {
        self.iter_ranges().flat_map(|r| r.iter())
    }

    /// The number of ranges in the normalized representation.
    pub fn num_ranges(&self) -> usize {
        self.ranges.len()
    }

    /// The number of characters in the set.
    pub fn len(&self) -> usize {
        self.ranges.iter().map(|r| r.size()).sum()
    }

    /// Check if the set contains no characters.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Check if the set contains every character of the domain.
    pub fn is_full(&self) -> bool {
        self.ranges.as_slice() == &[CharRange::all()]
    }
}

impl FromIterator<CharRange> for IntervalCharSet {
    fn from_iter<I: IntoIterator<Item = CharRange>>(iter: I) -> Self {
        IntervalCharSet {
            ranges: Self::normalize(iter.into_iter().collect()),
        }
    }
}

impl From<Vec<CharRange>> for IntervalCharSet {
    fn from(ranges: Vec<CharRange>) -> Self {
        IntervalCharSet {
            ranges: Self::normalize(ranges),
        }
    }
}

impl From<IntervalCharSet> for Vec<CharRange> {
    fn from(set: IntervalCharSet) -> Self {
        set.ranges.into_vec()
    }
}

impl Hash for IntervalCharSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Tag the hash with the type so that a set does not collide with its bare list of ranges
        std::any::type_name::<Self>().hash(state);
        self.ranges.as_slice().hash(state);
    }
}

/// Renders the set as `[` followed by its ranges and `]`, e.g., `[\ta-c]`.
/// A range with a single character is rendered as that character, other ranges as `low-high`.
impl Display for IntervalCharSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for r in self.iter_ranges() {
            write!(f, "{}", r)?;
        }
        write!(f, "]")
    }
}
