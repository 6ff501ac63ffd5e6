//! Key/value tag payloads.
//!
//! Tags are an ordered list of alternating keys and values of mixed types.
//! [`Tags`] is what a wrapper stores, [`TagMap`] is the merged view an
//! extractor builds over a whole chain.
//!
//! Owned string values are zeroized on drop: tags routinely carry user
//! identifiers and request data.

use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use zeroize::Zeroize;

/// Value appended to an odd-length tag list before pairing it up.
pub static UNBALANCED_TAG: TagValue = TagValue::Str(Cow::Borrowed("unbalanced tag"));

/// A single tag key or value.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// Text value.
    Str(Cow<'static, str>),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    Uint(u64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
}

impl TagValue {
    /// Borrow the text of a `Str` value.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Read an `Int` value, or a `Uint` value that fits in `i64`.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            Self::Uint(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl Zeroize for TagValue {
    fn zeroize(&mut self) {
        if let Self::Str(Cow::Owned(s)) = self {
            s.zeroize();
        }
    }
}

impl Drop for TagValue {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl From<&'static str> for TagValue {
    #[inline]
    fn from(value: &'static str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }
}

impl From<String> for TagValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for TagValue {
    #[inline]
    fn from(value: Cow<'static, str>) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for TagValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! tag_value_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for TagValue {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::$variant(value as $target)
                }
            }
        )+
    };
}

tag_value_from!(Int as i64: i8, i16, i32, i64, isize);
tag_value_from!(Uint as u64: u8, u16, u32, u64, usize);
tag_value_from!(Float as f64: f32, f64);

impl PartialEq<str> for TagValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for TagValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for TagValue {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Self::Int(v) if v == other)
    }
}

impl PartialEq<u64> for TagValue {
    fn eq(&self, other: &u64) -> bool {
        matches!(self, Self::Uint(v) if v == other)
    }
}

impl PartialEq<bool> for TagValue {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Self::Bool(v) if v == other)
    }
}

/// Ordered list of alternating keys and values attached by one wrapper.
///
/// Build one from an array of a single type, or with [`tags!`](crate::tags!)
/// when keys and values have different types:
///
/// ```rust
/// use annotated_errors::{tags, Tags};
///
/// let same: Tags = ["user", "beazley"].into();
/// let mixed = tags!["user", "beazley", "user_id", 666];
/// assert_eq!(same.len(), 2);
/// assert_eq!(mixed.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tags {
    entries: SmallVec<[TagValue; 4]>,
}

impl Tags {
    /// Empty tag list.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Append one entry.
    #[inline]
    pub fn push(&mut self, value: impl Into<TagValue>) {
        self.entries.push(value.into());
    }

    /// The entries as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[TagValue] {
        &self.entries
    }

    /// Number of entries, keys and values counted separately.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every key has a value.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.entries.len() % 2 == 0
    }

    /// Iterate entries in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, TagValue> {
        self.entries.iter()
    }
}

impl<T: Into<TagValue>, const N: usize> From<[T; N]> for Tags {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl From<Vec<TagValue>> for Tags {
    fn from(values: Vec<TagValue>) -> Self {
        Self {
            entries: SmallVec::from_vec(values),
        }
    }
}

impl<T: Into<TagValue>> FromIterator<T> for Tags {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = &'a TagValue;
    type IntoIter = std::slice::Iter<'a, TagValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build a [`Tags`] list from keys and values of mixed types.
///
/// ```rust
/// # use annotated_errors::tags;
/// let kv = tags!["user", "beazley", "user_id", 666, "admin", false];
/// assert!(kv.is_balanced());
/// ```
#[macro_export]
macro_rules! tags {
    () => {
        $crate::Tags::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Tags::from([$($crate::TagValue::from($value)),+])
    };
}

/// Merged view of every tag in a chain.
///
/// Keys keep the position of their first insertion; inserting an existing
/// key replaces its value in place. Entries borrow from the chain they were
/// collected from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagMap<'a> {
    entries: SmallVec<[(&'a TagValue, &'a TagValue); 8]>,
}

impl<'a> TagMap<'a> {
    /// Empty map.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Insert a pair, replacing the value of an equal key.
    pub fn insert(&mut self, key: &'a TagValue, value: &'a TagValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Pair up one wrapper's entries and insert them in order, padding an
    /// odd-length list with [`UNBALANCED_TAG`].
    pub fn merge(&mut self, entries: &'a [TagValue]) {
        for pair in entries.chunks(2) {
            match pair {
                [key, value] => self.insert(key, value),
                [key] => self.insert(key, &UNBALANCED_TAG),
                _ => {}
            }
        }
    }

    /// Look up a value by key.
    ///
    /// ```rust
    /// # use annotated_errors::{tags, TagMap};
    /// let kv = tags!["user_id", 666];
    /// let mut map = TagMap::new();
    /// map.merge(kv.as_slice());
    /// assert_eq!(map.get("user_id").and_then(|v| v.as_i64()), Some(666));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&'a TagValue>
    where
        Q: ?Sized,
        TagValue: PartialEq<Q>,
    {
        self.entries
            .iter()
            .find(|(k, _)| **k == *key)
            .map(|(_, v)| *v)
    }

    /// True if `key` is present.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized,
        TagValue: PartialEq<Q>,
    {
        self.get(key).is_some()
    }

    /// Number of distinct keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no tag was collected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pairs in first-insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&'a TagValue, &'a TagValue)> + '_ {
        self.entries.iter().copied()
    }
}

impl fmt::Display for TagMap<'_> {
    /// Format: `{key=value, key=value}`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_accepts_mixed_types() {
        let kv = tags!["user", "beazley", "user_id", 666u64, "ratio", 0.5, "admin", true];
        assert_eq!(kv.len(), 8);
        assert_eq!(kv.as_slice()[3], TagValue::Uint(666));
        assert_eq!(kv.as_slice()[5], TagValue::Float(0.5));
        assert_eq!(kv.as_slice()[7], TagValue::Bool(true));
    }

    #[test]
    fn empty_macro_builds_empty_list() {
        let kv = tags![];
        assert!(kv.is_empty());
        assert!(kv.is_balanced());
    }

    #[test]
    fn integers_keep_their_signedness() {
        assert_eq!(TagValue::from(-3i32), TagValue::Int(-3));
        assert_eq!(TagValue::from(3usize), TagValue::Uint(3));
        assert_ne!(TagValue::from(1i64), TagValue::from(1u64));
        assert_eq!(TagValue::from(1u64).as_i64(), Some(1));
        assert_eq!(TagValue::from(u64::MAX).as_i64(), None);
    }

    #[test]
    fn compares_against_primitives() {
        assert!(TagValue::from("k") == "k");
        assert!(TagValue::from(String::from("k")) == *"k");
        assert!(TagValue::from(7i64) == 7i64);
        assert!(TagValue::from(true) == true);
        assert!(TagValue::from(7u64) != 7i64);
    }

    #[test]
    fn display_renders_raw_values() {
        assert_eq!(TagValue::from("text").to_string(), "text");
        assert_eq!(TagValue::from(-12i64).to_string(), "-12");
        assert_eq!(TagValue::from(false).to_string(), "false");
    }

    #[test]
    fn merge_pads_unbalanced_lists() {
        let kv = tags!["k"];
        let mut map = TagMap::new();
        map.merge(kv.as_slice());
        assert_eq!(map.get("k"), Some(&UNBALANCED_TAG));
        assert_eq!(map.get("k").and_then(TagValue::as_str), Some("unbalanced tag"));
    }

    #[test]
    fn later_insert_replaces_value_in_place() {
        let first = tags!["a", 1, "b", 2];
        let second = tags!["a", 3];
        let mut map = TagMap::new();
        map.merge(first.as_slice());
        map.merge(second.as_slice());

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a").and_then(TagValue::as_i64), Some(3));
        let keys: Vec<_> = map.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn non_string_keys_are_supported() {
        let kv = tags![42, "answer"];
        let mut map = TagMap::new();
        map.merge(kv.as_slice());
        assert!(map.contains_key(&42i64));
        assert!(!map.contains_key("42"));
    }

    #[test]
    fn map_display_lists_pairs() {
        let kv = tags!["user", "beazley", "user_id", 666];
        let mut map = TagMap::new();
        map.merge(kv.as_slice());
        assert_eq!(map.to_string(), "{user=beazley, user_id=666}");
        assert_eq!(TagMap::new().to_string(), "{}");
    }

    #[test]
    fn owned_strings_are_zeroized() {
        let mut value = TagValue::from(String::from("session-token"));
        value.zeroize();
        assert_eq!(value.as_str(), Some(""));

        let mut borrowed = TagValue::from("static");
        borrowed.zeroize();
        assert_eq!(borrowed.as_str(), Some("static"));
    }
}
