//! Deterministic ordering of alarm rows by tag.
//!
//! Tags are decomposed into `base[index].bit`, where the index and bit are
//! optional. Rows are ordered by base name (ignoring case), then array index,
//! then bit, then the raw tag text. Missing components sort after present
//! ones, so `Pump[1].3` precedes `Pump.1`, which precedes `Pump`.

use std::{cmp::Ordering, sync::LazyLock};

use regex::Regex;

use super::AlarmRow;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<base>[^\[]+?)(?:\[(?P<index>[0-9]+)\])?(?:\.(?P<bit>[0-9]+))?$")
        .expect("tag pattern is valid")
});

/// The sortable decomposition of a tag.
#[derive(Debug, Clone)]
pub struct TagKey {
    /// The tag name before any index or bit. For tags outside the
    /// `base[index].bit` grammar this is the whole raw tag.
    pub base_name: String,
    /// The array index, if any.
    pub array_index: Option<u64>,
    /// The bit position, if any.
    pub bit_index: Option<u64>,
    /// The tag exactly as given.
    pub raw: String,
}

impl TagKey {
    /// Decomposes a tag into its sort key.
    ///
    /// This never fails: a tag outside the grammar keeps its raw text as the
    /// base name with no index or bit, and a blank tag has an empty base name.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Self::unparsed(String::new(), tag);
        }

        let Some(captures) = TAG_PATTERN.captures(trimmed) else {
            return Self::unparsed(tag.to_string(), tag);
        };

        let index = captures.name("index").map(|m| m.as_str().parse::<u64>());
        let bit = captures.name("bit").map(|m| m.as_str().parse::<u64>());
        let (Ok(array_index), Ok(bit_index)) = (index.transpose(), bit.transpose()) else {
            // a digit run too large to represent
            return Self::unparsed(tag.to_string(), tag);
        };

        Self {
            base_name: captures["base"].to_string(),
            array_index,
            bit_index,
            raw: tag.to_string(),
        }
    }

    fn unparsed(base_name: String, raw: &str) -> Self {
        Self {
            base_name,
            array_index: None,
            bit_index: None,
            raw: raw.to_string(),
        }
    }

    fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

impl Ord for TagKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.is_blank()
            .cmp(&other.is_blank())
            .then_with(|| cmp_ignore_case(&self.base_name, &other.base_name))
            .then_with(|| cmp_absent_last(self.array_index, other.array_index))
            .then_with(|| cmp_absent_last(self.bit_index, other.bit_index))
            .then_with(|| cmp_ignore_case(&self.raw, &other.raw))
    }
}

impl PartialOrd for TagKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TagKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TagKey {}

/// Compares two tags under the row ordering.
#[must_use]
pub fn compare_tags(a: &str, b: &str) -> Ordering {
    TagKey::parse(a).cmp(&TagKey::parse(b))
}

/// Sorts rows by tag. Rows whose keys compare equal keep their relative
/// order.
pub fn sort_rows(rows: &mut [AlarmRow]) {
    rows.sort_by_cached_key(|row| TagKey::parse(row.tag()));
}

/// Compares upper-cased characters, so `_` and the other symbols between `Z`
/// and `a` sort after letters.
fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_uppercase)
        .cmp(b.chars().flat_map(char::to_uppercase))
}

fn cmp_absent_last(a: Option<u64>, b: Option<u64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
