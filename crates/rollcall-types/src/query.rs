//! Sorting and pagination parameters for directory listing.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Field a directory listing can be sorted by (ascending).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Username,
    Name,
}

impl FromStr for SortBy {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "username" => Ok(Self::Username),
            "name" => Ok(Self::Name),
            other => Err(TypeError::InvalidSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username => write!(f, "username"),
            Self::Name => write!(f, "name"),
        }
    }
}

/// Validated listing parameters.
///
/// The window is `[offset, offset + count)` over the (optionally sorted)
/// enumeration, clamped to the available entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub sort_by: Option<SortBy>,
    pub count: Option<usize>,
    pub offset: usize,
}

impl ListQuery {
    /// Parse raw query-string values.
    pub fn parse(
        sort_by: Option<&str>,
        count: Option<&str>,
        offset: Option<&str>,
    ) -> Result<Self, TypeError> {
        Ok(Self {
            sort_by: sort_by.map(str::parse).transpose()?,
            count: count.map(|v| parse_non_negative("count", v)).transpose()?,
            offset: offset
                .map(|v| parse_non_negative("offset", v))
                .transpose()?
                .unwrap_or(0),
        })
    }

    /// Apply the offset/count window to an already-ordered list.
    pub fn window<T>(&self, mut items: Vec<T>) -> Vec<T> {
        let start = self.offset.min(items.len());
        let end = match self.count {
            Some(count) => start.saturating_add(count).min(items.len()),
            None => items.len(),
        };
        items.truncate(end);
        items.drain(..start);
        items
    }
}

/// Parse a non-negative integer. Values past `usize::MAX` saturate, since
/// the window clamps them anyway.
fn parse_non_negative(param: &'static str, value: &str) -> Result<usize, TypeError> {
    match value.trim().parse::<usize>() {
        Ok(n) => Ok(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(usize::MAX),
        Err(_) => Err(TypeError::InvalidInteger {
            param,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        let q = ListQuery::parse(None, None, None).unwrap();
        assert_eq!(q, ListQuery::default());
        assert_eq!(q.offset, 0);
    }

    #[test]
    fn parses_all_parameters() {
        let q = ListQuery::parse(Some("name"), Some("3"), Some("1")).unwrap();
        assert_eq!(q.sort_by, Some(SortBy::Name));
        assert_eq!(q.count, Some(3));
        assert_eq!(q.offset, 1);
    }

    #[test]
    fn rejects_unknown_sort_key() {
        let err = ListQuery::parse(Some("bio"), None, None).unwrap_err();
        assert_eq!(err, TypeError::InvalidSortKey("bio".into()));
    }

    #[test]
    fn rejects_negative_and_non_integer() {
        assert!(ListQuery::parse(None, Some("-1"), None).is_err());
        assert!(ListQuery::parse(None, None, Some("-2")).is_err());
        assert!(ListQuery::parse(None, Some("two"), None).is_err());
        assert!(ListQuery::parse(None, None, Some("1.5")).is_err());
    }

    #[test]
    fn huge_values_saturate() {
        let q = ListQuery::parse(None, Some("1"), Some("99999999999999999999999")).unwrap();
        assert_eq!(q.offset, usize::MAX);
        assert!(q.window(vec![0, 1, 2]).is_empty());

        let q = ListQuery::parse(None, Some("99999999999999999999999"), Some("1")).unwrap();
        assert_eq!(q.count, Some(usize::MAX));
        assert_eq!(q.window(vec![0, 1, 2]), vec![1, 2]);

        assert!(ListQuery::parse(None, None, Some("-99999999999999999999999")).is_err());
    }

    #[test]
    fn window_count_and_offset() {
        let q = ListQuery::parse(None, Some("3"), Some("1")).unwrap();
        assert_eq!(q.window(vec![0, 1, 2, 3, 4]), vec![1, 2, 3]);
    }

    #[test]
    fn window_clamps_out_of_range() {
        let q = ListQuery::parse(None, Some("10"), Some("3")).unwrap();
        assert_eq!(q.window(vec![0, 1, 2, 3, 4]), vec![3, 4]);

        let past_end = ListQuery::parse(None, None, Some("9")).unwrap();
        assert!(past_end.window(vec![0, 1, 2]).is_empty());
    }

    #[test]
    fn window_offset_only() {
        let q = ListQuery::parse(None, None, Some("3")).unwrap();
        assert_eq!(q.window(vec!['a', 'b', 'c', 'd', 'e']), vec!['d', 'e']);
    }

    #[test]
    fn window_huge_count_does_not_overflow() {
        let q = ListQuery {
            count: Some(usize::MAX),
            offset: 2,
            ..Default::default()
        };
        assert_eq!(q.window(vec![0, 1, 2, 3]), vec![2, 3]);
    }

    #[test]
    fn sort_by_display_matches_parse() {
        for key in [SortBy::Username, SortBy::Name] {
            assert_eq!(key.to_string().parse::<SortBy>().unwrap(), key);
        }
    }
}
