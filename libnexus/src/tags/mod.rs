//! Numeric tag ordering and retention planning.
//!
//! Tags such as `build-9` and `build-12` sort wrongly as strings. Ordering
//! instead uses the first run of digits embedded in the tag, so the list
//! goes from oldest to newest for the usual CI tagging schemes. Tags without
//! any digit (`latest`, `stable`) get key 0 and sort first.

use std::cmp::Ordering;

#[cfg(test)]
mod tests;

/// Extracts the ordering key of a tag: its first contiguous run of ASCII digits.
///
/// Returns 0 when the tag contains no digit. A run too long for `u64`
/// saturates to `u64::MAX`.
///
/// # Examples
///
/// ```
/// use libnexus::tags::extract_number;
///
/// assert_eq!(extract_number("release-104-build"), 104);
/// assert_eq!(extract_number("v2-rc1"), 2);
/// assert_eq!(extract_number("latest"), 0);
/// ```
pub fn extract_number(tag: &str) -> u64 {
    let digits: &str = match tag.find(|c: char| c.is_ascii_digit()) {
        Some(start) => {
            let rest = &tag[start..];
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            &rest[..end]
        }
        None => return 0,
    };

    digits.parse().unwrap_or(u64::MAX)
}

/// Compares two tags by their extracted numbers.
pub fn compare_tags(a: &str, b: &str) -> Ordering {
    extract_number(a).cmp(&extract_number(b))
}

/// Sorts tags in place, oldest first.
///
/// # Examples
///
/// ```
/// use libnexus::tags::sort_tags;
///
/// let mut tags = vec!["v10".to_string(), "v2".to_string(), "latest".to_string()];
/// sort_tags(&mut tags);
/// assert_eq!(tags, ["latest", "v2", "v10"]);
/// ```
pub fn sort_tags(tags: &mut [String]) {
    tags.sort_by(|a, b| compare_tags(a, b));
}

/// Outcome of planning a "keep the newest N tags" deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetentionPlan {
    /// Enough tags exist; `to_delete` holds the oldest ones in ascending order.
    Delete {
        to_delete: Vec<String>,
        kept: Vec<String>,
    },
    /// Fewer tags exist than should be kept; nothing is deleted.
    Insufficient { available: usize },
}

impl RetentionPlan {
    /// Tags scheduled for deletion, oldest first. Empty when insufficient.
    pub fn to_delete(&self) -> &[String] {
        match self {
            Self::Delete { to_delete, .. } => to_delete,
            Self::Insufficient { .. } => &[],
        }
    }
}

/// Sorts `tags` and selects all but the newest `keep` for deletion.
///
/// With `keep` greater than the number of tags, nothing is selected and the
/// plan reports how many tags are available.
///
/// # Examples
///
/// ```
/// use libnexus::tags::{plan_retention, RetentionPlan};
///
/// let tags: Vec<String> = ["b-3", "b-1", "b-2"].iter().map(|t| t.to_string()).collect();
/// let plan = plan_retention(tags, 1);
/// assert_eq!(plan.to_delete(), ["b-1", "b-2"]);
///
/// let plan = plan_retention(vec!["b-1".to_string()], 5);
/// assert_eq!(plan, RetentionPlan::Insufficient { available: 1 });
/// ```
pub fn plan_retention(mut tags: Vec<String>, keep: usize) -> RetentionPlan {
    if tags.len() < keep {
        return RetentionPlan::Insufficient {
            available: tags.len(),
        };
    }

    sort_tags(&mut tags);
    let kept = tags.split_off(tags.len() - keep);

    RetentionPlan::Delete {
        to_delete: tags,
        kept,
    }
}
