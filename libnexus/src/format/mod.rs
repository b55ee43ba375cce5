//! Display helpers for byte counts and registry timestamps.

use chrono::{DateTime, Utc};
use chrono_humanize::Humanize;
use humansize::{BINARY, format_size};

#[cfg(test)]
mod tests;

/// Renders a layer or image size with binary units, as `docker images` does.
///
/// ```
/// use libnexus::format::human_size;
///
/// assert_eq!(human_size(3 * 1024 * 1024), "3 MiB");
/// ```
pub fn human_size(bytes: u64) -> String {
    format_size(bytes, BINARY)
}

/// Renders how long ago a manifest was last modified, e.g. "2 days ago".
pub fn relative_time(time: &DateTime<Utc>) -> String {
    time.humanize()
}
