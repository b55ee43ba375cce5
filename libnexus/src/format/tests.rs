use super::*;
use chrono::Duration;

#[test]
fn test_human_size_units() {
    assert_eq!(human_size(512), "512 B");
    assert_eq!(human_size(2048), "2 KiB");
    assert_eq!(human_size(5 * 1024 * 1024), "5 MiB");
}

#[test]
fn test_relative_time_in_past() {
    let yesterday = Utc::now() - Duration::days(1);
    assert_eq!(relative_time(&yesterday), "a day ago");
}
