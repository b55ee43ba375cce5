use super::*;

fn strings(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_extract_number_first_digit_run() {
    assert_eq!(extract_number("release-104-build"), 104);
    assert_eq!(extract_number("v2-rc1"), 2);
    assert_eq!(extract_number("build-12"), 12);
    assert_eq!(extract_number("42"), 42);
}

#[test]
fn test_extract_number_without_digits_is_zero() {
    assert_eq!(extract_number("latest"), 0);
    assert_eq!(extract_number(""), 0);
    assert_eq!(extract_number("stable-release"), 0);
}

#[test]
fn test_extract_number_leading_zeros() {
    assert_eq!(extract_number("v007"), 7);
}

#[test]
fn test_extract_number_dotted_version_uses_major() {
    assert_eq!(extract_number("1.10.3"), 1);
}

#[test]
fn test_extract_number_ignores_non_ascii_digits() {
    // Arabic-indic digits are not part of the key
    assert_eq!(extract_number("v\u{0663}-5"), 5);
}

#[test]
fn test_extract_number_overflow_saturates() {
    assert_eq!(extract_number("build-99999999999999999999999"), u64::MAX);
}

#[test]
fn test_compare_tags() {
    assert_eq!(compare_tags("v2", "v10"), Ordering::Less);
    assert_eq!(compare_tags("v10", "v2"), Ordering::Greater);
    assert_eq!(compare_tags("a-3", "b-3"), Ordering::Equal);
}

#[test]
fn test_sort_tags_numeric_order() {
    let mut tags = strings(&["v10", "v2", "v1", "latest"]);
    sort_tags(&mut tags);
    assert_eq!(tags, strings(&["latest", "v1", "v2", "v10"]));
}

#[test]
fn test_sort_tags_multi_digit_builds() {
    let mut tags = strings(&["build-100", "build-9", "build-12", "build-1"]);
    sort_tags(&mut tags);
    assert_eq!(tags, strings(&["build-1", "build-9", "build-12", "build-100"]));
}

#[test]
fn test_plan_retention_keep_two_of_five() {
    let tags = strings(&["v5", "v3", "v1", "v4", "v2"]);

    let plan = plan_retention(tags, 2);

    assert_eq!(
        plan,
        RetentionPlan::Delete {
            to_delete: strings(&["v1", "v2", "v3"]),
            kept: strings(&["v4", "v5"]),
        }
    );
}

#[test]
fn test_plan_retention_keep_equal_to_len_deletes_nothing() {
    let plan = plan_retention(strings(&["v1", "v2", "v3"]), 3);

    assert!(plan.to_delete().is_empty());
    assert!(matches!(plan, RetentionPlan::Delete { ref kept, .. } if kept.len() == 3));
}

#[test]
fn test_plan_retention_keep_more_than_len() {
    let plan = plan_retention(strings(&["v1", "v2"]), 5);

    assert_eq!(plan, RetentionPlan::Insufficient { available: 2 });
    assert!(plan.to_delete().is_empty());
}

#[test]
fn test_plan_retention_keep_zero_deletes_all() {
    let plan = plan_retention(strings(&["v2", "v1"]), 0);
    assert_eq!(plan.to_delete(), strings(&["v1", "v2"]).as_slice());
}

#[test]
fn test_plan_retention_untagged_names_are_oldest() {
    let plan = plan_retention(strings(&["build-3", "latest", "build-1"]), 1);
    assert_eq!(plan.to_delete(), strings(&["latest", "build-1"]).as_slice());
}
