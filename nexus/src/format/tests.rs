use super::*;
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Serialize)]
struct Digest {
    image: String,
    digest: String,
}

impl Formattable for Digest {
    fn format_pretty(&self) -> String {
        format!("{} {}", self.image, self.digest)
    }
}

#[derive(Debug, Serialize, Tabled)]
struct Row {
    #[tabled(rename = "IMAGE")]
    image: String,
}

fn digest() -> Digest {
    Digest {
        image: "backend".to_string(),
        digest: "sha256:abc".to_string(),
    }
}

fn rows() -> Vec<Row> {
    ["backend", "frontend"]
        .iter()
        .map(|image| Row {
            image: image.to_string(),
        })
        .collect()
}

fn ctx_with(color: ColorChoice, verbosity: VerbosityLevel) -> AppContext {
    AppContext::build(color, verbosity, Some(std::path::PathBuf::from("/tmp/creds")))
}

#[test]
fn test_color_choice_from_env_value() {
    assert_eq!(ColorChoice::from_env_value("always"), ColorChoice::Always);
    assert_eq!(ColorChoice::from_env_value("NEVER"), ColorChoice::Never);
    assert_eq!(ColorChoice::from_env_value("sometimes"), ColorChoice::Auto);
}

#[test]
fn test_format_output_pretty() {
    assert_eq!(
        format_output(&digest(), OutputFormat::Pretty).unwrap(),
        "backend sha256:abc"
    );
}

#[test]
fn test_format_output_json() {
    let output = format_output(&digest(), OutputFormat::Json).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["digest"], "sha256:abc");
}

#[test]
fn test_format_output_yaml_has_no_trailing_newline() {
    let output = format_output(&digest(), OutputFormat::Yaml).unwrap();
    assert!(output.contains("image: backend"));
    assert!(!output.ends_with('\n'));
}

#[test]
fn test_format_table_pretty_has_header() {
    let output = format_table(&rows(), OutputFormat::Pretty).unwrap();
    assert!(output.contains("IMAGE"));
    assert!(output.contains("frontend"));
}

#[test]
fn test_format_table_json_is_array() {
    let output = format_table(&rows(), OutputFormat::Json).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[1]["image"], "frontend");
}

#[test]
fn test_should_color_follows_explicit_choice() {
    assert!(should_color(&ctx_with(ColorChoice::Always, VerbosityLevel::Normal)));
    assert!(!should_color(&ctx_with(ColorChoice::Never, VerbosityLevel::Normal)));
}

#[test]
fn test_checkmark_plain_and_colored() {
    let plain = ctx_with(ColorChoice::Never, VerbosityLevel::Normal);
    assert_eq!(checkmark(&plain), "✓");

    let colored = checkmark(&ctx_with(ColorChoice::Always, VerbosityLevel::Normal));
    assert!(colored.contains("✓"));
    assert_ne!(colored, "✓");
}

#[test]
fn test_plain_progress_bar_is_hidden() {
    let pb = Console::new(false).progress_bar(3, "Deleting");
    assert!(pb.is_hidden());
}

#[test]
fn test_print_respects_verbosity() {
    // stderr is not captured; this only checks nothing panics
    let ctx = ctx_with(ColorChoice::Never, VerbosityLevel::Normal);
    print(&ctx, VerbosityLevel::Trace, "suppressed");

    let ctx = ctx_with(ColorChoice::Never, VerbosityLevel::Trace);
    print(&ctx, VerbosityLevel::Verbose, "printed");
}
