use super::*;
use tempfile::TempDir;

#[test]
fn test_verbosity_from_count() {
    assert_eq!(VerbosityLevel::from_count(0), VerbosityLevel::Normal);
    assert_eq!(VerbosityLevel::from_count(1), VerbosityLevel::Verbose);
    assert_eq!(VerbosityLevel::from_count(2), VerbosityLevel::VeryVerbose);
    assert_eq!(VerbosityLevel::from_count(3), VerbosityLevel::Trace);
    assert_eq!(VerbosityLevel::from_count(10), VerbosityLevel::Trace);
}

#[test]
fn test_verbosity_ordering() {
    assert!(VerbosityLevel::Normal < VerbosityLevel::Verbose);
    assert!(VerbosityLevel::Verbose < VerbosityLevel::VeryVerbose);
    assert!(VerbosityLevel::VeryVerbose < VerbosityLevel::Trace);
}

#[test]
fn test_tracing_directive_widens_with_verbosity() {
    assert_eq!(VerbosityLevel::Normal.tracing_directive(), "error");
    assert!(
        VerbosityLevel::VeryVerbose
            .tracing_directive()
            .contains("libnexus=debug")
    );
}

#[test]
fn test_explicit_credentials_path_wins() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".credentials"), "").unwrap();
    let explicit = dir.path().join("custom.toml");

    let path = resolve_credentials_path(Some(&explicit), dir.path(), None);
    assert_eq!(path, explicit);
}

#[test]
fn test_local_credentials_preferred_over_config_dir() {
    let work = TempDir::new().unwrap();
    let config = TempDir::new().unwrap();
    std::fs::write(work.path().join(".credentials"), "").unwrap();
    std::fs::create_dir_all(config.path().join(APP_DIR)).unwrap();
    std::fs::write(config.path().join(APP_DIR).join("credentials"), "").unwrap();

    let path = resolve_credentials_path(None, work.path(), Some(config.path()));
    assert_eq!(path, work.path().join(".credentials"));
}

#[test]
fn test_config_dir_credentials_used_when_no_local_file() {
    let work = TempDir::new().unwrap();
    let config = TempDir::new().unwrap();
    std::fs::create_dir_all(config.path().join(APP_DIR)).unwrap();
    std::fs::write(config.path().join(APP_DIR).join("credentials"), "").unwrap();

    let path = resolve_credentials_path(None, work.path(), Some(config.path()));
    assert_eq!(path, config.path().join(APP_DIR).join("credentials"));
}

#[test]
fn test_defaults_to_local_file_when_nothing_exists() {
    let work = TempDir::new().unwrap();
    let config = TempDir::new().unwrap();

    let path = resolve_credentials_path(None, work.path(), Some(config.path()));
    assert_eq!(path, work.path().join(".credentials"));
}

#[test]
fn test_settings_carry_program_metadata() {
    let settings = Settings::new(PathBuf::from("/tmp/creds"));
    assert_eq!(settings.name, "nexus-cli");
    assert_eq!(settings.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(settings.credentials_path, PathBuf::from("/tmp/creds"));
}

#[test]
fn test_build_uses_explicit_color_and_credentials() {
    let ctx = AppContext::build(
        ColorChoice::Never,
        VerbosityLevel::Verbose,
        Some(PathBuf::from("/tmp/explicit")),
    );
    assert_eq!(ctx.color, ColorChoice::Never);
    assert_eq!(ctx.verbosity, VerbosityLevel::Verbose);
    assert_eq!(ctx.settings.credentials_path, PathBuf::from("/tmp/explicit"));
}
