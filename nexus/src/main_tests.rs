use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("nexus-cli").chain(args.iter().copied()))
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_image_ls_defaults() {
    let cli = parse(&["image", "ls"]).unwrap();
    assert_eq!(cli.verbose, 0);
    assert_eq!(cli.color, ColorChoice::Auto);
    assert!(matches!(
        cli.command,
        Commands::Image {
            command: ImageCommands::Ls { .. }
        }
    ));
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = parse(&[
        "image",
        "tags",
        "-n",
        "backend",
        "-vv",
        "--color",
        "never",
        "--credentials",
        "/tmp/creds",
    ])
    .unwrap();

    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.color, ColorChoice::Never);
    assert_eq!(cli.credentials, Some(PathBuf::from("/tmp/creds")));
}

#[test]
fn test_parse_delete_with_keep() {
    let cli = parse(&["image", "delete", "-n", "backend", "-k", "3", "--dry-run"]).unwrap();
    match cli.command {
        Commands::Image {
            command:
                ImageCommands::Delete {
                    name,
                    tag,
                    keep,
                    dry_run,
                },
        } => {
            assert_eq!(name, "backend");
            assert_eq!(tag, None);
            assert_eq!(keep, Some(3));
            assert!(dry_run);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_parse_delete_requires_tag_or_keep() {
    assert!(parse(&["image", "delete", "-n", "backend"]).is_err());
}

#[test]
fn test_parse_delete_rejects_tag_and_keep() {
    assert!(parse(&["image", "delete", "-n", "backend", "-t", "v1", "-k", "2"]).is_err());
}

#[test]
fn test_parse_delete_rejects_zero_keep() {
    assert!(parse(&["image", "delete", "-n", "backend", "-k", "0"]).is_err());
}

#[test]
fn test_parse_sha_requires_tag() {
    assert!(parse(&["image", "sha", "-n", "backend"]).is_err());
    assert!(parse(&["image", "sha", "-n", "backend", "-t", "v1"]).is_ok());
}

#[test]
fn test_parse_size_human() {
    let cli = parse(&["image", "size", "-n", "backend", "--human"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Image {
            command: ImageCommands::Size { human: true, .. }
        }
    ));
}

#[test]
fn test_parse_list_alias() {
    assert!(parse(&["image", "list"]).is_ok());
}

#[test]
fn test_parse_format_values() {
    let cli = parse(&["image", "ls", "-f", "yml"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Image {
            command: ImageCommands::Ls {
                format: OutputFormat::Yaml
            }
        }
    ));
    assert!(parse(&["image", "ls", "-f", "xml"]).is_err());
}
