use clap::{CommandFactory, Parser, Subcommand};
use format::{ColorChoice, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod format;

/// nexus-cli - Docker image management for Nexus
///
/// Lists, inspects and deletes Docker images stored in a Nexus repository.
#[derive(Parser, Debug)]
#[command(name = "nexus-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control colored output
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Path to the credentials file
    #[arg(long, global = true, env = "NEXUS_CREDENTIALS")]
    credentials: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Display version information
    Version,
    /// Write the credentials file interactively
    Configure,
    /// Manage Docker images
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ImageCommands {
    /// List all images in the repository
    #[command(name = "ls", visible_alias = "list")]
    Ls {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// List tags of an image, oldest first
    Tags {
        /// Image name
        #[arg(short, long)]
        name: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Show the manifest digest of an image tag
    Sha {
        /// Image name
        #[arg(short, long)]
        name: String,
        /// Image tag
        #[arg(short, long)]
        tag: String,
    },
    /// Show the manifest details of an image tag
    Info {
        /// Image name
        #[arg(short, long)]
        name: String,
        /// Image tag
        #[arg(short, long)]
        tag: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Delete a tag, or all but the newest N tags
    #[command(visible_alias = "rm")]
    Delete {
        /// Image name
        #[arg(short, long)]
        name: String,
        /// Tag to delete
        #[arg(short, long, conflicts_with = "keep", required_unless_present = "keep")]
        tag: Option<String>,
        /// Number of newest tags to keep
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        keep: Option<u64>,
        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the storage used by all tags of an image
    Size {
        /// Image name
        #[arg(short, long)]
        name: String,
        /// Print the size in human-readable units
        #[arg(long)]
        human: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

/// Install the stderr tracing subscriber; RUST_LOG overrides the verbosity default
fn init_tracing(verbosity: context::VerbosityLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.tracing_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    let verbosity = context::VerbosityLevel::from_count(cli.verbose);
    init_tracing(verbosity);

    let ctx = context::AppContext::build(cli.color, verbosity, cli.credentials);

    match cli.command {
        Commands::Version => {
            commands::version::print_version(&ctx);
        }
        Commands::Configure => {
            commands::configure::handle_configure(&ctx);
        }
        Commands::Image { command } => match command {
            ImageCommands::Ls { format } => {
                commands::image::handlers::handle_image_list(&ctx, format);
            }
            ImageCommands::Tags { name, format } => {
                commands::image::handlers::handle_image_tags(&ctx, &name, format);
            }
            ImageCommands::Sha { name, tag } => {
                commands::image::handlers::handle_image_sha(&ctx, &name, &tag);
            }
            ImageCommands::Info { name, tag, format } => {
                commands::image::handlers::handle_image_info(&ctx, &name, &tag, format);
            }
            ImageCommands::Delete {
                name,
                tag,
                keep,
                dry_run,
            } => match (tag, keep) {
                (Some(tag), _) => {
                    commands::image::handlers::handle_image_delete_tag(&ctx, &name, &tag, dry_run);
                }
                (None, Some(keep)) => {
                    let keep = usize::try_from(keep).unwrap_or(usize::MAX);
                    commands::image::handlers::handle_image_delete_keep(
                        &ctx, &name, keep, dry_run,
                    );
                }
                (None, None) => {
                    format::error(&ctx, "Either --tag or --keep is required");
                    std::process::exit(2);
                }
            },
            ImageCommands::Size {
                name,
                human,
                format,
            } => {
                commands::image::handlers::handle_image_size(&ctx, &name, human, format);
            }
        },
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
