use crate::context::{AppContext, VerbosityLevel};
use crate::format;
use libnexus::RegistryConfig;
use std::io::{self, BufRead, Write};

/// Handle the configure command
pub fn handle_configure(ctx: &AppContext) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let config = match prompt_config(&mut stdin.lock(), &mut stdout, || {
        rpassword::prompt_password("Enter Nexus Password: ")
            .map_err(|e| format!("Failed to read password: {}", e))
    }) {
        Ok(config) => config,
        Err(e) => {
            format::error(ctx, &e);
            std::process::exit(1);
        }
    };

    let path = &ctx.settings.credentials_path;
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Writing credentials to {}", path.display()),
    );

    if let Err(e) = config.save(path) {
        format::error(ctx, &e.to_string());
        std::process::exit(1);
    }

    format::success(ctx, &format!("Credentials saved to {}", path.display()));
}

/// Prompt for the four credential fields.
///
/// The password is read through `read_password` so it can be taken from the
/// terminal without echo.
pub(crate) fn prompt_config<R, W, P>(
    reader: &mut R,
    writer: &mut W,
    read_password: P,
) -> Result<RegistryConfig, String>
where
    R: BufRead,
    W: Write,
    P: FnOnce() -> Result<String, String>,
{
    let host = prompt_line(reader, writer, "Enter Nexus Host: ")?;
    validate_host(&host)?;
    let repository = prompt_line(reader, writer, "Enter Nexus Repository Name: ")?;
    if repository.is_empty() {
        return Err("Repository name must not be empty".to_string());
    }
    let username = prompt_line(reader, writer, "Enter Nexus Username: ")?;
    let password = read_password()?;

    Ok(RegistryConfig::new(host, username, password, repository))
}

fn prompt_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
) -> Result<String, String> {
    write!(writer, "{}", label).map_err(|e| format!("Failed to write prompt: {}", e))?;
    writer
        .flush()
        .map_err(|e| format!("Failed to write prompt: {}", e))?;

    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| format!("Failed to read input: {}", e))?;
    Ok(line.trim().to_string())
}

/// Accepts a bare `host:port` as well as a full URL.
fn validate_host(host: &str) -> Result<(), String> {
    if host.is_empty() {
        return Err("Host must not be empty".to_string());
    }

    let candidate = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    };

    url::Url::parse(&candidate)
        .map(|_| ())
        .map_err(|e| format!("Invalid host '{}': {}", host, e))
}

#[cfg(test)]
#[path = "configure_tests.rs"]
mod tests;
