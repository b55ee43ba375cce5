use crate::context::AppContext;

/// Get the version string for nexus-cli and libnexus
pub fn get_version_string(ctx: &AppContext) -> String {
    let mut output = format!(
        "{} v{}\nlibnexus {}",
        ctx.settings.name,
        ctx.settings.version,
        libnexus::version()
    );
    if !ctx.settings.authors.is_empty() {
        // Cargo joins package authors with ':'
        let authors = ctx.settings.authors.split(':').collect::<Vec<_>>().join(", ");
        output.push_str(&format!("\nAuthors: {}", authors));
    }
    output
}

/// Print version information to stdout
pub fn print_version(ctx: &AppContext) {
    println!("{}", get_version_string(ctx));
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
