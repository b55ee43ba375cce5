use super::*;
use crate::format::{Console, OutputFormat};
use libnexus::{DeleteOutcome, RetentionEvent, RetentionPlan};

fn exit_with(ctx: &AppContext, message: &str) -> ! {
    format::error(ctx, message);
    std::process::exit(1);
}

fn connect_or_exit(ctx: &AppContext) -> Nexus {
    connect(ctx).unwrap_or_else(|e| exit_with(ctx, &e))
}

/// Handle the image ls command
pub fn handle_image_list(ctx: &AppContext, format: OutputFormat) {
    format::print(ctx, VerbosityLevel::Verbose, "Listing images from registry...");

    let nexus = connect_or_exit(ctx);
    let images = fetch_images(&nexus).unwrap_or_else(|e| exit_with(ctx, &e));

    if format == OutputFormat::Pretty && images.is_empty() {
        println!("No images found.");
        return;
    }

    match format::format_table(&images, format) {
        Ok(output) => println!("{}", output),
        Err(e) => exit_with(ctx, &e),
    }

    if format == OutputFormat::Pretty {
        println!("Total images: {}", images.len());
    }
}

/// Handle the image tags command
pub fn handle_image_tags(ctx: &AppContext, image: &str, format: OutputFormat) {
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Listing tags for image: {}", image),
    );

    let nexus = connect_or_exit(ctx);
    let tags = fetch_tags(&nexus, image).unwrap_or_else(|e| exit_with(ctx, &e));

    if format == OutputFormat::Pretty && tags.is_empty() {
        println!("No tags found for image '{}'.", image);
        return;
    }

    match format::format_table(&tags, format) {
        Ok(output) => println!("{}", output),
        Err(e) => exit_with(ctx, &e),
    }

    if format == OutputFormat::Pretty {
        println!("There are {} images for {}", tags.len(), image);
    }
}

/// Handle the image sha command
pub fn handle_image_sha(ctx: &AppContext, image: &str, tag: &str) {
    let nexus = connect_or_exit(ctx);
    let digest = fetch_digest(&nexus, image, tag).unwrap_or_else(|e| exit_with(ctx, &e));
    println!("{}", digest);
}

/// Handle the image info command
pub fn handle_image_info(ctx: &AppContext, image: &str, tag: &str, format: OutputFormat) {
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Fetching manifest for {}:{}", image, tag),
    );

    let nexus = connect_or_exit(ctx);
    let info = fetch_info(&nexus, image, tag).unwrap_or_else(|e| exit_with(ctx, &e));

    match format::format_output(&info, format) {
        Ok(output) => println!("{}", output),
        Err(e) => exit_with(ctx, &e),
    }
}

/// Handle the image size command
pub fn handle_image_size(ctx: &AppContext, image: &str, human: bool, format: OutputFormat) {
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Computing size of all tags of {}", image),
    );

    let nexus = connect_or_exit(ctx);
    let size = fetch_size(&nexus, image, human).unwrap_or_else(|e| exit_with(ctx, &e));

    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!(
            "{} tags, {} unique layers",
            size.size.tags, size.size.unique_layers
        ),
    );

    match format::format_output(&size, format) {
        Ok(output) => println!("{}", output),
        Err(e) => exit_with(ctx, &e),
    }
}

/// Handle deleting a single tag
pub fn handle_image_delete_tag(ctx: &AppContext, image: &str, tag: &str, dry_run: bool) {
    let nexus = connect_or_exit(ctx);

    if dry_run {
        match find_asset_id(&nexus, image, tag) {
            Ok(Some(asset_id)) => println!(
                "{}:{} would be deleted (asset {})",
                image, tag, asset_id
            ),
            Ok(None) => format::warning(ctx, &format!("No assets found for {}:{}", image, tag)),
            Err(e) => exit_with(ctx, &e),
        }
        return;
    }

    match nexus.delete_tag(image, tag) {
        Ok(DeleteOutcome::Deleted { asset_id }) => {
            format::print(
                ctx,
                VerbosityLevel::Verbose,
                &format!("Deleted asset {}", asset_id),
            );
            format::success(ctx, &format!("{}:{} has been deleted", image, tag));
        }
        Ok(DeleteOutcome::NotFound) => {
            format::warning(ctx, &format!("No assets found for {}:{}", image, tag));
        }
        Err(e) => exit_with(ctx, &e.to_string()),
    }
}

/// Handle deleting all but the newest `keep` tags
pub fn handle_image_delete_keep(ctx: &AppContext, image: &str, keep: usize, dry_run: bool) {
    let nexus = connect_or_exit(ctx);

    if dry_run {
        let plan = nexus
            .plan_keeping(image, keep)
            .unwrap_or_else(|e| exit_with(ctx, &e.to_string()));
        report_plan(ctx, image, &plan);
        return;
    }

    let console = Console::for_context(ctx);
    let mut progress = None;
    let mut not_found = Vec::new();

    let result = nexus.delete_keeping(image, keep, |event| match event {
        RetentionEvent::Started { total } => {
            progress = Some(console.progress_bar(total as u64, "Deleting"));
        }
        RetentionEvent::Deleting { tag } => {
            format::print(
                ctx,
                VerbosityLevel::Verbose,
                &format!("{}:{} image will be deleted ...", image, tag),
            );
            if let Some(pb) = &progress {
                pb.set_message(format!("{}:{}", image, tag));
            }
        }
        RetentionEvent::Finished { tag, outcome } => {
            if *outcome == DeleteOutcome::NotFound {
                not_found.push(tag.to_string());
            }
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }
    });

    let plan = match result {
        Ok(plan) => plan,
        Err(e) => {
            if let Some(pb) = progress {
                pb.abandon();
            }
            exit_with(ctx, &e.to_string());
        }
    };

    match &plan {
        RetentionPlan::Insufficient { available } => {
            format::warning(ctx, &format!("Only {} images are available", available));
        }
        RetentionPlan::Delete { to_delete, kept } => {
            if let Some(pb) = progress {
                console.finish_progress(
                    pb,
                    &format!(
                        "Deleted {} tags of {}, kept {}",
                        to_delete.len() - not_found.len(),
                        image,
                        kept.len()
                    ),
                );
            } else {
                println!("Nothing to delete, {} tags kept", kept.len());
            }
            for tag in &not_found {
                format::warning(ctx, &format!("No assets found for {}:{}", image, tag));
            }
        }
    }
}

fn report_plan(ctx: &AppContext, image: &str, plan: &RetentionPlan) {
    match plan {
        RetentionPlan::Insufficient { available } => {
            format::warning(ctx, &format!("Only {} images are available", available));
        }
        RetentionPlan::Delete { to_delete, kept } => {
            for tag in to_delete {
                println!("{}:{} would be deleted", image, tag);
            }
            for tag in kept {
                println!("{} {}:{} kept", format::checkmark(ctx), image, tag);
            }
        }
    }
}
