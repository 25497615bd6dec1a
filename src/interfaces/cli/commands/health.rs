//! Health check command

use colored::Colorize;

use crate::display::format_datetime;
use crate::interfaces::cli::{CliContext, CliError};

pub async fn health_check(ctx: &CliContext) -> Result<(), CliError> {
    println!(
        "{} Checking {}",
        "ℹ".bold().blue(),
        ctx.api.base_url().blue()
    );

    let report = ctx.api.health().await?;

    println!("{} Server is healthy", "✓".bold().green());
    println!("  {}: {}", "Version".bold(), report.version.cyan());
    println!(
        "  {}: {}",
        "Latency".bold(),
        format!("{}ms", report.latency.as_millis()).green()
    );
    println!(
        "  {}: {}",
        "Checked at".bold(),
        format_datetime(&report.checked_at.with_timezone(&chrono::Local))
    );
    Ok(())
}
