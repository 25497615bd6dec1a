//! Link commands: create, list, all, delete, copy

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::clipboard::Clipboard;
use crate::display::LinkCard;
use crate::interfaces::cli::{CliContext, CliError};
use crate::models::{LinkId, build_short_url, filter_by_term};
use crate::registry::{AssumeYes, Confirm};
use crate::view::ViewState;

/// Asks on stdin; anything but `y`/`yes` declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{}\n\n{} ", prompt, "Continue? [y/N]".yellow());
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input).is_err() {
            return false;
        }
        matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn print_card(index: Option<&LinkId>, card: &LinkCard) {
    match index {
        Some(id) => println!("  {} {}", format!("[{}]", id).dimmed(), card.title.bold()),
        None => println!("  {}", card.title.bold()),
    }
    println!(
        "      {} -> {}",
        card.short_url.cyan(),
        card.long_url.blue().underline()
    );
    let clicks = card
        .clicks
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "      {}",
        format!(
            "clicks: {}  created: {}  last clicked: {}",
            clicks, card.created, card.last_clicked
        )
        .dimmed()
    );
}

fn copy_text(ctx: &CliContext, text: &str) -> Result<(), CliError> {
    Clipboard::from_config(&ctx.config.clipboard).copy_to_clipboard(text)?;
    println!("{} Copied to clipboard: {}", "✓".bold().green(), text.cyan());
    Ok(())
}

pub async fn create_link(
    ctx: &CliContext,
    long_url: &str,
    short_code: &str,
    copy: bool,
) -> Result<(), CliError> {
    let entry = ctx.registry.create(long_url, short_code).await?;

    println!(
        "{} Short URL created: {} -> {}",
        "✓".bold().green(),
        entry.short_url.cyan(),
        entry.long_url.blue().underline()
    );

    if copy {
        copy_text(ctx, &entry.short_url)?;
    }
    Ok(())
}

/// Registry rows, each enriched with its live record unless `offline`.
pub async fn list_links(ctx: &CliContext, search: &str, offline: bool) -> Result<(), CliError> {
    let entries = ctx.registry.list(search);
    if entries.is_empty() {
        if ctx.registry.is_empty() {
            println!("{} No short URLs created yet", "ℹ".bold().blue());
        } else {
            println!("{} No links match \"{}\"", "ℹ".bold().blue(), search);
        }
        return Ok(());
    }

    println!("{}", "Your short URLs:".bold().green());
    println!();

    if offline {
        for entry in &entries {
            print_card(Some(&entry.id), &LinkCard::from_entry(entry, None));
        }
    } else {
        for (entry, result) in ctx.enricher.enrich_all(&entries).await {
            let live = match ViewState::from_result(result) {
                ViewState::Loaded(record) => Some(record),
                ViewState::Empty => None,
                ViewState::Error(msg) => {
                    println!(
                        "  {} {}: {}",
                        "⚠".bold().yellow(),
                        entry.short_code.cyan(),
                        msg
                    );
                    None
                }
                ViewState::Loading => None,
            };
            print_card(Some(&entry.id), &LinkCard::from_entry(&entry, live.as_ref()));
        }
    }

    println!();
    println!(
        "{} Total {} short URLs",
        "ℹ".bold().blue(),
        entries.len().to_string().green()
    );
    Ok(())
}

/// Every link known to the server.
pub async fn all_links(ctx: &CliContext, search: &str) -> Result<(), CliError> {
    match ViewState::from_items(ctx.api.fetch_all().await) {
        ViewState::Loaded(records) => {
            let matching = filter_by_term(&records, search);
            if matching.is_empty() {
                println!("{} No links match \"{}\"", "ℹ".bold().blue(), search);
                return Ok(());
            }
            println!("{}", "All links:".bold().green());
            println!();
            for record in &matching {
                print_card(None, &LinkCard::from_record(record, ctx.api.base_url()));
            }
            println!();
            println!(
                "{} Total {} links",
                "ℹ".bold().blue(),
                matching.len().to_string().green()
            );
            Ok(())
        }
        ViewState::Empty => {
            println!("{} No links found", "ℹ".bold().blue());
            Ok(())
        }
        ViewState::Error(msg) => Err(CliError::CommandError(msg)),
        ViewState::Loading => Ok(()),
    }
}

pub async fn delete_link(ctx: &CliContext, id: &str, yes: bool) -> Result<(), CliError> {
    let id: LinkId = id
        .parse()
        .map_err(|_| CliError::CommandError(format!("Invalid link id: {}", id)))?;

    let confirm: &dyn Confirm = if yes { &AssumeYes } else { &StdinConfirm };
    let entry = ctx.registry.delete(&id, confirm).await?;

    println!(
        "{} URL deleted successfully! {}",
        "✓".bold().green(),
        entry.short_code.cyan()
    );
    Ok(())
}

/// Copy by code; codes not in the registry are assembled from the base URL.
pub fn copy_link(ctx: &CliContext, code: &str) -> Result<(), CliError> {
    let short_url = ctx
        .registry
        .find_by_code(code)
        .map(|entry| entry.short_url)
        .unwrap_or_else(|| build_short_url(ctx.registry.base_url(), code));
    copy_text(ctx, &short_url)
}
