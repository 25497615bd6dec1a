//! Per-link analytics dashboard

use colored::Colorize;

use crate::analytics::{AnalyticsGenerator, LinkDashboard};
use crate::display::{domain_label, format_date_short, format_timestamp};
use crate::interfaces::cli::{CliContext, CliError};
use crate::view::ViewState;

const BAR_WIDTH: u64 = 30;

fn bar(value: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let width = u128::from(value) * u128::from(BAR_WIDTH) / u128::from(max);
    "█".repeat(width as usize)
}

pub async fn show_stats(
    ctx: &CliContext,
    code: &str,
    seed: Option<u64>,
    json: bool,
) -> Result<(), CliError> {
    let record = match ViewState::from_result(ctx.enricher.enrich(code).await) {
        ViewState::Loaded(record) => record,
        ViewState::Empty => {
            println!("{} No data found for {}", "ℹ".bold().blue(), code.cyan());
            return Ok(());
        }
        ViewState::Error(msg) => {
            return Err(CliError::CommandError(format!(
                "Error loading dashboard: {}",
                msg
            )));
        }
        ViewState::Loading => return Ok(()),
    };

    let dashboard = match seed {
        Some(seed) => LinkDashboard::build(record, &mut AnalyticsGenerator::seeded(seed)),
        None => LinkDashboard::build(record, &mut AnalyticsGenerator::from_entropy()),
    };

    if json {
        let json_str = serde_json::to_string_pretty(&dashboard)
            .map_err(|e| CliError::CommandError(format!("Failed to serialize to JSON: {}", e)))?;
        println!("{}", json_str);
        return Ok(());
    }

    render_dashboard(&dashboard);
    Ok(())
}

fn render_dashboard(dashboard: &LinkDashboard) {
    let record = &dashboard.record;
    let analytics = &dashboard.analytics;
    let summary = &dashboard.summary;

    println!();
    println!(
        "{} {}",
        "Analytics for".bold(),
        format!("/{}", record.short_code).cyan().bold()
    );
    println!(
        "{} {}",
        domain_label(&record.long_url).dimmed(),
        record.long_url.blue().underline()
    );
    println!();
    println!("{}: {}", "Total clicks".bold(), record.clicks.to_string().green());
    println!(
        "{}: {}",
        "Created".bold(),
        format_date_short(record.created_at)
    );
    println!(
        "{}: {}",
        "Last clicked".bold(),
        format_timestamp(record.last_clicked_at)
    );

    println!();
    println!("{}", "Daily clicks".bold().green());
    let max = analytics.daily_series.iter().map(|p| p.clicks).max().unwrap_or(0);
    for point in &analytics.daily_series {
        println!("  {:<4} {:>6} {}", point.day, point.clicks, bar(point.clicks, max).cyan());
    }

    println!();
    println!("{}", "Weekly trend".bold().green());
    let max = analytics.weekly_series.iter().map(|p| p.clicks).max().unwrap_or(0);
    for point in &analytics.weekly_series {
        println!("  {:<7} {:>6} {}", point.week, point.clicks, bar(point.clicks, max).blue());
    }

    println!();
    println!("{}", "Hourly activity".bold().green());
    let hours = analytics.business_hours();
    let max = hours.iter().map(|p| p.clicks as u64).max().unwrap_or(0);
    for point in hours {
        println!(
            "  {:<6} {:>6} {}",
            point.hour,
            point.clicks,
            bar(point.clicks as u64, max).magenta()
        );
    }

    println!();
    println!("{}", "Performance summary".bold().green());
    println!("  Average daily clicks: {}", summary.average_daily_clicks);
    println!("  Most active day: {}", summary.most_active_day);
    println!("  Click-through status: {}", summary.status_label());
    println!("  Last activity: {}", summary.last_activity_label());
    println!();
}
