use std::fmt::Write;

use insights_client::sentiment::format_percent;
use insights_feed::{Dashboard, load_dashboard};

use super::Client;

pub async fn run(client: &Client) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let dashboard = load_dashboard(client, today).await;

    println!("{}", render(&dashboard)?);
    into_result(&dashboard)
}

fn render(dashboard: &Dashboard) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(&dashboard.metrics)?;

    writeln!(out, "\n\nTop trends:")?;
    for trend in dashboard.top_trends() {
        writeln!(
            out,
            "  {} [{}] meetings={}",
            trend.name, trend.momentum, trend.meetings_count
        )?;
    }

    writeln!(out, "\nMost active speakers:")?;
    for speaker in dashboard.top_speakers() {
        writeln!(
            out,
            "  {} ({}) mentions={} sentiment={}",
            speaker.display_name,
            speaker.department,
            speaker.mentions,
            format_percent(speaker.avg_sentiment),
        )?;
    }

    Ok(out)
}

fn into_result(dashboard: &Dashboard) -> anyhow::Result<()> {
    match &dashboard.error {
        Some(error) => anyhow::bail!("failed to load dashboard: {error}"),
        None => Ok(()),
    }
}
