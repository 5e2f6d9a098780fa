use insights_client::sentiment::format_percent;
use insights_feed::load_trends;

use super::Client;

pub async fn run(client: &Client) -> anyhow::Result<()> {
    let view = load_trends(client).await;
    if let Some(error) = view.error {
        anyhow::bail!(error);
    }

    let data = view.data;
    if let Some((start, end)) = data.window_dates() {
        println!(
            "Window: {} to {}",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );
    }

    if data.is_empty() {
        println!("No trends found.");
        return Ok(());
    }

    println!("{} topics", data.total_topics());
    for trend in &data.trends {
        println!(
            "\n{} [{}] meetings={} sentiment={} novelty={:.2}",
            trend.name,
            trend.momentum,
            trend.meetings_count,
            format_percent(trend.avg_sentiment),
            trend.novelty_score,
        );
        if !trend.description.is_empty() {
            println!("  {}", trend.description);
        }
        for support in trend.support_preview() {
            println!("  - {} @ {}", support.meeting_id, support.ts);
        }
    }

    Ok(())
}
