use insights_client::ALL;
use insights_client::sentiment::format_percent;
use insights_feed::{SpeakerFilter, load_speakers, speakers};

use super::Client;

#[derive(clap::Args)]
pub struct Args {
    /// Case-insensitive match on name or department
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long, default_value = ALL)]
    pub department: String,
    #[arg(long, default_value = ALL)]
    pub region: String,
}

pub async fn run(client: &Client, args: Args) -> anyhow::Result<()> {
    let view = load_speakers(client).await;
    if let Some(error) = view.error {
        anyhow::bail!(error);
    }

    let roster = &view.data.results;
    let filter = SpeakerFilter {
        search: args.search,
        department: args.department,
        region: args.region,
    };
    let matched = filter.apply(roster);

    println!(
        "{} of {} speakers (departments: {}; regions: {})",
        matched.len(),
        roster.len(),
        speakers::departments(roster).join(", "),
        speakers::regions(roster).join(", "),
    );

    for speaker in matched {
        println!(
            "\n{} ({}, {}) mentions={} sentiment={} {}",
            speaker.display_name,
            speaker.department,
            speaker.region,
            speaker.mentions,
            format_percent(speaker.avg_sentiment),
            speaker.sentiment_label(),
        );
        for quote in speaker.quote_preview() {
            println!("  \"{}\" ({} @ {})", quote.quote, quote.meeting_id, quote.ts);
        }
    }

    Ok(())
}
