use insights_client::{ALL, SentimentBucket, UtteranceFilters};
use insights_client::sentiment::format_percent;
use insights_feed::{DEFAULT_PAGE_SIZE, PagedFeed};

use super::Client;

#[derive(clap::Args)]
pub struct Args {
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long, default_value = ALL)]
    pub speaker: String,
    #[arg(long, default_value = ALL)]
    pub department: String,
    #[arg(long, default_value = ALL)]
    pub region: String,
    /// One of all, positive, negative, neutral
    #[arg(long, default_value = "all")]
    pub sentiment: String,
    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
}

pub async fn run(client: &Client, args: Args) -> anyhow::Result<()> {
    let sentiment: SentimentBucket = args
        .sentiment
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown sentiment bucket: {}", args.sentiment))?;

    let filters = UtteranceFilters {
        search: args.search,
        speaker: args.speaker,
        department: args.department,
        region: args.region,
        sentiment,
    };

    let feed = PagedFeed::with_filters(client, filters).page_size(args.page_size);
    feed.reset_and_fetch().await?;
    for _ in 1..args.pages {
        if !feed.snapshot().await.has_more {
            break;
        }
        feed.load_more().await?;
    }

    let snapshot = feed.snapshot().await;
    println!(
        "Showing {} of {} utterances (page {})",
        snapshot.items.len(),
        snapshot.total_count,
        snapshot.current_page,
    );

    for item in &snapshot.items {
        let u = &item.utterance;
        println!(
            "\n#{} {} [{} {}-{}] {} {}",
            item.key.position + 1,
            u.speaker,
            u.meeting_id,
            u.start_ts,
            u.end_ts,
            u.sentiment_label(),
            format_percent(u.sentiment_score),
        );
        println!("  {}", u.content);
        if !u.topics.is_empty() {
            println!("  topics: {}", u.topics.join(", "));
        }
    }

    if snapshot.has_more {
        println!("\nMore results available, rerun with --pages {}", args.pages + 1);
    }

    Ok(())
}
