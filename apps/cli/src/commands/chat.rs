use insights_client::HttpClient;
use insights_feed::ChatSession;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::Client;

#[derive(clap::Args)]
pub struct Args {
    /// Omit to start an interactive session
    pub question: Option<String>,
}

pub async fn run(client: &Client, args: Args) -> anyhow::Result<()> {
    let mut session = ChatSession::new(client);

    if let Some(question) = args.question {
        if let Some(response) = session.send(&question).await? {
            println!("{}", response.answer);
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("Ask about your meetings. Empty line or Ctrl-D to quit.");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            break;
        }
        ask(&mut session, &line).await;
    }

    Ok(())
}

// A failed query shows up as the last assistant message.
async fn ask<C: HttpClient>(session: &mut ChatSession<'_, C>, question: &str) {
    let _ = session.send(question).await;
    if let Some(message) = session.messages().last() {
        println!("{}\n", message.content);
    }
}
