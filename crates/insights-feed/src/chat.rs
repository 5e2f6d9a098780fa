use chrono::{DateTime, Utc};
use insights_client::{ChatQuery, ChatResponse, Error, HttpClient, InsightsClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Set on assistant messages that report a failed query.
    pub failed: bool,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            failed: false,
        }
    }
}

pub struct ChatSession<'a, C> {
    client: &'a InsightsClient<C>,
    messages: Vec<ChatMessage>,
}

impl<'a, C: HttpClient> ChatSession<'a, C> {
    pub fn new(client: &'a InsightsClient<C>) -> Self {
        Self {
            client,
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Asks `question`, using the previous message as context.
    ///
    /// Returns `Ok(None)` for blank input. A failed query is recorded in the
    /// history as an assistant message and also returned.
    pub async fn send(&mut self, question: &str) -> Result<Option<ChatResponse>, Error> {
        if question.trim().is_empty() {
            return Ok(None);
        }

        let context = self.messages.last().map(|m| m.content.clone());
        self.messages.push(ChatMessage::new(Role::User, question));

        let query = ChatQuery {
            question: question.to_string(),
            context,
        };

        match self.client.chat_query(query).await {
            Ok(response) => {
                self.messages
                    .push(ChatMessage::new(Role::Assistant, response.answer.clone()));
                Ok(Some(response))
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat_query_failed");
                let mut message = ChatMessage::new(
                    Role::Assistant,
                    format!("Sorry, I encountered an error: {err}"),
                );
                message.failed = true;
                self.messages.push(message);
                Err(err)
            }
        }
    }
}
