use crate::error::{truncate_body, NotifyError};
use crate::message::NotificationMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

pub const DISCORD_API: &str = "https://discord.com/api/v10";

/// A resolved place to deliver messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub id: String,
}

/// Delivery boundary. The scanner logs and counts failures; it never stops on them.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn resolve(&self, destination: &str) -> Result<Destination, NotifyError>;

    async fn send(&self, destination: &Destination, message: &NotificationMessage) -> Result<(), NotifyError>;
}

#[derive(Deserialize)]
struct DiscordChannel {
    id: String,
}

#[derive(Deserialize)]
struct DiscordUser {
    username: String,
}

/// Posts to a Discord channel through the bot REST API.
#[derive(Clone)]
pub struct DiscordNotifier {
    client: Client,
    url: String,
    token: String,
}

impl DiscordNotifier {
    pub fn new(client: Client, token: &str) -> Self {
        Self::with_base_url(client, DISCORD_API, token)
    }

    pub fn with_base_url(client: Client, url: &str, token: &str) -> Self {
        Self { client, url: url.trim_end_matches('/').to_string(), token: token.to_string() }
    }

    fn auth(&self) -> String {
        format!("Bot {}", self.token)
    }

    /// Confirms the token is accepted. Returns the bot's username.
    pub async fn authenticate(&self) -> Result<String, NotifyError> {
        let response = self.client.get(format!("{}/users/@me", self.url)).header("Authorization", self.auth()).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Unauthorized(format!("{}: {}", status, truncate_body(&body))));
        }

        let user: DiscordUser = response.json().await?;
        info!("[Discord] Logged in as {}", user.username);
        Ok(user.username)
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn resolve(&self, destination: &str) -> Result<Destination, NotifyError> {
        if destination.trim().is_empty() {
            return Err(NotifyError::DestinationUnavailable { id: destination.to_string(), reason: "empty channel id".into() });
        }

        let response = self
            .client
            .get(format!("{}/channels/{}", self.url, destination))
            .header("Authorization", self.auth())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::DestinationUnavailable {
                id: destination.to_string(),
                reason: response.status().to_string(),
            });
        }

        let channel: DiscordChannel = response.json().await?;
        Ok(Destination { id: channel.id })
    }

    async fn send(&self, destination: &Destination, message: &NotificationMessage) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(format!("{}/channels/{}/messages", self.url, destination.id))
            .header("Authorization", self.auth())
            .json(&serde_json::json!({ "content": message.text }))
            .send()
            .await?;

        if response.status().is_success() {
            debug!("[Discord] Sent {:?} message to {}", message.kind, destination.id);
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(NotifyError::Rejected { status: status.as_u16(), body: truncate_body(&body) })
        }
    }
}
