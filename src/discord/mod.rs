//! Publikacja raportów na kanale Discorda – samo HTTP, bez gatewaya i interakcji.

use serenity::all::{ChannelId, CreateEmbed, CreateMessage};
use serenity::http::Http;

use crate::config::Settings;
use crate::error::Result;

pub struct Publisher {
    http: Http,
    channel: ChannelId,
}

impl Publisher {
    /// `None`, jeśli brakuje tokenu albo kanału raportów.
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        let token = settings.discord.token.trim();
        if token.is_empty() {
            return None;
        }
        let channel = settings.discord.report_channel_id.filter(|id| *id != 0)?;
        Some(Self {
            http: Http::new(token),
            channel: ChannelId::new(channel),
        })
    }

    pub fn channel_id(&self) -> u64 {
        self.channel.get()
    }

    pub async fn post(&self, embed: CreateEmbed) -> Result<()> {
        self.channel
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;
        tracing::info!(channel = self.channel.get(), "report posted");
        Ok(())
    }
}
