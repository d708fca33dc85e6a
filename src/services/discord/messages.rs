use std::sync::Arc;

use serenity::builder::{CreateEmbed, CreateMessage, EditMessage};
use serenity::http::Http;
use serenity::model::id::{ChannelId, MessageId};

use crate::services::formatter::HELP_COLOUR;
use crate::services::runner::{BoxError, Replier};

/// Where a reply was posted; enough to edit it later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentMessage {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// Replies into one Discord channel over raw HTTP
pub struct ChannelReplier {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl ChannelReplier {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[serenity::async_trait]
impl Replier for ChannelReplier {
    type Handle = SentMessage;

    async fn typing(&self) -> Result<(), BoxError> {
        self.channel_id.broadcast_typing(&self.http).await?;
        Ok(())
    }

    async fn send(&self, text: &str) -> Result<SentMessage, BoxError> {
        let msg = self.channel_id.say(&self.http, text).await?;
        Ok(SentMessage { channel_id: msg.channel_id, message_id: msg.id })
    }

    async fn edit(&self, handle: &SentMessage, text: &str) -> Result<(), BoxError> {
        let edit = EditMessage::new().content(text);
        handle.channel_id.edit_message(&self.http, handle.message_id, edit).await?;
        Ok(())
    }

    async fn send_help(&self, title: &str, description: &str) -> Result<(), BoxError> {
        let embed = CreateEmbed::new()
            .title(title)
            .description(description)
            .colour(HELP_COLOUR);
        self.channel_id.send_message(&self.http, CreateMessage::new().embed(embed)).await?;
        Ok(())
    }
}
