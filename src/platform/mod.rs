pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Destination;

/// A command received from the chat platform
#[derive(Debug, Clone)]
pub struct IncomingCommand {
    /// Chat the command was sent from; replies go here
    pub chat_id: i64,
    /// Display name of the sender
    pub user_name: String,
    /// Raw argument text following the command name
    pub args: String,
}

impl IncomingCommand {
    /// First whitespace-delimited argument, if any
    pub fn first_arg(&self) -> Option<&str> {
        self.args.split_whitespace().next()
    }
}

/// Outbound operations the relay needs from a chat platform.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()>;

    async fn send_html(&self, chat_id: i64, html: &str) -> Result<()>;

    /// Ask the platform to fetch `url` itself and post it as a video.
    /// The error's display string is the detail reported back to the user.
    async fn send_video_by_url(
        &self,
        destination: &Destination,
        url: &str,
        caption: &str,
        supports_streaming: bool,
    ) -> Result<()>;
}
