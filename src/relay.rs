use std::sync::Arc;

use anyhow::Result;
use teloxide::utils::html;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::platform::{ChatPlatform, IncomingCommand};

pub const MISSING_URL_TEXT: &str = "❌ Please provide a URL after the /transfer command.";
pub const PROCESSING_TEXT: &str =
    "⏳ Got it! Starting the transfer process. This might take a moment depending on the video size...";
pub const SUCCESS_TEXT: &str = "✅ Success! The video has been transferred to the channel.";
pub const VIDEO_CAPTION: &str = "Video transferred via the URL Bot! 🚀";

/// Handles `/start` and `/transfer` on top of any [`ChatPlatform`].
/// Holds no per-request state; every call is independent.
pub struct Relay<P> {
    platform: P,
    config: Arc<Config>,
}

impl<P: ChatPlatform> Relay<P> {
    pub fn new(platform: P, config: Arc<Config>) -> Self {
        Self { platform, config }
    }

    pub async fn handle_start(&self, cmd: &IncomingCommand) -> Result<()> {
        info!("/start from {} ({})", cmd.user_name, cmd.chat_id);
        self.platform
            .send_html(cmd.chat_id, &welcome_text(&cmd.user_name))
            .await
    }

    pub async fn handle_transfer(&self, cmd: &IncomingCommand) -> Result<()> {
        let url = match cmd.first_arg() {
            Some(url) => url,
            None => return self.platform.send_text(cmd.chat_id, MISSING_URL_TEXT).await,
        };

        info!("Received transfer request for URL: {}", url);

        if let Err(e) = self.platform.send_text(cmd.chat_id, PROCESSING_TEXT).await {
            warn!("Failed to send acknowledgement to {}: {:#}", cmd.chat_id, e);
        }

        let destination = &self.config.destination;
        match self
            .platform
            .send_video_by_url(destination, url, VIDEO_CAPTION, true)
            .await
        {
            Ok(()) => {
                info!(
                    "Successfully transferred video from {} to {}",
                    url, self.config.target_channel
                );
                self.platform.send_text(cmd.chat_id, SUCCESS_TEXT).await
            }
            Err(e) => {
                error!("Failed to transfer video from {}. Error: {:#}", url, e);
                self.platform
                    .send_html(
                        cmd.chat_id,
                        &failure_text(&self.config.target_channel, &format!("{:#}", e)),
                    )
                    .await
            }
        }
    }
}

fn welcome_text(user_name: &str) -> String {
    format!(
        "👋 Hi {}!\n\n\
         I am the Telegram Video Transfer bot.\n\
         I can transfer videos to a channel directly from a web link.\n\n\
         To use me, send a message in this format:\n\
         <code>/transfer &lt;direct_video_url&gt;</code>\n\n\
         For example:\n\
         <code>/transfer https://example.com/videos/my_awesome_video.mp4</code>",
        html::escape(user_name)
    )
}

fn failure_text(destination: &str, detail: &str) -> String {
    format!(
        "😥 An error occurred.\n\n\
         Please check a few things:\n\
         1. Is the link a <b>direct</b> link to a video file (e.g., .mp4, .mov)? \
         Links to pages like YouTube won't work.\n\
         2. Is the video file accessible and not too large? (Telegram has size limits).\n\
         3. Is the bot an admin in the channel <code>{}</code>?\n\n\
         Error details: <code>{}</code>",
        html::escape(destination),
        html::escape(detail)
    )
}
