use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, Me, ParseMode, Recipient};
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use crate::config::{Config, Destination};
use crate::platform::{ChatPlatform, IncomingCommand};
use crate::relay::Relay;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show usage")]
    Start,
    #[command(description = "transfer a video from a direct URL to the channel")]
    Transfer(String),
}

/// Teloxide-backed implementation of [`ChatPlatform`]
#[derive(Clone)]
pub struct TelegramPlatform {
    bot: Bot,
}

impl TelegramPlatform {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

impl From<&Destination> for Recipient {
    fn from(destination: &Destination) -> Self {
        match destination {
            Destination::ChatId(id) => Recipient::Id(ChatId(*id)),
            Destination::Handle(handle) => Recipient::ChannelUsername(handle.clone()),
        }
    }
}

#[async_trait]
impl ChatPlatform for TelegramPlatform {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot.send_message(ChatId(chat_id), text).await?;
        Ok(())
    }

    async fn send_html(&self, chat_id: i64, html: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), html)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }

    async fn send_video_by_url(
        &self,
        destination: &Destination,
        url: &str,
        caption: &str,
        supports_streaming: bool,
    ) -> Result<()> {
        let url: reqwest::Url = url
            .parse()
            .with_context(|| format!("invalid URL '{}'", url))?;

        self.bot
            .send_video(Recipient::from(destination), InputFile::url(url))
            .caption(caption)
            .supports_streaming(supports_streaming)
            .await?;
        Ok(())
    }
}

/// Parse a command whose name may be followed by any whitespace, not only a
/// space, e.g. `/transfer\n<url>`.
pub fn parse_command(text: &str, bot_name: &str) -> Option<Command> {
    let text = text.trim();
    let normalized = match text.find(char::is_whitespace) {
        Some(pos) => format!("{} {}", &text[..pos], text[pos..].trim_start()),
        None => text.to_string(),
    };
    Command::parse(&normalized, bot_name).ok()
}

fn incoming(msg: &Message, args: String) -> IncomingCommand {
    let user_name = msg
        .from
        .as_ref()
        .map(|user| user.first_name.clone())
        .unwrap_or_else(|| "there".to_string());

    IncomingCommand {
        chat_id: msg.chat.id.0,
        user_name,
        args,
    }
}

/// Run the Telegram dispatcher until the process is stopped
pub async fn run(config: Arc<Config>) -> Result<()> {
    let bot = Bot::new(&config.bot_token);

    info!("Starting Telegram platform...");

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register command menu: {}", e);
    }

    let relay = Arc::new(Relay::new(TelegramPlatform::new(bot.clone()), config));

    let handler = Update::filter_message()
        .filter_map(|msg: Message, me: Me| parse_command(msg.text()?, me.username()))
        .endpoint(handle_command);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![relay])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("telegram"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_command(
    msg: Message,
    cmd: Command,
    relay: Arc<Relay<TelegramPlatform>>,
) -> Result<()> {
    match cmd {
        Command::Start => relay.handle_start(&incoming(&msg, String::new())).await,
        Command::Transfer(args) => relay.handle_transfer(&incoming(&msg, args)).await,
    }
}
