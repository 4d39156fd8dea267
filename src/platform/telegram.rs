use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::net::Download;
use teloxide::payloads::setters::*;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, FileId, InputFile, MessageId, ParseMode, ReplyParameters};
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

use crate::dispatcher::{Command, MessageDispatcher};
use crate::platform::{ChatChannel, ChatKind, DocumentRef, IncomingMessage, RepliedMessage};

/// Replies into the chat a message came from, threaded to that message
pub struct TelegramChannel {
    bot: Bot,
    chat_id: ChatId,
    reply_to: MessageId,
}

impl TelegramChannel {
    pub fn for_message(bot: Bot, msg: &Message) -> Self {
        Self {
            bot,
            chat_id: msg.chat.id,
            reply_to: msg.id,
        }
    }
}

#[async_trait]
impl ChatChannel for TelegramChannel {
    async fn send_text(&self, text: &str) -> Result<()> {
        self.bot
            .send_message(self.chat_id, text)
            .reply_parameters(ReplyParameters::new(self.reply_to))
            .await
            .context("Failed to send message")?;
        Ok(())
    }

    async fn send_html(&self, html: &str) -> Result<()> {
        self.bot
            .send_message(self.chat_id, html)
            .parse_mode(ParseMode::Html)
            .reply_parameters(ReplyParameters::new(self.reply_to))
            .await
            .context("Failed to send message")?;
        Ok(())
    }

    async fn send_document(&self, path: &Path, file_name: &str) -> Result<()> {
        let file = InputFile::file(path).file_name(file_name.to_string());
        self.bot
            .send_document(self.chat_id, file)
            .reply_parameters(ReplyParameters::new(self.reply_to))
            .await
            .with_context(|| format!("Failed to send document {}", file_name))?;
        Ok(())
    }

    async fn send_typing(&self) -> Result<()> {
        self.bot
            .send_chat_action(self.chat_id, ChatAction::Typing)
            .await
            .context("Failed to send chat action")?;
        Ok(())
    }

    async fn download(&self, document: &DocumentRef, dest: &Path) -> Result<()> {
        let file = self
            .bot
            .get_file(FileId(document.file_id.clone()))
            .await
            .context("Failed to look up file")?;

        let mut dst = tokio::fs::File::create(dest)
            .await
            .with_context(|| format!("Failed to create {}", dest.display()))?;
        self.bot
            .download_file(&file.path, &mut dst)
            .await
            .context("Failed to download file")?;

        debug!("Downloaded {} bytes to {}", file.size, dest.display());
        Ok(())
    }
}

/// Reduce a Telegram message to the fields translation needs
pub fn to_incoming(msg: &Message) -> IncomingMessage {
    let chat_kind = if msg.chat.is_private() {
        ChatKind::Private
    } else {
        ChatKind::Group
    };

    IncomingMessage {
        chat_id: msg.chat.id.0,
        chat_kind,
        sender_id: msg.from.as_ref().map(|user| user.id.0),
        text: msg.text().map(str::to_string),
        caption: msg.caption().map(str::to_string),
        reply_to: msg.reply_to_message().map(|replied| RepliedMessage {
            text: replied.text().map(str::to_string),
        }),
        document: msg.document().map(|doc| DocumentRef {
            file_id: doc.file.id.0.clone(),
            file_name: doc.file_name.clone(),
            size: u64::from(doc.file.size),
        }),
    }
}

/// Look up the bot's own username, used for mentions and `/cmd@bot` parsing
pub async fn resolve_username(bot: &Bot) -> Result<String> {
    let me = bot.get_me().await.context("getMe request failed")?;
    me.user
        .username
        .clone()
        .context("Bot account has no username")
}

/// Run the Telegram bot with long polling until interrupted
pub async fn run(bot: Bot, dispatcher: Arc<MessageDispatcher>) -> Result<()> {
    info!("Starting Telegram platform...");

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }

    let handler = Update::filter_message().endpoint(handle_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatcher])
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

async fn handle_message(
    bot: Bot,
    msg: Message,
    dispatcher: Arc<MessageDispatcher>,
) -> Result<()> {
    let incoming = to_incoming(&msg);
    let channel = TelegramChannel::for_message(bot, &msg);
    dispatcher.handle(&incoming, &channel).await
}
