use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::utils::command::BotCommands;
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::config::{Config, LimitsConfig};
use crate::extract::{self, DocumentKind, ExtractError};
use crate::platform::{ChatChannel, ChatKind, DocumentRef, IncomingMessage};
use crate::reply;
use crate::translate::{languages, TranslationRequest, Translator};

const PRIVATE_USAGE: &str = "⚠️ Please provide language code and text.\nExample: `en Hello world`";
const NOTHING_TO_TRANSLATE: &str = "⚠️ Nothing to translate.";
const CAPTION_REQUIRED: &str =
    "⚠️ Please set the target language as the file caption (e.g., `en`).";
const UNSUPPORTED_FILE: &str = "⚠️ Unsupported file type. Use `.txt`, `.docx`, or `.pdf`.";
const NO_TEXT_IN_FILE: &str = "⚠️ No extractable text found in the file.";
const DOWNLOAD_FAILED: &str = "⚠️ Could not download the file. Please try again.";

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show how to use the bot.")]
    Start,
    #[command(description = "show how to use the bot.")]
    Help,
    #[command(description = "list supported language codes.")]
    Languages,
}

/// What an incoming message asks the bot to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Command(Command),
    /// Reply to another message that mentions the bot; translates the replied-to text
    GroupMention { target: String, source: String },
    /// `<lang_code> <text>` in a private chat
    Private { target: String, source: String },
    /// Private message without both a code and text
    PrivateUsage,
    /// Document whose caption names the target language
    File { target: String, document: DocumentRef },
    FileWithoutCaption,
    Ignored,
}

/// Classify a message. Documents are checked first, then slash-commands, then
/// the mention-reply rule, then the private-chat rule.
pub fn classify(msg: &IncomingMessage, bot_username: &str, default_target: &str) -> MessageKind {
    if let Some(document) = &msg.document {
        return match msg.caption.as_deref().map(str::trim) {
            Some(caption) if !caption.is_empty() => MessageKind::File {
                target: caption.to_lowercase(),
                document: document.clone(),
            },
            _ => MessageKind::FileWithoutCaption,
        };
    }

    let Some(text) = msg.text.as_deref() else {
        return MessageKind::Ignored;
    };

    if text.starts_with('/') {
        return match Command::parse(text, bot_username) {
            Ok(command) => MessageKind::Command(command),
            Err(_) => MessageKind::Ignored,
        };
    }

    let mention = format!("@{}", bot_username).to_lowercase();
    if let Some(replied) = &msg.reply_to {
        if text.to_lowercase().contains(&mention) {
            let target = text
                .split_whitespace()
                .find(|token| !token.to_lowercase().starts_with(&mention))
                .map(str::to_lowercase)
                .unwrap_or_else(|| default_target.to_string());
            return MessageKind::GroupMention {
                target,
                source: replied.text.clone().unwrap_or_default(),
            };
        }
    }

    if msg.chat_kind == ChatKind::Private {
        return match text.trim_start().split_once(char::is_whitespace) {
            Some((code, rest)) if !rest.trim_start().is_empty() => MessageKind::Private {
                target: code.to_lowercase(),
                source: rest.trim_start().to_string(),
            },
            _ => MessageKind::PrivateUsage,
        };
    }

    MessageKind::Ignored
}

/// First `max_chars` characters of `text`
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn usage_html(bot_username: &str) -> String {
    format!(
        "Hi! 👋\n\n\
         📌 <b>Usage:</b>\n\
         - In groups: Reply to a message and mention me (e.g., <code>@{bot} en</code>).\n\
         - In private chat: Send <code>lang_code your text</code> (e.g., <code>fa Hello world</code>).\n\
         - To translate a file: attach the file and set the file caption to the target language (e.g., <code>ckb</code>).\n\n\
         🌐 Example: <code>ckb Hello friend!</code> → translates to Kurdish Sorani.\n\n\
         Send /languages to see every supported language code.",
        bot = bot_username
    )
}

/// Turns incoming messages into translation replies.
///
/// Holds only immutable configuration, so one instance serves every chat.
pub struct MessageDispatcher {
    translator: Arc<dyn Translator>,
    bot_username: String,
    default_target: String,
    limits: LimitsConfig,
}

impl MessageDispatcher {
    pub fn new(translator: Arc<dyn Translator>, bot_username: &str, config: &Config) -> Self {
        Self {
            translator,
            bot_username: bot_username.trim_start_matches('@').to_string(),
            default_target: config.translation.default_target.clone(),
            limits: config.limits.clone(),
        }
    }

    /// Handle one message. User-facing problems are answered in the chat;
    /// an error is returned only when the chat itself can't be reached.
    pub async fn handle(&self, msg: &IncomingMessage, channel: &dyn ChatChannel) -> Result<()> {
        let kind = classify(msg, &self.bot_username, &self.default_target);
        debug!(
            "Chat {} ({:?}) sender {:?}: {:?}",
            msg.chat_id, msg.chat_kind, msg.sender_id, kind
        );

        match kind {
            MessageKind::Command(command) => self.handle_command(command, channel).await,
            MessageKind::GroupMention { target, source }
            | MessageKind::Private { target, source } => {
                self.translate_text(&target, &source, channel).await
            }
            MessageKind::PrivateUsage => channel.send_text(PRIVATE_USAGE).await,
            MessageKind::File { target, document } => {
                self.translate_document(&target, &document, channel).await
            }
            MessageKind::FileWithoutCaption => channel.send_text(CAPTION_REQUIRED).await,
            MessageKind::Ignored => Ok(()),
        }
    }

    async fn handle_command(&self, command: Command, channel: &dyn ChatChannel) -> Result<()> {
        match command {
            Command::Start | Command::Help => {
                channel.send_html(&usage_html(&self.bot_username)).await
            }
            Command::Languages => {
                let text = format!("Supported languages:\n\n{}", languages::listing());
                channel.send_text(&text).await
            }
        }
    }

    async fn translate_text(
        &self,
        target: &str,
        source: &str,
        channel: &dyn ChatChannel,
    ) -> Result<()> {
        if source.trim().is_empty() {
            return channel.send_text(NOTHING_TO_TRANSLATE).await;
        }
        self.translate_and_reply(TranslationRequest::new(source, target), channel)
            .await
    }

    async fn translate_document(
        &self,
        target: &str,
        document: &DocumentRef,
        channel: &dyn ChatChannel,
    ) -> Result<()> {
        let file_name = document.file_name.as_deref().unwrap_or("file");

        if DocumentKind::from_file_name(file_name).is_none() {
            info!("Rejecting unsupported document: {}", file_name);
            return channel.send_text(UNSUPPORTED_FILE).await;
        }

        if document.size > self.limits.max_file_bytes {
            info!("Rejecting {} ({} bytes): too large", file_name, document.size);
            let text = format!(
                "⚠️ File is too large. The limit is {} MB.",
                self.limits.max_file_bytes / (1024 * 1024)
            );
            return channel.send_text(&text).await;
        }

        let download = match self.download(document, channel).await {
            Ok(file) => file,
            Err(e) => {
                error!("Failed to download {}: {:#}", file_name, e);
                return channel.send_text(DOWNLOAD_FAILED).await;
            }
        };

        let extracted = extract::extract_text(download.path(), file_name).await;
        drop(download);

        let text = match extracted {
            Ok(text) => text,
            Err(ExtractError::UnsupportedType(_)) => {
                return channel.send_text(UNSUPPORTED_FILE).await;
            }
            Err(ExtractError::Empty) => {
                info!("No text in {}", file_name);
                return channel.send_text(NO_TEXT_IN_FILE).await;
            }
            Err(e) => {
                warn!("Failed to extract {}: {}", file_name, e);
                return channel
                    .send_text(&format!("⚠️ Could not read the file: {}", e))
                    .await;
            }
        };

        let source = truncate_chars(&text, self.limits.file_source_max_chars);
        if source.len() < text.len() {
            warn!(
                "Document {} truncated to {} of {} characters",
                file_name,
                self.limits.file_source_max_chars,
                text.chars().count()
            );
        }

        self.translate_and_reply(TranslationRequest::new(source, target), channel)
            .await
    }

    /// Download into a fresh temporary file, removed when the handle drops.
    async fn download(
        &self,
        document: &DocumentRef,
        channel: &dyn ChatChannel,
    ) -> Result<NamedTempFile> {
        let file = NamedTempFile::new().context("Failed to create temporary file")?;
        channel.download(document, file.path()).await?;
        Ok(file)
    }

    async fn translate_and_reply(
        &self,
        request: TranslationRequest,
        channel: &dyn ChatChannel,
    ) -> Result<()> {
        channel.send_typing().await.ok();

        match self.translator.translate(&request).await {
            Ok(translation) => {
                info!(
                    "Translated {} chars into {} ({} chars)",
                    request.text.chars().count(),
                    request.target,
                    translation.text.chars().count()
                );
                let rendered = reply::render(
                    &request.target,
                    translation.text,
                    self.limits.inline_reply_max_chars,
                );
                reply::deliver(channel, rendered).await
            }
            Err(e) => {
                warn!("Translation into {} failed: {}", request.target, e);
                channel
                    .send_text(&format!("⚠️ Translation failed: {}", e))
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::RepliedMessage;
    use crate::translate::{TranslateError, Translation};
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    const BOT: &str = "xyzlangbot";

    #[derive(Debug, Clone, PartialEq)]
    enum Sent {
        Text(String),
        Html(String),
        Document {
            file_name: String,
            contents: String,
            path: PathBuf,
        },
    }

    #[derive(Default)]
    struct FakeChannel {
        sent: Mutex<Vec<Sent>>,
        downloads: Mutex<Vec<PathBuf>>,
        /// Bytes written by `download`; `None` makes the download fail
        file_contents: Option<Vec<u8>>,
    }

    impl FakeChannel {
        fn with_file(contents: &[u8]) -> Self {
            Self {
                file_contents: Some(contents.to_vec()),
                ..Default::default()
            }
        }

        fn sent(&self) -> Vec<Sent> {
            self.sent.lock().unwrap().clone()
        }

        fn downloads(&self) -> Vec<PathBuf> {
            self.downloads.lock().unwrap().clone()
        }

        fn only_text(&self) -> String {
            match self.sent().as_slice() {
                [Sent::Text(text)] => text.clone(),
                other => panic!("expected a single text reply, got {:?}", other),
            }
        }
    }

    #[async_trait]
    impl ChatChannel for FakeChannel {
        async fn send_text(&self, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
            Ok(())
        }

        async fn send_html(&self, html: &str) -> Result<()> {
            self.sent.lock().unwrap().push(Sent::Html(html.to_string()));
            Ok(())
        }

        async fn send_document(&self, path: &Path, file_name: &str) -> Result<()> {
            let contents = std::fs::read_to_string(path)?;
            self.sent.lock().unwrap().push(Sent::Document {
                file_name: file_name.to_string(),
                contents,
                path: path.to_path_buf(),
            });
            Ok(())
        }

        async fn send_typing(&self) -> Result<()> {
            Ok(())
        }

        async fn download(&self, _document: &DocumentRef, dest: &Path) -> Result<()> {
            self.downloads.lock().unwrap().push(dest.to_path_buf());
            match &self.file_contents {
                Some(bytes) => {
                    std::fs::write(dest, bytes)?;
                    Ok(())
                }
                None => anyhow::bail!("network unreachable"),
            }
        }
    }

    /// Records requests and answers with a fixed result
    struct FakeTranslator {
        requests: Mutex<Vec<TranslationRequest>>,
        answer: Option<String>,
    }

    impl FakeTranslator {
        fn answering(text: &str) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                answer: Some(text.to_string()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                answer: None,
            })
        }

        fn requests(&self) -> Vec<TranslationRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Translator for FakeTranslator {
        async fn translate(
            &self,
            request: &TranslationRequest,
        ) -> Result<Translation, TranslateError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.answer {
                Some(text) => Ok(Translation {
                    text: text.clone(),
                    detected_source: Some("en".to_string()),
                }),
                None => Err(TranslateError::UnsupportedLanguage(request.target.clone())),
            }
        }
    }

    fn dispatcher(translator: Arc<FakeTranslator>) -> MessageDispatcher {
        MessageDispatcher::new(translator, BOT, &Config::default())
    }

    fn private(text: &str) -> IncomingMessage {
        IncomingMessage {
            chat_id: 42,
            chat_kind: ChatKind::Private,
            sender_id: Some(7),
            text: Some(text.to_string()),
            caption: None,
            reply_to: None,
            document: None,
        }
    }

    fn group_reply(text: &str, replied: Option<&str>) -> IncomingMessage {
        IncomingMessage {
            chat_id: -100,
            chat_kind: ChatKind::Group,
            reply_to: Some(RepliedMessage {
                text: replied.map(str::to_string),
            }),
            ..private(text)
        }
    }

    fn document(file_name: &str, caption: Option<&str>) -> IncomingMessage {
        IncomingMessage {
            text: None,
            caption: caption.map(str::to_string),
            document: Some(DocumentRef {
                file_id: "file-1".to_string(),
                file_name: Some(file_name.to_string()),
                size: 128,
            }),
            ..private("")
        }
    }

    // ── Classification ─────────────────────────────────────────────────────

    #[test]
    fn test_classify_mention_reply_defaults_to_english() {
        let kind = classify(&group_reply("@xyzlangbot", Some("Hola")), BOT, "en");
        assert_eq!(
            kind,
            MessageKind::GroupMention {
                target: "en".to_string(),
                source: "Hola".to_string()
            }
        );
    }

    #[test]
    fn test_classify_mention_reply_with_code() {
        let kind = classify(&group_reply("@XyzLangBot FA", Some("Hello")), BOT, "en");
        assert_eq!(
            kind,
            MessageKind::GroupMention {
                target: "fa".to_string(),
                source: "Hello".to_string()
            }
        );

        let kind = classify(&group_reply("ckb @xyzlangbot", Some("Hello")), BOT, "en");
        assert!(matches!(kind, MessageKind::GroupMention { ref target, .. } if target == "ckb"));
    }

    #[test]
    fn test_classify_group_without_mention_is_ignored() {
        assert_eq!(
            classify(&group_reply("fr please", Some("Hello")), BOT, "en"),
            MessageKind::Ignored
        );

        let mut msg = group_reply("@xyzlangbot fr", None);
        msg.reply_to = None;
        assert_eq!(classify(&msg, BOT, "en"), MessageKind::Ignored);
    }

    #[test]
    fn test_classify_private_splits_code_and_text() {
        assert_eq!(
            classify(&private("FA   Hello world  "), BOT, "en"),
            MessageKind::Private {
                target: "fa".to_string(),
                source: "Hello world  ".to_string()
            }
        );
    }

    #[test]
    fn test_classify_private_needs_two_tokens() {
        assert_eq!(classify(&private("fa"), BOT, "en"), MessageKind::PrivateUsage);
        assert_eq!(classify(&private("fa   "), BOT, "en"), MessageKind::PrivateUsage);
        assert_eq!(classify(&private("   "), BOT, "en"), MessageKind::PrivateUsage);
    }

    #[test]
    fn test_classify_commands() {
        assert_eq!(
            classify(&private("/start"), BOT, "en"),
            MessageKind::Command(Command::Start)
        );
        assert_eq!(
            classify(&private("/languages@xyzlangbot"), BOT, "en"),
            MessageKind::Command(Command::Languages)
        );
        assert_eq!(classify(&private("/start@otherbot"), BOT, "en"), MessageKind::Ignored);
        assert_eq!(classify(&private("/unknown"), BOT, "en"), MessageKind::Ignored);
    }

    #[test]
    fn test_classify_documents() {
        assert!(matches!(
            classify(&document("a.txt", Some("  FR ")), BOT, "en"),
            MessageKind::File { ref target, .. } if target == "fr"
        ));
        assert_eq!(
            classify(&document("a.txt", Some("   ")), BOT, "en"),
            MessageKind::FileWithoutCaption
        );
        assert_eq!(
            classify(&document("a.txt", None), BOT, "en"),
            MessageKind::FileWithoutCaption
        );
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    // ── Text paths ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_private_usage_error_skips_translation() {
        let translator = FakeTranslator::answering("unused");
        let channel = FakeChannel::default();

        dispatcher(translator.clone())
            .handle(&private("en"), &channel)
            .await
            .unwrap();

        assert_eq!(channel.only_text(), PRIVATE_USAGE);
        assert!(translator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_private_translation_reply() {
        let translator = FakeTranslator::answering("سلام دنیا");
        let channel = FakeChannel::default();

        dispatcher(translator.clone())
            .handle(&private("fa Hello world"), &channel)
            .await
            .unwrap();

        assert_eq!(
            translator.requests(),
            vec![TranslationRequest::new("Hello world", "fa")]
        );
        assert_eq!(channel.only_text(), "🌐 Translation (fa):\nسلام دنیا");
    }

    #[tokio::test]
    async fn test_mention_reply_uses_default_target() {
        let translator = FakeTranslator::answering("Hello");
        let channel = FakeChannel::default();

        dispatcher(translator.clone())
            .handle(&group_reply("@xyzlangbot", Some("Hallo")), &channel)
            .await
            .unwrap();

        let requests = translator.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].target, "en");
        assert_eq!(requests[0].source, "auto");
        assert_eq!(requests[0].text, "Hallo");
    }

    #[tokio::test]
    async fn test_mention_reply_to_message_without_text() {
        let translator = FakeTranslator::answering("unused");
        let channel = FakeChannel::default();

        dispatcher(translator.clone())
            .handle(&group_reply("@xyzlangbot de", None), &channel)
            .await
            .unwrap();

        assert_eq!(channel.only_text(), NOTHING_TO_TRANSLATE);
        assert!(translator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_ignored_group_message_sends_nothing() {
        let translator = FakeTranslator::answering("unused");
        let channel = FakeChannel::default();
        let mut msg = private("fr Hello");
        msg.chat_kind = ChatKind::Group;

        dispatcher(translator.clone())
            .handle(&msg, &channel)
            .await
            .unwrap();

        assert!(channel.sent().is_empty());
        assert!(translator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_translation_failure_is_reported() {
        let translator = FakeTranslator::failing();
        let channel = FakeChannel::default();

        dispatcher(translator)
            .handle(&private("xx Hello"), &channel)
            .await
            .unwrap();

        assert_eq!(
            channel.only_text(),
            "⚠️ Translation failed: unsupported language: xx"
        );
    }

    #[tokio::test]
    async fn test_start_command_sends_usage() {
        let channel = FakeChannel::default();

        dispatcher(FakeTranslator::answering("unused"))
            .handle(&private("/start"), &channel)
            .await
            .unwrap();

        match channel.sent().as_slice() {
            [Sent::Html(html)] => {
                assert!(html.contains("@xyzlangbot en"));
                assert!(html.contains("<b>Usage:</b>"));
            }
            other => panic!("unexpected replies: {:?}", other),
        }
    }

    // ── File path ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_file_without_caption_is_not_downloaded() {
        let translator = FakeTranslator::answering("unused");
        let channel = FakeChannel::with_file(b"Hello");

        dispatcher(translator.clone())
            .handle(&document("a.txt", None), &channel)
            .await
            .unwrap();

        assert_eq!(channel.only_text(), CAPTION_REQUIRED);
        assert!(channel.downloads().is_empty());
        assert!(translator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_txt_file_is_translated() {
        let translator = FakeTranslator::answering("Bonjour");
        let channel = FakeChannel::with_file(b"Hello");

        dispatcher(translator.clone())
            .handle(&document("hello.txt", Some("fr")), &channel)
            .await
            .unwrap();

        assert_eq!(translator.requests(), vec![TranslationRequest::new("Hello", "fr")]);
        assert_eq!(channel.only_text(), "🌐 Translation (fr):\nBonjour");

        let downloads = channel.downloads();
        assert_eq!(downloads.len(), 1);
        assert!(!downloads[0].exists());
    }

    #[tokio::test]
    async fn test_long_translation_sent_as_document() {
        let long = "t".repeat(4000);
        let translator = FakeTranslator::answering(&long);
        let channel = FakeChannel::with_file(b"Hello");

        dispatcher(translator)
            .handle(&document("hello.txt", Some("fr")), &channel)
            .await
            .unwrap();

        match channel.sent().as_slice() {
            [Sent::Document {
                file_name,
                contents,
                path,
            }] => {
                assert_eq!(file_name, "translated_fr.txt");
                assert_eq!(contents, &long);
                assert!(!path.exists());
            }
            other => panic!("unexpected replies: {:?}", other),
        }
        assert!(!channel.downloads()[0].exists());
    }

    #[tokio::test]
    async fn test_document_text_truncated_before_translation() {
        let translator = FakeTranslator::answering("ok");
        let body = "é".repeat(4500);
        let channel = FakeChannel::with_file(body.as_bytes());

        dispatcher(translator.clone())
            .handle(&document("long.txt", Some("de")), &channel)
            .await
            .unwrap();

        let requests = translator.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].text.chars().count(), 4000);
    }

    #[tokio::test]
    async fn test_unsupported_file_type_rejected_without_download() {
        let translator = FakeTranslator::answering("unused");
        let channel = FakeChannel::with_file(b"\x89PNG");

        dispatcher(translator.clone())
            .handle(&document("photo.png", Some("fr")), &channel)
            .await
            .unwrap();

        assert_eq!(channel.only_text(), UNSUPPORTED_FILE);
        assert!(channel.downloads().is_empty());
        assert!(translator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_file_reports_no_text_and_cleans_up() {
        let translator = FakeTranslator::answering("unused");
        let channel = FakeChannel::with_file(b"  \n ");

        dispatcher(translator.clone())
            .handle(&document("blank.txt", Some("fr")), &channel)
            .await
            .unwrap();

        assert_eq!(channel.only_text(), NO_TEXT_IN_FILE);
        assert!(translator.requests().is_empty());
        assert!(!channel.downloads()[0].exists());
    }

    #[tokio::test]
    async fn test_corrupt_document_reported() {
        let channel = FakeChannel::with_file(b"definitely not a pdf");

        dispatcher(FakeTranslator::answering("unused"))
            .handle(&document("paper.pdf", Some("fr")), &channel)
            .await
            .unwrap();

        assert!(channel.only_text().starts_with("⚠️ Could not read the file:"));
        assert!(!channel.downloads()[0].exists());
    }

    #[tokio::test]
    async fn test_download_failure_reported_and_cleaned_up() {
        let channel = FakeChannel::default();

        dispatcher(FakeTranslator::answering("unused"))
            .handle(&document("hello.txt", Some("fr")), &channel)
            .await
            .unwrap();

        assert_eq!(channel.only_text(), DOWNLOAD_FAILED);
        assert!(!channel.downloads()[0].exists());
    }

    #[tokio::test]
    async fn test_oversized_file_rejected() {
        let channel = FakeChannel::with_file(b"Hello");
        let mut msg = document("big.txt", Some("fr"));
        if let Some(doc) = msg.document.as_mut() {
            doc.size = 21 * 1024 * 1024;
        }

        dispatcher(FakeTranslator::answering("unused"))
            .handle(&msg, &channel)
            .await
            .unwrap();

        assert_eq!(channel.only_text(), "⚠️ File is too large. The limit is 20 MB.");
        assert!(channel.downloads().is_empty());
    }
}
