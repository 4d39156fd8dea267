pub mod telegram;

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    /// One-to-one conversation with the bot
    Private,
    /// Groups, supergroups and channels
    Group,
}

/// A file attached to a message, not yet downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Platform-specific file identifier used for downloading
    pub file_id: String,
    pub file_name: Option<String>,
    /// Size in bytes as reported by the platform
    pub size: u64,
}

/// The message another message replies to
#[derive(Debug, Clone, Default)]
pub struct RepliedMessage {
    pub text: Option<String>,
}

/// A message received from the chat platform, reduced to what translation needs
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub chat_kind: ChatKind,
    /// Platform-specific sender ID, absent for anonymous channel posts
    pub sender_id: Option<u64>,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub reply_to: Option<RepliedMessage>,
    pub document: Option<DocumentRef>,
}

/// Outbound side of a single conversation.
///
/// Every handler invocation gets its own channel bound to the originating
/// chat, so implementations hold no state shared across messages.
#[async_trait]
pub trait ChatChannel: Send + Sync {
    /// Send plain text as a reply
    async fn send_text(&self, text: &str) -> Result<()>;

    /// Send HTML-formatted text as a reply
    async fn send_html(&self, html: &str) -> Result<()>;

    /// Upload a local file as a document named `file_name`
    async fn send_document(&self, path: &Path, file_name: &str) -> Result<()>;

    async fn send_typing(&self) -> Result<()>;

    /// Download an attached document into `dest`
    async fn download(&self, document: &DocumentRef, dest: &Path) -> Result<()>;
}
