use anyhow::{Context, Result};
use tracing::debug;

use crate::platform::ChatChannel;

/// How a translation is delivered back to the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedReply {
    /// Inline message with the language header
    Inline(String),
    /// Text document carrying the raw translation
    Document { file_name: String, contents: String },
}

pub fn inline_text(target: &str, translated: &str) -> String {
    format!("🌐 Translation ({}):\n{}", target, translated)
}

/// Choose inline text or a document depending on the translation's length
/// in characters.
pub fn render(target: &str, translated: String, inline_max_chars: usize) -> RenderedReply {
    if translated.chars().count() > inline_max_chars {
        RenderedReply::Document {
            file_name: format!("translated_{}.txt", target),
            contents: translated,
        }
    } else {
        RenderedReply::Inline(inline_text(target, &translated))
    }
}

/// Send a rendered reply. Documents are staged in a temporary file that is
/// removed once the upload attempt finishes, whether it succeeded or not.
pub async fn deliver(channel: &dyn ChatChannel, reply: RenderedReply) -> Result<()> {
    match reply {
        RenderedReply::Inline(text) => channel.send_text(&text).await,
        RenderedReply::Document {
            file_name,
            contents,
        } => {
            let staged = tempfile::Builder::new()
                .prefix("translated_")
                .suffix(".txt")
                .tempfile()
                .context("Failed to create output file")?;
            tokio::fs::write(staged.path(), contents.as_bytes())
                .await
                .context("Failed to write output file")?;

            debug!(
                "Sending {} ({} bytes) as document",
                file_name,
                contents.len()
            );
            let result = channel.send_document(staged.path(), &file_name).await;
            drop(staged);
            result
        }
    }
}
