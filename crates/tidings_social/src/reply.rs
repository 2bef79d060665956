//! Platform-neutral command replies.

use std::fmt;

/// What a command answers with. Front ends decide how each variant is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A plain text message.
    Text(String),
    /// An image attachment with an optional caption.
    Image {
        /// Attachment file name, including extension
        filename: String,
        /// Image bytes
        bytes: Vec<u8>,
        /// Text sent along with the image
        caption: Option<String>,
    },
    /// A two-part joke. The punchline waits until the asker answers.
    Joke {
        /// Sent immediately
        setup: String,
        /// Sent after the asker's next message
        punchline: String,
    },
}

impl Reply {
    /// A plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The text of a `Text` reply.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Terminal rendering: jokes print both halves, images print their caption
/// and size.
impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Image {
                filename,
                bytes,
                caption,
            } => {
                if let Some(caption) = caption {
                    writeln!(f, "{}", caption)?;
                }
                write!(f, "[image {} ({} bytes)]", filename, bytes.len())
            }
            Self::Joke { setup, punchline } => write!(f, "{}\n{}", setup, punchline),
        }
    }
}
