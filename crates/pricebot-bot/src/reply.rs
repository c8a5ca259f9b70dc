//! Transport-neutral replies.

use crate::action::Action;

/// One inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Rows of inline buttons.
pub type Keyboard = Vec<Vec<Button>>;

/// What the bot sends back for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text, optionally with buttons
    Text {
        text: String,
        keyboard: Option<Keyboard>,
    },
    /// An encoded image with a caption
    Photo {
        image: Vec<u8>,
        caption: String,
        keyboard: Option<Keyboard>,
    },
    /// A user-visible warning that data is unavailable
    Notice(String),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Reply::Notice(text.into())
    }

    pub fn is_notice(&self) -> bool {
        matches!(self, Reply::Notice(_))
    }

    pub fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            Reply::Text { keyboard, .. } | Reply::Photo { keyboard, .. } => keyboard.as_ref(),
            Reply::Notice(_) => None,
        }
    }
}
