//! Typed inline-button actions and their callback-data encoding.

use pricebot_core::types::LookbackLabel;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Telegram rejects callback data longer than this many bytes.
pub const MAX_TOKEN_LEN: usize = 64;

/// What pressing an inline button asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Live price of an exchange symbol
    Price { symbol: String },
    /// A cached lookback point of a charted symbol
    Lookback { symbol: String, label: LookbackLabel },
    /// Detail of one fiat rate
    Fiat { key: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("callback data is {0} bytes, limit is {max}", max = MAX_TOKEN_LEN)]
    TooLong(usize),

    #[error("unknown action kind in {0:?}")]
    UnknownKind(String),

    #[error("malformed action {0:?}")]
    Malformed(String),
}

impl Action {
    /// Encode as callback data: `p:SYM`, `l:SYM:label` or `f:key`.
    pub fn encode(&self) -> String {
        match self {
            Action::Price { symbol } => format!("p:{}", symbol),
            Action::Lookback { symbol, label } => format!("l:{}:{}", symbol, label.token()),
            Action::Fiat { key } => format!("f:{}", key),
        }
    }

    /// Parse callback data produced by [`encode`](Self::encode).
    pub fn decode(token: &str) -> Result<Self, ActionError> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(ActionError::TooLong(token.len()));
        }
        let malformed = || ActionError::Malformed(token.to_string());

        let (kind, rest) = token.split_once(':').ok_or_else(malformed)?;
        match kind {
            "p" => {
                let symbol = valid_ident(rest).ok_or_else(malformed)?;
                Ok(Action::Price { symbol })
            }
            "l" => {
                let (symbol, label) = rest.split_once(':').ok_or_else(malformed)?;
                let symbol = valid_ident(symbol).ok_or_else(malformed)?;
                let label = LookbackLabel::from_token(label).ok_or_else(malformed)?;
                Ok(Action::Lookback { symbol, label })
            }
            "f" => {
                let key = valid_ident(rest).ok_or_else(malformed)?;
                Ok(Action::Fiat { key })
            }
            _ => Err(ActionError::UnknownKind(token.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::decode(s)
    }
}

/// Symbols and fiat keys are plain identifiers.
fn valid_ident(raw: &str) -> Option<String> {
    let ok = !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    ok.then(|| raw.to_string())
}
