//! Telegram transport: command parsing, callback decoding and reply delivery.

use pricebot_core::error::BotError;
use std::sync::Arc;
use teloxide::dispatching::{Dispatcher, HandlerExt, UpdateFilterExt};
use teloxide::dptree;
use teloxide::prelude::{Requester, ResponseResult};
use teloxide::payloads::{SendMessageSetters, SendPhotoSetters};
use teloxide::types::{
    CallbackQuery, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, Message, Update,
};
use teloxide::utils::command::{BotCommands, ParseError};
use teloxide::Bot;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::reply::{Keyboard, Reply};
use crate::service::PriceBot;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show this help")]
    Start,
    #[command(description = "show this help")]
    Help,
    #[command(description = "top coins by volume")]
    Prices,
    #[command(
        description = "chart of a random top coin, or /chart SYMBOL",
        parse_with = optional_symbol
    )]
    Chart(String),
    #[command(description = "other currencies")]
    Other,
}

/// `/chart` takes an optional argument; an empty one picks a random symbol.
fn optional_symbol(input: String) -> Result<(String,), ParseError> {
    Ok((input.trim().to_string(),))
}

/// Run the long-polling dispatcher until interrupted.
pub async fn run(bot: Bot, service: Arc<PriceBot>) -> Result<(), BotError> {
    bot.set_my_commands(Command::bot_commands())
        .await
        .map_err(|e| BotError::Transport(e.to_string()))?;

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(on_command),
        )
        .branch(Update::filter_callback_query().endpoint(on_callback));

    info!("Telegram dispatcher started");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![service])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    info!("Telegram dispatcher stopped");

    Ok(())
}

async fn on_command(bot: Bot, msg: Message, cmd: Command, service: Arc<PriceBot>) -> ResponseResult<()> {
    debug!("Command {:?} from chat {}", cmd, msg.chat.id);

    let reply = match cmd {
        Command::Start | Command::Help => service.help(),
        Command::Prices => service.top_prices().await,
        Command::Chart(symbol) => service.chart(Some(symbol.as_str())).await,
        Command::Other => service.fiat_rates().await,
    };

    send_reply(&bot, msg.chat.id, reply).await
}

async fn on_callback(bot: Bot, q: CallbackQuery, service: Arc<PriceBot>) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };
    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };

    let reply = match Action::decode(data) {
        Ok(action) => {
            debug!("Action {} from chat {}", action, chat_id);
            service.handle_action(&action).await
        }
        Err(e) => {
            warn!("Ignoring callback data {:?}: {}", data, e);
            Reply::notice("Unknown button")
        }
    };

    send_reply(&bot, chat_id, reply).await
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> ResponseResult<()> {
    match reply {
        Reply::Text { text, keyboard } => {
            let request = bot.send_message(chat_id, text);
            match keyboard {
                Some(keyboard) => request.reply_markup(markup(keyboard)).await?,
                None => request.await?,
            };
        }
        Reply::Photo {
            image,
            caption,
            keyboard,
        } => {
            let photo = InputFile::memory(image).file_name("chart.png");
            let request = bot.send_photo(chat_id, photo).caption(caption);
            match keyboard {
                Some(keyboard) => request.reply_markup(markup(keyboard)).await?,
                None => request.await?,
            };
        }
        Reply::Notice(text) => {
            bot.send_message(chat_id, format!("⚠️ {}", text)).await?;
        }
    }
    Ok(())
}

fn markup(keyboard: Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.into_iter().map(|row| {
        row.into_iter()
            .map(|button| InlineKeyboardButton::callback(button.label, button.action.encode()))
            .collect::<Vec<_>>()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::Button;
    use pricebot_core::types::LookbackLabel;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/prices", "pricebot").unwrap(), Command::Prices);
        assert_eq!(
            Command::parse("/chart BTC", "pricebot").unwrap(),
            Command::Chart("BTC".into())
        );
        assert_eq!(
            Command::parse("/chart", "pricebot").unwrap(),
            Command::Chart(String::new())
        );
        assert!(Command::parse("/nope", "pricebot").is_err());
    }

    #[test]
    fn test_markup_carries_encoded_actions() {
        let keyboard = vec![vec![Button::new(
            "Yesterday",
            Action::Lookback {
                symbol: "BTCUSDT".into(),
                label: LookbackLabel::Yesterday,
            },
        )]];

        let markup = markup(keyboard);

        assert_eq!(markup.inline_keyboard.len(), 1);
        assert_eq!(markup.inline_keyboard[0][0].text, "Yesterday");
    }
}
