use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{ChatId, Me, UserId},
    utils::command::BotCommands,
    RequestError,
};

use super::{
    api::ApiClient,
    config::{Config, ConfigError},
    handler::respond,
};

/* Dispatcher is the entry point for every inbound message.
 * It ignores the bot's own messages, parses the text into a Command,
 * and hands recognized commands to the handler. Anything else is dropped silently.
 */

/* Types */
pub type HandlerResult = Result<(), BotError>;

#[derive(thiserror::Error, Debug)]
pub enum BotError {
    #[error("Connect error: {0}")]
    ConnectError(RequestError),
    #[error("Config error: {0}")]
    ConfigError(ConfigError),
    #[error("HTTP client error: {0}")]
    HttpClientError(reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(RequestError),
}

impl From<RequestError> for BotError {
    fn from(request_error: RequestError) -> BotError {
        BotError::RequestError(request_error)
    }
}

impl From<ConfigError> for BotError {
    fn from(config_error: ConfigError) -> BotError {
        BotError::ConfigError(config_error)
    }
}

impl From<reqwest::Error> for BotError {
    fn from(http_error: reqwest::Error) -> BotError {
        BotError::HttpClientError(http_error)
    }
}

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(
    rename_rule = "lowercase",
    prefix = "!",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "show this message.")]
    Help,
    #[command(description = "current weather for a location, e.g. !weather Paris")]
    Weather(String),
    // Trailing text is accepted and ignored.
    #[command(description = "a random meme.")]
    Meme(String),
    #[command(description = "first GIF matching a keyword, e.g. !gif cats")]
    Gif(String),
}

// Inbound message, reduced to what routing needs.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    pub author: Option<UserId>,
    pub chat_id: ChatId,
    pub text: String,
}

impl IncomingMessage {
    // None for messages without text (stickers, photos, service messages).
    pub fn from_message(msg: &Message) -> Option<IncomingMessage> {
        let text = msg.text()?;
        Some(IncomingMessage {
            author: msg.from().map(|user| user.id),
            chat_id: msg.chat.id,
            text: text.to_string(),
        })
    }
}

/* Utility functions */
pub fn is_self_authored(author: Option<UserId>, me: UserId) -> bool {
    author == Some(me)
}

// Decides which command, if any, a message triggers.
pub fn route(msg: &IncomingMessage, me: UserId, bot_username: &str) -> Option<Command> {
    if is_self_authored(msg.author, me) {
        return None;
    }

    Command::parse(&normalize_separator(&msg.text), bot_username).ok()
}

// Command parsing splits on a single space; any whitespace run after the
// command word (newline, tab, several spaces) is collapsed to one.
fn normalize_separator(text: &str) -> String {
    match text.find(char::is_whitespace) {
        Some(0) | None => text.to_string(),
        Some(index) => {
            let (command, rest) = text.split_at(index);
            format!("{command} {}", rest.trim_start())
        }
    }
}

/* Main Dispatch function
 * Opens the session first so that a bad token or unreachable platform
 * fails startup instead of the first update.
 */
pub async fn run_dispatcher(config: Config) -> Result<(), BotError> {
    let bot = Bot::new(&config.bot_token);
    let me = bot.get_me().await.map_err(BotError::ConnectError)?;
    log::info!("Connected as @{}", me.username());

    let api = Arc::new(ApiClient::new(config.upstream, config.http_timeout)?);

    let handler = Update::filter_message().endpoint(handle_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![api])
        .default_handler(|upd| async move {
            log::debug!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

/* Endpoint handler functions */
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    me: Me,
    api: Arc<ApiClient>,
) -> HandlerResult {
    let incoming = match IncomingMessage::from_message(&msg) {
        Some(incoming) => incoming,
        None => return Ok(()),
    };

    let command = match route(&incoming, me.user.id, me.username()) {
        Some(command) => command,
        None => return Ok(()),
    };

    log::info!(
        "Chat {} - User {:?} issued {:?}",
        incoming.chat_id.0,
        incoming.author,
        command
    );

    let reply = respond(command, &api).await;
    bot.send_message(incoming.chat_id, reply).await?;

    Ok(())
}
