use crate::bot::{api::ApiClient, dispatcher::Command};

// Exported functions
pub use self::general::help_reply;
pub use self::gif::gif_reply;
pub use self::meme::meme_reply;
pub use self::weather::weather_reply;

// Submodules
mod constants;
mod general;
mod gif;
mod meme;
mod weather;

/* Turns a recognized command into the text sent back to the chat.
 * Never fails: upstream errors are logged and replaced by a fixed message.
 */
pub async fn respond(command: Command, api: &ApiClient) -> String {
    match command {
        Command::Help => help_reply(),
        Command::Weather(location) => weather_reply(api, &location).await,
        Command::Meme(_) => meme_reply(api).await,
        Command::Gif(keyword) => gif_reply(api, &keyword).await,
    }
}
