use crate::bot::{
    api::ApiClient,
    processor::{get_meme, ProcessError},
};

use super::constants::{MEME_FETCH_FAILED, MEME_PARSE_FAILED};

/* Meme command.
 * Replies with the bare image URL, the chat client renders the preview.
 */
pub async fn meme_reply(api: &ApiClient) -> String {
    match get_meme(api).await {
        Ok(meme) => meme.url,
        Err(err) => {
            log::error!("Meme - Failed to retrieve a meme: {}", err);
            match err {
                ProcessError::ParseFailure(_) => MEME_PARSE_FAILED.to_string(),
                _ => MEME_FETCH_FAILED.to_string(),
            }
        }
    }
}
