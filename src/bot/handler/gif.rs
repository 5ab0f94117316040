use crate::bot::{
    api::ApiClient,
    processor::{search_gif, ProcessError},
};

use super::constants::{GIF_FETCH_FAILED, GIF_NOT_FOUND, GIF_PARSE_FAILED, GIF_USAGE};

/* GIF command.
 * Replies with the URL of the first search result for the keyword.
 */
pub async fn gif_reply(api: &ApiClient, keyword: &str) -> String {
    match search_gif(api, keyword).await {
        Ok(gif) => gif.url,
        Err(err) => {
            match err {
                ProcessError::NotFoundFailure(_) | ProcessError::InvalidInput(_) => {
                    log::warn!("GIF - No result for keyword '{}': {}", keyword.trim(), err)
                }
                _ => log::error!("GIF - Failed for keyword '{}': {}", keyword.trim(), err),
            }
            failure_message(&err).to_string()
        }
    }
}

fn failure_message(err: &ProcessError) -> &'static str {
    match err {
        ProcessError::FetchFailure(_) => GIF_FETCH_FAILED,
        ProcessError::ParseFailure(_) => GIF_PARSE_FAILED,
        ProcessError::NotFoundFailure(_) => GIF_NOT_FOUND,
        ProcessError::InvalidInput(_) => GIF_USAGE,
    }
}
