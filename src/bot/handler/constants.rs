/* Fixed user-facing replies.
 * Failure replies never carry upstream or internal detail.
 */

pub const WEATHER_FETCH_FAILED: &str = "Failed to get weather data.";
pub const WEATHER_PARSE_FAILED: &str = "Failed to parse weather data.";
pub const WEATHER_USAGE: &str = "Please tell me where, e.g. !weather Paris";

pub const MEME_FETCH_FAILED: &str = "Failed to get a meme.";
pub const MEME_PARSE_FAILED: &str = "Failed to parse meme data.";

pub const GIF_FETCH_FAILED: &str = "Failed to get GIF data.";
pub const GIF_PARSE_FAILED: &str = "Failed to parse GIF data.";
pub const GIF_NOT_FOUND: &str = "No GIFs found for that keyword.";
pub const GIF_USAGE: &str = "Please give me a keyword, e.g. !gif cats";
