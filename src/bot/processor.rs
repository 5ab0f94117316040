use super::api::{ApiClient, ApiError, GifSearchResponse, MemeResponse, WeatherResponse};

/* Processor is the overall logic center of the bot.
 * It executes the commands, communicating with the front-facing handler
 * and the back-facing API client.
 * Each operation turns user input into exactly one upstream request,
 * and the decoded response into a small reply entity.
 */

const GIF_RESULT_LIMIT: &str = "25";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProcessError {
    #[error("Fetch failure: {0}")]
    FetchFailure(String),
    #[error("Parse failure: {0}")]
    ParseFailure(String),
    #[error("No results found for '{0}'")]
    NotFoundFailure(String),
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
}

// Implement the From trait to convert from ApiError to ProcessError
impl From<ApiError> for ProcessError {
    fn from(api_error: ApiError) -> ProcessError {
        match api_error {
            ApiError::FetchError(_) | ApiError::StatusError(_) => {
                ProcessError::FetchFailure(api_error.to_string())
            }
            ApiError::ParseError(_) => ProcessError::ParseFailure(api_error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub location: String,
    pub description: String,
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meme {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gif {
    pub url: String,
}

/* Retrieves the current weather for a location, in metric units.
 * Only the first weather condition is reported.
 */
pub async fn get_weather(api: &ApiClient, location: &str) -> Result<WeatherReport, ProcessError> {
    let location = location.trim();
    if location.is_empty() {
        return Err(ProcessError::InvalidInput("location is empty"));
    }

    let upstream = api.upstream();
    let response: WeatherResponse = api
        .fetch_json(
            &upstream.weather_url,
            &[
                ("q", location),
                ("units", "metric"),
                ("appid", upstream.weather_api_key.as_str()),
            ],
        )
        .await?;

    let condition = match response.weather.first() {
        Some(condition) => condition,
        None => {
            return Err(ProcessError::ParseFailure(
                "weather list is empty".to_string(),
            ))
        }
    };

    Ok(WeatherReport {
        location: location.to_string(),
        description: condition.description.clone(),
        temperature: response.main.temp,
    })
}

// Retrieves a single random meme.
pub async fn get_meme(api: &ApiClient) -> Result<Meme, ProcessError> {
    let response: MemeResponse = api.fetch_json(&api.upstream().meme_url, &[]).await?;

    if response.url.trim().is_empty() {
        return Err(ProcessError::ParseFailure("meme url is empty".to_string()));
    }

    Ok(Meme { url: response.url })
}

/* Searches for GIFs matching a keyword.
 * Returns the first result as given by the upstream, no ranking of our own.
 */
pub async fn search_gif(api: &ApiClient, keyword: &str) -> Result<Gif, ProcessError> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(ProcessError::InvalidInput("keyword is empty"));
    }

    let upstream = api.upstream();
    let response: GifSearchResponse = api
        .fetch_json(
            &upstream.gif_url,
            &[
                ("q", keyword),
                ("api_key", upstream.gif_api_key.as_str()),
                ("limit", GIF_RESULT_LIMIT),
            ],
        )
        .await?;

    let gif = match response.data.into_iter().next() {
        Some(gif) => gif,
        None => return Err(ProcessError::NotFoundFailure(keyword.to_string())),
    };

    if gif.url.trim().is_empty() {
        return Err(ProcessError::ParseFailure("gif url is empty".to_string()));
    }

    Ok(Gif { url: gif.url })
}
