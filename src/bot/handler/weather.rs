use crate::bot::{
    api::ApiClient,
    processor::{get_weather, ProcessError, WeatherReport},
};

use super::constants::{WEATHER_FETCH_FAILED, WEATHER_PARSE_FAILED, WEATHER_USAGE};

// Temperature is rounded to one decimal place.
pub fn format_weather(report: &WeatherReport) -> String {
    format!(
        "Current weather in {}: {}, temperature: {:.1}°C",
        report.location, report.description, report.temperature
    )
}

/* Weather command.
 * Replies with the current conditions for the given location.
 */
pub async fn weather_reply(api: &ApiClient, location: &str) -> String {
    match get_weather(api, location).await {
        Ok(report) => format_weather(&report),
        Err(err) => {
            log::error!("Weather - Failed for location '{}': {}", location.trim(), err);
            failure_message(&err).to_string()
        }
    }
}

fn failure_message(err: &ProcessError) -> &'static str {
    match err {
        ProcessError::InvalidInput(_) => WEATHER_USAGE,
        ProcessError::ParseFailure(_) => WEATHER_PARSE_FAILED,
        ProcessError::FetchFailure(_) => WEATHER_FETCH_FAILED,
        // Only the GIF search reports an empty result set.
        ProcessError::NotFoundFailure(_) => WEATHER_FETCH_FAILED,
    }
}
