use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

use super::config::UpstreamConfig;

/* API contains the logic for calling external APIs.
 * Links the bot's logic with anything it needs from the internet.
 * Called and used by the Processor only.
 */

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    FetchError(String),
    #[error("Upstream responded with status {0}")]
    StatusError(StatusCode),
    #[error("Unexpected response body: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(request_error: reqwest::Error) -> ApiError {
        // The URL carries API keys in its query string.
        ApiError::FetchError(request_error.without_url().to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(json_error: serde_json::Error) -> ApiError {
        ApiError::ParseError(json_error.to_string())
    }
}

/* Response shapes */

// OpenWeatherMap current weather.
#[derive(Deserialize, Debug, PartialEq)]
pub struct WeatherResponse {
    pub weather: Vec<WeatherCondition>,
    pub main: WeatherMain,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct WeatherCondition {
    pub description: String,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct WeatherMain {
    pub temp: f64,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct MemeResponse {
    pub url: String,
}

// Giphy search.
#[derive(Deserialize, Debug, PartialEq)]
pub struct GifSearchResponse {
    pub data: Vec<GifObject>,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct GifObject {
    pub url: String,
}

/* Client shared by all command handlers.
 * Holds the upstream endpoints and keys next to a pooled HTTP client,
 * every request is bounded by the configured timeout.
 */
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    upstream: UpstreamConfig,
}

impl ApiClient {
    pub fn new(upstream: UpstreamConfig, timeout: Duration) -> Result<ApiClient, reqwest::Error> {
        let mut h = header::HeaderMap::new();
        h.insert(
            "Accept",
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .default_headers(h)
            .timeout(timeout)
            .build()?;

        Ok(ApiClient { http, upstream })
    }

    pub fn upstream(&self) -> &UpstreamConfig {
        &self.upstream
    }

    // Issues a GET request and decodes a successful JSON body into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::StatusError(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

// Client pointed at a local mock server, for tests across the bot module.
#[cfg(test)]
pub(crate) fn client_for(server_url: &str) -> ApiClient {
    client_with_timeout(server_url, Duration::from_secs(5))
}

#[cfg(test)]
pub(crate) fn client_with_timeout(server_url: &str, timeout: Duration) -> ApiClient {
    let upstream = UpstreamConfig {
        weather_url: format!("{server_url}/data/2.5/weather"),
        weather_api_key: "weather-key".to_string(),
        meme_url: format!("{server_url}/gimme"),
        gif_url: format!("{server_url}/v1/gifs/search"),
        gif_api_key: "gif-key".to_string(),
    };
    ApiClient::new(upstream, timeout).unwrap()
}

// Accepts connections and never answers. Abort the handle when done.
#[cfg(test)]
pub(crate) async fn stalled_upstream() -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    (format!("http://{addr}"), handle)
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    #[tokio::test]
    async fn test_fetch_json_decodes_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/gimme")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"postLink":"https://redd.it/x","url":"https://x/y.png","nsfw":false}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let meme: MemeResponse = client
            .fetch_json(&client.upstream().meme_url, &[])
            .await
            .unwrap();

        assert_eq!(meme.url, "https://x/y.png");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_json_encodes_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/gifs/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "happy cats & dogs".into()),
                Matcher::UrlEncoded("limit".into(), "25".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"data":[]}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let result: GifSearchResponse = client
            .fetch_json(
                &client.upstream().gif_url,
                &[("q", "happy cats & dogs"), ("limit", "25")],
            )
            .await
            .unwrap();

        assert!(result.data.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"cod":401,"message":"Invalid API key"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let result = client
            .fetch_json::<WeatherResponse>(&client.upstream().weather_url, &[("q", "Paris")])
            .await;

        assert_eq!(result, Err(ApiError::StatusError(StatusCode::UNAUTHORIZED)));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"main":{"temp":"warm"}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let result = client
            .fetch_json::<WeatherResponse>(&client.upstream().weather_url, &[("q", "Paris")])
            .await;

        assert!(matches!(result, Err(ApiError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_stalled_upstream_times_out() {
        let (url, server) = stalled_upstream().await;
        let client = client_with_timeout(&url, Duration::from_millis(200));

        let started = std::time::Instant::now();
        let result = client
            .fetch_json::<WeatherResponse>(&client.upstream().weather_url, &[("q", "Paris")])
            .await;
        server.abort();

        assert!(matches!(result, Err(ApiError::FetchError(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_unreachable_upstream() {
        // Nothing listens on port 1.
        let client = client_for("http://127.0.0.1:1");
        let result = client
            .fetch_json::<MemeResponse>(&client.upstream().meme_url, &[])
            .await;

        assert!(matches!(result, Err(ApiError::FetchError(_))));
    }
}
