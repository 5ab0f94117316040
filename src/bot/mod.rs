// bot/mod.rs

// Exported functions
pub use self::dispatcher::{is_self_authored, route, run_dispatcher};
pub use self::handler::respond;
pub use self::processor::{get_meme, get_weather, search_gif};

// Exported structs and types
pub use self::api::{ApiClient, ApiError};
pub use self::config::{Config, ConfigError, UpstreamConfig};
pub use self::dispatcher::{BotError, Command, HandlerResult, IncomingMessage};
pub use self::processor::{Gif, Meme, ProcessError, WeatherReport};

// Declare submodules
mod api;
mod config;
mod dispatcher;
mod handler;
mod processor;
