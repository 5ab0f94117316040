use chatcommands::bot::{run_dispatcher, Config};

#[tokio::main]
pub async fn main() {
    dotenv::dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting chat command bot...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Unable to load configuration: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run_dispatcher(config).await {
        log::error!("Bot stopped with an error: {err}");
        std::process::exit(1);
    }

    log::info!("Bot stopped.");
}
