mod api;
mod config;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use api::AppState;
use config::Settings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let (host, port) = (settings.host.clone(), settings.port);

    info!(
        "⛓️ Starting UTXO ledger API at http://{host}:{port} (faucet: {}, max epoch txs: {})",
        settings.faucet_enabled, settings.max_epoch_txs
    );

    let state = web::Data::new(AppState::new(settings));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
