mod balance;
mod health;
pub mod models;
mod stats;
mod tx;
mod wallet;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(tx::post_faucet)
            .service(tx::post_epoch)
            .service(tx::get_epochs)
            .service(balance::get_balance)
            .service(balance::get_utxos)
            .service(stats::get_stats)
            .service(wallet::create_wallet)
            .service(wallet::sign_tx),
    );
}
