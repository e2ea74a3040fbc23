use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatsResponse};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    // Short, separate locks
    let (utxo_size, total_value) = {
        let pool = state.utxo_pool.lock().expect("mutex poisoned");
        (pool.len(), pool.total_value())
    };
    let (epochs, accepted_txs, rejected_txs) = {
        let epochs = state.epochs.lock().expect("mutex poisoned");
        epochs.iter().fold((0, 0, 0), |(n, acc, rej), e| {
            (n + 1, acc + e.accepted.len(), rej + e.rejected.len())
        })
    };

    HttpResponse::Ok().json(StatsResponse {
        utxo_size,
        total_value,
        epochs,
        accepted_txs,
        rejected_txs,
        max_epoch_txs: state.settings.max_epoch_txs,
        faucet_enabled: state.settings.faucet_enabled,
    })
}
