use actix_web::{HttpResponse, Responder, get, web};
use log::warn;

use super::models::{AppState, BalanceResponse, UtxoEntry, UtxosResponse};
use utxo_ledger::wallet::pubkey_to_address;

/// Balance of an address, given as any hex encoding of its public key.
#[get("/balance/{address}/")]
pub async fn get_balance(state: web::Data<AppState>, path: web::Path<(String,)>) -> impl Responder {
    let raw = path.into_inner().0;
    // Same normalization the faucet applies, so lookups match stored owners.
    let address = match pubkey_to_address(&raw) {
        Ok(address) => address,
        Err(e) => {
            warn!("GET /balance/ - rejected {}: {}", raw, e);
            return HttpResponse::BadRequest().body(e.to_string());
        }
    };

    let (balance, utxos) = {
        let pool = state.utxo_pool.lock().expect("mutex poisoned");
        pool.balance_of(&address)
    };

    HttpResponse::Ok().json(BalanceResponse {
        address: address.to_string(),
        balance,
        utxos,
    })
}

/// Dump the whole pool, sorted by outpoint.
#[get("/utxos/")]
pub async fn get_utxos(state: web::Data<AppState>) -> impl Responder {
    let pool = state.utxo_pool.lock().expect("mutex poisoned");
    let utxos = pool
        .all_outputs()
        .into_iter()
        .map(|(outpoint, output)| UtxoEntry { outpoint, output })
        .collect();

    HttpResponse::Ok().json(UtxosResponse {
        size: pool.len(),
        total_value: pool.total_value(),
        utxos,
    })
}
