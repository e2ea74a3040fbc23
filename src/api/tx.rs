use actix_web::{HttpResponse, Responder, get, post, web};
use chrono::Utc;
use log::{debug, info, warn};
use std::time::Instant;
use uuid::Uuid;

use super::models::{
    AppState, EpochRecord, EpochRequest, EpochsResponse, FaucetRequest, FaucetResponse, RejectedTx,
    TxRequest,
};
use utxo_ledger::wallet::pubkey_to_address;
use utxo_ledger::{Transaction, TxHandler, TxOutput};

/// DEV Faucet: create spendable UTXOs directly in the pool.
/// The funding transaction has no inputs and never goes through epoch validation.
#[post("/faucet/")]
pub async fn post_faucet(
    state: web::Data<AppState>,
    body: web::Json<FaucetRequest>,
) -> impl Responder {
    if !state.settings.faucet_enabled {
        return HttpResponse::BadRequest().body("faucet is disabled");
    }
    if body.amount <= 0 {
        return HttpResponse::BadRequest().body("amount must be > 0");
    }
    let address = match pubkey_to_address(&body.address) {
        Ok(address) => address,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    let tx = Transaction::new(vec![], vec![TxOutput::new(address.clone(), body.amount)]);
    let outpoint = tx.outpoint(0);

    {
        let mut pool = state.utxo_pool.lock().expect("mutex poisoned");
        // Same address and amount hash to the same outpoint.
        if pool.contains(&outpoint) {
            warn!("FAUCET - allocation {} already unspent", outpoint);
            return HttpResponse::BadRequest()
                .body("identical allocation is still unspent; spend it or vary the amount");
        }
        pool.add(outpoint, tx.outputs()[0].clone());
        debug!(
            "FAUCET - inserted UTXO {} -> {{ addr: {}, amount: {} }}; pool size now {}",
            outpoint,
            address,
            body.amount,
            pool.len()
        );
    }

    HttpResponse::Ok().json(FaucetResponse {
        txid: *tx.hash(),
        outpoints: vec![outpoint],
    })
}

/// Run one epoch: resolve the submitted batch against the current pool and install the result.
#[post("/epoch/")]
pub async fn post_epoch(
    state: web::Data<AppState>,
    body: web::Json<EpochRequest>,
) -> impl Responder {
    let t0 = Instant::now();
    let EpochRequest { transactions } = body.into_inner();

    if transactions.len() > state.settings.max_epoch_txs {
        warn!(
            "POST /epoch/ - rejected: {} transactions exceeds limit {}",
            transactions.len(),
            state.settings.max_epoch_txs
        );
        return HttpResponse::BadRequest().body(format!(
            "batch holds {} transactions, limit is {}",
            transactions.len(),
            state.settings.max_epoch_txs
        ));
    }

    let batch: Vec<Transaction> = transactions
        .into_iter()
        .map(TxRequest::into_transaction)
        .collect();
    debug!("POST /epoch/ - received {} transactions", batch.len());

    let record = {
        let mut pool = state.utxo_pool.lock().expect("mutex poisoned");
        let mut handler = TxHandler::new(pool.clone());
        let outcome = handler.handle_txs_with_report(batch);
        *pool = handler.into_pool();

        let mut epochs = state.epochs.lock().expect("mutex poisoned");
        let record = EpochRecord {
            epoch_id: Uuid::new_v4().to_string(),
            height: epochs.len() as u64,
            timestamp: Utc::now().timestamp(),
            accepted: outcome.accepted.iter().map(|tx| *tx.hash()).collect(),
            rejected: outcome
                .rejected
                .into_iter()
                .map(|(txid, reason)| RejectedTx {
                    txid,
                    reason: reason.to_string(),
                })
                .collect(),
        };
        epochs.push(record.clone());
        record
    };

    info!(
        "POST /epoch/ - epoch#{} id={} accepted={} rejected={} ({} ms)",
        record.height,
        record.epoch_id,
        record.accepted.len(),
        record.rejected.len(),
        t0.elapsed().as_millis()
    );

    HttpResponse::Ok().json(record)
}

/// List every processed epoch.
#[get("/epochs/")]
pub async fn get_epochs(state: web::Data<AppState>) -> impl Responder {
    let epochs = state.epochs.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(EpochsResponse {
        count: epochs.len(),
        epochs: &epochs,
    })
}
