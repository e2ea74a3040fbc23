use actix_web::{HttpResponse, Responder, post, web};
use log::warn;

use super::models::{NewWalletResponse, SignRequest};
use utxo_ledger::Keypair;
use utxo_ledger::wallet::sign_transaction;

#[post("/wallet/new/")]
pub async fn create_wallet() -> impl Responder {
    let keypair = Keypair::generate();
    HttpResponse::Ok().json(NewWalletResponse {
        private_key: keypair.secret_hex(),
        public_key: keypair.public_hex(),
        address: keypair.address().to_string(),
    })
}

/// DEV signing helper: signs input `i` with `private_keys[i]` and returns the transaction.
#[post("/wallet/sign/")]
pub async fn sign_tx(body: web::Json<SignRequest>) -> impl Responder {
    let SignRequest { private_keys, tx } = body.into_inner();

    let keys = match private_keys
        .iter()
        .map(|k| Keypair::from_secret_hex(k))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(keys) => keys,
        Err(e) => {
            warn!("POST /wallet/sign/ - rejected: {}", e);
            return HttpResponse::BadRequest().body(e.to_string());
        }
    };
    let signers: Vec<&Keypair> = keys.iter().collect();

    match sign_transaction(&tx.into_transaction(), &signers) {
        Ok(signed) => HttpResponse::Ok().json(signed),
        Err(e) => {
            warn!("POST /wallet/sign/ - rejected: {}", e);
            HttpResponse::BadRequest().body(e.to_string())
        }
    }
}
