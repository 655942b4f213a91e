//! HTTP front ends of the two services.
//!
//! - [`players`]: Service A, rally commands, liveness, match reads
//! - [`table`]: Service B, serve and forward
//! - [`Server`]: Binds either or both with logging and CORS
pub mod players;
mod server;
pub mod table;

pub use server::*;

use crate::dto::Status;
use crate::store::StoreError;
use actix_web::HttpResponse;

/// Maps a store failure onto the response a client should see.
fn store_failure(e: StoreError) -> HttpResponse {
    match e {
        _ if e.is_missing() => HttpResponse::NotFound().json(Status::error(e)),
        StoreError::Unavailable(_) => HttpResponse::ServiceUnavailable().json(Status::error(e)),
        _ => {
            log::error!("[hosting] {}", e);
            HttpResponse::InternalServerError().json(Status::error(e))
        }
    }
}

fn mailbox_failure(e: anyhow::Error) -> HttpResponse {
    log::error!("[hosting] {}", e);
    HttpResponse::InternalServerError().json(Status::error(e))
}
