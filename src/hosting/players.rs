use super::*;
use crate::MatchId;
use crate::coordinator::Handle;
use crate::dispatch::Dispatcher;
use crate::dto::*;
use crate::rally::Player;
use actix_web::Responder;
use actix_web::web;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/match", web::post().to(start_match))
        .route("/match", web::get().to(last_match))
        .route("/match/{id}", web::get().to(match_by_id))
        .route("/ping/a", web::post().to(ping_a))
        .route("/ping/b", web::post().to(ping_b))
        .route("/active", web::get().to(active))
        .route("/current", web::get().to(current))
        .route("/store", web::get().to(test_store))
        .route("/flush", web::post().to(flush))
        .route("/dead-letters", web::get().to(dead_letters))
        .route("/dead-letters", web::delete().to(drain_dead_letters));
}

async fn start_match(handle: web::Data<Handle>) -> impl Responder {
    match handle.start_match().await {
        Ok(ack) => HttpResponse::Ok().json(Acknowledged::from(&ack)),
        Err(e) => mailbox_failure(e),
    }
}

async fn ping_a(handle: web::Data<Handle>, body: web::Json<PingBall>) -> impl Responder {
    ping(handle, Player::A, body.into_inner()).await
}

async fn ping_b(handle: web::Data<Handle>, body: web::Json<PingBall>) -> impl Responder {
    ping(handle, Player::B, body.into_inner()).await
}

async fn ping(handle: web::Data<Handle>, to: Player, body: PingBall) -> HttpResponse {
    match handle.return_from(body.into_ping(to)).await {
        Ok(ack) => HttpResponse::Ok().json(Acknowledged::from(&ack)),
        Err(e) => mailbox_failure(e),
    }
}

async fn active(handle: web::Data<Handle>) -> impl Responder {
    match handle.is_game_active().await {
        Ok(active) => HttpResponse::Ok().json(Active { active }),
        Err(e) => mailbox_failure(e),
    }
}

async fn current(handle: web::Data<Handle>) -> impl Responder {
    match handle.current().await {
        Ok(Some(game)) => HttpResponse::Ok().json(game),
        Ok(None) => HttpResponse::NotFound().json(Status::error("no match in play")),
        Err(e) => mailbox_failure(e),
    }
}

async fn flush(handle: web::Data<Handle>) -> impl Responder {
    match handle.flush().await {
        Ok(pending) => HttpResponse::Ok().json(Pending { pending }),
        Err(e) => mailbox_failure(e),
    }
}

async fn dead_letters(dispatch: web::Data<Dispatcher>) -> impl Responder {
    HttpResponse::Ok().json(dispatch.dead_letters())
}

async fn drain_dead_letters(dispatch: web::Data<Dispatcher>) -> impl Responder {
    HttpResponse::Ok().json(dispatch.drain_dead_letters())
}

async fn last_match(handle: web::Data<Handle>) -> impl Responder {
    match handle.get_match().await {
        Ok(game) => HttpResponse::Ok().json(game),
        Err(e) => store_failure(e),
    }
}

async fn match_by_id(handle: web::Data<Handle>, path: web::Path<MatchId>) -> impl Responder {
    match handle.get_match_by_id(path.into_inner()).await {
        Ok(game) => HttpResponse::Ok().json(game),
        Err(e) => store_failure(e),
    }
}

async fn test_store(handle: web::Data<Handle>) -> impl Responder {
    match handle.test_store_connection().await {
        Ok(()) => HttpResponse::Ok().json(Status::ok("connected")),
        Err(e) => store_failure(e),
    }
}
