use super::*;
use crate::dto::*;
use crate::rally::Ball;
use crate::table::*;
use actix_web::Responder;
use actix_web::web;
use std::sync::Arc;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/start", web::post().to(start_game))
        .route("/ball", web::post().to(receive_ball));
}

async fn start_game(table: web::Data<Arc<Table>>, body: web::Json<StartGame>) -> impl Responder {
    let serve = table.start_game(body.into_inner().routine_id);
    HttpResponse::Ok().json(serde_json::json!({ "status": "serving", "ball_power": serve.power }))
}

async fn receive_ball(table: web::Data<Arc<Table>>, body: web::Json<ReceiveBall>) -> impl Responder {
    let ball = match Ball::try_from(body.into_inner()) {
        Ok(ball) => ball,
        Err(e) => return HttpResponse::BadRequest().json(Status::error(e)),
    };
    match table.receive_ball(ball).await {
        Relayed::Forwarded(_) => HttpResponse::Ok().json(Status::ok("forwarded")),
        Relayed::Dropped => HttpResponse::Ok().json(Status::ok("dropped")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rally::*;
    use crate::transport::Players;
    use actix_web::App;
    use actix_web::test;

    struct Finished;

    #[async_trait::async_trait]
    impl Players for Finished {
        async fn ping(&self, _: Ping) -> anyhow::Result<()> {
            Ok(())
        }
        async fn is_game_active(&self) -> anyhow::Result<bool> {
            Ok(false)
        }
    }

    #[actix_web::test]
    async fn balls_after_the_match_are_dropped() {
        let table = Arc::new(Table::new(Arc::new(Finished)));
        let app = test::init_service(App::new().app_data(web::Data::new(table)).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/ball")
            .set_json(serde_json::json!({ "ball_power": 80, "from_player": "B" }))
            .to_request();
        let body: Status = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, Status::ok("dropped"));

        let req = test::TestRequest::post()
            .uri("/ball")
            .set_json(serde_json::json!({ "ball_power": 80, "from_player": "Z" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn start_reports_serve_power() {
        let table = Arc::new(Table::new(Arc::new(Finished)));
        let app = test::init_service(App::new().app_data(web::Data::new(table)).configure(routes)).await;
        let req = test::TestRequest::post()
            .uri("/start")
            .set_json(StartGame::default())
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let power = body["ball_power"].as_u64().expect("power");
        assert!((70..100).contains(&power));
    }
}
