use super::*;
use crate::Venue;
use crate::coordinator::Handle;
use crate::dispatch::Dispatcher;
use crate::table::Table;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;

pub struct Server;

impl Server {
    /// Serves both front ends until one of them stops.
    pub async fn run(venue: Venue, players_addr: &str, table_addr: &str) -> Result<(), std::io::Error> {
        let players = Self::players(venue.players().clone(), venue.dispatch().clone(), players_addr);
        let table = Self::table(venue.table().clone(), table_addr);
        tokio::try_join!(players, table).map(|_| ())
    }

    /// Service A: the coordinator's rally and read endpoints.
    pub async fn players(handle: Handle, dispatch: Dispatcher, addr: &str) -> Result<(), std::io::Error> {
        let state = web::Data::new(handle);
        let letters = web::Data::new(dispatch);
        log::info!("[hosting] players listening on {}", addr);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(state.clone())
                .app_data(letters.clone())
                .configure(players::routes)
        })
        .workers(4)
        .bind(addr)?
        .run()
        .await
    }

    /// Service B: the table relay.
    pub async fn table(table: Arc<Table>, addr: &str) -> Result<(), std::io::Error> {
        let state = web::Data::new(table);
        log::info!("[hosting] table listening on {}", addr);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(state.clone())
                .configure(table::routes)
        })
        .workers(4)
        .bind(addr)?
        .run()
        .await
    }
}
