mod app_state;
mod browser;
mod config;
mod extract;
mod list_scraper;
mod models;

use crate::app_state::AppState;
use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};
use serde_json::json;

#[get("/api/anime-list/{username}")]
async fn anime_list(data: web::Data<AppState>, username: web::Path<String>) -> impl Responder {
    let username = username.into_inner();
    info!("Fetching completed list for {}", username);

    let settings = data.config.browser.clone();
    let result =
        web::block(move || list_scraper::fetch_completed_list(&username, &settings)).await;

    match result {
        Ok(Ok(records)) => HttpResponse::Ok().json(records),
        Ok(Err(e)) => {
            error!("Scrape failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
        Err(e) => {
            error!("Scrape task failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    log4rs::init_file("log4rs.yml", Default::default()).unwrap();

    let cfg = config::Config::load();
    info!("Browser headless: {}", cfg.browser.headless);
    info!("Browser timeout: {}s", cfg.browser.timeout_secs);

    let data = web::Data::new(AppState { config: cfg });

    // Try to bind to an available port starting at 8080
    let mut last_err: Option<std::io::Error> = None;
    for port in 8080..=8090 {
        let data_clone = data.clone();
        let addr = format!("127.0.0.1:{}", port);
        match HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .app_data(data_clone.clone())
                .service(anime_list)
        })
        .bind(&addr)
        {
            Ok(server) => {
                info!("Listening on {}", addr);
                return server.run().await;
            }
            Err(e) => {
                last_err = Some(e);
                continue;
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "No available ports 8080-8090",
        )
    }))
}
