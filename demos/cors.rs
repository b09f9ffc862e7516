//! Minimal server showing the environment-gated middleware.
//!
//! Try: `ENABLE_CORS=true FABRIC_ALLOW_ORIGIN=https://app.example.com cargo run --example cors`
//! then `curl -i -X OPTIONS http://localhost:8080/`.

use actix_web::{middleware::Logger, web, App, HttpServer};
use fabric_cors::Cors;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("starting HTTP server at http://localhost:8080");

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::from_env())
            .wrap(Logger::default())
            .default_service(web::to(|| async { "Hello, cross-origin world!" }))
    })
    .workers(1)
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
