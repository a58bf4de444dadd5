use std::io;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};

use rest_security_core::http::security::SecurityHeaders;
use rest_security_server::config::ServerConfig;
use rest_security_server::handlers;
use rest_security_server::security::{demo_users, SecurityPolicy};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env().map_err(io::Error::other)?;
    let users = demo_users(&SecurityPolicy::password_encoder()).map_err(io::Error::other)?;
    let policy = SecurityPolicy::new(users).realm(config.realm.clone());

    log::info!("listening on http://{}:{}", config.host, config.port);
    log::info!("public: GET /auth/welcome, demo users: admin/admin, user/user, guest/guest");

    HttpServer::new(move || {
        App::new()
            .wrap(policy.security_filter_chain())
            .wrap(SecurityHeaders::default())
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind(config.bind_address())?
    .run()
    .await
}
