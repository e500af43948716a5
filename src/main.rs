use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use repair_desk::config::AppConfig;
use repair_desk::create_pool;
use repair_desk::handlers;
use repair_desk::state::AppState;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env();

    let db = create_pool(&config.database_url)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to open database: {e}")))?;
    tracing::info!(database_url = %config.database_url, "Database ready");

    let state = AppState::new(db, &config);
    let static_dir = config.static_dir.clone();

    let bind_addr = config.bind_addr();
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        // The UI runs on the same machine, served either by us or a dev server.
        let cors = Cors::default()
            .allowed_origin_fn(|origin, _| {
                origin
                    .to_str()
                    .map(|o| {
                        o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1")
                    })
                    .unwrap_or(false)
            })
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        let mut app = App::new()
            .wrap(cors)
            .configure(|cfg| state.configure(cfg))
            .service(web::scope("/api").configure(handlers::init_routes));

        if let Some(dir) = &static_dir {
            app = app.service(Files::new("/", dir).index_file("index.html"));
        }
        app
    })
    .bind(&bind_addr)?
    .run()
    .await
}
