use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, from_fn},
    web,
};
use anyhow::Result;
use tracing::{info, warn};

use mylinks::analytics::{CounterManager, EventRetentionTask};
use mylinks::api::middleware::AuthMiddleware;
use mylinks::api::services::{AnalyticsApi, PageApi};
use mylinks::config::{get_config, init_config};
use mylinks::services::{AnalyticsService, PageService, TrackerService};
use mylinks::storage::StorageFactory;
use mylinks::system::init_logging;

/// Counter increments buffered before an early flush is triggered
const MAX_BUFFERED_BEFORE_FLUSH: usize = 1000;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_config();
    let config = get_config();

    // Guard must live until exit so buffered log lines are flushed
    let _log_guard = init_logging(config);

    let storage = StorageFactory::create().await?;
    info!("Using storage backend: {}", storage.backend_name());

    let counters = CounterManager::new(
        storage.as_counter_sink(),
        Duration::from_secs(config.analytics.flush_interval_secs),
        MAX_BUFFERED_BEFORE_FLUSH,
    );
    {
        let counters = counters.clone();
        tokio::spawn(async move { counters.start_background_task().await });
    }

    if config.analytics.retention_days > 0 {
        let retention = EventRetentionTask::new(
            Arc::clone(&storage),
            config.analytics.retention_days,
            config.analytics.retention_sweep_hours,
        );
        tokio::spawn(async move { retention.start_background_task().await });
    } else {
        info!("Event retention sweep disabled (retention_days = 0)");
    }

    let tracker = Arc::new(TrackerService::new(Arc::clone(&storage), counters.clone()));
    let page_service = web::Data::new(PageService::new(Arc::clone(&storage), Arc::clone(&tracker)));
    let analytics_service = web::Data::new(AnalyticsService::new(
        Arc::clone(&storage),
        counters.clone(),
    ));
    let tracker_data = web::Data::from(tracker);

    let cors_origin = config.server.cors_origin.clone();
    let cpu_count = if config.server.cpu_count == 0 {
        num_cpus::get()
    } else {
        config.server.cpu_count
    }
    .min(32);
    warn!("Using {} workers for the server", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    let server = HttpServer::new(move || {
        let cors = build_cors(&cors_origin);

        App::new()
            .wrap(cors)
            .wrap(Compress::default())
            .app_data(page_service.clone())
            .app_data(analytics_service.clone())
            .app_data(tracker_data.clone())
            .app_data(web::PayloadConfig::new(1024 * 1024))
            .service(
                web::scope("/api/pages")
                    .route("/themes", web::get().to(PageApi::get_themes))
                    .service(
                        web::scope("/my-page")
                            .wrap(from_fn(AuthMiddleware::require_auth))
                            .route("", web::get().to(PageApi::my_page))
                            .route("", web::put().to(PageApi::update_page))
                            .route("/links", web::post().to(PageApi::add_link))
                            .route("/links/reorder", web::put().to(PageApi::reorder_links))
                            .route("/links/{id}", web::put().to(PageApi::update_link))
                            .route("/links/{id}", web::delete().to(PageApi::delete_link))
                            .route("/blocks", web::post().to(PageApi::add_block))
                            .route("/blocks/{id}", web::put().to(PageApi::update_block))
                            .route("/blocks/{id}", web::delete().to(PageApi::delete_block)),
                    )
                    .route("/{username}", web::get().to(PageApi::get_public_page))
                    .route(
                        "/{username}/links/{link_id}/click",
                        web::post().to(PageApi::click_link),
                    ),
            )
            .service(
                web::scope("/api/analytics")
                    .route("/track/{username}", web::post().to(AnalyticsApi::track))
                    .service(
                        web::scope("")
                            .wrap(from_fn(AuthMiddleware::require_auth))
                            .route("/summary", web::get().to(AnalyticsApi::summary))
                            .route("/detailed", web::get().to(AnalyticsApi::detailed))
                            .route("/reconcile", web::post().to(AnalyticsApi::reconcile)),
                    ),
            )
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .client_disconnect_timeout(Duration::from_millis(1000))
    .workers(cpu_count)
    .bind(&bind_address)?;

    server.run().await?;

    // Final flush so no buffered counts are lost on shutdown
    counters.flush().await;
    warn!("Graceful shutdown: counter buffer flushed");

    Ok(())
}

fn build_cors(cors_origin: &str) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec!["Content-Type", "Authorization", "Accept"])
        .max_age(3600);

    if cors_origin == "*" {
        cors.allow_any_origin()
    } else if cors_origin.is_empty() {
        cors
    } else {
        cors.allowed_origin(cors_origin)
    }
}
