use actix_cors::Cors;
use actix_web::{
    middleware::{NormalizePath, TrailingSlash},
    web::{Data, JsonConfig},
    App, HttpServer,
};
use config::Config;
use refresh::RefreshDriver;
use service::Service;
use tracing::level_filters::LevelFilter;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter, FmtSubscriber};

pub mod alerts;
pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod models;
pub mod refresh;
pub mod routing;
pub mod seed;
pub mod service;
pub mod store;

/// Returns a builder for the main application.
#[bon::builder(finish_fn = start)]
pub async fn run(config: Option<Config>) -> eyre::Result<()> {
    #[cfg(debug_assertions)]
    FmtSubscriber::builder()
        .pretty()
        .with_env_filter(
            EnvFilter::builder()
                .with_env_var("SCOPEMQ_LOG")
                .with_default_directive(LevelFilter::INFO.into())
                .from_env()?,
        )
        .finish()
        .try_init()?;

    #[cfg(not(debug_assertions))]
    FmtSubscriber::builder()
        .json()
        .with_env_filter(
            EnvFilter::builder()
                .with_env_var("SCOPEMQ_LOG")
                .with_default_directive(LevelFilter::INFO.into())
                .from_env()?,
        )
        .finish()
        .try_init()?;

    let config = match config {
        Some(config) => config,
        None => Config::load()?,
    };

    let bind = (config.host().to_owned(), config.port());
    let refresh_interval = config.refresh_interval();

    let data = Data::new(Service::with_config(config));

    let refresher = RefreshDriver::spawn(data.clone().into_inner(), refresh_interval);

    tracing::info!(host = %bind.0, port = bind.1, "management api listening");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_header()
            .allow_any_method();

        let json_cfg = JsonConfig::default().content_type_required(false);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .wrap(cors)
            .service(api::queues::service())
            .service(api::exchanges::service())
            .service(api::bindings::service())
            .service(api::connections::service())
            .service(api::channels::service())
            .service(api::consumers::service())
            .service(api::admin::vhosts())
            .service(api::admin::users())
            .service(api::admin::permissions())
            .service(api::admin::policies())
            .service(api::alerts::rules())
            .service(api::alerts::service())
            .service(api::alerts::events())
            .app_data(data.clone())
            .app_data(json_cfg)
    })
    .bind(bind)?
    .run()
    .await?;

    refresher.shutdown().await;

    Ok(())
}
