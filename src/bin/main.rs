use std::{net::SocketAddr, process, sync::Arc};

use dotenvy::dotenv;
use lazy_static::lazy_static;
use log::{error, info};

use dice_modeling::{
    app::app,
    middleware::cors::cors_layer,
    services::{modeling_service::CoreModelingService, sampler::Sampler},
    settings::ModelingSettings,
};

lazy_static! {
    static ref SETTINGS_PATH: String = {
        dotenv().ok();
        std::env::var("MODELING_SETTINGS").unwrap_or_else(|_| "./modeling_settings.json".to_string())
    };
}

#[tokio::main]
async fn main() {
    // Setup tracing_subscriber
    tracing_subscriber::fmt().with_target(false).compact().init();

    if let Err(e) = run().await {
        error!("{e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Setup state
    let settings = ModelingSettings::load(SETTINGS_PATH.as_str())?;
    let cors = cors_layer(&settings.cors)?;
    let addr: SocketAddr = settings.address.parse()?;

    let sampler = Sampler::from_settings(settings.sampler.clone());
    let modeling_service = Arc::new(CoreModelingService::new(sampler));

    let app = app(&settings.api_path, modeling_service, cors);

    info!("Listening on {addr}, serving {}", settings.api_path);
    axum::Server::bind(&addr)
        .serve(app.into_make_service()).await?;

    Ok(())
}
