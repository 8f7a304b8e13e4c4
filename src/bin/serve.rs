use std::path::PathBuf;

use flight_delay::config::ModelConfig;
use flight_delay::model::DelayClassifier;
use flight_delay::serve::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let model_path = std::env::var("MODEL_PATH").unwrap_or_else(|_| "delay_model.json".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let config = ModelConfig::with_model_path(PathBuf::from(model_path));
    let classifier = DelayClassifier::new(config)?;
    if classifier.is_fitted() {
        log::info!("serving a persisted model");
    } else {
        log::warn!("no persisted model found; /predict will fail until one is trained");
    }

    let app = router(AppState::new(classifier));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
