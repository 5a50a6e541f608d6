use anyhow::Context;

use vokabel_lib::config::AppConfig;
use vokabel_lib::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    log::info!("Data directory: {:?}", config.data_dir);
    log::info!("Dictionary: {:?}", config.dictionary_path);
    if !config.dictionary_path.exists() {
        log::warn!("Dictionary file missing, translations will be empty");
    }

    let state = AppState::from_config(&config);
    log::info!("Vocabulary file: {:?}", state.reviews().store().backend().path());
    log::info!("Text library: {:?}", state.texts.dir());
    server::serve(state, config.bind_addr)
        .await
        .context("Server error")?;

    Ok(())
}
