use anyhow::Result;
use omnisearch::config::Config;
use omnisearch::logger::Logger;
use omnisearch::recent_activity::FileStore;
use omnisearch::ui;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--generate-config") {
        let path = Config::get_default_config_path()?;
        Config::generate_default_config(&path)?;
        return Ok(());
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            eprintln!("\n💡 Fix the file or regenerate it with: omnisearch --generate-config");
            return Ok(());
        }
    };

    let logger = Logger::from_config(config.logging.enabled)?;
    logger.install(log::LevelFilter::Debug)?;
    log::info!("OmniSearch starting");

    let store = Arc::new(FileStore::in_data_dir()?);

    // Run the TUI application
    ui::run_app(config, logger, store).await?;

    Ok(())
}
