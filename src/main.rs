use anyhow::Context;
use vitrine::{MuseumConfig, VitrineApp};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = MuseumConfig::from_env();
    log::debug!("Starting with {:?}", config);

    VitrineApp::new(config)
        .context("failed to set up the museum")?
        .run()
        .context("museum exited with an error")
}
