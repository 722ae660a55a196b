use songdeck::{Settings, app_core::SongDeck, config, logging};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let path = config::settings_path()?;
    let first_run = !path.exists();
    let loaded = Settings::load_or_create(&path);

    // Fall back to the default filter so a bad settings file still gets logged
    let filter = match &loaded {
        Ok(settings) => settings.log_filter.clone(),
        Err(_) => Settings::default().log_filter,
    };
    let _guard = logging::init(&config::config_dir()?.join("logs"), &filter)?;

    let settings = loaded.inspect_err(|e| error!(path = %path.display(), "{e:#}"))?;
    if first_run {
        info!(path = %path.display(), "wrote default settings");
    }

    SongDeck::new(settings)?.run()
}
