use color_eyre::eyre::{eyre, WrapErr};
use directories::ProjectDirs;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use zen::{App, Config};
use zen_api::ZenApi;

fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "zen", "zen") {
        proj_dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config/default.toml")
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config_path = get_config_path();
    let config = Config::load_or_default(&config_path);

    if let Err(e) = zen::logging::init(&config.logging) {
        eprintln!("Logging disabled: {e:#}");
    }
    tracing::info!(server = %config.server.base_url, "Starting zen");

    let api = ZenApi::with_timeouts(
        &config.server.base_url,
        config.server.connect_timeout(),
        config.server.request_timeout(),
    )
    .wrap_err_with(|| format!("invalid server address {}", config.server.base_url))?;

    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, App::new(config, Arc::new(api)));
    ratatui::restore();

    result
}

fn run(terminal: &mut ratatui::DefaultTerminal, mut app: App) -> color_eyre::Result<()> {
    app.start();

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;

            if let Event::Key(key) = &event {
                if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }
            }

            match app.handle_event(event) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => return Err(eyre!("{e:#}")),
            }
        }

        app.process_async_events();

        if app.should_quit {
            break;
        }
    }

    tracing::info!("Exiting");
    Ok(())
}
