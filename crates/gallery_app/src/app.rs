use std::sync::mpsc;

use gallery_core::{update, AppState, Msg};
use gallery_engine::ClientSettings;
use gallery_logging::gallery_info;

use crate::effects::EffectRunner;
use crate::input;
use crate::ui;

/// Everything the main loop reacts to: core messages plus the quit signal
/// that only the console surface knows about.
pub enum AppMsg {
    Core(Msg),
    Quit,
}

/// Origin override, e.g. `GALLERY_BASE_URL=http://127.0.0.1:5000`.
const BASE_URL_ENV: &str = "GALLERY_BASE_URL";

pub fn run() -> anyhow::Result<()> {
    let mut settings = ClientSettings::default();
    if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
        settings.base_url = base_url;
    }
    gallery_info!("gallery console talking to {}", settings.base_url);

    let (msg_tx, msg_rx) = mpsc::channel::<AppMsg>();
    let runner = EffectRunner::new(settings, msg_tx.clone());
    let _reader = input::spawn_stdin_reader(msg_tx);
    input::print_help();

    let mut state = AppState::new();

    // Page load: wire the channel and run the one-shot health probe.
    let (next, effects) = update(std::mem::take(&mut state), Msg::Started);
    state = next;
    runner.run(effects);

    for app_msg in msg_rx {
        match app_msg {
            AppMsg::Quit => break,
            AppMsg::Core(msg) => {
                let (next, effects) = update(std::mem::take(&mut state), msg);
                state = next;
                runner.run(effects);
                if state.consume_dirty() {
                    ui::render::draw(&state.view());
                }
            }
        }
    }

    gallery_info!("gallery console shutting down");
    Ok(())
}
