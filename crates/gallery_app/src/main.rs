mod app;
mod effects;
mod input;
mod logging;
mod media;
mod ui;

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);
    app::run()
}
