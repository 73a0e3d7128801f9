mod app;
mod config;
mod effects;
mod logging;
mod render;

use std::path::Path;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);

    let path = std::env::args()
        .nth(1)
        .context("usage: navigator_app <session.ron>")?;
    let script = config::load_script(Path::new(&path))?;
    app::run(script)
}
