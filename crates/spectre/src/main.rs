mod app;
mod browser;
mod config;
mod events;
mod keymap;
mod logging;
mod probes;
mod shell;
mod spawn;
mod state;
mod stats;
mod ui;

#[cfg(test)]
mod test_utils;

fn main() -> std::io::Result<()> {
    logging::init();
    app::run()
}
