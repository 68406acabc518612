use clap::Parser;

mod app;
mod effects;
mod logging;
mod persistence;
mod ui;

fn main() -> anyhow::Result<()> {
    app::run(app::Options::parse())
}
