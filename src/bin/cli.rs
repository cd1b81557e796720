// src/bin/cli.rs
use panel_inspect::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    env_logger::init();
    cli::run()
}
