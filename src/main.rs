use clap::Parser;

use gamification_github::ui::{self, Cli};
use gamification_github::utils;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    utils::block_on(ui::run(cli))
}
