use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vault_index::constants as C;
use vault_index::{Cli, Command, ExtractorSettings, ResolveContext};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(C::DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = ExtractorSettings::load_or_default(cli.settings.as_deref())
        .context("failed to load extractor settings")?;
    let ctx = ResolveContext::new(cli.vault.as_deref(), settings)?;
    let session = cmd::open::Session::new(&ctx, cli.snapshot.as_deref(), cli.strict, cli.json);

    match cli.command {
        Command::Metadata { out } => cmd::metadata::run(&session, out),
        Command::Tags { out } => cmd::tags::run(&session, out),
        Command::Inventory { out } => cmd::inventory::run(&session, out),
        Command::All => cmd::all::run(&session),
        Command::Report => cmd::report::run(&session),
        Command::Resolve { link } => cmd::resolve::run(&session, &link),
    }
}

mod cmd {
    pub mod open;
    pub mod metadata;
    pub mod tags;
    pub mod inventory;
    pub mod all;
    pub mod report;
    pub mod resolve;
}
