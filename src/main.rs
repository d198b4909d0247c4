mod app;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory whose git repositories become nodes.
    #[arg(long, default_value = ".")]
    vault: PathBuf,

    /// Settings file to use instead of `.dreamspace.toml` in the vault.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dreamspace=info")))
        .with(fmt::layer())
        .init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "dreamspace",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::DreamSpaceApp::new(
                cc,
                args.vault.clone(),
                args.config.clone(),
            )))
        }),
    )
    .map_err(|error| anyhow::anyhow!("failed to run the viewer: {error}"))
}
