//! `qwenht` terminal entry point.

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use qwenht_app::terminal::{Cli, run};
    use qwenht_observability::LogFormat;

    let cli = Cli::parse();
    if cli.verbose {
        qwenht_observability::init_with(LogFormat::Compact, "debug");
    } else {
        qwenht_observability::init();
    }

    run(cli).await
}

// The browser build starts from `frontend::start` instead.
#[cfg(target_arch = "wasm32")]
fn main() {}
