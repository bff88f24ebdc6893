use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use calchat::cli::Args;
use calchat::config::Config;
use calchat::http::build_router;
use calchat::state::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "calchat=debug,tower_http=debug"
    } else {
        "calchat=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;
    let state = App::init(&config)?;
    let app = build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, model = %config.model, "calchat listening");

    axum::serve(listener, app).await?;
    Ok(())
}
