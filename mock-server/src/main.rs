use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = mock_server::config::Config::from_env()?;
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{addr}");
    mock_server::run(listener).await?;
    Ok(())
}
