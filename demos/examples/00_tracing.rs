use glodabin::Glodabin;
use glodabin_demos::common::{config_from_env, get_index};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,glodabin=trace,glodabin_core=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let glodabin = Glodabin::builder()
        .with_index(get_index())
        .config(config_from_env()?)
        .build()?;

    let histories = glodabin.top_contacts_with_personal_history().await?;
    tracing::info!(contacts = histories.len(), "done");
    Ok(())
}
