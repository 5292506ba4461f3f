use std::time::Duration;

use glodabin::Glodabin;
use glodabin_demos::common::{config_from_env, get_index, render};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let glodabin = Glodabin::builder()
        .with_index(get_index())
        .config(config_from_env()?)
        .index_timeout(Duration::from_secs(2))
        .build()?;

    let histories = glodabin.top_contacts_with_personal_history().await?;
    print!("{}", render(&histories));
    Ok(())
}
