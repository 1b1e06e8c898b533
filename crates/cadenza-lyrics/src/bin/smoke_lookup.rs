//! Manual smoke check against the live YouTube Music backend.
//!
//! ```text
//! cargo run -p cadenza-lyrics --bin smoke_lookup -- "Imagine"
//! ```

use anyhow::{bail, Result};
use cadenza_lyrics::LyricsLookupService;
use cadenza_ytmusic::YtMusicClient;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        bail!("usage: smoke_lookup <song title>");
    }
    let title = args.join(" ");

    let client = YtMusicClient::new()?;
    let service = LyricsLookupService::new(client);

    let outcome = service.lookup(&title).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}

fn init_tracing() {
    let fmt_layer = fmt::layer().with_target(true).with_level(true);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
