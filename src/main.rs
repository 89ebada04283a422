use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use avatar_tts::domain::tts::create_tts_engine;
use avatar_tts::infrastructure::config::{LogFormat, TtsConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = TtsConfig::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(adapter = %config.adapter, "Starting TTS synthesis");

    let engine = create_tts_engine(&config.adapter, &config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = if args.is_empty() {
        "Hello! This is a test of the speech synthesis engine.".to_string()
    } else {
        args.join(" ")
    };

    let path = engine.synthesize(&text, None)?;
    println!("{}", path.display());

    Ok(())
}

fn init_logging(config: &TtsConfig) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "avatar_tts=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "avatar_tts=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
