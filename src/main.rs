use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use aviation_quiz::config::{DEFAULT_LOG_FILE, DEFAULT_SOURCE, DEFAULT_STORAGE_PATH};
use aviation_quiz::{Config, Quiz, SourceLocation};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// URL or JSON file the question bank is seeded from when storage is empty
    #[arg(short, long, default_value = DEFAULT_SOURCE)]
    source: String,

    /// File holding the locally persisted question bank
    #[arg(long, default_value = DEFAULT_STORAGE_PATH)]
    storage: PathBuf,

    /// File the log is written to (the terminal is taken by the quiz)
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            source: SourceLocation::parse(&args.source),
            storage_path: args.storage,
            log_file: args.log_file,
        }
    }
}

fn init_logging(config: &Config) -> std::io::Result<()> {
    let file = File::create(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("aviation_quiz=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() {
    let config = Config::from(Args::parse());

    if let Err(e) = init_logging(&config) {
        eprintln!("Could not open log file {}: {}", config.log_file.display(), e);
    }

    let store = match config.question_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error setting up question source: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = Quiz::new(store).run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
