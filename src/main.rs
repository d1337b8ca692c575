//! storypdf - download a Wattpad story as a PDF

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use storypdf::config::{
    DEFAULT_BASE_URL, DEFAULT_FONT_SIZE, DEFAULT_FONTS_DIR, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
use storypdf::{Config, convert};

#[derive(Parser)]
#[command(name = "storypdf")]
#[command(version, about = "Download a Wattpad story to PDF", long_about = None)]
#[command(after_help = "EXAMPLES:
    storypdf https://www.wattpad.com/story/123456-your-story
    storypdf https://www.wattpad.com/story/123456 -o my_story.pdf
    RUST_LOG=storypdf=debug storypdf <URL>    Trace every request")]
struct Cli {
    /// Full story URL
    #[arg(value_name = "URL")]
    url: String,

    /// Output PDF path (defaults to '<title>.pdf')
    #[arg(short, long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, env = "STORYPDF_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Directory containing .ttf fonts
    #[arg(long, env = "STORYPDF_FONTS_DIR", default_value = DEFAULT_FONTS_DIR)]
    fonts_dir: PathBuf,

    /// Body text size in points
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
    font_size: u8,

    /// Site root for the chapter text endpoint
    #[arg(long, env = "STORYPDF_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// User-Agent header sent with every request
    #[arg(long, env = "STORYPDF_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Also write the intermediate markup to this file
    #[arg(long, value_name = "PATH")]
    emit_markup: Option<PathBuf>,

    /// Suppress output messages
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log every request and chapter
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            timeout: Duration::from_secs(self.timeout),
            base_url: self.base_url.clone(),
            user_agent: self.user_agent.clone(),
            fonts_dir: self.fonts_dir.clone(),
            font_size: self.font_size,
            output: self.out.clone(),
            emit_markup: self.emit_markup.clone(),
        }
    }

    fn log_filter(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "storypdf=debug,info"
        } else {
            "info"
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match convert(&cli.config(), &cli.url) {
        Ok((story, path)) => {
            if !cli.quiet {
                println!("Saved {:?} to {}", story.title, path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
