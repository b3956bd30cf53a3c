use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use product_scraper::config::AppConfig;
use product_scraper::core::messages::MessageLog;
use product_scraper::core::session::{ScrapeSession, BUSY_TEXT};
use product_scraper::core::table::format_table;
use product_scraper::core::ProductScraper;
use product_scraper::export::ExportFormat;
use product_scraper::logging::init_logging;
use product_scraper::scraper::{
    ScrapeRequest, DEFAULT_CONTAINER_SELECTOR, DEFAULT_IMAGE_SELECTOR, DEFAULT_NAME_SELECTOR,
    DEFAULT_PRICE_SELECTOR, DEFAULT_URL,
};

#[derive(Parser)]
#[command(name = "ps-cli")]
#[command(about = "Product Scraper Command Line Interface")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, help = "Enable verbose logging")]
    verbose: bool,

    #[arg(short, long, help = "Configuration file path")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape one page and print the product table
    Scrape {
        #[arg(long, default_value = DEFAULT_URL, help = "Page to scrape")]
        url: String,

        #[arg(long, default_value = DEFAULT_CONTAINER_SELECTOR, help = "CSS selector of a product card")]
        container: String,

        #[arg(long, default_value = DEFAULT_NAME_SELECTOR, help = "CSS selector of the name inside a card")]
        name: String,

        #[arg(long, default_value = DEFAULT_PRICE_SELECTOR, help = "CSS selector of the price inside a card")]
        price: String,

        #[arg(long, default_value = DEFAULT_IMAGE_SELECTOR, help = "CSS selector of the image inside a card")]
        image: String,

        #[arg(short, long, help = "Write the results to disk", value_enum)]
        export: Option<ExportChoice>,

        #[arg(short, long, help = "Directory for export files (defaults to the configured one)")]
        output_dir: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config {
        #[arg(long, help = "Store it at the default configuration path")]
        write: bool,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum ExportChoice {
    Csv,
    Json,
    All,
}

impl ExportChoice {
    fn formats(self) -> Vec<ExportFormat> {
        match self {
            ExportChoice::Csv => vec![ExportFormat::Csv],
            ExportChoice::Json => vec![ExportFormat::Json],
            ExportChoice::All => ExportFormat::all().to_vec(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file_with_overrides(path)?,
        None => AppConfig::load()?,
    };

    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    init_logging(&config.logging)?;
    info!("Product Scraper CLI v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Scrape {
            url,
            container,
            name,
            price,
            image,
            export,
            output_dir,
        } => {
            let request = ScrapeRequest {
                url,
                container_selector: container,
                name_selector: name,
                price_selector: price,
                image_selector: image,
            };
            run_scrape(config, request, export, output_dir).await?;
        }

        Commands::Config { write } => {
            print!("{}", config.to_toml()?);
            if write {
                let path = config.save(None)?;
                println!("Configuration written to {}", path.display());
            }
        }
    }

    Ok(())
}

async fn run_scrape(
    config: AppConfig,
    request: ScrapeRequest,
    export: Option<ExportChoice>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let core = ProductScraper::new(config)?;
    let mut session = ScrapeSession::new(request);

    println!("{}", BUSY_TEXT);
    session.run(&core.engine()).await;

    let shown = print_messages(session.messages(), 0);
    if !session.records().is_empty() {
        println!();
        print!("{}", format_table(session.records()));
    }

    if let Some(choice) = export {
        for format in choice.formats() {
            if session
                .save_export(core.export_manager(), format, output_dir.as_deref())
                .is_none()
            {
                break;
            }
        }
        print_messages(session.messages(), shown);
    }

    Ok(())
}

/// Print messages from index `from` on; returns how many have been shown
fn print_messages(messages: &MessageLog, from: usize) -> usize {
    for message in messages.iter().skip(from) {
        println!("[{}] {}", message.level, message.timestamped());
    }
    messages.len()
}
