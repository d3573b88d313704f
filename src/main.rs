use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use kaggle_duck::{PipelineConfig, cli};
use owo_colors::OwoColorize;
use std::path::PathBuf;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Kaggle Duck: fetch a Kaggle dataset, unzip it, and load it into DuckDB
#[derive(Parser)]
#[command(name = "kaggle-duck", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source credentials from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// YAML file with dataset_owner, dataset_name and base_folder
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Dataset owner (overrides the config file)
    #[arg(long, global = true)]
    owner: Option<String>,

    /// Dataset name (overrides the config file)
    #[arg(long, global = true)]
    dataset: Option<String>,

    /// Base folder holding data/ and sql/ (overrides the config file)
    #[arg(short, long, global = true)]
    base: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download, extract and load the dataset
    Run,

    /// Create the data folders and print the resolved paths
    Paths,

    /// List the files in the dataset
    Files,

    /// Download the dataset archive only
    Download,

    /// Extract a previously downloaded archive
    Extract,

    /// Load previously extracted files into the database
    Load,

    /// Create the folder layout and the default load template
    Init {
        /// Also write the effective configuration to this file
        #[arg(short, long)]
        write_config: Option<PathBuf>,
    },

    /// Count the rows of a table in the database
    Count {
        /// Table to count
        #[arg(default_value = "netflix")]
        table: String,
    },

    /// List the tables in the database
    Tables,
}

impl Cli {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let config = match &self.config {
            Some(path) => PipelineConfig::read(path)?,
            None => PipelineConfig::default(),
        };
        Ok(config.with_overrides(self.owner.clone(), self.dataset.clone(), self.base.clone()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match dotenvy::from_filename(&cli.env) {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.into()),
    }

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    let config = cli.pipeline_config()?;
    let dataset = config.dataset();

    match cli.command {
        Commands::Run => {
            log::info!(
                "Running pipeline for {} in {}",
                dataset.cyan(),
                config.base_folder.display().bright_black()
            );
            let client = cli::load_kaggle_client()?;
            let report = cli::run_pipeline(&config, client).await?;
            log::info!(
                "✓ Pipeline complete, database at {}",
                report.database.display().bright_black()
            );
        }
        Commands::Paths => {
            let paths = cli::resolve_paths(&config)?;
            println!("{}", paths);
        }
        Commands::Files => {
            log::info!("Listing files of {}", dataset.cyan());
            let client = cli::load_kaggle_client()?;
            let files = cli::list_dataset_files(&config, client).await?;
            for file in &files {
                println!("{}", file);
            }
            log::info!("✓ {} file(s)", files.len().cyan());
        }
        Commands::Download => {
            log::info!("Downloading {}", dataset.cyan());
            let client = cli::load_kaggle_client()?;
            let archive = cli::download_dataset(&config, client).await?;
            log::info!(
                "✓ Downloaded {} bytes to {}",
                archive.bytes.cyan(),
                archive.path.display().bright_black()
            );
        }
        Commands::Extract => {
            let extracted = cli::extract_archive(&config)?;
            log::info!(
                "✓ Extracted {} file(s) to {}",
                extracted.entries.cyan(),
                extracted.dir.display().bright_black()
            );
        }
        Commands::Load => {
            let report = cli::load_table(&config)?;
            log::info!(
                "✓ Loaded into {}",
                report.database.display().bright_black()
            );
        }
        Commands::Init { write_config } => {
            let paths = cli::init_project(&config, write_config.as_deref())?;
            log::info!(
                "✓ Initialized {}",
                config.base_folder.display().bright_black()
            );
            println!("{}", paths);
        }
        Commands::Count { table } => {
            let count = cli::count_rows(&config, &table)?;
            println!("{}", count);
        }
        Commands::Tables => {
            for table in cli::list_tables(&config)? {
                println!("{}", table);
            }
        }
    }

    Ok(())
}
