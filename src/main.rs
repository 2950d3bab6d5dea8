use clap::{Args, Parser, Subcommand};
use dataforge::{
    read_config_file, read_dataset_file, read_input_file, write_output, DataForge,
    FormattedBatch, OutputFormat, ProcessingConfig, RestApi,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Turn loosely-structured records into vector-search-ready datasets
#[derive(Parser, Debug)]
#[command(name = "dataforge")]
#[command(about = "Build vector-search-ready datasets", long_about = None)]
struct Cli {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new mock dataset from a prompt
    Create {
        /// What the generated records should be about
        #[arg(short, long)]
        prompt: String,

        /// Number of records
        #[arg(short, long, default_value_t = 10)]
        count: usize,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Process new records against an existing dataset
    Add {
        /// JSON array of input records
        #[arg(short, long)]
        input: PathBuf,

        /// JSON array of canonical records
        #[arg(short, long)]
        existing: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Process an input file on its own
    Process {
        /// JSON array of input records
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run the REST API server
    Serve {
        /// HTTP API port
        #[arg(long, default_value_t = 3001)]
        port: u16,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output format (json, csv, parquet)
    #[arg(short, long)]
    format: Option<String>,

    /// Write here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Processing config file (JSON); other flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scale embeddings to unit length
    #[arg(long)]
    normalize_embeddings: bool,

    /// Skip validation
    #[arg(long)]
    no_validation: bool,
}

impl OutputArgs {
    fn processing_config(&self) -> anyhow::Result<ProcessingConfig> {
        let mut config = match &self.config {
            Some(path) => read_config_file(path)?,
            None => ProcessingConfig::default(),
        };
        if let Some(format) = &self.format {
            config.output_format = OutputFormat::from(format.as_str());
        }
        if self.normalize_embeddings {
            config.normalize_embeddings = true;
        }
        if self.no_validation {
            config.enable_validation = false;
        }
        Ok(config)
    }

    fn write(&self, output: &FormattedBatch) -> anyhow::Result<()> {
        write_output(self.output.as_deref(), &output.formatted)?;
        if let Some(path) = &self.output {
            info!(
                "Wrote {} records as {} to {:?}",
                output.batch.records.len(),
                output.format,
                path
            );
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout carries only the dataset
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let forge = DataForge::default();

    match cli.command {
        Command::Create {
            prompt,
            count,
            output,
        } => {
            let config = output.processing_config()?;
            let dataset = forge.generate_dataset(&prompt, count, Some(config))?;
            output.write(&dataset)?;
        }
        Command::Add {
            input,
            existing,
            output,
        } => {
            let config = output.processing_config()?;
            let items = read_input_file(&input)?;
            let existing = read_dataset_file(&existing)?;
            info!(
                "Processing {} records against {} existing",
                items.len(),
                existing.len()
            );

            let dataset =
                forge.process_json_formatted(&items, Some(config), Some(existing.as_slice()))?;
            if let Some(consistency) = &dataset.batch.consistency {
                for recommendation in &consistency.recommendations {
                    warn!("{}", recommendation);
                }
            }
            output.write(&dataset)?;
        }
        Command::Process { input, output } => {
            let config = output.processing_config()?;
            let items = read_input_file(&input)?;
            let dataset = forge.process_json_formatted(&items, Some(config), None)?;
            output.write(&dataset)?;
        }
        Command::Serve { port } => serve(forge, port).await?,
    }

    Ok(())
}

async fn serve(forge: DataForge, port: u16) -> anyhow::Result<()> {
    info!("Starting DataForge v{}", env!("CARGO_PKG_VERSION"));

    let forge = Arc::new(forge);
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(forge, port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("API endpoints available at http://localhost:{}/api", port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
