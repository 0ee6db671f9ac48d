use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use modelbench::{
    create_router, AppState, Config, Domain, Evaluator, FsResultStore, ModelFormat, ResultRecord,
    ResultStore, SyntheticEvaluator,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "modelbench", about = "Model performance comparison dashboard backend")]
struct Cli {
    /// Config file location (without extension), e.g. "config/modelbench"
    #[arg(long, global = true, default_value = "config/modelbench")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the dashboard HTTP server
    Serve,

    /// Evaluate one model artifact and store the result.
    /// This is the worker the server spawns out-of-process; it writes
    /// exactly one result file and exits.
    Evaluate {
        /// Path to the (temporary) model artifact
        #[arg(long)]
        model_path: PathBuf,

        /// Model domain: stt, nlu, or auth
        #[arg(long)]
        model_type: String,

        /// Artifact format: native-binary, onnx, gguf, or unknown
        #[arg(long)]
        model_format: String,

        /// Original uploaded file name (the record key)
        #[arg(long)]
        original_name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    match cli.command {
        Command::Serve => serve(cfg, &cli.config).await,
        Command::Evaluate {
            model_path,
            model_type,
            model_format,
            original_name,
        } => evaluate(&cfg, &model_path, &model_type, &model_format, original_name),
    }
}

async fn serve(cfg: Config, config_source: &str) -> Result<()> {
    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Results root: {}", cfg.storage.results_path);
    info!("Transcripts: {}", cfg.storage.transcripts_path);

    let state = AppState::new(&cfg, config_source)?;
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn evaluate(
    cfg: &Config,
    model_path: &Path,
    model_type: &str,
    model_format: &str,
    original_name: String,
) -> Result<()> {
    let domain: Domain = model_type.parse()?;
    let format: ModelFormat = model_format.parse()?;

    let metrics = SyntheticEvaluator.evaluate(model_path, domain, format)?;
    let record = ResultRecord {
        model_name: original_name,
        model_format: format,
        dataset: cfg.evaluation.dataset.clone(),
        metrics,
        timestamp: Utc::now(),
    };

    let store = FsResultStore::new(&cfg.storage.results_path);
    let path = store.put(&record)?;
    info!("Evaluation result saved: {}", path.display());

    Ok(())
}
