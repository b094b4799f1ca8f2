//! BoqLens command-line interface
//!
//! Wires configuration, the SQLite pool, and the storage/decoder adapters to
//! the core services, and exposes the analysis operations as subcommands.
//! Results are printed as JSON on stdout; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use boqlens_core::analysis::ports::{
    FileStore, InsightStore, LineItemStore, ProjectStore, SpreadsheetDecoder,
};
use boqlens_core::{AnalysisService, WbsRollupService};
use boqlens_domain::{BoqLensError, Config, Result};
use boqlens_infra::config as config_loader;
use boqlens_infra::database::{
    DbManager, SqliteInsightRepository, SqliteLineItemRepository, SqliteProjectRepository,
};
use boqlens_infra::decode::CsvDecoder;
use boqlens_infra::storage::LocalFileStore;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boqlens", version, about = "BoQ cost-concentration analysis")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a BoQ spreadsheet as a new project
    Upload {
        /// Path of the spreadsheet to upload
        file: PathBuf,
        /// Project name; defaults to the file name
        #[arg(long)]
        name: Option<String>,
    },
    /// Analyse a project's spreadsheet and store ranked line items
    Process {
        project_id: String,
    },
    /// Drill into a project's WBS hierarchy at one level
    Wbs {
        project_id: String,
        /// WBS level to aggregate (1 = roots)
        #[arg(long, default_value_t = 1)]
        level: u32,
        /// Parent item code; required for levels below the root
        #[arg(long)]
        parent: Option<String>,
    },
    /// Show stored insights for a project
    Insights {
        project_id: String,
    },
    /// List registered projects
    Projects,
    /// Delete a project and everything derived from it
    Delete {
        project_id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => config_loader::load_from_file(Some(path))?,
        None => config_loader::load()?,
    };
    let services = Services::connect(&config)?;

    match cli.command {
        Command::Upload { file, name } => {
            let bytes = std::fs::read(&file).map_err(|err| {
                BoqLensError::Storage(format!("cannot read {}: {err}", file.display()))
            })?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("upload.csv")
                .to_string();
            let name = name.unwrap_or_else(|| file_name.clone());
            let project = services.analysis.register_upload(&name, &file_name, &bytes).await?;
            print_json(&project)
        }
        Command::Process { project_id } => {
            print_json(&services.analysis.process_project(&project_id).await?)
        }
        Command::Wbs { project_id, level, parent } => print_json(
            &services.rollup.breakdown(&project_id, level, parent.as_deref()).await?,
        ),
        Command::Insights { project_id } => {
            print_json(&services.analysis.project_insights(&project_id).await?)
        }
        Command::Projects => print_json(&services.analysis.list_projects().await?),
        Command::Delete { project_id } => {
            services.analysis.delete_project(&project_id).await?;
            println!("deleted {project_id}");
            Ok(())
        }
    }
}

struct Services {
    analysis: AnalysisService,
    rollup: WbsRollupService,
}

impl Services {
    fn connect(config: &Config) -> Result<Self> {
        let manager =
            Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        manager.run_migrations()?;

        let projects: Arc<dyn ProjectStore> =
            Arc::new(SqliteProjectRepository::new(Arc::clone(&manager)));
        let line_items: Arc<dyn LineItemStore> =
            Arc::new(SqliteLineItemRepository::new(Arc::clone(&manager)));
        let insights: Arc<dyn InsightStore> =
            Arc::new(SqliteInsightRepository::new(Arc::clone(&manager)));
        let files: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(&config.storage.root));
        let decoder: Arc<dyn SpreadsheetDecoder> = Arc::new(CsvDecoder);

        let analysis = AnalysisService::new(
            Arc::clone(&projects),
            files,
            decoder,
            Arc::clone(&line_items),
            insights,
        );
        let rollup = WbsRollupService::new(projects, line_items);

        Ok(Self { analysis, rollup })
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| BoqLensError::Internal(format!("cannot render output: {err}")))?;
    println!("{rendered}");
    Ok(())
}
