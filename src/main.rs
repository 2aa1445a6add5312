use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use patrimonio_sync::api::IxcClient;
use patrimonio_sync::config::Config;
use patrimonio_sync::db::MysqlAssignmentStore;
use patrimonio_sync::pipeline::{Pipeline, Status};

/// Reconcile an asset spreadsheet against the IXC inventory.
///
/// Reads MAC/serial pairs from the spreadsheet, validates them against the
/// inventory database, allocates unassigned records of the given category
/// and updates them through the API. The batch result is printed as JSON;
/// the exit code is 0 for overall success, 1 for overall error.
#[derive(Parser)]
#[command(name = "patrimonio-sync", version)]
struct Cli {
    /// Path to the asset spreadsheet (.xlsx or .xls)
    planilha: PathBuf,

    /// Inventory category (id_produto) to allocate records from
    #[arg(long = "id-produto")]
    id_produto: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = Config::from_env()?;
    let store = MysqlAssignmentStore::connect(&config.database_url).await?;
    let api = IxcClient::new(&config)?;

    let pipeline = Pipeline::new(store, api);
    let result = pipeline.run(&cli.planilha, &cli.id_produto).await;

    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.status == Status::Error {
        std::process::exit(1);
    }
    Ok(())
}
