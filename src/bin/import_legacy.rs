use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use hobby_horse_ranking::config::AppConfig;
use hobby_horse_ranking::errors::StoreError;
use hobby_horse_ranking::modules::helpers::logging::setup_logging;
use hobby_horse_ranking::modules::models::legacy::LegacyFormat;
use hobby_horse_ranking::modules::models::store::RecordStore;

#[derive(Parser, Debug)]
#[command(name = "import_legacy")]
#[command(about = "Import competitors from the old comma separated data file", long_about = None)]
struct Cli {
    /// File in the `name,horse,category,time,penalty,time,penalty` format
    #[arg(default_value = "data.txt")]
    legacy_file: PathBuf,

    /// Record file to import into (defaults to DATA_FILE)
    #[arg(short, long)]
    data_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    setup_logging(&config).expect("failed to setup logging");

    let legacy_path = cli.legacy_file;

    let imported = match LegacyFormat::read_file(&legacy_path) {
        Ok(imported) => imported,
        Err(error) => {
            error!(target: "import_legacy", "{}", error);
            return ExitCode::FAILURE;
        }
    };
    info!(target: "import_legacy", "read {} competitors from {}", imported.len(), legacy_path.display());

    let store = RecordStore::new(config.data_file.clone());
    match store.update(|list| Ok::<usize, StoreError>(LegacyFormat::import(list, imported))) {
        Ok(created) => {
            info!(target: "import_legacy", "{} new competitors saved to {}", created, store.path().display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            error!(target: "import_legacy", "failed saving competitors: {}", error);
            ExitCode::FAILURE
        }
    }
}
