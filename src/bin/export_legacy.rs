use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use hobby_horse_ranking::config::AppConfig;
use hobby_horse_ranking::modules::models::legacy::LegacyFormat;
use hobby_horse_ranking::modules::models::store::RecordStore;

#[derive(Parser, Debug)]
#[command(name = "export_legacy")]
#[command(about = "Write all competitors to stdout in the old comma separated format", long_about = None)]
struct Cli {
    /// Record file to read (defaults to DATA_FILE)
    #[arg(short, long)]
    data_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let data_file = cli.data_file.unwrap_or_else(|| AppConfig::from_env().data_file);
    let store = RecordStore::new(data_file);

    match store.load() {
        Ok(records) => {
            for record in &records {
                println!("{}", LegacyFormat::format_line(record));
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
