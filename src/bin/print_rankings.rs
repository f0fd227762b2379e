use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use hobby_horse_ranking::config::AppConfig;
use hobby_horse_ranking::modules::helpers::ranking::RankingHelper;
use hobby_horse_ranking::modules::helpers::time::TimeHelper;
use hobby_horse_ranking::modules::models::competitor::{Category, RunNumber};
use hobby_horse_ranking::modules::models::store::RecordStore;

#[derive(Parser, Debug)]
#[command(name = "print_rankings")]
#[command(about = "Print the ranking of one category, or of all categories", long_about = None)]
struct Cli {
    /// Category to print: A, B or Open
    category: Option<Category>,

    /// Record file to read (defaults to DATA_FILE)
    #[arg(short, long)]
    data_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }

    let categories = match cli.category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    let records = match RecordStore::new(config.data_file.clone()).load() {
        Ok(records) => records,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", config.heading());
    for category in categories {
        println!();
        println!("Category {}", category);
        println!("{:>4}  {:<24} {:<24} {:>13} {:>13}", "Rank", "Name", "Horse", "Run 1", "Run 2");

        for ranked in RankingHelper::rank(&records, category) {
            let run = |run_number: RunNumber| {
                let run = ranked.record.run(run_number);
                let marker = if ranked.best.run == run_number { "*" } else { " " };
                format!("{}{} +{}", marker, TimeHelper::format_time(run.time), run.penalty)
            };

            println!(
                "{:>4}  {:<24} {:<24} {:>13} {:>13}",
                ranked.rank,
                ranked.record.name,
                ranked.record.horse,
                run(RunNumber::One),
                run(RunNumber::Two)
            );
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_category_argument() {
        let cli = Cli::try_parse_from(["print_rankings", "Open"]).unwrap();
        assert_eq!(cli.category, Some(Category::Open));
        assert!(cli.data_file.is_none());

        let cli = Cli::try_parse_from(["print_rankings", "--data-file", "event.jsonl"]).unwrap();
        assert_eq!(cli.category, None);
        assert_eq!(cli.data_file, Some(PathBuf::from("event.jsonl")));
    }

    #[test]
    fn test_help_and_unknown_category() {
        let help = Cli::try_parse_from(["print_rankings", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        let unknown = Cli::try_parse_from(["print_rankings", "C"]).unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::ValueValidation);
    }
}
