use log::info;
use rocket::{launch, Build, Rocket};

use hobby_horse_ranking::build_rocket;
use hobby_horse_ranking::config::AppConfig;
use hobby_horse_ranking::modules::helpers::logging::setup_logging;

#[launch]
fn rocket() -> Rocket<Build> {
    let config = AppConfig::from_env();
    setup_logging(&config).expect("Failed to setup logging");

    info!(target: "main", "using record file {}", config.data_file.display());

    // start the webserver
    build_rocket(config)
}
