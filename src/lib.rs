use rocket::fs::{relative, FileServer};
use rocket::{routes, Build, Rocket};
use rocket_dyn_templates::Template;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::modules::helpers::handelbars::format_penalty::FormatPenaltyHelper;
use crate::modules::helpers::handelbars::format_time::FormatTimeHelper;
use crate::modules::helpers::ranking::RankedCompetitor;
use crate::modules::models::competitor::RunNumber;
use crate::modules::models::store::RecordStore;

pub mod config;
pub mod errors;
pub mod modules;
pub(crate) mod macros {
    pub mod store_error_handeler;
}
pub mod routes {
    pub mod competition;
    pub mod api {
        pub mod competitor;
    }
}

/// # build the web application
/// the store is created from `config.data_file`, nothing is read until the first request.
pub fn build_rocket(config: AppConfig) -> Rocket<Build> {
    let store = RecordStore::new(config.data_file.clone());

    rocket::build()
        .manage(store)
        .manage(config)
        .attach(Template::custom(|engines| {
            engines.handlebars.register_helper("formatTime", Box::new(FormatTimeHelper));
            engines.handlebars.register_helper("formatPenalty", Box::new(FormatPenaltyHelper));
            engines.handlebars.set_strict_mode(true);
        }))
        .mount(
            "/",
            routes![
                routes::competition::index,
                routes::competition::add_run,
                routes::competition::edit,
                routes::competition::delete,
                routes::competition::print,
                routes::api::competitor::get_one,
            ],
        )
        .mount("/static", FileServer::from(relative!("static")))
}

#[derive(Clone, Serialize, PartialEq, Deserialize, Debug)]
pub struct TemplateDataIndex {
    pub heading: String,
    pub flash: Option<TemplateDataFlash>,
    pub categories: Vec<TemplateDataCategory>,
}

#[derive(Clone, Serialize, PartialEq, Deserialize, Debug)]
pub struct TemplateDataPrint {
    pub heading: String,
    pub category: String,
    pub rows: Vec<TemplateDataRow>,
}

#[derive(Clone, Serialize, PartialEq, Deserialize, Debug)]
pub struct TemplateDataFlash {
    pub kind: String,
    pub message: String,
}

#[derive(Clone, Serialize, PartialEq, Deserialize, Debug)]
pub struct TemplateDataCategory {
    pub name: String,
    pub rows: Vec<TemplateDataRow>,
}

#[derive(Clone, Serialize, PartialEq, Deserialize, Debug)]
pub struct TemplateDataRow {
    pub id: u64,
    pub rank: usize,
    pub name: String,
    pub horse: String,
    pub run1: TemplateDataRun,
    pub run2: TemplateDataRun,
}

#[derive(Clone, Serialize, PartialEq, Deserialize, Debug)]
pub struct TemplateDataRun {
    pub time: f64,
    pub penalty: u32,
    pub best: bool,
}

impl From<&RankedCompetitor> for TemplateDataRow {
    fn from(ranked: &RankedCompetitor) -> Self {
        let record = &ranked.record;
        TemplateDataRow {
            id: record.id,
            rank: ranked.rank,
            name: record.name.clone(),
            horse: record.horse.clone(),
            run1: TemplateDataRun {
                time: record.run1.time,
                penalty: record.run1.penalty,
                best: ranked.best.run == RunNumber::One,
            },
            run2: TemplateDataRun {
                time: record.run2.time,
                penalty: record.run2.penalty,
                best: ranked.best.run == RunNumber::Two,
            },
        }
    }
}
