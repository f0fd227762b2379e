use log::{debug, error};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, State};

use crate::macros::store_error_handeler::store_handle_error_http;
use crate::modules::models::competitor::CompetitorRecord;
use crate::modules::models::store::RecordStore;

/// # get a single competitor
/// used by the edit dialog to fill in the current values
#[get("/edit-json?<id>")]
pub fn get_one(id: u64, store: &State<RecordStore>) -> Result<Json<CompetitorRecord>, Status> {
    let competitor = store_handle_error_http!(store.get(id), "routes/api/competitor:get_one", format!("getting competitor {}", id));

    match competitor {
        Some(competitor) => Ok(Json(competitor)),
        None => {
            debug!(target: "routes/api/competitor:get_one", "competitor {} not found", id);
            Err(Status::NotFound)
        }
    }
}
