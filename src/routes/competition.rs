use log::{error, info, warn};
use rocket::form::Form;
use rocket::http::Status;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{get, post, FromForm, State};
use rocket_dyn_templates::Template;

use crate::config::AppConfig;
use crate::errors::MutationError;
use crate::macros::store_error_handeler::store_handle_error_http;
use crate::modules::helpers::ranking::RankingHelper;
use crate::modules::helpers::time::TimeHelper;
use crate::modules::models::competitor::{Category, CompetitorFields, RunNumber, RunResult};
use crate::modules::models::store::RecordStore;
use crate::{
    TemplateDataCategory, TemplateDataFlash, TemplateDataIndex, TemplateDataPrint, TemplateDataRow,
};

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/***** PAGES *****/

/// # the main page
/// one ranked table per category, the form to add runs and the edit dialog
#[get("/")]
pub fn index(
    store: &State<RecordStore>,
    config: &State<AppConfig>,
    flash: Option<FlashMessage<'_>>,
) -> Result<Template, Status> {
    let records = store_handle_error_http!(store.load(), "routes/competition:index", "loading competitors");

    let categories = Category::ALL
        .iter()
        .map(|category| TemplateDataCategory {
            name: category.to_string(),
            rows: RankingHelper::rank(&records, *category)
                .iter()
                .map(TemplateDataRow::from)
                .collect(),
        })
        .collect();

    Ok(Template::render(
        "index",
        TemplateDataIndex {
            heading: config.heading(),
            flash: flash.map(|flash| TemplateDataFlash {
                kind: flash.kind().to_string(),
                message: flash.message().to_string(),
            }),
            categories,
        },
    ))
}

/// # printable results of a single category
#[get("/print/<category>")]
pub fn print(
    category: &str,
    store: &State<RecordStore>,
    config: &State<AppConfig>,
) -> Result<Template, Status> {
    let category: Category = match category.parse() {
        Ok(category) => category,
        Err(error) => {
            warn!(target: "routes/competition:print", "{}", error);
            return Err(Status::NotFound);
        }
    };

    let ranked = store_handle_error_http!(store.rank(category), "routes/competition:print", format!("ranking category {}", category));

    Ok(Template::render(
        "print",
        TemplateDataPrint {
            heading: config.heading(),
            category: category.to_string(),
            rows: ranked.iter().map(TemplateDataRow::from).collect(),
        },
    ))
}

/***** MODIFY COMPETITORS *****/

/// # save a single run
/// the competitor is created when the name, horse and category combination is new
#[post("/add-run", data = "<run>")]
pub fn add_run(run: Form<AddRunFormData>, store: &State<RecordStore>) -> Result<Flash<Redirect>, Status> {
    let run = run.into_inner();
    let result = RunResult::new(
        TimeHelper::time_from_parts(
            TimeHelper::coerce_f64("minutes", &run.minutes),
            TimeHelper::coerce_f64("seconds", &run.seconds),
            TimeHelper::coerce_f64("millis", &run.millis),
        ),
        TimeHelper::coerce_penalty("penalty", &run.penalty),
    );

    let id = store_handle_error_http!(
        store.add_or_update_run(&run.name, &run.horse, run.category, run.run_number, result),
        "routes/competition:add_run",
        "saving run"
    );
    info!(target: "routes/competition:add_run", "run {} saved for competitor {}", run.run_number.number(), id);

    Ok(Flash::success(
        Redirect::to("/"),
        format!(
            "Run {} saved for {} on {}: {} +{}",
            run.run_number.number(),
            run.name,
            run.horse,
            TimeHelper::format_time(result.time),
            result.penalty
        ),
    ))
}

/// # replace all fields of a competitor
#[post("/edit", data = "<form>")]
pub fn edit(form: Form<EditFormData>, store: &State<RecordStore>) -> Result<Flash<Redirect>, Status> {
    let form = form.into_inner();
    let id = form.id;
    let fields = form.into_fields();
    let name = fields.name.clone();

    match store.edit(id, fields) {
        Ok(()) => Ok(Flash::success(Redirect::to("/"), format!("Saved {}", name))),
        Err(MutationError::NotFound { .. }) => {
            warn!(target: "routes/competition:edit", "tried editing unknown competitor {}", id);
            Ok(Flash::warning(Redirect::to("/"), "Competitor not found"))
        }
        Err(error) => {
            error!(target: "routes/competition:edit", "Error editing competitor {}. (error: {})", id, error);
            Err(Status::InternalServerError)
        }
    }
}

/// # delete a competitor
#[post("/delete", data = "<form>")]
pub fn delete(form: Form<DeleteFormData>, store: &State<RecordStore>) -> Result<Flash<Redirect>, Status> {
    let id = form.id;
    match store.delete(id) {
        Ok(removed) => Ok(Flash::success(
            Redirect::to("/"),
            format!("Deleted {} on {}", removed.name, removed.horse),
        )),
        Err(MutationError::NotFound { .. }) => {
            warn!(target: "routes/competition:delete", "tried deleting unknown competitor {}", id);
            Ok(Flash::warning(Redirect::to("/"), "Competitor not found"))
        }
        Err(error) => {
            error!(target: "routes/competition:delete", "Error deleting competitor {}. (error: {})", id, error);
            Err(Status::InternalServerError)
        }
    }
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

/// # a run typed into the add form
/// the number fields are kept as text, anything unreadable counts as 0
#[derive(FromForm)]
pub struct AddRunFormData {
    pub name: String,
    pub horse: String,
    pub category: Category,
    #[field(name = "runNumber")]
    pub run_number: RunNumber,
    #[field(default = String::new())]
    pub minutes: String,
    #[field(default = String::new())]
    pub seconds: String,
    #[field(default = String::new())]
    pub millis: String,
    #[field(default = String::new())]
    pub penalty: String,
}

/// # the edit dialog
/// `m`, `s` and `ms` are minutes, seconds and milliseconds, `p` is the penalty
#[derive(FromForm)]
pub struct EditFormData {
    pub id: u64,
    pub name: String,
    pub horse: String,
    pub category: Category,
    #[field(default = String::new())]
    pub m1: String,
    #[field(default = String::new())]
    pub s1: String,
    #[field(default = String::new())]
    pub ms1: String,
    #[field(default = String::new())]
    pub p1: String,
    #[field(default = String::new())]
    pub m2: String,
    #[field(default = String::new())]
    pub s2: String,
    #[field(default = String::new())]
    pub ms2: String,
    #[field(default = String::new())]
    pub p2: String,
}

impl EditFormData {
    pub fn into_fields(self) -> CompetitorFields {
        let run1 = RunResult::new(
            TimeHelper::time_from_parts(
                TimeHelper::coerce_f64("m1", &self.m1),
                TimeHelper::coerce_f64("s1", &self.s1),
                TimeHelper::coerce_f64("ms1", &self.ms1),
            ),
            TimeHelper::coerce_penalty("p1", &self.p1),
        );
        let run2 = RunResult::new(
            TimeHelper::time_from_parts(
                TimeHelper::coerce_f64("m2", &self.m2),
                TimeHelper::coerce_f64("s2", &self.s2),
                TimeHelper::coerce_f64("ms2", &self.ms2),
            ),
            TimeHelper::coerce_penalty("p2", &self.p2),
        );

        CompetitorFields {
            name: self.name,
            horse: self.horse,
            category: self.category,
            run1,
            run2,
        }
    }
}

#[derive(FromForm)]
pub struct DeleteFormData {
    pub id: u64,
}
