use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use rocket::FromFormField;
use serde::{Deserialize, Serialize};
use snafu::OptionExt;

use crate::errors::{MutationError, NotFoundSnafu, UnknownCategoryError};

/// # the competition divisions
#[derive(Serialize, Deserialize, FromFormField, PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Category {
    #[field(value = "A")]
    A,
    #[field(value = "B")]
    B,
    #[field(value = "Open")]
    Open,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::A, Category::B, Category::Open];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::A => "A",
            Category::B => "B",
            Category::Open => "Open",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategoryError {
                value: s.to_string(),
            })
    }
}

/// # which of the two runs
#[derive(FromFormField, PartialEq, Eq, Debug, Clone, Copy)]
pub enum RunNumber {
    #[field(value = "1")]
    One,
    #[field(value = "2")]
    Two,
}

impl RunNumber {
    pub fn number(self) -> u8 {
        match self {
            RunNumber::One => 1,
            RunNumber::Two => 2,
        }
    }
}

/// # a single timed attempt
/// a `time` of 0 means the run has not been ridden yet, whatever the penalty says.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Copy, Default)]
pub struct RunResult {
    pub time: f64,
    pub penalty: u32,
}

impl RunResult {
    pub fn new(time: f64, penalty: u32) -> RunResult {
        RunResult { time, penalty }
    }

    pub fn is_valid(&self) -> bool {
        self.time > 0.0
    }
}

/// # the fields a user can submit for a competitor
/// used for both creating and fully replacing a record
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct CompetitorFields {
    pub name: String,
    pub horse: String,
    pub category: Category,
    pub run1: RunResult,
    pub run2: RunResult,
}

/// # a stored competitor
/// `id` is handed out once when the record is created. Ids of deleted competitors are not handed
/// out again, see [`CompetitorList::last_id`].
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct CompetitorRecord {
    pub id: u64,
    pub name: String,
    pub horse: String,
    pub category: Category,
    pub run1: RunResult,
    pub run2: RunResult,
}

impl CompetitorRecord {
    pub fn new(id: u64, fields: CompetitorFields) -> CompetitorRecord {
        CompetitorRecord {
            id,
            name: fields.name,
            horse: fields.horse,
            category: fields.category,
            run1: fields.run1,
            run2: fields.run2,
        }
    }

    pub fn run(&self, run_number: RunNumber) -> &RunResult {
        match run_number {
            RunNumber::One => &self.run1,
            RunNumber::Two => &self.run2,
        }
    }

    fn run_mut(&mut self, run_number: RunNumber) -> &mut RunResult {
        match run_number {
            RunNumber::One => &mut self.run1,
            RunNumber::Two => &mut self.run2,
        }
    }

    fn matches(&self, name: &str, horse: &str, category: Category) -> bool {
        self.name == name && self.horse == horse && self.category == category
    }
}

/// # every competitor of the event
/// `last_id` is the highest id ever handed out, including ids of competitors that were deleted
/// since.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct CompetitorList {
    pub last_id: u64,
    pub records: Vec<CompetitorRecord>,
}

impl CompetitorList {
    /// # build a list from stored records
    /// `last_id` is raised to the highest stored id when it is behind
    pub fn new(last_id: u64, records: Vec<CompetitorRecord>) -> CompetitorList {
        let highest = records.iter().map(|record| record.id).max().unwrap_or(0);
        CompetitorList {
            last_id: last_id.max(highest),
            records,
        }
    }

    /************ GETTERS ************/
    /// # find a competitor by id
    pub fn find(&self, id: u64) -> Option<&CompetitorRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /************ MUTATIONS ************/
    /// # hand out the id for a new competitor
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    /// # record a single run
    /// looks up the competitor by the exact (name, horse, category) combination, creates it with
    /// both runs empty when it does not exist yet, and then overwrites the selected run.
    ///
    /// ## Arguments
    /// * `name` - the name of the rider
    /// * `horse` - the name of the horse
    /// * `category` - the category the pair competes in
    /// * `run_number` - the run to overwrite
    /// * `result` - the new time and penalty
    ///
    /// ## Returns
    /// * `u64` - the id of the updated or created competitor
    pub fn add_or_update_run(
        &mut self,
        name: &str,
        horse: &str,
        category: Category,
        run_number: RunNumber,
        result: RunResult,
    ) -> u64 {
        let position = match self
            .records
            .iter()
            .position(|record| record.matches(name, horse, category))
        {
            Some(position) => position,
            None => {
                let id = self.next_id();
                info!(target: "models/competitor:add_or_update_run", "new competitor {} ({} on {}, {})", id, name, horse, category);
                self.records.push(CompetitorRecord::new(
                    id,
                    CompetitorFields {
                        name: name.to_string(),
                        horse: horse.to_string(),
                        category,
                        run1: RunResult::default(),
                        run2: RunResult::default(),
                    },
                ));
                self.records.len() - 1
            }
        };

        let record = &mut self.records[position];
        *record.run_mut(run_number) = result;
        debug!(target: "models/competitor:add_or_update_run", "run {} of competitor {} set to {:?}", run_number.number(), record.id, result);

        record.id
    }

    /// # replace every field of a competitor
    /// nothing of the old record is kept apart from its id
    pub fn edit(&mut self, id: u64, fields: CompetitorFields) -> Result<(), MutationError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .context(NotFoundSnafu { id })?;

        *record = CompetitorRecord::new(id, fields);
        Ok(())
    }

    /// # remove a competitor
    ///
    /// ## Returns
    /// * `CompetitorRecord` - the removed competitor
    pub fn delete(&mut self, id: u64) -> Result<CompetitorRecord, MutationError> {
        match self.records.iter().position(|record| record.id == id) {
            Some(position) => Ok(self.records.remove(position)),
            None => NotFoundSnafu { id }.fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, category: Category) -> CompetitorFields {
        CompetitorFields {
            name: name.to_string(),
            horse: "Blaze".to_string(),
            category,
            run1: RunResult::new(61.2, 1),
            run2: RunResult::default(),
        }
    }

    #[test]
    fn test_category_parsing_is_exact() {
        assert_eq!("Open".parse::<Category>().unwrap(), Category::Open);
        assert_eq!("A".parse::<Category>().unwrap(), Category::A);
        assert!("open".parse::<Category>().is_err());
        assert!("C".parse::<Category>().is_err());
    }

    #[test]
    fn test_run_without_time_is_invalid() {
        assert!(!RunResult::new(0.0, 3).is_valid());
        assert!(RunResult::new(0.001, 0).is_valid());
    }

    #[test]
    fn test_add_run_creates_competitor_with_empty_runs() {
        let mut list = CompetitorList::default();
        let id = list.add_or_update_run("Anna", "Blaze", Category::A, RunNumber::Two, RunResult::new(42.5, 1));

        assert_eq!(id, 1);
        assert_eq!(list.records.len(), 1);
        assert_eq!(list.records[0].run1, RunResult::default());
        assert_eq!(list.records[0].run2, RunResult::new(42.5, 1));
    }

    #[test]
    fn test_add_run_updates_exact_match_only() {
        let mut list = CompetitorList::default();
        list.add_or_update_run("Anna", "Blaze", Category::A, RunNumber::One, RunResult::new(40.0, 0));
        list.add_or_update_run("Anna", "Blaze", Category::A, RunNumber::Two, RunResult::new(39.0, 2));
        list.add_or_update_run("anna", "Blaze", Category::A, RunNumber::One, RunResult::new(50.0, 0));
        list.add_or_update_run("Anna", "Blaze", Category::B, RunNumber::One, RunResult::new(51.0, 0));

        assert_eq!(list.records.len(), 3);
        assert_eq!(list.records[0].run1, RunResult::new(40.0, 0));
        assert_eq!(list.records[0].run2, RunResult::new(39.0, 2));
        assert_eq!(list.records[1].name, "anna");
        assert_eq!(list.records[2].category, Category::B);
    }

    #[test]
    fn test_edit_replaces_all_fields() {
        let mut list = CompetitorList::new(0, vec![CompetitorRecord::new(4, fields("Anna", Category::A))]);
        let replacement = CompetitorFields {
            name: "Bea".to_string(),
            horse: "Storm".to_string(),
            category: Category::Open,
            run1: RunResult::default(),
            run2: RunResult::new(33.3, 0),
        };

        list.edit(4, replacement.clone()).unwrap();

        assert_eq!(list.records[0], CompetitorRecord::new(4, replacement));
    }

    #[test]
    fn test_edit_unknown_id_is_not_found() {
        let mut list = CompetitorList::new(0, vec![CompetitorRecord::new(1, fields("Anna", Category::A))]);
        let result = list.edit(2, fields("Bea", Category::B));

        assert!(matches!(result, Err(MutationError::NotFound { id: 2 })));
        assert_eq!(list.records[0].name, "Anna");
    }

    #[test]
    fn test_delete_keeps_other_ids() {
        let mut list = CompetitorList::new(
            0,
            vec![
                CompetitorRecord::new(1, fields("Anna", Category::A)),
                CompetitorRecord::new(2, fields("Bea", Category::A)),
                CompetitorRecord::new(3, fields("Cleo", Category::A)),
            ],
        );

        let removed = list.delete(2).unwrap();

        assert_eq!(removed.name, "Bea");
        assert_eq!(list.records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(list.find(3).is_some());
        assert!(matches!(list.delete(2), Err(MutationError::NotFound { id: 2 })));
    }

    #[test]
    fn test_last_id_follows_highest_stored_id() {
        let list = CompetitorList::new(
            3,
            vec![
                CompetitorRecord::new(1, fields("Anna", Category::A)),
                CompetitorRecord::new(7, fields("Bea", Category::A)),
            ],
        );
        assert_eq!(list.last_id, 7);
        assert_eq!(CompetitorList::new(9, Vec::new()).last_id, 9);
    }

    #[test]
    fn test_deleted_id_is_not_handed_out_again() {
        let mut list = CompetitorList::default();
        list.add_or_update_run("Anna", "Blaze", Category::A, RunNumber::One, RunResult::new(40.0, 0));
        let cleo = list.add_or_update_run("Cleo", "Storm", Category::A, RunNumber::One, RunResult::new(41.0, 0));

        list.delete(cleo).unwrap();
        let dora = list.add_or_update_run("Dora", "Comet", Category::A, RunNumber::One, RunResult::new(42.0, 0));

        assert_ne!(cleo, dora);
        // a page still showing Cleo can not remove Dora
        assert!(matches!(list.delete(cleo), Err(MutationError::NotFound { .. })));
        assert_eq!(list.find(dora).unwrap().name, "Dora");
    }
}
