use std::fs;
use std::path::Path;

use log::{info, warn};
use snafu::ResultExt;

use crate::errors::{LegacyError, LegacyLineSnafu, LegacyReadSnafu, UnknownCategoryError};
use crate::modules::helpers::time::TimeHelper;
use crate::modules::models::competitor::{
    Category, CompetitorFields, CompetitorList, CompetitorRecord, RunNumber, RunResult,
};

/// # the old comma separated record format
/// `name,horse,category,run1.time,run1.penalty,run2.time,run2.penalty`
///
/// there is no escaping, so names containing a comma do not survive an export. Numbers that are
/// missing or can not be read are 0.
pub struct LegacyFormat {}

impl LegacyFormat {
    /// # parse one line of a legacy file
    pub fn parse_line(line: &str) -> Result<CompetitorFields, UnknownCategoryError> {
        let mut parts = line.split(',');
        let mut next = || parts.next().unwrap_or_default();

        let name = next().to_string();
        let horse = next().to_string();
        let category: Category = next().parse()?;
        let run1 = RunResult::new(LegacyFormat::time(next()), LegacyFormat::penalty(next()));
        let run2 = RunResult::new(LegacyFormat::time(next()), LegacyFormat::penalty(next()));

        Ok(CompetitorFields {
            name,
            horse,
            category,
            run1,
            run2,
        })
    }

    /// # format a competitor as a legacy line
    pub fn format_line(record: &CompetitorRecord) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            record.name,
            record.horse,
            record.category,
            record.run1.time,
            record.run1.penalty,
            record.run2.time,
            record.run2.penalty
        )
    }

    /// # read a whole legacy file
    /// lines with an unknown category are skipped
    pub fn read_file(path: &Path) -> Result<Vec<CompetitorFields>, LegacyError> {
        let content = fs::read_to_string(path).context(LegacyReadSnafu { path })?;

        let mut competitors = Vec::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match LegacyFormat::parse_line(line).context(LegacyLineSnafu { line: i + 1 }) {
                Ok(fields) => competitors.push(fields),
                Err(error) => {
                    warn!(target: "models/legacy:read_file", "skipping line of {}: {}", path.display(), error);
                }
            }
        }

        Ok(competitors)
    }

    /// # merge imported competitors into the stored list
    /// competitors are matched on (name, horse, category) like a submitted run, so importing the
    /// same file twice does not create duplicates.
    ///
    /// ## Returns
    /// * `usize` - the amount of competitors that did not exist before
    pub fn import(list: &mut CompetitorList, imported: Vec<CompetitorFields>) -> usize {
        let before = list.records.len();

        for fields in imported {
            for run_number in [RunNumber::One, RunNumber::Two] {
                let result = match run_number {
                    RunNumber::One => fields.run1,
                    RunNumber::Two => fields.run2,
                };
                list.add_or_update_run(
                    &fields.name,
                    &fields.horse,
                    fields.category,
                    run_number,
                    result,
                );
            }
        }

        let created = list.records.len() - before;
        info!(target: "models/legacy:import", "imported {} new competitors", created);
        created
    }

    fn time(value: &str) -> f64 {
        match value.trim().parse::<f64>() {
            Ok(time) if time.is_finite() && time > 0.0 => time,
            _ => 0.0,
        }
    }

    fn penalty(value: &str) -> u32 {
        TimeHelper::parse_penalty(value).unwrap_or(0)
    }
}
