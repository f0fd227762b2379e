use std::cmp::Ordering;

use crate::modules::models::competitor::{Category, CompetitorRecord, RunNumber, RunResult};

/// # the score of a run
/// fewer penalties always win, the time only breaks ties between equal penalties.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Score {
    pub penalty: u32,
    pub time: f64,
}

impl Score {
    pub fn of(run: &RunResult) -> Score {
        Score {
            penalty: run.penalty,
            time: run.time,
        }
    }

    pub fn compare(&self, other: &Score) -> Ordering {
        self.penalty
            .cmp(&other.penalty)
            .then_with(|| self.time.total_cmp(&other.time))
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct BestRun {
    pub run: RunNumber,
    pub score: Score,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RankedCompetitor {
    pub rank: usize,
    pub record: CompetitorRecord,
    pub best: BestRun,
}

pub struct RankingHelper {}

impl RankingHelper {
    /// # select the scoring run of a competitor
    /// run 1 wins when run 2 was not ridden, when it has fewer penalties, or when the penalties
    /// are equal and its time is lower or equal. Otherwise run 2 wins if it was ridden.
    ///
    /// ## Returns
    /// * `None` - when neither run has a time, the competitor is not ranked
    pub fn best_run(record: &CompetitorRecord) -> Option<BestRun> {
        let run1 = &record.run1;
        let run2 = &record.run2;

        let run1_wins = run1.is_valid()
            && (!run2.is_valid()
                || run1.penalty < run2.penalty
                || (run1.penalty == run2.penalty && run1.time <= run2.time));

        if run1_wins {
            Some(BestRun {
                run: RunNumber::One,
                score: Score::of(run1),
            })
        } else if run2.is_valid() {
            Some(BestRun {
                run: RunNumber::Two,
                score: Score::of(run2),
            })
        } else {
            None
        }
    }

    /// # rank the competitors of a category
    /// competitors without a valid run are left out. Equal scores keep the stored order and get
    /// consecutive ranks, ranks are never shared.
    ///
    /// ## Arguments
    /// * `records` - all stored competitors, in stored order
    /// * `category` - the category to rank
    ///
    /// ## Returns
    /// * `Vec<RankedCompetitor>` - the ranked competitors, best first, ranks starting at 1
    pub fn rank(records: &[CompetitorRecord], category: Category) -> Vec<RankedCompetitor> {
        let mut scored: Vec<(&CompetitorRecord, BestRun)> = records
            .iter()
            .filter(|record| record.category == category)
            .filter_map(|record| RankingHelper::best_run(record).map(|best| (record, best)))
            .collect();

        // sort_by is stable, which keeps the stored order for equal scores
        scored.sort_by(|(_, a), (_, b)| a.score.compare(&b.score));

        scored
            .into_iter()
            .enumerate()
            .map(|(i, (record, best))| RankedCompetitor {
                rank: i + 1,
                record: record.clone(),
                best,
            })
            .collect()
    }
}
