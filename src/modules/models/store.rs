use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use atomic_write_file::AtomicWriteFile;
use log::{debug, error, info};
use snafu::ResultExt;

use crate::errors::{
    LastIdSnafu, MutationError, ParseSnafu, ReadSnafu, SerializeSnafu, StoreError, WriteSnafu,
};
use crate::modules::helpers::ranking::{RankedCompetitor, RankingHelper};
use crate::modules::models::competitor::{
    Category, CompetitorFields, CompetitorList, CompetitorRecord, RunNumber, RunResult,
};

/// # the file all competitors are stored in
/// one json object per line, in the order the competitors were created. The whole file is read
/// for every request and rewritten for every change.
///
/// the highest id ever handed out is kept next to it in `<file>.last_id`.
pub struct RecordStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl RecordStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> RecordStore {
        RecordStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn last_id_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".last_id");
        PathBuf::from(path)
    }

    /************ GETTERS ************/
    /// # load all competitors
    /// a missing file is an empty competition
    ///
    /// ## Returns
    /// * `Vec<CompetitorRecord>` - every stored competitor in stored order
    pub fn load(&self) -> Result<Vec<CompetitorRecord>, StoreError> {
        if !self.path.exists() {
            debug!(target: "models/store:load", "{} does not exist yet", self.path.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).context(ReadSnafu { path: &self.path })?;

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str::<CompetitorRecord>(line).context(ParseSnafu {
                    path: &self.path,
                    line: i + 1,
                })
            })
            .collect()
    }

    /// # load all competitors together with the highest id handed out so far
    pub fn load_list(&self) -> Result<CompetitorList, StoreError> {
        let path = self.last_id_path();
        let last_id = if path.exists() {
            let content = fs::read_to_string(&path).context(ReadSnafu { path: &path })?;
            content.trim().parse::<u64>().context(LastIdSnafu { path: &path })?
        } else {
            0
        };

        Ok(CompetitorList::new(last_id, self.load()?))
    }

    /// # get a single competitor by id
    pub fn get(&self, id: u64) -> Result<Option<CompetitorRecord>, StoreError> {
        let records = self.load()?;
        Ok(records.into_iter().find(|record| record.id == id))
    }

    /// # rank the stored competitors of a category
    pub fn rank(&self, category: Category) -> Result<Vec<RankedCompetitor>, StoreError> {
        let records = self.load()?;
        Ok(RankingHelper::rank(&records, category))
    }

    /************ WRITERS ************/
    /// # replace the stored competitors
    /// the new file is written next to the old one and renamed over it, so a failed write
    /// leaves the previous list in place.
    pub fn save(&self, records: &[CompetitorRecord]) -> Result<(), StoreError> {
        self.create_parent_dir()?;

        let mut file = AtomicWriteFile::open(&self.path).context(WriteSnafu { path: &self.path })?;

        for record in records {
            let line = serde_json::to_string(record).context(SerializeSnafu { id: record.id })?;
            writeln!(file, "{}", line).context(WriteSnafu { path: &self.path })?;
        }

        file.commit().context(WriteSnafu { path: &self.path })?;
        debug!(target: "models/store:save", "saved {} competitors to {}", records.len(), self.path.display());

        Ok(())
    }

    /// # replace the stored competitors and the highest handed out id
    /// the id is written first, so a save that fails halfway can skip ids but never hand one
    /// out twice.
    pub fn save_list(&self, list: &CompetitorList) -> Result<(), StoreError> {
        self.create_parent_dir()?;

        let path = self.last_id_path();
        let mut file = AtomicWriteFile::open(&path).context(WriteSnafu { path: &path })?;
        writeln!(file, "{}", list.last_id).context(WriteSnafu { path: &path })?;
        file.commit().context(WriteSnafu { path: &path })?;

        self.save(&list.records)
    }

    fn create_parent_dir(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context(WriteSnafu { path: parent })?;
            }
        }
        Ok(())
    }

    /// # load, change and save the competitors while holding the store lock
    /// nothing is written when `change` fails
    pub fn update<T, E, F>(&self, change: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut CompetitorList) -> Result<T, E>,
    {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut list = self.load_list()?;
        let result = change(&mut list)?;
        self.save_list(&list)?;

        Ok(result)
    }

    /// # record a run for the (name, horse, category) combination
    ///
    /// ## Returns
    /// * `u64` - the id of the competitor the run was stored on
    pub fn add_or_update_run(
        &self,
        name: &str,
        horse: &str,
        category: Category,
        run_number: RunNumber,
        result: RunResult,
    ) -> Result<u64, StoreError> {
        self.update(|list| Ok(list.add_or_update_run(name, horse, category, run_number, result)))
    }

    /// # overwrite a competitor
    pub fn edit(&self, id: u64, fields: CompetitorFields) -> Result<(), MutationError> {
        let result = self.update(|list| list.edit(id, fields));
        match &result {
            Ok(_) => info!(target: "models/store:edit", "edited competitor {}", id),
            Err(MutationError::NotFound { .. }) => {}
            Err(error) => error!(target: "models/store:edit", "Error editing competitor {}: {}", id, error),
        }
        result
    }

    /// # delete a competitor
    pub fn delete(&self, id: u64) -> Result<CompetitorRecord, MutationError> {
        let result = self.update(|list| list.delete(id));
        match &result {
            Ok(removed) => info!(target: "models/store:delete", "deleted competitor {} ({} on {})", id, removed.name, removed.horse),
            Err(MutationError::NotFound { .. }) => {}
            Err(error) => error!(target: "models/store:delete", "Error deleting competitor {}: {}", id, error),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::tempdir;

    fn fields(name: &str) -> CompetitorFields {
        CompetitorFields {
            name: name.to_string(),
            horse: "Blaze".to_string(),
            category: Category::B,
            run1: RunResult::new(61.237, 1),
            run2: RunResult::new(0.1, 0),
        }
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("data.jsonl"));

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("nested").join("data.jsonl"));
        let records = vec![
            CompetitorRecord::new(1, fields("Anna")),
            CompetitorRecord::new(2, fields("Bea, the second")),
            CompetitorRecord::new(5, CompetitorFields {
                name: "Cleo".to_string(),
                horse: "Storm".to_string(),
                category: Category::Open,
                run1: RunResult::default(),
                run2: RunResult::new(125.999, 12),
            }),
        ];

        store.save(&records).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_corrupt_line_reports_line_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.jsonl");
        let store = RecordStore::new(&path);
        store.save(&[CompetitorRecord::new(1, fields("Anna"))]).unwrap();

        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("\nnot json\n");
        fs::write(&path, content).unwrap();

        match store.load() {
            Err(StoreError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_mutations_are_persisted() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("data.jsonl"));

        let anna = store
            .add_or_update_run("Anna", "Blaze", Category::A, RunNumber::One, RunResult::new(50.0, 0))
            .unwrap();
        let bea = store
            .add_or_update_run("Bea", "Storm", Category::A, RunNumber::One, RunResult::new(45.0, 0))
            .unwrap();
        store
            .add_or_update_run("Anna", "Blaze", Category::A, RunNumber::Two, RunResult::new(44.0, 0))
            .unwrap();

        let ranked = store.rank(Category::A).unwrap();
        assert_eq!(ranked[0].record.id, anna);
        assert_eq!(ranked[0].best.run, RunNumber::Two);

        store.delete(anna).unwrap();
        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, bea);

        store.edit(bea, fields("Bea")).unwrap();
        assert_eq!(store.get(bea).unwrap().unwrap().category, Category::B);
    }

    #[test]
    fn test_unknown_id_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.jsonl");
        let store = RecordStore::new(&path);
        store.save(&[CompetitorRecord::new(1, fields("Anna"))]).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        assert!(matches!(store.delete(9), Err(MutationError::NotFound { id: 9 })));
        assert!(matches!(store.edit(9, fields("Bea")), Err(MutationError::NotFound { id: 9 })));

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        assert!(store.get(9).unwrap().is_none());
    }

    #[test]
    fn test_deleted_id_is_not_reused_after_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.jsonl");
        let store = RecordStore::new(&path);

        store
            .add_or_update_run("Anna", "Blaze", Category::A, RunNumber::One, RunResult::new(50.0, 0))
            .unwrap();
        let cleo = store
            .add_or_update_run("Cleo", "Storm", Category::A, RunNumber::One, RunResult::new(51.0, 0))
            .unwrap();
        store.delete(cleo).unwrap();

        let dora = RecordStore::new(&path)
            .add_or_update_run("Dora", "Comet", Category::A, RunNumber::One, RunResult::new(52.0, 0))
            .unwrap();

        assert_ne!(cleo, dora);
        assert!(matches!(store.delete(cleo), Err(MutationError::NotFound { .. })));
        assert_eq!(store.get(dora).unwrap().unwrap().name, "Dora");
    }

    #[test]
    fn test_last_id_file_behind_records_is_raised() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("data.jsonl"));
        store.save(&[CompetitorRecord::new(4, fields("Anna"))]).unwrap();

        assert_eq!(store.load_list().unwrap().last_id, 4);

        fs::write(dir.path().join("data.jsonl.last_id"), "2\n").unwrap();
        assert_eq!(store.load_list().unwrap().last_id, 4);

        fs::write(dir.path().join("data.jsonl.last_id"), "many").unwrap();
        assert!(matches!(store.load_list(), Err(StoreError::LastId { .. })));
    }

    #[test]
    fn test_parallel_updates_are_not_lost() {
        let dir = tempdir().unwrap();
        let store = Arc::new(RecordStore::new(dir.path().join("data.jsonl")));

        let workers: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..10 {
                        store
                            .add_or_update_run(
                                &format!("Rider {}-{}", worker, i),
                                "Blaze",
                                Category::Open,
                                RunNumber::One,
                                RunResult::new(40.0 + i as f64, 0),
                            )
                            .unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let list = store.load_list().unwrap();
        assert_eq!(list.records.len(), 80);
        assert_eq!(list.last_id, 80);

        let mut ids: Vec<u64> = list.records.iter().map(|record| record.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 80);
    }
}
