use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::{data_file_path, HIGH_SCORE_CAPACITY};
use crate::error::ScoreError;

const SCORE_FILE_NAME: &str = "high_scores.txt";

/// Anything that can take a final score and hand back the updated top list.
pub trait ScoreRecorder {
    /// Records `score` and returns the resulting top list, highest first.
    fn record(&mut self, score: u32) -> Result<Vec<u32>, ScoreError>;
}

/// Top-10 list persisted as one integer per line.
///
/// `record` is a read-modify-write of the file and is not reentrant; it
/// takes `&mut self` so a store value has a single writer at a time.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform-correct data location.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored scores in file order.
    ///
    /// A missing file is an empty list. An unreadable file is logged and
    /// also treated as empty. Parsing stops at the first token that is not
    /// an integer.
    #[must_use]
    pub fn load(&self) -> Vec<u32> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => parse_scores(&raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(
                    "ignoring unreadable score file {}: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    fn save(&self, scores: &[u32]) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ScoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents: String = scores.iter().map(|score| format!("{score}\n")).collect();
        fs::write(&self.path, contents).map_err(|source| ScoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl ScoreRecorder for ScoreStore {
    fn record(&mut self, score: u32) -> Result<Vec<u32>, ScoreError> {
        let scores = merge_top_scores(self.load(), score);
        self.save(&scores)?;
        info!(
            "recorded score {score} to {}, top={scores:?}",
            self.path.display()
        );
        Ok(scores)
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    data_file_path(SCORE_FILE_NAME)
}

/// Appends `score`, sorts descending and keeps the best entries.
#[must_use]
pub fn merge_top_scores(mut scores: Vec<u32>, score: u32) -> Vec<u32> {
    scores.push(score);
    scores.sort_unstable_by(|a, b| b.cmp(a));
    scores.truncate(HIGH_SCORE_CAPACITY);
    scores
}

fn parse_scores(raw: &str) -> Vec<u32> {
    raw.split_whitespace()
        .map_while(|token| token.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{merge_top_scores, parse_scores, ScoreRecorder, ScoreStore};

    #[test]
    fn record_puts_new_best_first() {
        let path = unique_test_path("new_best");
        write_file(&path, "50\n40\n30\n20\n10\n");
        let mut store = ScoreStore::new(&path);

        let scores = store.record(999).expect("record should succeed");

        assert_eq!(scores, vec![999, 50, 40, 30, 20, 10]);
        let on_disk = fs::read_to_string(&path).expect("score file should exist");
        assert_eq!(on_disk, "999\n50\n40\n30\n20\n10\n");
        cleanup_test_path(&path);
    }

    #[test]
    fn record_keeps_only_ten_entries() {
        let path = unique_test_path("truncate");
        let prior: String = (1..=10).map(|n| format!("{}\n", n * 100)).collect();
        write_file(&path, &prior);
        let mut store = ScoreStore::new(&path);

        let scores = store.record(5).expect("record should succeed");

        assert_eq!(scores.len(), 10);
        assert_eq!(scores.first(), Some(&1000));
        assert_eq!(scores.last(), Some(&100));
        assert_eq!(store.load(), scores);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_starts_empty() {
        let path = unique_test_path("missing");
        let mut store = ScoreStore::new(&path);

        assert!(store.load().is_empty());
        let scores = store.record(30).expect("record should create the file");

        assert_eq!(scores, vec![30]);
        cleanup_test_path(&path);
    }

    #[test]
    fn unsorted_whitespace_separated_file_is_accepted() {
        let path = unique_test_path("unsorted");
        write_file(&path, "10 70\n\n40\t20");
        let mut store = ScoreStore::new(&path);

        let scores = store.record(0).expect("record should succeed");

        assert_eq!(scores, vec![70, 40, 20, 10, 0]);
        cleanup_test_path(&path);
    }

    #[test]
    fn unwritable_location_surfaces_an_error() {
        let dir = unique_test_path("dir_in_the_way");
        fs::create_dir_all(&dir).expect("test dir should be creatable");
        let mut store = ScoreStore::new(&dir);

        assert!(store.record(10).is_err());
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn parsing_stops_at_first_non_integer() {
        assert_eq!(parse_scores("30\n20\nabc\n10\n"), vec![30, 20]);
        assert!(parse_scores("").is_empty());
    }

    #[test]
    fn merge_keeps_duplicates() {
        assert_eq!(merge_top_scores(vec![20, 10], 20), vec![20, 20, 10]);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("toroid-snake-score-tests")
            .join(format!("{label}-{nanos}.txt"))
    }

    fn write_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
    }
}
