//! End-to-end pipeline: run every stage of the stage table, in order,
//! against one data directory.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use invtag_shared::Result;

use crate::stages::{STAGES, StageSpec};
use crate::tagger::{self, TagOutcome};

/// Configuration for a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the master table and the reference exports.
    pub data_dir: PathBuf,
    /// Master table file name inside `data_dir`.
    pub table_file: String,
}

impl PipelineConfig {
    /// Path of the master table.
    pub fn table_path(&self) -> PathBuf {
        self.data_dir.join(&self.table_file)
    }

    /// Path of a stage's reference export.
    pub fn reference_path(&self, stage: &StageSpec) -> PathBuf {
        self.data_dir.join(stage.reference_file)
    }
}

/// Result of a full pipeline run.
#[derive(Debug)]
pub struct PipelineResult {
    /// Per-stage outcomes, in execution order.
    pub outcomes: Vec<TagOutcome>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when a stage starts.
    fn stage_started(&self, stage: &StageSpec, current: usize, total: usize);
    /// Called when a stage finishes.
    fn stage_finished(&self, stage: &StageSpec, outcome: &TagOutcome);
    /// Called when the whole pipeline completes.
    fn done(&self, result: &PipelineResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn stage_started(&self, _stage: &StageSpec, _current: usize, _total: usize) {}
    fn stage_finished(&self, _stage: &StageSpec, _outcome: &TagOutcome) {}
    fn done(&self, _result: &PipelineResult) {}
}

/// Run every stage in order against the configured data directory.
///
/// Aborts on the first failing stage. Columns written by earlier stages are
/// already persisted at that point and are left in place.
#[instrument(skip_all, fields(data_dir = %config.data_dir.display()))]
pub fn run_pipeline(
    config: &PipelineConfig,
    progress: &dyn ProgressReporter,
) -> Result<PipelineResult> {
    let start = Instant::now();
    let table_path = config.table_path();

    info!(table = %table_path.display(), stages = STAGES.len(), "starting pipeline");

    let total = STAGES.len();
    let mut outcomes = Vec::with_capacity(total);

    for (i, stage) in STAGES.iter().enumerate() {
        progress.stage_started(stage, i + 1, total);
        let outcome = tagger::tag(stage, &table_path, &config.reference_path(stage))?;
        progress.stage_finished(stage, &outcome);
        outcomes.push(outcome);
    }

    let result = PipelineResult {
        outcomes,
        elapsed: start.elapsed(),
    };
    progress.done(&result);

    info!(
        stages = result.outcomes.len(),
        elapsed_ms = result.elapsed.as_millis(),
        "pipeline complete"
    );

    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use invtag_shared::InvtagError;
    use invtag_table::Table;

    fn temp_data_dir() -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("invtag-pipeline-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn seed_master(dir: &Path) -> PipelineConfig {
        std::fs::write(
            dir.join("020_all.csv"),
            "Computer Name\tOS\nhost-a\tlinux\nhost-b\twindows\n",
        )
        .unwrap();
        PipelineConfig {
            data_dir: dir.to_path_buf(),
            table_file: "020_all.csv".to_string(),
        }
    }

    fn seed_references(dir: &Path) {
        for stage in STAGES {
            let content = if stage.name == "not-reporting" {
                "Computer Name\nhost-a\n"
            } else {
                "Computer Name\nhost-b\n"
            };
            std::fs::write(dir.join(stage.reference_file), content).unwrap();
        }
    }

    #[test]
    fn runs_all_stages_and_chains_column_positions() {
        let dir = temp_data_dir();
        let config = seed_master(&dir);
        seed_references(&dir);

        let result = run_pipeline(&config, &SilentProgress).unwrap();
        assert_eq!(result.outcomes.len(), STAGES.len());
        assert!(result.outcomes.iter().all(|o| o.updated));

        let table = Table::load(&config.table_path()).unwrap();
        assert_eq!(table.column_index("Computer Name"), Some(0));
        for (i, stage) in STAGES.iter().enumerate() {
            assert_eq!(table.column_index(stage.column), Some(i + 1), "{}", stage.column);
        }
        // The pre-existing OS column ends up behind the status block.
        assert_eq!(table.column_index("OS"), Some(STAGES.len() + 1));

        let row_a = &table.data_rows()[0];
        assert_eq!(row_a[0], "host-a");
        assert_eq!(row_a[1], "Not Reporting");
        assert_eq!(row_a[2], "Not in CMDB");
        assert!(row_a[3..=10].iter().all(|v| v == "NO"));

        let row_b = &table.data_rows()[1];
        assert_eq!(row_b[1], "Reporting");
        assert_eq!(row_b[2], "In CMDB");
        assert!(row_b[3..=10].iter().all(|v| v == "YES"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn running_the_pipeline_twice_is_byte_identical() {
        let dir = temp_data_dir();
        let config = seed_master(&dir);
        seed_references(&dir);

        run_pipeline(&config, &SilentProgress).unwrap();
        let first = std::fs::read(config.table_path()).unwrap();
        run_pipeline(&config, &SilentProgress).unwrap();
        let second = std::fs::read(config.table_path()).unwrap();
        assert_eq!(first, second);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn aborts_on_first_failure_and_keeps_earlier_columns() {
        let dir = temp_data_dir();
        let config = seed_master(&dir);
        seed_references(&dir);
        std::fs::remove_file(dir.join("001_Delayed Data Upload.csv")).unwrap();

        let err = run_pipeline(&config, &SilentProgress).unwrap_err();
        assert!(matches!(err, InvtagError::NotFound { .. }));

        let table = Table::load(&config.table_path()).unwrap();
        assert!(table.column_index("Not reporting to BigFix").is_some());
        assert!(table.column_index("CMDB Status").is_some());
        assert!(table.column_index("Delayed Data Upload").is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_master_table_runs_to_completion_without_writes() {
        let dir = temp_data_dir();
        let config = seed_master(&dir);
        std::fs::write(config.table_path(), "").unwrap();
        seed_references(&dir);

        let result = run_pipeline(&config, &SilentProgress).unwrap();
        assert!(result.outcomes.iter().all(|o| !o.updated));
        assert_eq!(std::fs::read_to_string(config.table_path()).unwrap(), "");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
