//! Filesystem adapters built on `cap-std`.
//!
//! Reads and writes task record files, reads checklists, and writes the
//! dry-run directory.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
#[cfg(unix)]
use cap_std::fs::{Permissions, PermissionsExt};
use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};

use super::script::render_script;
use crate::export::{
    domain::{IssueDraft, TaskRecord},
    services::{ExportSummary, IssueManifest},
};

/// Dry-run file listing every draft as JSON.
pub const MANIFEST_FILE: &str = "issues.json";
/// Dry-run shell script replaying the export.
pub const SCRIPT_FILE: &str = "create_issues.sh";
/// Dry-run per-component summary.
pub const SUMMARY_FILE: &str = "summary.md";

/// Errors raised while reading or writing export files.
#[derive(Debug, Error)]
pub enum RecordFileError {
    /// The file or directory could not be accessed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The record file is not a valid JSON array of task records.
    #[error("invalid record file {path}: {source}")]
    Parse {
        /// Path of the record file.
        path: Utf8PathBuf,
        /// Parser error, including record validation failures.
        #[source]
        source: serde_json::Error,
    },

    /// Output could not be serialized.
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        /// Path the output was meant for.
        path: Utf8PathBuf,
        /// Serializer error.
        #[source]
        source: serde_json::Error,
    },
}

impl RecordFileError {
    fn io(path: &Utf8Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_owned(),
            source,
        }
    }
}

/// Reads a JSON array of task records.
///
/// # Errors
///
/// Returns [`RecordFileError`] if the file cannot be read or any record is
/// invalid.
pub fn read_records(path: &Utf8Path) -> Result<Vec<TaskRecord>, RecordFileError> {
    let (dir, name) = open_parent(path)?;
    let content = dir
        .read_to_string(name)
        .map_err(RecordFileError::io(path))?;
    serde_json::from_str(&content).map_err(|source| RecordFileError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Writes task records as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`RecordFileError`] if serialization or the write fails.
pub fn write_records(path: &Utf8Path, records: &[TaskRecord]) -> Result<(), RecordFileError> {
    let json = to_json(path, records)?;
    let (dir, name) = open_parent(path)?;
    dir.write(name, json).map_err(RecordFileError::io(path))
}

/// Reads a checklist, returning `None` when the file does not exist.
///
/// # Errors
///
/// Returns [`RecordFileError::Io`] for failures other than a missing file.
pub fn read_checklist(path: &Utf8Path) -> Result<Option<String>, RecordFileError> {
    let (dir, name) = open_parent(path)?;
    match dir.read_to_string(name) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path, "checklist not found, skipping");
            Ok(None)
        }
        Err(err) => Err(RecordFileError::io(path)(err)),
    }
}

/// Output directory for a dry run.
#[derive(Debug)]
pub struct DryRunDirectory {
    path: Utf8PathBuf,
    dir: Dir,
}

impl DryRunDirectory {
    /// Opens `path`, creating it and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`RecordFileError::Io`] if the directory cannot be created.
    pub fn create(path: &Utf8Path) -> Result<Self, RecordFileError> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(RecordFileError::io(path))?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(RecordFileError::io(path))?;
        Ok(Self {
            path: path.to_owned(),
            dir,
        })
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Writes the manifest, the replay script, and the summary for `drafts`.
    ///
    /// The script is made executable on Unix.
    ///
    /// # Errors
    ///
    /// Returns [`RecordFileError`] if any file cannot be written.
    pub fn write(
        &self,
        drafts: &[IssueDraft],
        clock: &impl Clock,
        repository: Option<&str>,
    ) -> Result<(), RecordFileError> {
        let manifest_path = self.path.join(MANIFEST_FILE);
        let manifest = to_json(&manifest_path, &IssueManifest::new(drafts, clock))?;
        self.dir
            .write(MANIFEST_FILE, manifest)
            .map_err(RecordFileError::io(&manifest_path))?;

        let script_path = self.path.join(SCRIPT_FILE);
        self.dir
            .write(SCRIPT_FILE, render_script(drafts, repository))
            .map_err(RecordFileError::io(&script_path))?;
        #[cfg(unix)]
        self.dir
            .set_permissions(SCRIPT_FILE, Permissions::from_mode(0o755))
            .map_err(RecordFileError::io(&script_path))?;

        let summary_path = self.path.join(SUMMARY_FILE);
        self.dir
            .write(SUMMARY_FILE, ExportSummary::from_drafts(drafts).to_markdown())
            .map_err(RecordFileError::io(&summary_path))?;

        info!(path = %self.path, issues = drafts.len(), "dry run written");
        Ok(())
    }
}

fn open_parent(path: &Utf8Path) -> Result<(Dir, &str), RecordFileError> {
    let name = path.file_name().ok_or_else(|| RecordFileError::Io {
        path: path.to_owned(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(RecordFileError::io(parent))?;
    Ok((dir, name))
}

fn to_json<T: serde::Serialize + ?Sized>(
    path: &Utf8Path,
    value: &T,
) -> Result<String, RecordFileError> {
    let mut json =
        serde_json::to_string_pretty(value).map_err(|source| RecordFileError::Serialize {
            path: path.to_owned(),
            source,
        })?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::domain::{LabelSet, TaskCategory};
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[fixture]
    fn temp_dir() -> Utf8PathBuf {
        let base = Utf8PathBuf::try_from(std::env::temp_dir()).expect("UTF-8 temp dir");
        let path = base.join(format!("checklist_issues_{}", uuid::Uuid::new_v4()));
        Dir::create_ambient_dir_all(&path, ambient_authority()).expect("create temp dir");
        path
    }

    #[rstest]
    fn records_survive_a_write_and_read(temp_dir: Utf8PathBuf) {
        let path = temp_dir.join("records.json");
        let records = vec![
            TaskRecord::new("Core", "Setup", "Add logging").expect("valid record"),
            TaskRecord::new("Core", "Testing", "Unit tests for parser")
                .expect("valid record")
                .with_labels(["parser".to_owned()]),
        ];

        write_records(&path, &records).expect("write records");

        assert_eq!(read_records(&path).expect("read records"), records);
    }

    #[rstest]
    fn invalid_record_is_reported_with_its_path(temp_dir: Utf8PathBuf) {
        let path = temp_dir.join("records.json");
        let dir = Dir::open_ambient_dir(&temp_dir, ambient_authority()).expect("open temp dir");
        dir.write(
            "records.json",
            r#"[{"component":"Core","section":"Setup","title":"  "}]"#,
        )
        .expect("write fixture");

        let err = read_records(&path).expect_err("blank title must be rejected");

        assert!(matches!(&err, RecordFileError::Parse { path: reported, .. } if *reported == path));
        assert!(err.to_string().contains("title"), "unexpected error: {err}");
    }

    #[rstest]
    fn missing_checklist_reads_as_none(temp_dir: Utf8PathBuf) {
        let path = temp_dir.join("CHECKLIST.md");
        assert!(read_checklist(&path).expect("missing file is not an error").is_none());
    }

    #[rstest]
    fn dry_run_writes_manifest_script_and_summary(temp_dir: Utf8PathBuf) {
        let output = temp_dir.join("nested").join("dry-run");
        let drafts = vec![IssueDraft::new(
            "🧪 [Core] Unit tests for parser",
            "body\n",
            LabelSet::for_component("Core"),
            "Core",
            TaskCategory::Testing,
        )];
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).single().expect("valid time"));

        let directory = DryRunDirectory::create(&output).expect("create dry-run dir");
        directory.write(&drafts, &clock, None).expect("write dry run");

        let dir = Dir::open_ambient_dir(&output, ambient_authority()).expect("open output");
        let manifest: serde_json::Value =
            serde_json::from_str(&dir.read_to_string(MANIFEST_FILE).expect("manifest"))
                .expect("manifest is JSON");
        assert_eq!(manifest["total_issues"], 1);
        assert_eq!(manifest["generated_at"], "2026-01-02T03:04:05Z");
        assert_eq!(manifest["issues"][0]["title"], "🧪 [Core] Unit tests for parser");
        assert!(manifest["issues"][0].get("component").is_none());

        let script = dir.read_to_string(SCRIPT_FILE).expect("script");
        assert!(script.contains("--title '🧪 [Core] Unit tests for parser'"));

        let summary = dir.read_to_string(SUMMARY_FILE).expect("summary");
        assert!(summary.contains("- **Core**: 1 issues\n  - testing: 1\n"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as StdPermissionsExt;
            let mode = std::fs::metadata(output.join(SCRIPT_FILE))
                .expect("script metadata")
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }
}
