use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;

use crate::config::Config;
use crate::store::kv::KeyValueStore;
use crate::store::schema::{
    EXPORT_VERSION, ExportData, HISTORY_KEY, PROFILE_KEY, decode_history, decode_profile,
    encode_history, encode_profile,
};

/// File-backed store: each key lives in `<base_dir>/<key>.json`.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(default_data_dir())
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("creating data dir {}", base_dir.display()))?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    /// Bundle config, profile and history into one exportable document.
    pub fn export_all(&self, config: &Config) -> ExportData {
        let profile = decode_profile(self.get(PROFILE_KEY).as_deref()).into_value();
        let history = decode_history(self.get(HISTORY_KEY).as_deref()).into_value();
        ExportData {
            pitchside_export_version: EXPORT_VERSION,
            exported_at: Utc::now(),
            config: config.clone(),
            profile,
            history,
        }
    }

    pub fn write_export(&self, config: &Config, path: &Path) -> Result<()> {
        let data = self.export_all(config);
        let json = serde_json::to_string_pretty(&data)?;
        fs::write(path, json).with_context(|| format!("writing export {}", path.display()))?;
        Ok(())
    }

    /// Replace stored profile and history with the contents of an export.
    ///
    /// Both blobs are encoded before anything is written, so a bad payload
    /// leaves the store untouched.
    pub fn import_all(&mut self, data: &ExportData) -> Result<()> {
        if data.pitchside_export_version != EXPORT_VERSION {
            bail!(
                "Unsupported export version: {} (expected {})",
                data.pitchside_export_version,
                EXPORT_VERSION
            );
        }
        let profile = encode_profile(&data.profile)?;
        let history = encode_history(&data.history)?;
        self.set(PROFILE_KEY, &profile)?;
        self.set(HISTORY_KEY, &history)?;
        Ok(())
    }

    pub fn read_import(&mut self, path: &Path) -> Result<ExportData> {
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let data: ExportData = serde_json::from_str(&content)
            .with_context(|| format!("parsing export {}", path.display()))?;
        self.import_all(&data)?;
        Ok(data)
    }
}

impl KeyValueStore for JsonStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.file_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.file_path(key);
        let tmp_path = path.with_extension("json.tmp");

        if let Err(e) = write_and_swap(&tmp_path, &path, value) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e).with_context(|| format!("writing {}", path.display()));
        }
        Ok(())
    }
}

fn write_and_swap(tmp_path: &Path, path: &Path, value: &str) -> io::Result<()> {
    let mut file = fs::File::create(tmp_path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()?;
    fs::rename(tmp_path, path)
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pitchside")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::Level;
    use crate::engine::history::CompletionHistory;
    use crate::session::profile::Profile;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    fn sample_export() -> ExportData {
        let mut history = CompletionHistory::new();
        history.record(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(), true);
        ExportData {
            pitchside_export_version: EXPORT_VERSION,
            exported_at: Utc::now(),
            config: Config::default(),
            profile: Profile {
                level: Level::Advanced,
                ..Profile::default()
            },
            history,
        }
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let (_dir, store) = make_test_store();
        assert!(store.get(PROFILE_KEY).is_none());
    }

    #[test]
    fn test_set_writes_file_and_leaves_no_tmp() {
        let (dir, mut store) = make_test_store();
        store.set(HISTORY_KEY, "{}").unwrap();
        assert_eq!(store.get(HISTORY_KEY).as_deref(), Some("{}"));
        assert!(dir.path().join("trainingHistory.json").exists());

        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }

    #[test]
    fn test_round_trip_export_import() {
        let (_dir, mut store) = make_test_store();
        store.import_all(&sample_export()).unwrap();

        let export = store.export_all(&Config::default());
        assert_eq!(export.pitchside_export_version, EXPORT_VERSION);
        assert_eq!(export.profile.level, Level::Advanced);
        assert_eq!(export.history.len(), 1);

        let (_dir2, mut store2) = make_test_store();
        store2.import_all(&export).unwrap();
        let again = store2.export_all(&Config::default());
        assert_eq!(again.profile, export.profile);
        assert_eq!(again.history, export.history);
    }

    #[test]
    fn test_version_rejection() {
        let (_dir, mut store) = make_test_store();
        let mut export = sample_export();
        export.pitchside_export_version = 99;

        let result = store.import_all(&export);
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Unsupported export version"));
        assert!(err_msg.contains("99"));
        assert!(store.get(PROFILE_KEY).is_none());
    }

    #[test]
    fn test_export_file_roundtrip() {
        let (dir, mut store) = make_test_store();
        store.import_all(&sample_export()).unwrap();
        let path = dir.path().join("backup.json");
        store.write_export(&Config::default(), &path).unwrap();

        let (_dir2, mut store2) = make_test_store();
        let data = store2.read_import(&path).unwrap();
        assert_eq!(data.profile.level, Level::Advanced);
        assert!(store2.get(HISTORY_KEY).is_some());
    }

    #[test]
    fn test_export_with_corrupt_files_uses_defaults() {
        let (_dir, mut store) = make_test_store();
        store.set(PROFILE_KEY, "{not json").unwrap();
        store.set(HISTORY_KEY, "42").unwrap();
        let export = store.export_all(&Config::default());
        assert_eq!(export.profile, Profile::default());
        assert!(export.history.is_empty());
    }

    #[test]
    fn test_failed_write_removes_tmp_file() {
        let (dir, mut store) = make_test_store();
        // A directory in the target's place makes the final rename fail.
        let target = dir.path().join("trainingHistory.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let err = store.set(HISTORY_KEY, "{}").unwrap_err();
        assert!(err.to_string().contains("trainingHistory.json"));
        assert!(!dir.path().join("trainingHistory.json.tmp").exists());
        assert!(target.is_dir());
    }
}
