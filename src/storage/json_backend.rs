use chrono::Utc;
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    domain::{rate_book::CURRENT_SCHEMA_VERSION, RateBook},
    errors::{PricingError, Result},
};

use super::RateStore;

const BACKUP_EXTENSION: &str = "json";
const BACKUP_PREFIX: &str = "rates_";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S%3f";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Filesystem-backed JSON persistence for the rate book.
///
/// Each commit copies the previous `rates.json` into the backup directory,
/// stages the new book in a temporary file and renames it over the original.
#[derive(Debug, Clone)]
pub struct JsonRateStore {
    root: PathBuf,
    rates_path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonRateStore {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        ensure_dir(&root)?;
        let backups_dir = PathResolver::backup_dir_in(&root);
        ensure_dir(&backups_dir)?;
        Ok(Self {
            rates_path: PathResolver::rates_file_in(&root),
            root,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn rates_path(&self) -> &Path {
        &self.rates_path
    }

    /// Backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                if name.starts_with(BACKUP_PREFIX) {
                    entries.push(name.to_string());
                }
            }
        }
        entries.sort_by(|a, b| b.cmp(a));
        Ok(entries)
    }

    pub fn backup_path(&self, backup_name: &str) -> PathBuf {
        self.backups_dir.join(backup_name)
    }

    /// Reads a backup without making it the active book.
    pub fn load_backup(&self, backup_name: &str) -> Result<RateBook> {
        let path = self.backup_path(backup_name);
        if !path.exists() {
            return Err(PricingError::StorageError(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        load_book_from_path(&path)
    }

    fn backup_existing_file(&self) -> Result<()> {
        if !self.rates_path.exists() {
            return Ok(());
        }
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_name = format!("{}{}.{}", BACKUP_PREFIX, timestamp, BACKUP_EXTENSION);
        fs::copy(&self.rates_path, self.backups_dir.join(&backup_name))?;
        self.prune_backups()
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        for entry in backups.iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(self.backup_path(entry)) {
                warn!(backup = %entry, error = %err, "failed to prune rate book backup");
            }
        }
        Ok(())
    }
}

impl RateStore for JsonRateStore {
    fn load(&self) -> Result<RateBook> {
        if !self.rates_path.exists() {
            return Ok(RateBook::new());
        }
        load_book_from_path(&self.rates_path)
    }

    fn commit(&self, book: &RateBook) -> Result<()> {
        book.validate()?;
        self.backup_existing_file()?;
        save_book_to_path(book, &self.rates_path)?;
        debug!(
            path = %self.rates_path.display(),
            configurations = book.configurations().len(),
            "rate book committed"
        );
        Ok(())
    }
}

pub fn save_book_to_path(book: &RateBook, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(book)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_book_from_path(path: &Path) -> Result<RateBook> {
    let data = fs::read_to_string(path)?;
    let book: RateBook = serde_json::from_str(&data)?;
    if book.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(PricingError::StorageError(format!(
            "rate book `{}` is from a newer schema version",
            path.display()
        )));
    }
    book.validate()?;
    Ok(book)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeeSchedule, RateDraft};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonRateStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage =
            JsonRateStore::new(Some(temp.path().to_path_buf()), Some(2)).expect("json storage");
        (storage, temp)
    }

    fn sample_book(starts: &[(i32, u32, u32)]) -> RateBook {
        let mut book = RateBook::new();
        let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        for &(y, m, d) in starts {
            let draft = RateDraft::new(
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                FeeSchedule {
                    base_rate_three_month: dec!(51),
                    base_rate_six_month: dec!(96),
                    base_rate_twelve_month: dec!(180),
                    business_account_fee: dec!(4),
                    fourth_recipient_fee: dec!(2),
                    fifth_recipient_fee: dec!(2),
                    sixth_recipient_fee: dec!(2),
                    seventh_recipient_fee: dec!(2),
                    minor_recipient_fee: dec!(1.50),
                    key_deposit: dec!(10),
                },
            );
            book.supersede(draft, today).expect("supersede");
        }
        book
    }

    #[test]
    fn missing_file_loads_empty_book() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.load().expect("load").is_empty());
    }

    #[test]
    fn commit_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let book = sample_book(&[(2024, 1, 1), (2025, 1, 1)]);
        storage.commit(&book).expect("commit");

        let loaded = storage.load().expect("load");
        assert_eq!(loaded.configurations(), book.configurations());
        assert!(!tmp_path(storage.rates_path()).exists());
    }

    #[test]
    fn commits_keep_pruned_backups() {
        let (storage, _guard) = storage_with_temp_dir();
        for count in 1..=4 {
            let starts: Vec<_> = (0..count).map(|idx| (2021 + idx, 1, 1)).collect();
            storage.commit(&sample_book(&starts)).expect("commit");
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        let backups = storage.list_backups().expect("list backups");
        assert_eq!(backups.len(), 2);
        let newest = storage.load_backup(&backups[0]).expect("load backup");
        assert_eq!(newest.configurations().len(), 3);
    }

    #[test]
    fn corrupted_book_is_rejected_on_load() {
        let (storage, _guard) = storage_with_temp_dir();
        let book = sample_book(&[(2024, 1, 1)]);
        let mut value = serde_json::to_value(&book).expect("to value");
        let duplicate = value["configurations"][0].clone();
        value["configurations"]
            .as_array_mut()
            .expect("array")
            .push(duplicate);
        fs::write(storage.rates_path(), value.to_string()).expect("write");

        assert!(matches!(
            storage.load(),
            Err(PricingError::InvariantViolation(_))
        ));
    }

    #[test]
    fn out_of_order_overlapping_book_is_rejected_on_load() {
        let (storage, _guard) = storage_with_temp_dir();
        let book = sample_book(&[(2024, 1, 1), (2025, 1, 1), (2025, 7, 1)]);
        let mut value = serde_json::to_value(&book).expect("to value");
        let mut stray = value["configurations"][0].clone();
        stray["id"] = serde_json::json!(uuid::Uuid::new_v4());
        stray["effective"]["start"] = serde_json::json!("2024-06-01");
        stray["effective"]["end"] = serde_json::json!("2024-08-31");
        value["configurations"]
            .as_array_mut()
            .expect("array")
            .insert(2, stray);
        fs::write(storage.rates_path(), value.to_string()).expect("write");

        assert!(matches!(
            storage.load(),
            Err(PricingError::InvariantViolation(_))
        ));
    }
}
