use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    currency::{CurrencyCode, FormatOptions, LocaleConfig},
    errors::{PricingError, Result},
    storage::JsonRateStore,
};

const TMP_SUFFIX: &str = "tmp";
const DEFAULT_BACKUP_RETENTION: usize = 5;
const DEFAULT_LOG_FILTER: &str = "mailbox_core=info";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency: CurrencyCode,
    pub locale: LocaleConfig,
    pub format: FormatOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub backup_retention: usize,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            locale: LocaleConfig::default(),
            format: FormatOptions::default(),
            data_dir: None,
            backup_retention: DEFAULT_BACKUP_RETENTION,
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let code = self.currency.as_str();
        if code.len() != 3 || !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(PricingError::ConfigError(format!(
                "currency `{}` is not an ISO 4217 code",
                code
            )));
        }
        if self.backup_retention == 0 {
            return Err(PricingError::ConfigError(
                "backup_retention must keep at least one backup".into(),
            ));
        }
        if self.locale.decimal_separator == self.locale.grouping_separator {
            return Err(PricingError::ConfigError(
                "decimal and grouping separators must differ".into(),
            ));
        }
        Ok(())
    }

    /// Opens the JSON rate store under `data_dir`, or the default data directory.
    pub fn open_rate_store(&self) -> Result<JsonRateStore> {
        JsonRateStore::new(self.data_dir.clone(), Some(self.backup_retention))
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Missing file yields the defaults; a present file must parse and validate.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data).map_err(|err| {
            PricingError::ConfigError(format!("{}: {}", self.path.display(), err))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension(format!("json.{}", TMP_SUFFIX));
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
