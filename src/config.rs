use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::domain::entities::query::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

pub const DB_PATH_VAR: &str = "LUMINARY_DB_PATH";
pub const PAGE_SIZE_VAR: &str = "LUMINARY_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub page_size: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = match lookup(DB_PATH_VAR).filter(|value| !value.trim().is_empty()) {
            Some(path) => PathBuf::from(path.trim()),
            None => default_db_path()?,
        };

        let page_size = match lookup(PAGE_SIZE_VAR) {
            Some(raw) => {
                let page_size: usize = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{PAGE_SIZE_VAR} must be a number, got `{raw}`"))?;
                if !PAGE_SIZE_OPTIONS.contains(&page_size) {
                    anyhow::bail!(
                        "{PAGE_SIZE_VAR} must be one of {PAGE_SIZE_OPTIONS:?}, got {page_size}"
                    )
                }
                page_size
            }
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self { db_path, page_size })
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("org", "luminary", "luminary")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().join("luminary.sqlite"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_override_defaults() {
        let config = AppConfig::from_lookup(|key| match key {
            DB_PATH_VAR => Some("/tmp/luminary-test.sqlite".to_string()),
            PAGE_SIZE_VAR => Some(" 20 ".to_string()),
            _ => None,
        })
        .expect("config should load");

        assert_eq!(config.db_path, PathBuf::from("/tmp/luminary-test.sqlite"));
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn bad_page_size_is_reported() {
        let zero = AppConfig::from_lookup(|key| {
            (key == PAGE_SIZE_VAR).then(|| "0".to_string())
        });
        let junk = AppConfig::from_lookup(|key| {
            (key == PAGE_SIZE_VAR).then(|| "ten".to_string())
        });
        let unlisted = AppConfig::from_lookup(|key| match key {
            DB_PATH_VAR => Some("/tmp/luminary-test.sqlite".to_string()),
            PAGE_SIZE_VAR => Some("7".to_string()),
            _ => None,
        });

        assert!(zero.is_err());
        assert!(junk.is_err());
        let message = format!("{:#}", unlisted.expect_err("7 is not offered"));
        assert!(message.contains("[5, 10, 20, 50]"), "{message}");
    }
}
