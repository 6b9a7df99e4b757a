use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{Employee, LastAction};
use crate::utils::age_display;

const EMPLOYEES_SLOT: &str = "employees";
const LAST_ACTION_SLOT: &str = "lastAction";

/// A slot's contents together with when the file was last written.
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn age_display(&self) -> String {
        age_display(self.cached_at, Utc::now())
    }
}

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory: {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    /// Read a slot. `Ok(None)` when the file does not exist; an error when it
    /// cannot be read or parsed.
    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let data: T = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        let cached_at = std::fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        Ok(Some(CachedData { data, cached_at }))
    }

    fn save<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.cache_path(name);
        let contents = serde_json::to_string_pretty(data)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write cache file: {}", name))?;
        debug!(slot = name, "Cache slot written");
        Ok(())
    }

    pub fn load_employees(&self) -> Result<Option<CachedData<Vec<Employee>>>> {
        self.load(EMPLOYEES_SLOT)
    }

    pub fn save_employees(&self, employees: &[Employee]) -> Result<()> {
        self.save(EMPLOYEES_SLOT, employees)
    }

    pub fn load_last_action(&self) -> Result<Option<CachedData<LastAction>>> {
        self.load(LAST_ACTION_SLOT)
    }

    pub fn save_last_action(&self, action: &LastAction) -> Result<()> {
        self.save(LAST_ACTION_SLOT, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeId;

    fn manager() -> (tempfile::TempDir, CacheManager) {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = CacheManager::new(dir.path().join("staffbook")).expect("cache");
        (dir, cache)
    }

    fn employee(id: &str, name: &str) -> Employee {
        Employee {
            id: Some(EmployeeId::from(id)),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            ..Employee::default()
        }
    }

    #[test]
    fn test_missing_slots_read_as_none() {
        let (_dir, cache) = manager();
        assert!(cache.load_employees().expect("load").is_none());
        assert!(cache.load_last_action().expect("load").is_none());
    }

    #[test]
    fn test_employees_slot_overwritten() {
        let (_dir, cache) = manager();
        cache
            .save_employees(&[employee("1", "Ada"), employee("2", "Grace")])
            .expect("save");
        cache.save_employees(&[employee("3", "Linus")]).expect("save");

        let cached = cache.load_employees().expect("load").expect("present");
        assert_eq!(cached.data.len(), 1);
        assert_eq!(cached.data[0].name, "Linus");
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn test_employees_slot_is_a_plain_array() {
        let (_dir, cache) = manager();
        cache.save_employees(&[employee("1", "Ada")]).expect("save");

        let raw = std::fs::read_to_string(cache.cache_dir().join("employees.json")).expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert!(value.is_array());
        assert_eq!(value[0]["id"], "1");
    }

    #[test]
    fn test_last_action_slot() {
        let (_dir, cache) = manager();
        cache
            .save_last_action(&LastAction::deleted(EmployeeId::from("9")))
            .expect("save");

        let cached = cache.load_last_action().expect("load").expect("present");
        assert!(matches!(cached.data, LastAction::Delete { ref employee_id, .. } if employee_id.as_str() == "9"));
        assert!(cache.cache_dir().join("lastAction.json").exists());
    }

    #[test]
    fn test_corrupt_slot_is_an_error() {
        let (_dir, cache) = manager();
        std::fs::write(cache.cache_dir().join("employees.json"), "[{\"id\":").expect("write");
        assert!(cache.load_employees().is_err());
    }
}
