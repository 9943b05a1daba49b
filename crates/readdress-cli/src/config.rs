//! Persistence of the saved configuration record.
//!
//! One JSON file under the platform config directory holds the last
//! successful run's settings. Absence or a parse failure is treated as "no
//! saved config", never an error; the record is rewritten after every
//! successful replace/mask and deleted on `config clear`.

use std::path::PathBuf;

use readdress::SavedConfig;

/// Environment override for the configuration directory, used by tests and
/// sandboxed environments.
const CONFIG_DIR_ENV: &str = "READDRESS_CONFIG_DIR";

/// Path of the configuration file, if a config directory is available.
pub fn config_path() -> Option<PathBuf> {
    let base = match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::config_dir()?.join("readdress"),
    };
    Some(base.join("config.json"))
}

/// Load the saved configuration. Any failure (no config dir, missing file,
/// unreadable file, incompatible shape) is "no saved config".
pub fn load() -> Option<SavedConfig> {
    let path = config_path()?;
    let data = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

/// Persist the configuration, creating the directory if needed.
pub fn save(config: &SavedConfig) -> std::io::Result<()> {
    let Some(path) = config_path() else {
        return Err(std::io::Error::other("no config directory available"));
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    std::fs::write(path, json)
}

/// Delete the saved configuration. Returns whether a record existed.
pub fn clear() -> std::io::Result<bool> {
    let Some(path) = config_path() else {
        return Ok(false);
    };
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readdress::ReplaceMode;

    // Serialize access to the process-wide env var across tests.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn with_temp_config_dir<T>(f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = std::env::temp_dir().join(format!(
            "readdress-config-test-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        // Safety: guarded by ENV_LOCK, no concurrent env access in tests.
        unsafe { std::env::set_var(CONFIG_DIR_ENV, &dir) };
        let result = f();
        unsafe { std::env::remove_var(CONFIG_DIR_ENV) };
        let _ = std::fs::remove_dir_all(&dir);
        result
    }

    #[test]
    fn load_without_a_record_is_none() {
        with_temp_config_dir(|| {
            assert!(load().is_none());
        });
    }

    #[test]
    fn save_then_load_round_trips() {
        with_temp_config_dir(|| {
            let config = SavedConfig {
                mode: ReplaceMode::Auto,
                search_text: "123 Old Street".to_string(),
                new_address: "456 New Avenue".to_string(),
                manual_selection: None,
            };
            save(&config).unwrap();
            assert_eq!(load(), Some(config));
        });
    }

    #[test]
    fn corrupt_record_loads_as_none() {
        with_temp_config_dir(|| {
            let path = config_path().unwrap();
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "{not json").unwrap();
            assert!(load().is_none());
        });
    }

    #[test]
    fn clear_reports_whether_a_record_existed() {
        with_temp_config_dir(|| {
            assert_eq!(clear().unwrap(), false);
            save(&SavedConfig::default()).unwrap();
            assert_eq!(clear().unwrap(), true);
            assert!(load().is_none());
        });
    }
}
