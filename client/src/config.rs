//! Controller tuning: locate the assets folder and load `controller.ron` from it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use shared::{ConfigError, ControllerConfig};

/// Config file name inside the assets folder
pub const CONFIG_FILE: &str = "controller.ron";

/// Assets folder resolved at startup
#[derive(Resource, Clone, Debug)]
pub struct AssetDir(pub PathBuf);

/// Get the asset path - for bundled macOS apps, use path relative to executable
pub fn get_asset_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let bundled_assets = exe_dir.join("assets");
            if bundled_assets.exists() {
                return bundled_assets;
            }
        }
    }
    // Fall back to default "assets" folder (for development)
    PathBuf::from("assets")
}

/// Read the controller config. A missing file yields the defaults; anything else that
/// goes wrong is an error.
pub fn read_controller_config(path: &Path) -> Result<ControllerConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => ControllerConfig::from_ron_str(&text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("No controller config at {:?}, using defaults", path);
            Ok(ControllerConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Startup: insert the [`ControllerConfig`] resource. Fails the app on a bad config.
pub fn load_controller_config(mut commands: Commands, asset_dir: Res<AssetDir>) -> Result {
    let path = asset_dir.0.join(CONFIG_FILE);
    let config = read_controller_config(&path)?;
    info!("Loaded controller config from {:?}", path);
    debug!("{:?}", config);
    commands.insert_resource(config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("platformer-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = read_controller_config(&scratch_file("missing.ron")).unwrap();
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let path = scratch_file("overrides.ron");
        fs::write(&path, "(jump: (max_height: 3.0), look: (speed_multiplier: 2.0))").unwrap();
        let config = read_controller_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.jump.max_height, 3.0);
        assert_eq!(config.look.speed_multiplier, 2.0);
        assert_eq!(config.movement, shared::MovementConfig::default());
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let path = scratch_file("bad.ron");
        fs::write(&path, "(jump: (max_height: oops))").unwrap();
        let result = read_controller_config(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_shipped_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join(CONFIG_FILE);
        let config = read_controller_config(&path).unwrap();
        assert_eq!(config, ControllerConfig::default());
    }
}
