use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tango_config::Config;

/// Load the default config shipped next to the binary, if any
fn load_repo_default_config() -> anyhow::Result<Config> {
    let path = Path::new("config.json");
    if !path.exists() {
        return Ok(Config::default());
    }

    tracing::info!("Loading repo default config...");
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

fn tango_root() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Tango")
}

pub fn profiles_dir() -> PathBuf {
    tango_root().join("profiles")
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Initialize user config folders and main profile if missing
pub fn init_user_config() -> anyhow::Result<()> {
    init_user_config_in(&profiles_dir())
}

/// Load a user profile by name, defaulting to main if name not found
pub fn load_user_profile(name: &str) -> anyhow::Result<Config> {
    load_user_profile_in(&profiles_dir(), name)
}

pub(crate) fn init_user_config_in(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;

    let main_profile = dir.join("main.json");

    if !main_profile.exists() {
        // Environment values are applied after loading, never written here
        let default_config = load_repo_default_config()?;
        let profile = Profile {
            name: "main".into(),
            value: default_config,
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

pub(crate) fn load_user_profile_in(dir: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = dir.join(format!("{name}.json"));

    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    tracing::warn!("Profile {name} not found, falling back to main profile or repo default");
    let main_file = dir.join("main.json");
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        // First-run fallback to repo default
        load_repo_default_config()
    }
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)?;
    Ok(profile.value)
}
