use configparser::ini::Ini;
use log::{info, warn};
use once_cell::sync::Lazy;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

const PROFILE_DIR: &str = "save/profiles/00000000";
const PROFILE_INI_PATH: &str = "save/profiles/00000000/profile.ini";

#[derive(Debug, Clone, Default)]
pub struct Profile {
    /// Name submitted with high scores. May be empty; the leaderboard layer
    /// substitutes its fallback.
    pub username: String,
}

// Global static for the current profile.
static PROFILE: Lazy<Mutex<Profile>> = Lazy::new(|| Mutex::new(Profile::default()));

/// Creates the default profile directory and .ini file if they don't exist.
fn create_default_files() -> Result<(), std::io::Error> {
    info!("Profile file not found, creating defaults in '{}'.", PROFILE_DIR);
    fs::create_dir_all(PROFILE_DIR)?;

    if !Path::new(PROFILE_INI_PATH).exists() {
        let mut profile_conf = Ini::new();
        profile_conf.set("player", "Username", Some("".to_string()));
        profile_conf.write(PROFILE_INI_PATH)?;
    }

    Ok(())
}

pub fn load() {
    if !Path::new(PROFILE_INI_PATH).exists() {
        if let Err(e) = create_default_files() {
            warn!("Failed to create default profile file: {}", e);
            // Proceed with default struct values.
            return;
        }
    }

    let mut profile = PROFILE.lock().unwrap();

    let mut profile_conf = Ini::new();
    if profile_conf.load(PROFILE_INI_PATH).is_ok() {
        profile.username = profile_conf
            .get("player", "Username")
            .unwrap_or_default();
    } else {
        warn!("Failed to load '{}', using default profile.", PROFILE_INI_PATH);
    }
}

/// Returns a copy of the currently loaded profile data.
pub fn get() -> Profile {
    PROFILE.lock().unwrap().clone()
}

pub fn set_username(username: &str) {
    PROFILE.lock().unwrap().username = username.to_string();
}

/// Persists the current profile back to disk.
pub fn save() {
    let profile = get();
    if let Err(e) = fs::create_dir_all(PROFILE_DIR) {
        warn!("Failed to create '{}': {}", PROFILE_DIR, e);
        return;
    }
    let mut profile_conf = Ini::new();
    profile_conf.set("player", "Username", Some(profile.username));
    if let Err(e) = profile_conf.write(PROFILE_INI_PATH) {
        warn!("Failed to write '{}': {}", PROFILE_INI_PATH, e);
    }
}
