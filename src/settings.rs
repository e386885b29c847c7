use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_data_dir_string")]
    pub data_dir: String,
    /// Named vendor keyword lists used by `report group`.
    #[serde(default = "default_keyword_groups")]
    pub keyword_groups: BTreeMap<String, Vec<String>>,
}

const FOOD_KEYWORDS: &[&str] = &[
    "subway", "popeyes", "sunset", "dairy queen", "tim hortons", "wendy's", "famous wok",
    "lcbo/rao", "cafe", "boston", "roxbury", "chicken", "swiss", "bulk", "mcdonald's", "coke",
    "bitter end", "starbucks", "domino's", "harveys", "valens", "wayback", "hasty", "panera",
    "settlers", "twice", "montana's", "keg", "collins", "ada*vending", "willie's", "big bear",
    "parkside", "ichiki", "rockton berry", "foodland", "jax sweet", "mr gao", "arby's",
    "sports bar", "kfc", "beaner munky", "chungchun rice", "brant county", "dominos",
    "yogurtys froyo", "dyments farm", "sobeys", "willie dog", "mcmaster hospit", "m m bar",
    "thirsty cactus", "marcy's berries",
];

const STORE_KEYWORDS: &[&str] = &[
    "dollarama", "shoppers", "staples", "galaxy", "indigo", "flying", "urban", "rockton",
    "ibowl", "archies",
];

fn default_keyword_groups() -> BTreeMap<String, Vec<String>> {
    [("food", FOOD_KEYWORDS), ("store", STORE_KEYWORDS)]
        .into_iter()
        .map(|(name, words)| {
            (name.to_string(), words.iter().map(|w| w.to_string()).collect())
        })
        .collect()
}

fn default_data_dir_string() -> String {
    default_data_dir().to_string_lossy().to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir_string(),
            keyword_groups: default_keyword_groups(),
        }
    }
}

impl Settings {
    pub fn keyword_group(&self, name: &str) -> Result<&[String]> {
        self.keyword_groups
            .get(name)
            .map(|v| v.as_slice())
            .ok_or_else(|| LedgerError::UnknownGroup(name.to_string()))
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("ledgerline")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("ledgerline")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable settings, using defaults");
                Settings::default()
            }
        }
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| LedgerError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}

pub fn get_data_dir() -> PathBuf {
    PathBuf::from(&load_settings().data_dir)
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
