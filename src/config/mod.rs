use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::abi::AbiRegistry;
use crate::domain::{AddressBook, Family, TypeAndVersion};
use crate::infrastructure::{AbiLoader, ChainTable};
use crate::render::RenderConfig;

/// Extra chain selector known to the local chain table
#[derive(Debug, Clone, Deserialize)]
pub struct ChainSpec {
    pub selector: u64,
    pub name: String,
    pub family: String,
}

/// Address-book entry used for annotations
#[derive(Debug, Clone, Deserialize)]
pub struct AddressSpec {
    pub chain_selector: u64,
    pub address: String,
    pub contract_type: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chains: Vec<ChainSpec>,

    #[serde(default)]
    pub addresses: Vec<AddressSpec>,

    #[serde(default)]
    pub abi_paths: Vec<String>,

    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Built-in chains overlaid with configured ones
    pub fn chain_table(&self) -> ChainTable {
        let mut table = ChainTable::with_defaults();
        for chain in &self.chains {
            table.insert(chain.selector, chain.name.clone(), Family::from_name(&chain.family));
        }
        table
    }

    pub fn address_book(&self) -> AddressBook {
        let mut book = AddressBook::new();
        for entry in &self.addresses {
            book.insert(
                entry.chain_selector,
                entry.address.clone(),
                TypeAndVersion::new(entry.contract_type.clone(), entry.version.clone()),
            );
        }
        book
    }

    pub fn abi_paths(&self) -> Vec<PathBuf> {
        self.abi_paths.iter().map(|path| expand_home(path)).collect()
    }

    /// Functions from every configured ABI path
    pub fn abi_registry(&self) -> AbiRegistry {
        AbiLoader::load_paths(&self.abi_paths())
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    load_from(&path)
}

/// Read one config file; missing or invalid files fall back to defaults
pub fn load_from(path: &Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    match toml::from_str::<Config>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            Config::default()
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("PROPSCOPE_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("propscope").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("propscope").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "propscope", "propscope")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}
