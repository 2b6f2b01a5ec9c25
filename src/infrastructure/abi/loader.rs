//! ABI file loader - builds an [`AbiRegistry`] from ABI JSON on disk

use std::fs;
use std::path::{Path, PathBuf};

use alloy_json_abi::{JsonAbi, Param};
use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::domain::abi::{AbiRegistry, FunctionSignature, ParamSpec};

/// Skip files larger than this
const MAX_ABI_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Loads raw ABI arrays and compiler artifacts (`{"abi": [...]}`)
pub struct AbiLoader;

impl AbiLoader {
    /// Load every configured path; files and directories may be mixed
    pub fn load_paths(paths: &[PathBuf]) -> AbiRegistry {
        let mut registry = AbiRegistry::new();
        for path in paths {
            registry.merge(Self::load_path(path));
        }
        tracing::debug!(functions = registry.len(), errors = registry.errors.len(), "loaded ABIs");
        registry
    }

    /// Load one file, or every JSON file below a directory
    pub fn load_path(root: impl AsRef<Path>) -> AbiRegistry {
        let root = root.as_ref();
        let mut registry = AbiRegistry::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !Self::is_ignored_dir(e.path()))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    registry.errors.push(err.to_string());
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|s| s.to_str()) != Some("json")
            {
                continue;
            }
            if entry.metadata().map(|m| m.len() > MAX_ABI_FILE_BYTES).unwrap_or(true) {
                continue;
            }

            if let Err(err) = Self::load_file(path, &mut registry) {
                registry.errors.push(format!("{}: {:#}", path.display(), err));
            }
        }

        registry
    }

    /// Load a single ABI file into `registry`
    pub fn load_file(path: &Path, registry: &mut AbiRegistry) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        Self::load_str(&content, path, registry)
    }

    /// Parse ABI JSON text; documents without an ABI are skipped silently
    pub fn load_str(content: &str, source: &Path, registry: &mut AbiRegistry) -> Result<()> {
        let value: serde_json::Value = serde_json::from_str(content).context("invalid JSON")?;

        let abi_value = if value.is_array() {
            value
        } else if let Some(abi) = value.get("abi") {
            abi.clone()
        } else {
            return Ok(());
        };

        let abi: JsonAbi = serde_json::from_value(abi_value).context("invalid ABI")?;
        Self::load_abi(&abi, source, registry);
        Ok(())
    }

    /// Register every function of a parsed ABI
    pub fn load_abi(abi: &JsonAbi, source: &Path, registry: &mut AbiRegistry) {
        for function in abi.functions() {
            registry.insert(FunctionSignature {
                selector: function.selector().0,
                name: function.name.clone(),
                signature: function.signature(),
                inputs: function.inputs.iter().map(Self::param_spec).collect(),
                source: source.to_path_buf(),
            });
        }
    }

    fn param_spec(param: &Param) -> ParamSpec {
        ParamSpec::new(param.name.clone(), param.selector_type().into_owned())
            .with_components(param.components.iter().map(Self::param_spec).collect())
    }

    fn is_ignored_dir(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| matches!(name, ".git" | "target" | "node_modules"))
            .unwrap_or(false)
    }
}
