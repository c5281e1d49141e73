//! Reading items and policy documents from disk.
//!
//! Items come as a JSON array, a single JSON object or JSONL, either from one
//! file or from every `.json`/`.jsonl` file under a directory. Policies are
//! plain text files, one document each.

use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::catalog::InventoryItem;
use crate::error::LoadError;

pub fn load_items<P: AsRef<Path>>(path: P) -> Result<Vec<InventoryItem>, LoadError> {
    let files = collect_files(path.as_ref(), &["json", "jsonl"])?;
    let mut items = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            items.extend(read_jsonl::<InventoryItem>(&file)?);
        } else {
            items.extend(read_json::<InventoryItem>(&file)?);
        }
    }
    tracing::info!(num_items = items.len(), "loaded items");
    Ok(items)
}

pub fn load_policies<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LoadError> {
    let files = collect_files(path.as_ref(), &["txt", "md"])?;
    let mut policies = Vec::with_capacity(files.len());
    for file in files {
        let text = fs::read_to_string(&file).map_err(|source| LoadError::Io { path: file.clone(), source })?;
        let text = text.trim();
        if !text.is_empty() {
            policies.push(text.to_string());
        }
    }
    tracing::info!(num_policies = policies.len(), "loaded policies");
    Ok(policies)
}

/// `path` itself when it is a file, else matching files below it in path order.
fn collect_files(path: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, LoadError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(LoadError::Missing(path.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|source| LoadError::Walk { path: path.to_path_buf(), source })?;
        let p = entry.path();
        if !p.is_file() {
            continue;
        }
        if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
            if extensions.contains(&ext) {
                files.push(p.to_path_buf());
            }
        }
    }
    Ok(files)
}

fn read_jsonl<T: DeserializeOwned>(file: &Path) -> Result<Vec<T>, LoadError> {
    let f = File::open(file).map_err(|source| LoadError::Io { path: file.to_path_buf(), source })?;
    let reader = BufReader::new(f);
    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io { path: file.to_path_buf(), source })?;
        if line.trim().is_empty() {
            continue;
        }
        let value = serde_json::from_str(&line).map_err(|source| LoadError::JsonLine {
            path: file.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        out.push(value);
    }
    Ok(out)
}

fn read_json<T: DeserializeOwned>(file: &Path) -> Result<Vec<T>, LoadError> {
    let f = File::open(file).map_err(|source| LoadError::Io { path: file.to_path_buf(), source })?;
    let json_err = |source| LoadError::Json { path: file.to_path_buf(), source };
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f)).map_err(json_err)?;
    match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(json_err))
            .collect(),
        // One row; scalars fail deserialization.
        single => Ok(vec![serde_json::from_value(single).map_err(json_err)?]),
    }
}
