use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PosterError {
    #[error("failed to read {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("input is not valid nested JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn read_tree_source(path: &Path) -> Result<String, PosterError> {
    fs::read_to_string(path).map_err(|source| PosterError::Load {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_tree_source(raw: &str) -> Result<Value, PosterError> {
    Ok(serde_json::from_str(raw)?)
}
