//! YAML persistence for the catalog.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::model::Catalog;

/// Errors reading or writing a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("read catalog {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse catalog {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("serialize catalog: {0}")]
    Serialize(#[source] serde_yaml::Error),
    #[error("write catalog {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("channel {url} already exists in {}", .path.display())]
    DuplicateChannel { url: String, path: PathBuf },
}

/// Loads a catalog document. An empty file is an empty catalog.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let data = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&data).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_catalog(data: &str) -> Result<Catalog, serde_yaml::Error> {
    if data.trim().is_empty() {
        return Ok(Catalog::default());
    }
    let catalog: Option<Catalog> = serde_yaml::from_str(data)?;
    Ok(catalog.unwrap_or_default())
}

/// Writes the catalog, creating parent directories as needed.
pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let yaml = serde_yaml::to_string(catalog).map_err(CatalogError::Serialize)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CatalogError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, yaml).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })
}
