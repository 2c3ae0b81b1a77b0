//! Error types
//!
//! The engine itself never fails; these cover catalog validation and the
//! loaders around it.

use thiserror::Error;

/// A developer-authored catalog that cannot be used
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("catalog has no packages")]
    Empty,

    #[error("package name is empty")]
    EmptyPackageName,

    #[error("duplicate package '{0}'")]
    DuplicatePackage(String),

    #[error("package '{0}' has no components")]
    NoComponents(String),

    #[error("package '{package}' repeats component '{component}'")]
    DuplicateComponent { package: String, component: String },

    #[error("component '{package}.{component}' lists no tags")]
    NoTags { package: String, component: String },

    #[error("component '{package}.{component}' has invalid min_required {value}")]
    InvalidMinRequired { package: String, component: String, value: f64 },

    #[error("component '{package}.{component}' has invalid weight {value}")]
    InvalidWeight { package: String, component: String, value: f64 },
}

#[derive(Debug, Error)]
pub enum SynergyError {
    #[error("invalid package catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type SynergyResult<T> = Result<T, SynergyError>;

/// Read and deserialize a JSON file
pub fn read_json_file<T: serde::de::DeserializeOwned>(path: &str) -> SynergyResult<T> {
    let raw = std::fs::read_to_string(path).map_err(|source| SynergyError::Io {
        path: path.to_string(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| SynergyError::Json {
        path: path.to_string(),
        source,
    })
}
