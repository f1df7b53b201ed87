use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Could not fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Could not read {url}. HTTP status: {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown product id: {0}")]
    UnknownProduct(String),

    #[error("Watch error: {0}")]
    Watch(String),
}

impl From<calamine::Error> for CatalogError {
    fn from(e: calamine::Error) -> Self {
        CatalogError::Workbook(e.to_string())
    }
}
