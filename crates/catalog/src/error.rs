use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("El parámetro {0} es requerido")]
    MissingParameter(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
