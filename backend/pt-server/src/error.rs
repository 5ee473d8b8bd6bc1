use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] pt_config::ConfigError),

    #[error("Storage error: {0}")]
    Store(#[from] pt_store::StoreError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("Server error: {message}")]
    Serve { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
