/// Core error type.
///
/// Adapter crates map their specific errors into this type so handlers can
/// treat every outbound failure the same way (log it, send one reply).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
