/// Failures surfaced to callers of the simulation core.
///
/// Degenerate value ranges and path sets too short to draw are not errors:
/// the renderer absorbs them and returns flattened or empty output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("malformed record {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
