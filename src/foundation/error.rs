pub type GitnetResult<T> = Result<T, GitnetError>;

#[derive(thiserror::Error, Debug)]
pub enum GitnetError {
    /// A focus target did not resolve to a lane, contributor, commit or date.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GitnetError {
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for the recoverable focus failure kind.
    pub fn is_invalid_target(&self) -> bool {
        matches!(self, Self::InvalidTarget(_))
    }
}

impl From<serde_json::Error> for GitnetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}
