/// Convenience result type used across rollscene.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by builder and surface APIs.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Type key not registered as an element kind.
    #[error("unknown element type: '{0}'")]
    UnknownType(String),

    /// An element with this id is already registered.
    #[error("duplicate element id: '{0}'")]
    DuplicateId(String),

    /// No element registered under this id.
    #[error("element not found: '{0}'")]
    NotFound(String),

    /// Invalid config object, id, or hierarchy change.
    #[error("validation error: {0}")]
    Validation(String),

    /// Surface creation or rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::UnknownType`] value.
    pub fn unknown_type(key: impl Into<String>) -> Self {
        Self::UnknownType(key.into())
    }

    /// Build a [`SceneError::DuplicateId`] value.
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }

    /// Build a [`SceneError::NotFound`] value.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Return `true` for [`SceneError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
