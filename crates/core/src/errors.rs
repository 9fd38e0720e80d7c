use thiserror::Error;

/// Error type for registration and resolution in a [`Container`](crate::Container)
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Duplicated dependency name: {name}")]
    DuplicateName { name: String },

    #[error("Unknown dependency: {name}")]
    UnknownDependency { name: String },

    #[error("Circular dependency when resolving '{name}': {path}")]
    CircularDependency { name: String, path: String },

    #[error("Dependency '{name}' is not of type {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("Lock error on resource: {resource}")]
    LockError { resource: String },

    #[error("Provider error: {source}")]
    Provider {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ContainerError {
    /// Create a new invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new unknown dependency error
    pub fn unknown_dependency(name: impl Into<String>) -> Self {
        Self::UnknownDependency { name: name.into() }
    }

    /// Wrap an error raised by user provider code
    pub fn provider(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Provider {
            source: source.into(),
        }
    }

    /// Check if the error is a circular dependency error
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }

    /// Check if the error is an unknown dependency error
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::UnknownDependency { .. })
    }

    /// Check if the error is a duplicated name error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateName { .. })
    }

    /// Check if the error was raised by provider code
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }

    /// Dependency name the error refers to, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::DuplicateName { name }
            | Self::UnknownDependency { name }
            | Self::CircularDependency { name, .. }
            | Self::TypeMismatch { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_mention_name() {
        let err = ContainerError::CircularDependency {
            name: "x".to_string(),
            path: "x -> x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Circular dependency when resolving 'x': x -> x"
        );
        assert_eq!(err.name(), Some("x"));
        assert!(err.is_circular());

        let err = ContainerError::unknown_dependency("db");
        assert_eq!(err.to_string(), "Unknown dependency: db");
        assert!(err.is_unknown());
    }

    #[test]
    fn test_provider_error_keeps_source() {
        let err = ContainerError::provider("connection refused");
        assert!(err.is_provider());
        assert_eq!(err.name(), None);

        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection refused");
    }
}
