#[derive(Debug)]
pub enum ConfigError {
    Io { operation: &'static str, source: std::io::Error },
    Serialization(String),
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { operation, source } => {
                write!(f, "Failed to {} config file: {}", operation, source)
            }
            ConfigError::Serialization(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(e) => write!(f, "Config validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
