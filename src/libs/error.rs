use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HicError {
    /// Invalid option value (e.g., a zero target cluster count)
    Config(String),
    /// Malformed input line
    Parse {
        /// The line number (1-based)
        line: usize,
        /// A human-readable message explaining the error
        message: String,
    },
    /// Broken reference between entities (e.g., a node without a sister)
    Integrity(String),
}

impl fmt::Display for HicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HicError::Config(msg) => write!(f, "Invalid option: {}", msg),
            HicError::Parse { line, message } => {
                write!(f, "Parse error at line {}: {}", line, message)
            }
            HicError::Integrity(msg) => write!(f, "Data integrity error: {}", msg),
        }
    }
}

impl std::error::Error for HicError {}
