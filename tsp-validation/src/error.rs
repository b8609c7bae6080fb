#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    DimensionMismatch {
        declared: usize,
        found: usize,
    },
    MalformedCoordinate {
        line: usize,
        content: String,
    },
    MalformedSolutionRecord {
        record: usize,
        line: usize,
        reason: String,
    },
    MissingTerminator,
    TruncatedHeader {
        expected: usize,
        found: usize,
    },
}

impl ValidationError {
    /// Malformed instances abort the whole instance, everything else only its record.
    pub fn is_instance_error(&self) -> bool {
        !matches!(self, ValidationError::MalformedSolutionRecord { .. })
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::DimensionMismatch { declared, found } => write!(
                f,
                "Header declares {} nodes but {} coordinates were read",
                declared, found
            ),
            ValidationError::MalformedCoordinate { line, content } => write!(
                f,
                "Line {}: expected '<id> <x> <y>' but found '{}'",
                line, content
            ),
            ValidationError::MalformedSolutionRecord {
                record,
                line,
                reason,
            } => write!(f, "Record {} (line {}): {}", record, line, reason),
            ValidationError::MissingTerminator => {
                write!(f, "Coordinate section is not terminated by 'EOF'")
            }
            ValidationError::TruncatedHeader { expected, found } => write!(
                f,
                "Expected {} header lines but the instance only has {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
