use std::path::PathBuf;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// STRUCTURAL ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_ASSET_WITHOUT_BINDING: &str = "RX-ERR-ASSET-001";
pub const ERR_TAG_MISMATCH: &str = "RX-ERR-TAG-001";
pub const ERR_DYNAMIC_CLASS_LIST: &str = "RX-ERR-CLASS-001";
pub const ERR_HOOK_PATTERN: &str = "RX-ERR-HOOK-001";

/// The guarantee a structural error code protects.
pub fn guarantee_for(code: &str) -> &'static str {
    match code {
        ERR_ASSET_WITHOUT_BINDING => "Asset imports are rewritten to a single default binding.",
        ERR_TAG_MISMATCH => "Opening and closing tag names are always renamed together.",
        ERR_DYNAMIC_CLASS_LIST => {
            "Class lists are resolved to stylesheet members at conversion time."
        }
        ERR_HOOK_PATTERN => "The router hook result is bound to a single well-known identifier.",
        _ => "Unknown invariant.",
    }
}

/// A node had a shape a pass does not accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralError {
    pub code: &'static str,
    pub message: String,
    pub guarantee: &'static str,
}

impl StructuralError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        StructuralError {
            code,
            message: message.into(),
            guarantee: guarantee_for(code),
        }
    }
}

impl std::fmt::Display for StructuralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} ({})", self.code, self.message, self.guarantee)
    }
}

/// Errors that abort a conversion run. Nothing is written when one is returned.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input or output file could not be accessed
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source text is not valid JSX/TypeScript
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    /// A pass met a node shape it does not accept
    #[error("Structural error: {0}")]
    Structural(StructuralError),

    /// Configuration file or boilerplate template is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ConvertError {
    pub fn structural(code: &'static str, message: impl Into<String>) -> Self {
        ConvertError::Structural(StructuralError::new(code, message))
    }

    /// Code of the violated invariant, if this is a structural error.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ConvertError::Structural(err) => Some(err.code),
            _ => None,
        }
    }
}

impl From<StructuralError> for ConvertError {
    fn from(err: StructuralError) -> Self {
        ConvertError::Structural(err)
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
