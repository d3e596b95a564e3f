use thiserror::Error;

/// Result type alias using PayError
pub type Result<T> = std::result::Result<T, PayError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Stable classification for every error the snapshot engine can produce.
/// Each kind maps to a stable error code usable for programmatic handling,
/// testing, and external reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    AlreadyExists,
    ConstraintViolation,

    // Integration/IO
    Serialization,
    Persistence,
    Io,
    Concurrency,

    // Internal
    Internal,
}

impl PayErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            PayErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            PayErrorKind::NotFound => "ERR_NOT_FOUND",
            PayErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            PayErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            PayErrorKind::Serialization => "ERR_SERIALIZATION",
            PayErrorKind::Persistence => "ERR_PERSISTENCE",
            PayErrorKind::Io => "ERR_IO",
            PayErrorKind::Concurrency => "ERR_CONCURRENCY",
            PayErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a kind for classification plus operation/entity context for
/// debugging. Constructed with the builder methods.
#[derive(Debug, Clone)]
pub struct PayError {
    kind: PayErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl PayError {
    /// Create a new error with the specified kind
    pub fn new(kind: PayErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> PayErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for PayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for PayError {}

// ========== End Error Facility ==========

/// Domain-level error taxonomy for snapshot engine operations
///
/// Validation-shaped failures are raised as `DomainError` close to where
/// they occur and converted into the canonical `PayError` at the boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Pay run not found in store
    #[error("Pay run not found: {run_id}")]
    RunNotFound { run_id: i64 },

    /// Snapshot not found in store
    #[error("Snapshot not found: {snapshot_id}")]
    SnapshotNotFound { snapshot_id: i64 },

    /// Revision not found in store
    #[error("Revision not found: {revision_id}")]
    RevisionNotFound { revision_id: i64 },

    /// Amendment not found in store
    #[error("Amendment not found: {amendment_id}")]
    AmendmentNotFound { amendment_id: i64 },

    /// Amendment already resolved (approved/rejected states are terminal)
    #[error("Amendment {amendment_id} is already {status} and cannot be resolved again")]
    AmendmentAlreadyResolved { amendment_id: i64, status: String },

    /// Stored domain blob failed to decode
    #[error("Snapshot {snapshot_id} has a malformed '{domain}' blob: {reason}")]
    MalformedBlob {
        snapshot_id: i64,
        domain: String,
        reason: String,
    },

    /// Invalid status or enum tag supplied by a caller or read from the store
    #[error("Invalid {what}: {value}")]
    InvalidTag { what: String, value: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from DomainError to the canonical PayError
impl From<DomainError> for PayError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::RunNotFound { run_id } => PayError::new(PayErrorKind::NotFound)
                .with_entity_id(run_id)
                .with_message("Pay run not found"),

            DomainError::SnapshotNotFound { snapshot_id } => PayError::new(PayErrorKind::NotFound)
                .with_entity_id(snapshot_id)
                .with_message("Snapshot not found"),

            DomainError::RevisionNotFound { revision_id } => PayError::new(PayErrorKind::NotFound)
                .with_entity_id(revision_id)
                .with_message("Revision not found"),

            DomainError::AmendmentNotFound { amendment_id } => {
                PayError::new(PayErrorKind::NotFound)
                    .with_entity_id(amendment_id)
                    .with_message("Amendment not found")
            }

            DomainError::AmendmentAlreadyResolved {
                amendment_id,
                status,
            } => PayError::new(PayErrorKind::ConstraintViolation)
                .with_entity_id(amendment_id)
                .with_message(format!("Amendment is already {}", status)),

            DomainError::MalformedBlob {
                snapshot_id,
                domain,
                reason,
            } => PayError::new(PayErrorKind::Serialization)
                .with_entity_id(snapshot_id)
                .with_message(format!("Malformed '{}' blob: {}", domain, reason)),

            DomainError::InvalidTag { what, value } => PayError::new(PayErrorKind::InvalidInput)
                .with_message(format!("Invalid {}: {}", what, value)),

            DomainError::Serialization { message } => {
                PayError::new(PayErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to DomainError
impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PayError {
    fn from(err: serde_json::Error) -> Self {
        PayError::from(DomainError::from(err))
    }
}
