use std::fmt;

// === StoreError ===

/// Errors from the durable key/value store.
#[derive(Debug)]
pub enum StoreError {
    /// The storage backend failed.
    Backend(String),
    /// A stored value could not be serialized or deserialized.
    Serialization(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "Store backend error: {}", msg),
            StoreError::Serialization(msg) => {
                write!(f, "Store serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StoreError {}

// === BackupError ===

/// Errors related to window backup staging operations.
#[derive(Debug)]
pub enum BackupError {
    /// Durable store operation failed.
    StoreError(String),
    /// Failed to serialize or deserialize staged backup data.
    SerializationError(String),
}

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupError::StoreError(msg) => write!(f, "Backup store error: {}", msg),
            BackupError::SerializationError(msg) => {
                write!(f, "Backup serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for BackupError {}

// === SessionError ===

/// Errors related to session repository operations.
#[derive(Debug)]
pub enum SessionError {
    /// Durable store operation failed.
    StoreError(String),
    /// Failed to serialize or deserialize session data.
    SerializationError(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::StoreError(msg) => write!(f, "Session store error: {}", msg),
            SessionError::SerializationError(msg) => {
                write!(f, "Session serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SessionError {}

// === NoteError ===

/// Errors related to note operations.
#[derive(Debug)]
pub enum NoteError {
    /// Durable store operation failed.
    StoreError(String),
    /// Failed to serialize or deserialize note data.
    SerializationError(String),
}

impl fmt::Display for NoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteError::StoreError(msg) => write!(f, "Note store error: {}", msg),
            NoteError::SerializationError(msg) => {
                write!(f, "Note serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for NoteError {}

// === RecoveryError ===

/// Errors related to startup recovery.
#[derive(Debug)]
pub enum RecoveryError {
    /// Failed to read or clear the staged backups.
    BackupStore(String),
    /// Failed to persist a promoted session.
    SessionStore(String),
}

impl fmt::Display for RecoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryError::BackupStore(msg) => {
                write!(f, "Recovery backup store error: {}", msg)
            }
            RecoveryError::SessionStore(msg) => {
                write!(f, "Recovery session store error: {}", msg)
            }
        }
    }
}

impl std::error::Error for RecoveryError {}

// === LifecycleError ===

/// Errors related to window close handling.
#[derive(Debug)]
pub enum LifecycleError {
    /// Failed to read or clear the window's staged backup.
    BackupStore(String),
    /// Failed to persist the promoted session.
    SessionStore(String),
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::BackupStore(msg) => {
                write!(f, "Lifecycle backup store error: {}", msg)
            }
            LifecycleError::SessionStore(msg) => {
                write!(f, "Lifecycle session store error: {}", msg)
            }
        }
    }
}

impl std::error::Error for LifecycleError {}

// === HostError ===

/// Errors from the host browser's window enumeration.
#[derive(Debug)]
pub enum HostError {
    /// The host could not be queried.
    Unavailable(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Unavailable(msg) => {
                write!(f, "Host enumeration unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for HostError {}
