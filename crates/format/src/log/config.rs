//! Writer configuration.

/// When the writer asks the sink to persist data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Sync after the header and after every block.
    ///
    /// For files this is one `fdatasync` per snapshot.
    Always,

    /// Sync only when the writer is closed.
    #[default]
    OnClose,
}

impl SyncMode {
    /// Parse a mode name (`always` / `on-close`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "always" => Some(SyncMode::Always),
            "on-close" | "onclose" => Some(SyncMode::OnClose),
            _ => None,
        }
    }
}

/// Log writer configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WriterConfig {
    /// Sync policy (default: `OnClose`).
    pub sync: SyncMode,

    /// Creation time to record in the header.
    ///
    /// `None` (the default) uses the wall clock at open time.
    pub created_at_unix_seconds: Option<u64>,
}

impl WriterConfig {
    /// Create a new writer configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set sync mode (builder pattern).
    pub fn with_sync(mut self, sync: SyncMode) -> Self {
        self.sync = sync;
        self
    }

    /// Pin the header creation time (builder pattern).
    pub fn with_created_at(mut self, created_at_unix_seconds: u64) -> Self {
        self.created_at_unix_seconds = Some(created_at_unix_seconds);
        self
    }

    /// Create a configuration for tests: sync every block, fixed creation time.
    pub fn for_testing() -> Self {
        WriterConfig {
            sync: SyncMode::Always,
            created_at_unix_seconds: Some(1_700_000_000),
        }
    }
}
