//! Store configuration.

/// How new category ids are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// Ids come from a counter persisted in the document and are never
    /// reissued after a deletion.
    #[default]
    Monotonic,
    /// `id = number of categories + 1`.
    ///
    /// Matches the legacy id sequence exactly, but can hand out an id that
    /// is still in use after a deletion.
    CountPlusOne,
}

/// Configuration for opening a document store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Category id assignment policy.
    pub id_policy: IdPolicy,

    /// Whether to fsync every persist (file backends only).
    pub sync_on_write: bool,

    /// Whether to pretty-print the persisted document.
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            id_policy: IdPolicy::Monotonic,
            sync_on_write: true,
            pretty: true,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the category id policy.
    #[must_use]
    pub const fn id_policy(mut self, policy: IdPolicy) -> Self {
        self.id_policy = policy;
        self
    }

    /// Sets whether to fsync every persist.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Sets whether to pretty-print the persisted document.
    #[must_use]
    pub const fn pretty(mut self, value: bool) -> Self {
        self.pretty = value;
        self
    }
}
