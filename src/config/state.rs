// Shared application state
// Built once at startup, then read-only for the life of the process

use crate::config::Config;
use crate::store::{AliasTable, ContentStore};

/// Immutable per-process state shared by every connection task.
///
/// Both tables are fully populated before the first request is accepted and
/// are never mutated afterwards, so no locking is needed around them.
pub struct AppState {
    pub content: ContentStore,
    pub aliases: AliasTable,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, content: ContentStore, aliases: AliasTable) -> Self {
        Self {
            content,
            aliases,
            config,
        }
    }
}
