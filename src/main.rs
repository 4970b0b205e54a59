use std::error::Error;
use std::path::Path;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;
mod store;

use config::{AppState, Config};
use store::{AliasTable, ContentStore};

fn main() -> Result<(), Box<dyn Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    // A broken alias table degrades to an empty one; a broken content tree
    // is fatal, the server must not start with a partial store.
    let aliases = match cfg.alias.as_deref() {
        None => AliasTable::default(),
        Some(path) => AliasTable::load(path).unwrap_or_else(|e| {
            if !path.is_empty() {
                logger::log_warning(&format!("couldn't load aliases: {e}"));
            }
            AliasTable::default()
        }),
    };

    let content = ContentStore::load(Path::new(&cfg.site), &[".git"])?;
    if content.is_empty() {
        logger::log_warning(&format!("no files loaded from {}", cfg.site));
    }

    logger::log_server_start(&cfg, content.len(), aliases.len());

    let state = Arc::new(AppState::new(cfg, content, aliases));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::run(state))
}
