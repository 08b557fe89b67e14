//! Offline Collision Check Binary
//!
//! Replays one save against a JSON tree snapshot and prints the nodes as the
//! host would persist them. Useful for checking a marked-type configuration
//! against a copy of a real content tree before deploying it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin dev-check -- fixtures/tree.json fixtures/saving.json
//!
//! # With a configuration file and verbose logging
//! NAMESCOPE_CONFIG=fixtures/namescope.toml RUST_LOG=debug \
//!     cargo run --bin dev-check -- fixtures/tree.json fixtures/saving.json
//! ```
//!
//! # Environment Variables
//!
//! - `NAMESCOPE_CONFIG`: Path to a TOML configuration (default: built-in defaults)
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use namescope_core::collision::VariantOutcome;
use namescope_core::notification::{ContentSavingHandler, SavingNotification, StaticTreeAccessor};
use namescope_core::{MemoryTree, SavingNode, ScopeConfig};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let (Some(tree_path), Some(saving_path)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: dev-check <tree.json> <saving.json>");
    };

    let config = match env::var("NAMESCOPE_CONFIG") {
        Ok(path) => ScopeConfig::load(&PathBuf::from(path))?,
        Err(_) => ScopeConfig::default(),
    };
    tracing::info!(
        "Marked types: {:?}, walk limit {}",
        config.marked_types,
        config.max_walk_iterations
    );

    let tree = MemoryTree::load(&PathBuf::from(&tree_path))?;
    tracing::info!("Loaded {} node(s) from {}", tree.len(), tree_path);

    let saving_json = std::fs::read_to_string(&saving_path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", saving_path, e))?;
    let saved_entities: Vec<SavingNode> = serde_json::from_str(&saving_json)?;

    let handler = ContentSavingHandler::new(StaticTreeAccessor::new(Arc::new(tree)), Arc::new(config));
    let mut notification = SavingNotification::new(saved_entities);
    let report = handler.handle_with_report(&mut notification)?;

    for node in &report.nodes {
        for (variant, outcome) in &node.outcomes {
            match outcome {
                VariantOutcome::Renamed { from, to } => {
                    tracing::info!("{:?} [{}]: '{}' -> '{}'", node.node_id, variant, from, to)
                }
                VariantOutcome::Skipped(reason) => {
                    tracing::warn!("{:?} [{}]: skipped ({})", node.node_id, variant, reason)
                }
                VariantOutcome::Unchanged => {}
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&notification.saved_entities)?);
    Ok(())
}
