//! # Event Logger
//!
//! Background task that logs every registry event published on the bus.

use shared_bus::{RegistryEvent, Subscription};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Spawn the logger. The task drains what is already buffered once
/// `shutdown` flips, then returns how many events it logged.
pub fn spawn_event_logger(
    mut subscription: Subscription,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut logged = 0u64;
        loop {
            tokio::select! {
                event = subscription.recv() => match event {
                    Some(event) => {
                        log_event(&event);
                        logged += 1;
                    }
                    None => {
                        debug!("Event bus closed");
                        break;
                    }
                },
                _ = shutdown.changed() => {
                    if let Ok(rest) = subscription.drain() {
                        for event in &rest {
                            log_event(event);
                        }
                        logged += rest.len() as u64;
                    }
                    debug!("Event logger shutdown signal received");
                    break;
                }
            }
        }
        if subscription.missed() > 0 {
            warn!(missed = subscription.missed(), "Event logger skipped events");
        }
        logged
    })
}

/// One log line per event.
pub fn log_event(event: &RegistryEvent) {
    match event {
        RegistryEvent::Transfer { from, to, token_id } => {
            info!(token_id, from = %from, to = %to, "Transfer");
        }
        RegistryEvent::ProjectSubmitted {
            token_id,
            owner,
            name,
            tags,
            timestamp,
        } => {
            info!(
                token_id,
                owner = %owner,
                name = %name,
                tags = ?tags,
                timestamp,
                "ProjectSubmitted"
            );
        }
        RegistryEvent::ProjectUpvoted {
            token_id,
            voter,
            vote_count,
        } => {
            info!(token_id, voter = %voter, vote_count, "ProjectUpvoted");
        }
        RegistryEvent::FileHashStored {
            token_id,
            owner,
            file_hash,
        } => {
            info!(token_id, owner = %owner, file_hash = %file_hash, "FileHashStored");
        }
        RegistryEvent::VerifiedIssuerUpdated { issuer, verified } => {
            info!(issuer = %issuer, verified, "VerifiedIssuerUpdated");
        }
    }
}
