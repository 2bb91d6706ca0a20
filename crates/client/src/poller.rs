use std::{sync::Arc, time::Duration};

use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, warn};

use attendance_core::models::notification::Notification;

use crate::backend::AttendanceBackend;

/// Polls the backend for unread notifications on a fixed interval.
///
/// The latest list is published on the returned watch channel; the first fetch
/// happens immediately. A failed fetch publishes an empty list. The task ends
/// once every receiver has been dropped.
pub fn spawn_unread_poller(
    backend: Arc<dyn AttendanceBackend>,
    every: Duration,
) -> (watch::Receiver<Vec<Notification>>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(Vec::new());

    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tx.closed() => break,
                _ = interval.tick() => {}
            }

            let unread = match backend.unread_notifications().await {
                Ok(unread) => unread,
                Err(e) => {
                    warn!("Failed to fetch unread notifications: {}", e);
                    Vec::new()
                }
            };

            debug!("{} unread notifications", unread.len());
            if tx.send(unread).is_err() {
                break;
            }
        }

        debug!("Unread notification poller stopped");
    });

    (rx, handle)
}
