use crate::view::Controller;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
}

/// Re-check backend connectivity every `every`, starting immediately.
///
/// The task runs until aborted. A failed check only flips the indicator to
/// disconnected.
pub fn spawn_connectivity_poll(controller: Arc<Controller>, every: Duration) -> JoinHandle<()> {
    let every = every.max(MIN_POLL_INTERVAL);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            controller.check_connectivity().await;
        }
    })
}
