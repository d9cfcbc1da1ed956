//! Push-fed data source for embedders.
//!
//! The embedding application fetches the status page on its own and pushes
//! each outcome in. Nothing is shown until the first snapshot arrives.

use tokio::sync::mpsc;

use super::{DataSource, StatusSnapshot};

/// One fetch outcome reported by the producer. Errors are display text.
pub type SnapshotUpdate = Result<StatusSnapshot, String>;

/// A data source fed through an unbounded mpsc channel.
///
/// # Example
///
/// ```
/// use statuswatch::{ChannelSource, DataSource, StatusSnapshot};
///
/// let (tx, mut source) = ChannelSource::create("embedded");
/// assert!(source.poll().is_none());
///
/// tx.send(Ok(StatusSnapshot::default())).unwrap();
/// assert!(source.poll().is_some());
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::UnboundedReceiver<SnapshotUpdate>,
    description: String,
    last_error: Option<String>,
}

impl ChannelSource {
    pub fn new(receiver: mpsc::UnboundedReceiver<SnapshotUpdate>, label: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", label),
            last_error: None,
        }
    }

    /// Build a connected sender and source.
    pub fn create(label: &str) -> (mpsc::UnboundedSender<SnapshotUpdate>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx, label))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<StatusSnapshot> {
        let mut latest = None;
        // A closed producer simply stops updating; the last snapshot stays
        while let Ok(update) = self.receiver.try_recv() {
            match update {
                Ok(snapshot) => {
                    self.last_error = None;
                    latest = Some(snapshot);
                }
                Err(e) => self.last_error = Some(e),
            }
        }
        latest
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::IncidentRecord;

    fn with_incident(id: &str) -> StatusSnapshot {
        let mut snapshot = StatusSnapshot::default();
        snapshot.incidents.incidents.push(IncidentRecord {
            id: id.to_string(),
            ..Default::default()
        });
        snapshot
    }

    #[test]
    fn test_nothing_before_first_send() {
        let (_tx, mut source) = ChannelSource::create("test");
        assert!(source.poll().is_none());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_newest_snapshot_wins() {
        let (tx, mut source) = ChannelSource::create("test");
        for id in ["i1", "i2", "i3"] {
            tx.send(Ok(with_incident(id))).unwrap();
        }

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.incidents.incidents[0].id, "i3");
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_error_then_recovery() {
        let (tx, mut source) = ChannelSource::create("test");
        tx.send(Err("upstream returned 503".to_string())).unwrap();
        assert!(source.poll().is_none());
        assert_eq!(source.error(), Some("upstream returned 503"));

        tx.send(Ok(with_incident("i1"))).unwrap();
        assert!(source.poll().is_some());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_closed_producer_is_quiet() {
        let (tx, mut source) = ChannelSource::create("embedded");
        tx.send(Ok(StatusSnapshot::default())).unwrap();
        drop(tx);

        assert!(source.poll().is_some());
        assert!(source.poll().is_none());
        assert!(source.error().is_none());
        assert_eq!(source.description(), "channel: embedded");
    }
}
