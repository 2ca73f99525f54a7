//! The live search-instrumentation stream.
//!
//! One channel per search. The producer side is a single-slot overwrite
//! cell built on `tokio::sync::watch`: sends never block, a slow consumer
//! only ever observes the most recent snapshot, and the terminal record is
//! always the last value in the slot, so it cannot be lost. A bounded
//! queue would backpressure the search; the watch cell cannot.
//!
//! Snapshots are throttled on the producer side. Writes that land inside
//! the interval window replace the pending snapshot, and the next due
//! write flushes the latest state. The terminal record bypasses the
//! throttle entirely.

use instant::Instant;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use crate::board::Board;
use crate::error::{EngineResult, ErrorKind};
use crate::search::{run_search, SearchOptions, SearchReport, SearchSnapshot};

/// Default minimum gap between snapshots.
pub const DEFAULT_SNAPSHOT_INTERVAL_MS: u64 = 140;
/// Hard floor for the snapshot interval.
pub const MIN_SNAPSHOT_INTERVAL_MS: u64 = 50;

/// One record on the stream: any number of `snapshot`s followed by exactly
/// one `complete` or `error`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamRecord {
    Snapshot(SearchSnapshot),
    Complete(SearchReport),
    Error { message: String, kind: ErrorKind },
}

impl StreamRecord {
    /// True for `complete` and `error` records.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StreamRecord::Snapshot(_))
    }
}

/// Producer half: throttles snapshots into the overwrite cell.
pub(crate) struct SnapshotPublisher {
    tx: watch::Sender<Option<StreamRecord>>,
    interval: Duration,
    last_sent: Option<Instant>,
    pending: Option<SearchSnapshot>,
}

impl SnapshotPublisher {
    pub(crate) fn new(
        tx: watch::Sender<Option<StreamRecord>>,
        interval_ms: Option<u64>,
    ) -> SnapshotPublisher {
        let interval = interval_ms
            .unwrap_or(DEFAULT_SNAPSHOT_INTERVAL_MS)
            .max(MIN_SNAPSHOT_INTERVAL_MS);
        SnapshotPublisher {
            tx,
            interval: Duration::from_millis(interval),
            last_sent: None,
            pending: None,
        }
    }

    /// Hands a snapshot to the throttle. Within the interval window the
    /// pending snapshot is replaced; otherwise it is sent immediately.
    pub(crate) fn offer(&mut self, snapshot: SearchSnapshot) {
        self.pending = Some(snapshot);
        let due = match self.last_sent {
            None => true,
            Some(at) => at.elapsed() >= self.interval,
        };
        if !due {
            return;
        }
        if let Some(snapshot) = self.pending.take() {
            let _ = self.tx.send(Some(StreamRecord::Snapshot(snapshot)));
            self.last_sent = Some(Instant::now());
        }
    }

    /// Sends the terminal record, ignoring the throttle. Consumed so no
    /// further records can follow it.
    pub(crate) fn finish(self, record: StreamRecord) {
        debug_assert!(record.is_terminal());
        let _ = self.tx.send(Some(record));
    }

    /// True once every consumer has dropped its receiver.
    pub(crate) fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half of a search stream.
pub struct SearchStream {
    rx: watch::Receiver<Option<StreamRecord>>,
}

impl SearchStream {
    /// Waits for the next unseen record. Returns `None` once the producer
    /// is gone and the terminal record has been observed. Dropping the
    /// stream cancels the search at its next time check.
    pub async fn next(&mut self) -> Option<StreamRecord> {
        loop {
            self.rx.changed().await.ok()?;
            let record = self.rx.borrow_and_update().clone();
            if record.is_some() {
                return record;
            }
        }
    }
}

/// Starts a search on its own thread and returns the consumer half of a
/// fresh stream. Emits `snapshot` records while the search runs and one
/// terminal record when it ends.
pub fn stream_search(fen: &str, options: &SearchOptions) -> EngineResult<SearchStream> {
    let mut board = Board::from_fen(fen)?;
    let (tx, rx) = watch::channel(None);
    let mut publisher = SnapshotPublisher::new(tx, options.snapshot_interval_ms);
    let options = options.clone();

    std::thread::spawn(move || {
        let report = run_search(&mut board, &options, Some(&mut publisher));
        let record = match board.validate() {
            Ok(()) => StreamRecord::Complete(report),
            Err(error) => {
                debug!(%error, "position invariant broken after search");
                StreamRecord::Error {
                    message: error.to_string(),
                    kind: error.kind(),
                }
            }
        };
        publisher.finish(record);
    });

    Ok(SearchStream { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::START_FEN;
    use futures_lite::future::block_on;

    fn collect(stream: &mut SearchStream) -> Vec<StreamRecord> {
        block_on(async {
            let mut records = Vec::new();
            while let Some(record) = stream.next().await {
                let terminal = record.is_terminal();
                records.push(record);
                if terminal {
                    break;
                }
            }
            records
        })
    }

    #[test]
    fn stream_ends_with_a_single_complete() {
        let options = SearchOptions {
            max_depth: 8,
            time_limit_ms: 500,
            snapshot_interval_ms: Some(50),
        };
        let mut stream = stream_search(START_FEN, &options).unwrap();
        let records = collect(&mut stream);

        assert!(!records.is_empty());
        let (terminal, snapshots) = records.split_last().unwrap();
        assert!(snapshots.iter().all(|r| !r.is_terminal()));
        let StreamRecord::Complete(report) = terminal else {
            panic!("expected a complete record");
        };
        assert!(report.depth >= 1);
        assert!(report.best_move.is_some());
    }

    #[test]
    fn snapshots_grow_monotonically() {
        let options = SearchOptions {
            max_depth: 8,
            time_limit_ms: 500,
            snapshot_interval_ms: Some(50),
        };
        let mut stream = stream_search(START_FEN, &options).unwrap();
        let records = collect(&mut stream);

        let mut last_depth = 0;
        let mut last_nodes = 0;
        for record in &records {
            if let StreamRecord::Snapshot(snapshot) = record {
                assert!(snapshot.depth >= last_depth);
                assert!(snapshot.nodes >= last_nodes);
                last_depth = snapshot.depth;
                last_nodes = snapshot.nodes;
            }
        }
    }

    #[test]
    fn emits_at_least_one_snapshot_under_a_generous_budget() {
        let options = SearchOptions {
            max_depth: 8,
            time_limit_ms: 500,
            snapshot_interval_ms: Some(50),
        };
        let mut stream = stream_search(START_FEN, &options).unwrap();
        let records = collect(&mut stream);
        let snapshots = records.iter().filter(|r| !r.is_terminal()).count();
        assert!(snapshots >= 1, "expected snapshots before the terminal record");
    }

    #[test]
    fn invalid_fen_fails_before_a_stream_opens() {
        let result = stream_search("not a position", &SearchOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn dropping_the_stream_cancels_the_search() {
        let options = SearchOptions {
            max_depth: 64,
            time_limit_ms: 60_000,
            snapshot_interval_ms: Some(50),
        };
        let stream = stream_search(START_FEN, &options).unwrap();
        // No receiver remains; the search notices at its next time check
        // and aborts long before the one-minute budget.
        drop(stream);
    }

    #[test]
    fn records_serialize_with_their_type_tag() {
        let options = SearchOptions {
            max_depth: 2,
            time_limit_ms: 5_000,
            snapshot_interval_ms: None,
        };
        let mut stream = stream_search(START_FEN, &options).unwrap();
        let records = collect(&mut stream);
        let terminal = records.last().unwrap();

        let json = serde_json::to_string(terminal).unwrap();
        assert!(json.contains("\"type\":\"complete\""));
        assert!(json.contains("\"best_move\""));
        assert!(json.contains("\"candidate_moves\""));
        assert!(json.contains("\"heatmap\""));

        let error = StreamRecord::Error {
            message: "king count is not 1".into(),
            kind: ErrorKind::InternalError,
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"error\""));
        assert!(json.contains("\"kind\":\"internal_error\""));
    }
}
