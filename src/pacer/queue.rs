//! The event pacer: a FIFO of server events released one at a time.
//!
//! ## Pacing
//!
//! Events arrive in bursts (a deal is dozens of `move`s in one packet) but
//! should be applied at a human pace. The pacer holds them in a queue and
//! keeps a single pending release time:
//!
//! ```text
//! enqueue ──► [queue] ──(release when due)──► sink.handle_event()
//!                                                  │
//!                    due = now + delay_for(kind) ◄─┘
//! ```
//!
//! - Enqueue into an idle pacer dispatches at once.
//! - After each dispatch the next release waits a type-specific delay.
//! - `ping` skips the queue entirely.
//! - Unrecognized events are logged and dropped when they reach the front.
//!
//! The pacer holds no timer of its own. Callers pass the current time to
//! [`EventPacer::enqueue`] and [`EventPacer::poll`], and wake up again at
//! [`EventPacer::next_deadline`]. The async driver in [`super::driver`]
//! does exactly that.

use std::collections::VecDeque;

use tokio::time::Instant;
use tracing::{debug, error, warn};

use super::config::PacerConfig;
use crate::core::error::Result;
use crate::protocol::{EventKind, ServerEvent};

/// Receiver of paced events.
pub trait EventSink {
    /// Apply one event.
    ///
    /// Fatal errors (see [`crate::core::Error::is_fatal`]) stop the pacer;
    /// any other error is logged and the next event proceeds.
    fn handle_event(&mut self, event: ServerEvent) -> Result<()>;

    /// Seat count while a round is being dealt (in game, no turn yet).
    ///
    /// Read after each dispatch to pick the `move` delay.
    fn dealing_players(&self) -> Option<usize>;
}

/// FIFO event queue with one pending release.
#[derive(Debug)]
pub struct EventPacer {
    config: PacerConfig,
    queue: VecDeque<ServerEvent>,
    /// Earliest time the next buffered event may be released.
    /// `None` while idle.
    pending: Option<Instant>,
}

impl EventPacer {
    pub fn new(config: PacerConfig) -> Self {
        Self {
            config,
            queue: VecDeque::new(),
            pending: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &PacerConfig {
        &self.config
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Is a release scheduled (or has one just passed)?
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the caller should next call [`poll`](Self::poll).
    ///
    /// `None` when nothing is buffered.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.queue.is_empty() {
            None
        } else {
            Some(self.pending.unwrap_or_else(Instant::now))
        }
    }

    /// Buffer an event and release whatever is due.
    ///
    /// `ping` is dispatched immediately, ahead of anything buffered.
    pub fn enqueue<S: EventSink>(
        &mut self,
        event: ServerEvent,
        now: Instant,
        sink: &mut S,
    ) -> Result<()> {
        if event.kind() == EventKind::Ping {
            debug!("ping bypasses the queue");
            return self.dispatch(event, sink);
        }

        self.queue.push_back(event);
        self.poll(now, sink)
    }

    /// Release every buffered event that is due at `now`.
    ///
    /// Zero-delay events are released back to back within one call.
    pub fn poll<S: EventSink>(&mut self, now: Instant, sink: &mut S) -> Result<()> {
        loop {
            if self.pending.is_some_and(|due| due > now) {
                return Ok(());
            }
            let Some(event) = self.queue.pop_front() else {
                self.pending = None;
                return Ok(());
            };

            let kind = event.kind();
            if kind == EventKind::Unrecognized {
                warn!("dropping unrecognized server event");
                self.pending = Some(now);
                continue;
            }

            self.dispatch(event, sink)?;
            let delay = self.config.delay_for(kind, sink.dealing_players());
            debug!(%kind, ?delay, remaining = self.queue.len(), "released event");
            self.pending = Some(now + delay);
        }
    }

    /// Drop every buffered event and the pending release.
    ///
    /// Returns how many events were dropped.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        self.pending = None;
        if dropped > 0 {
            debug!(dropped, "pacer cancelled");
        }
        dropped
    }

    fn dispatch<S: EventSink>(&mut self, event: ServerEvent, sink: &mut S) -> Result<()> {
        let kind = event.kind();
        match sink.handle_event(event) {
            Ok(()) => Ok(()),
            Err(err) if err.is_fatal() => {
                error!(%kind, error = %err, "fatal error while applying event");
                self.cancel();
                Err(err)
            }
            Err(err) => {
                warn!(%kind, error = %err, "event not applied");
                Ok(())
            }
        }
    }
}

impl Default for EventPacer {
    fn default() -> Self {
        Self::new(PacerConfig::default())
    }
}
