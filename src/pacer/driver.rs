//! Async driver: feeds a connection's messages through the pacer.
//!
//! The driver runs on a single task and owns the session. It waits on three
//! things at once:
//! - inbound text from the server connection
//! - UI commands that mutate the session (clicks, lobby buttons)
//! - the pacer's next release deadline
//!
//! After every step, actions the session queued are forwarded to the
//! outbound channel. Closing the inbound channel is a disconnect: buffered
//! events are dropped, the session is reset, and `run` returns it.

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use super::config::PacerConfig;
use super::queue::{EventPacer, EventSink};
use crate::core::error::{Error, Result};
use crate::protocol::{ClientAction, ServerEvent};

/// A paced event sink that also talks back to the server.
pub trait Session: EventSink {
    /// Take every action queued since the last call, oldest first.
    fn take_actions(&mut self) -> Vec<ClientAction>;

    /// Forget everything tied to the lost connection.
    fn disconnect(&mut self);
}

/// A UI request run against the session between events.
pub type Command<S> = Box<dyn FnOnce(&mut S) + Send>;

enum Step<S> {
    Inbound(Option<String>),
    Command(Command<S>),
    Release,
}

/// Single-task event loop around an [`EventPacer`].
pub struct PacerDriver<S> {
    session: S,
    pacer: EventPacer,
    inbound: mpsc::Receiver<String>,
    outbound: mpsc::Sender<ClientAction>,
    commands: Option<mpsc::Receiver<Command<S>>>,
}

impl<S: Session> PacerDriver<S> {
    pub fn new(
        session: S,
        config: PacerConfig,
        inbound: mpsc::Receiver<String>,
        outbound: mpsc::Sender<ClientAction>,
    ) -> Self {
        Self {
            session,
            pacer: EventPacer::new(config),
            inbound,
            outbound,
            commands: None,
        }
    }

    /// Accept UI commands on `commands`.
    pub fn with_commands(mut self, commands: mpsc::Receiver<Command<S>>) -> Self {
        self.commands = Some(commands);
        self
    }

    #[must_use]
    pub fn session(&self) -> &S {
        &self.session
    }

    #[must_use]
    pub fn pacer(&self) -> &EventPacer {
        &self.pacer
    }

    /// Run until the server connection closes.
    ///
    /// Returns the (reset) session on disconnect. Returns an error on a fatal
    /// event error or when the outbound channel is gone.
    pub async fn run(mut self) -> Result<S> {
        info!("pacer driver started");
        loop {
            let deadline = self.pacer.next_deadline();
            let step = tokio::select! {
                text = self.inbound.recv() => Step::Inbound(text),
                Some(command) = next_command(&mut self.commands) => Step::Command(command),
                () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    Step::Release
                }
            };

            match step {
                Step::Inbound(Some(text)) => self.receive(&text)?,
                Step::Inbound(None) => {
                    let dropped = self.pacer.cancel();
                    info!(dropped, "server connection closed");
                    self.session.disconnect();
                    // Outbound may already be gone with the connection.
                    let _ = self.flush().await;
                    return Ok(self.session);
                }
                Step::Command(command) => command(&mut self.session),
                Step::Release => self.pacer.poll(Instant::now(), &mut self.session)?,
            }
            self.flush().await?;
        }
    }

    fn receive(&mut self, text: &str) -> Result<()> {
        match ServerEvent::decode(text) {
            Ok(event) => {
                debug!(kind = %event.kind(), queued = self.pacer.len(), "received event");
                self.pacer.enqueue(event, Instant::now(), &mut self.session)
            }
            Err(err) => {
                warn!(error = %err, "dropping malformed server message");
                Ok(())
            }
        }
    }

    async fn flush(&mut self) -> Result<()> {
        for action in self.session.take_actions() {
            self.outbound
                .send(action)
                .await
                .map_err(|_| Error::ChannelClosed)?;
        }
        Ok(())
    }
}

async fn next_command<S>(commands: &mut Option<mpsc::Receiver<Command<S>>>) -> Option<Command<S>> {
    match commands {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
