//! # Runtime
//!
//! Executes the effects returned by `core::action::update()`.
//!
//! Background work (publishing, list reloads, the refresh timer) runs on
//! tokio tasks and reports back as `Action`s on one unbounded channel.
//! All state mutation happens on the caller's thread through `dispatch()`,
//! `drain()`, or `next()`. Tasks never touch `App` directly.

pub mod refresh;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::api::{ApiError, MessageBackend, PublishReceipt, PublishRequest};
use crate::core::action::{Action, Effect, update};
use crate::core::listing::ReloadTicket;
use crate::core::state::App;

pub use refresh::RefreshTimer;

pub struct Runtime {
    pub app: App,
    backend: Arc<dyn MessageBackend>,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
    refresh: Option<RefreshTimer>,
    refresh_interval: Duration,
}

impl Runtime {
    pub fn new(app: App, backend: Arc<dyn MessageBackend>, refresh_interval: Duration) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            app,
            backend,
            tx,
            rx,
            refresh: None,
            refresh_interval,
        }
    }

    /// Applies one action and performs its effects. Returns `true` on quit.
    pub fn dispatch(&mut self, action: Action) -> bool {
        debug!("Dispatch: {:?}", action);
        let mut quit = false;
        for effect in update(&mut self.app, action) {
            match effect {
                Effect::Publish(request) => self.spawn_publish(request),
                Effect::Reload(ticket) => self.spawn_reload(ticket),
                Effect::StartAutoRefresh => {
                    // Replacing drops (and aborts) any previous timer first.
                    self.refresh = None;
                    self.refresh = Some(RefreshTimer::start(self.refresh_interval, self.tx.clone()));
                }
                Effect::StopAutoRefresh => self.refresh = None,
                Effect::Quit => quit = true,
            }
        }
        quit
    }

    /// Applies every action already waiting from background tasks, without
    /// blocking. Returns whether anything was applied.
    pub fn drain(&mut self) -> bool {
        let mut any = false;
        while let Ok(action) = self.rx.try_recv() {
            any = true;
            self.dispatch(action);
        }
        any
    }

    /// Waits for the next background action and applies it.
    pub async fn next(&mut self) -> Option<()> {
        let action = self.rx.recv().await?;
        self.dispatch(action);
        Some(())
    }

    pub fn auto_refresh_running(&self) -> bool {
        self.refresh.is_some()
    }

    /// Releases the refresh timer. Also happens on drop.
    pub fn shutdown(&mut self) {
        self.refresh = None;
    }

    fn spawn_publish(&self, request: PublishRequest) {
        info!("Spawning publish request");
        let backend = self.backend.clone();
        let slot = PublishSlot::new(request.clone(), self.tx.clone());
        tokio::spawn(async move {
            let result = backend.publish(&request).await;
            slot.finish(result);
        });
    }

    fn spawn_reload(&self, ticket: ReloadTicket) {
        debug!("Spawning list reload seq={}", ticket.seq);
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.list(&ticket.query).await;
            if tx
                .send(Action::ListLoaded {
                    seq: ticket.seq,
                    result,
                })
                .is_err()
            {
                warn!("Failed to send ListLoaded: receiver dropped");
            }
        });
    }
}

/// Holds the composer's in-flight slot for one publish.
///
/// Exactly one `PublishFinished` is reported per slot: the real result via
/// `finish()`, or `Cancelled` from `Drop` if the task was aborted or panicked.
struct PublishSlot {
    request: Option<PublishRequest>,
    tx: UnboundedSender<Action>,
}

impl PublishSlot {
    fn new(request: PublishRequest, tx: UnboundedSender<Action>) -> Self {
        Self {
            request: Some(request),
            tx,
        }
    }

    fn finish(mut self, result: Result<PublishReceipt, ApiError>) {
        if let Some(request) = self.request.take() {
            self.report(request, result);
        }
    }

    fn report(&self, request: PublishRequest, result: Result<PublishReceipt, ApiError>) {
        let action = Action::PublishFinished {
            request,
            result,
            finished_at: Utc::now(),
        };
        if self.tx.send(action).is_err() {
            warn!("Failed to send PublishFinished: receiver dropped");
        }
    }
}

impl Drop for PublishSlot {
    fn drop(&mut self) {
        if let Some(request) = self.request.take() {
            warn!("Publish task ended without a result, releasing slot");
            self.report(request, Err(ApiError::Cancelled));
        }
    }
}
