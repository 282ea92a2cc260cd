//! Async wrapper that plays deferred computer moves on a timer.

use super::difficulty::Difficulty;
use super::session::{GameSession, UndoError};
use super::update::{ScheduledTurn, SessionUpdate};
use arcade_tictactoe::{MoveError, Player};
use rand::Rng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

/// Capacity of the update channel. Slow subscribers see `Lagged`.
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Owns a [`GameSession`] and resolves its computer-move tickets after the
/// configured delay without blocking the caller.
///
/// Every accepted mutation, including computer moves played by the timer,
/// is published to the receiver returned by [`SessionDriver::start`] and
/// to every receiver from [`SessionDriver::subscribe`]. Starting a new game
/// aborts the pending timer; a timer that already fired is still discarded
/// by the session's ticket check.
pub struct SessionDriver<R = StdRng> {
    session: Arc<Mutex<GameSession<R>>>,
    updates: broadcast::Sender<SessionUpdate>,
    timer: Option<JoinHandle<()>>,
}

impl<R: Rng + Send + 'static> SessionDriver<R> {
    /// Wraps `session`, scheduling its opening computer move if one is due.
    ///
    /// The returned receiver is subscribed before the opening move is
    /// dispatched, so it also sees an opening played with no delay.
    #[instrument(skip(session))]
    pub async fn start(session: GameSession<R>) -> (Self, broadcast::Receiver<SessionUpdate>) {
        let pending = session.pending();
        let (updates, receiver) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        let mut driver = Self {
            session: Arc::new(Mutex::new(session)),
            updates,
            timer: None,
        };
        if let Some(ticket) = pending {
            driver.dispatch(ticket).await;
        }
        (driver, receiver)
    }

    /// Receives every update published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionUpdate> {
        self.updates.subscribe()
    }

    /// See [`GameSession::submit_human_move`].
    #[instrument(skip(self))]
    pub async fn submit_human_move(&mut self, cell: usize) -> Result<SessionUpdate, MoveError> {
        let update = self.session.lock().await.submit_human_move(cell)?;
        self.after(update.clone()).await;
        Ok(update)
    }

    /// See [`GameSession::undo_last_exchange`].
    #[instrument(skip(self))]
    pub async fn undo_last_exchange(&mut self) -> Result<SessionUpdate, UndoError> {
        let update = self.session.lock().await.undo_last_exchange()?;
        self.after(update.clone()).await;
        Ok(update)
    }

    /// See [`GameSession::new_game`]. Aborts any pending computer move.
    #[instrument(skip(self))]
    pub async fn new_game(&mut self, human: Player) -> SessionUpdate {
        self.abort_timer();
        let update = self.session.lock().await.new_game(human);
        self.after(update.clone()).await;
        update
    }

    /// See [`GameSession::reset_scores`].
    #[instrument(skip(self))]
    pub async fn reset_scores(&mut self) -> SessionUpdate {
        let update = self.session.lock().await.reset_scores();
        publish(&self.updates, update.clone());
        update
    }

    /// Plays the pending computer move immediately instead of waiting.
    ///
    /// Returns `None` when nothing is pending.
    #[instrument(skip(self))]
    pub async fn play_pending_now(&mut self) -> Option<SessionUpdate> {
        self.abort_timer();
        let update = {
            let mut session = self.session.lock().await;
            let ticket = session.pending()?;
            session.resolve(ticket)?
        };
        publish(&self.updates, update.clone());
        Some(update)
    }

    /// See [`GameSession::set_difficulty`].
    pub async fn set_difficulty(&self, difficulty: Difficulty) {
        self.session.lock().await.set_difficulty(difficulty);
    }

    /// See [`GameSession::set_think_delay`].
    pub async fn set_think_delay(&self, delay: Duration) {
        self.session.lock().await.set_think_delay(delay);
    }

    /// See [`GameSession::set_opening_delay`].
    pub async fn set_opening_delay(&self, delay: Duration) {
        self.session.lock().await.set_opening_delay(delay);
    }

    /// Current view of the session.
    pub async fn snapshot(&self) -> SessionUpdate {
        self.session.lock().await.snapshot()
    }

    /// True while a timer for a computer move is outstanding.
    pub fn has_pending_timer(&self) -> bool {
        self.timer.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    async fn after(&mut self, update: SessionUpdate) {
        let scheduled = update.scheduled;
        publish(&self.updates, update);
        if let Some(ticket) = scheduled {
            self.dispatch(ticket).await;
        }
    }

    /// Resolves `ticket` now if it has no delay, otherwise arms a timer.
    async fn dispatch(&mut self, ticket: ScheduledTurn) {
        self.abort_timer();

        if ticket.delay().is_zero() {
            let update = self.session.lock().await.resolve(ticket);
            if let Some(update) = update {
                publish(&self.updates, update);
            }
            return;
        }

        let session = Arc::clone(&self.session);
        let updates = self.updates.clone();
        debug!(delay = ?ticket.delay(), "Scheduling computer move");
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(ticket.delay()).await;
            let update = session.lock().await.resolve(ticket);
            if let Some(update) = update {
                publish(&updates, update);
            }
        }));
    }

    fn abort_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            if !handle.is_finished() {
                debug!("Cancelling pending computer move");
            }
            handle.abort();
        }
    }
}

impl<R> Drop for SessionDriver<R> {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}

fn publish(updates: &broadcast::Sender<SessionUpdate>, update: SessionUpdate) {
    if updates.send(update).is_err() {
        trace!("No subscribers for session update");
    }
}
