//! Stream session: drives the viewport controller against a content source.
//!
//! The controller is synchronous and only queues [`SourceRequest`]s; this
//! module executes them on background tasks and feeds completions back in
//! on the next `pump`. Hosts call the gesture methods from their input
//! handling and `pump` once per frame.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::moment::Moment;
use crate::scheduler::{arrange, PacingTemplate};
use crate::source::ContentSource;
use crate::viewport::{SourceRequest, StreamEvent, ViewportController};

/// How the pool is ordered before it reaches the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamMode {
    /// Pace categories with the configured template.
    #[default]
    Paced,
    /// Keep the source order untouched.
    Chronological,
}

/// Completed source work, sent back from spawned tasks.
#[derive(Debug)]
enum SourceOutcome {
    More(Result<Vec<Moment>>),
    Refresh(Result<Vec<Moment>>),
}

pub struct StreamSession {
    controller: ViewportController,
    source: Arc<dyn ContentSource>,
    mode: StreamMode,
    template: PacingTemplate,
    results_tx: mpsc::UnboundedSender<SourceOutcome>,
    results_rx: mpsc::UnboundedReceiver<SourceOutcome>,
}

impl StreamSession {
    pub fn new(
        config: &AppConfig,
        source: Arc<dyn ContentSource>,
        mode: StreamMode,
        viewport_height: u32,
    ) -> Result<Self> {
        let template = config.stream.template()?;
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        Ok(Self {
            controller: ViewportController::new(config, viewport_height),
            source,
            mode,
            template,
            results_tx,
            results_rx,
        })
    }

    /// Fetch the first page and seed the viewport with it.
    ///
    /// A failed fetch seeds an empty stream; the session stays usable and
    /// a later refresh fills it in.
    pub async fn start(&mut self) {
        let pool = match self.source.fetch_initial().await {
            Ok(pool) => pool,
            Err(err) => {
                tracing::warn!("Initial fetch failed: {}", err);
                Vec::new()
            }
        };
        let pool = self.arrange_pool(pool);
        self.controller.seed(pool);
        self.dispatch_requests();
    }

    /// Drain completed source work, advance the transition clock, and
    /// hand back everything that happened since the last call. Call once
    /// per frame.
    pub fn pump(&mut self, now: Instant) -> Vec<StreamEvent> {
        while let Ok(outcome) = self.results_rx.try_recv() {
            self.apply_outcome(outcome);
        }
        self.controller.tick(now);
        self.dispatch_requests();
        self.drain_events()
    }

    // ---- gestures and navigation ----------------------------------------

    pub fn on_wheel(&mut self, delta_y: f32, now: Instant) {
        self.controller.on_wheel(delta_y, now);
        self.dispatch_requests();
    }

    pub fn on_scroll(&mut self, scroll_top: u32) {
        self.controller.on_scroll(scroll_top);
        self.dispatch_requests();
    }

    pub fn on_touch_start(&mut self, y: f32) {
        self.controller.on_touch_start(y);
    }

    pub fn on_touch_move(&mut self, y: f32) {
        self.controller.on_touch_move(y);
    }

    pub fn on_touch_end(&mut self, now: Instant) {
        self.controller.on_touch_end(now);
        self.dispatch_requests();
    }

    pub fn advance(&mut self, direction: i32, now: Instant) {
        self.controller.advance(direction, now);
        self.dispatch_requests();
    }

    pub fn jump_to(&mut self, index: usize, now: Instant) {
        self.controller.jump_to(index, now);
        self.dispatch_requests();
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        self.controller.set_viewport_height(height);
        self.dispatch_requests();
    }

    // ---- interactions ---------------------------------------------------

    pub fn heart_active(&mut self) {
        self.controller.heart_active();
    }

    pub fn save_active(&mut self) {
        self.controller.save_active();
    }

    pub fn open_comments(&mut self) {
        self.controller.open_comments();
    }

    pub fn report_active(&mut self) {
        self.controller.report_active();
    }

    pub fn request_refresh(&mut self) {
        self.controller.request_refresh();
        self.dispatch_requests();
    }

    // ---- accessors ------------------------------------------------------

    /// Read-only view of the navigation state, for rendering.
    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    pub fn mode(&self) -> StreamMode {
        self.mode
    }

    // ---- internals ------------------------------------------------------

    fn arrange_pool(&self, pool: Vec<Moment>) -> Vec<Moment> {
        match self.mode {
            StreamMode::Paced => arrange(pool, &self.template),
            StreamMode::Chronological => pool,
        }
    }

    fn apply_outcome(&mut self, outcome: SourceOutcome) {
        match outcome {
            SourceOutcome::More(Ok(batch)) => {
                // Appended pages are paced as their own batch.
                let batch = self.arrange_pool(batch);
                self.controller.apply_more(batch);
            }
            SourceOutcome::More(Err(err)) => {
                tracing::warn!("Page fetch failed: {}", err);
                self.controller.apply_more_failed();
            }
            SourceOutcome::Refresh(Ok(pool)) => {
                let pool = self.arrange_pool(pool);
                self.controller.apply_refresh(pool);
            }
            SourceOutcome::Refresh(Err(err)) => {
                tracing::warn!("Refresh failed: {}", err);
                self.controller.apply_refresh_failed();
            }
        }
    }

    /// Spawn a background task per queued source request. Results come
    /// back through the channel; a send to a dropped session is ignored.
    fn dispatch_requests(&mut self) {
        while let Some(request) = self.controller.next_request() {
            match request {
                SourceRequest::FetchMore { offset } => {
                    let source = Arc::clone(&self.source);
                    let tx = self.results_tx.clone();
                    tokio::spawn(async move {
                        let _ = tx.send(SourceOutcome::More(source.fetch_more(offset).await));
                    });
                }
                SourceRequest::Refresh => {
                    let source = Arc::clone(&self.source);
                    let tx = self.results_tx.clone();
                    tokio::spawn(async move {
                        let _ = tx.send(SourceOutcome::Refresh(source.refresh().await));
                    });
                }
            }
        }
    }

    fn drain_events(&mut self) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.controller.poll_event() {
            events.push(event);
        }
        events
    }
}
