//! The paged viewport controller.
//!
//! Owns the complete navigation state machine: one entry per viewport
//! page, heterogeneous gestures reduced to advance/jump commands, the
//! pagination and pull-to-refresh cycles, and one-shot interstitial
//! injection. The controller is synchronous and does no I/O; asynchronous
//! work is queued as [`SourceRequest`]s for the session to execute, and
//! completions come back through the `apply_*` methods.

use std::collections::VecDeque;
use std::time::Instant;

use super::animation::PageAnimator;
use super::events::{SourceRequest, StreamEvent};
use super::gesture::{DragOutcome, TouchTracker, WheelGate};
use super::interruption::InterruptionSchedule;
use super::state::{FetchPhase, RefreshPhase, ScrollPhase, ViewportState};
use crate::config::{AppConfig, GestureConfig};
use crate::moment::{Moment, StreamEntry};

pub struct ViewportController {
    entries: Vec<StreamEntry>,
    state: ViewportState,
    viewport_height: u32,
    prefetch_distance: usize,
    gestures: GestureConfig,
    wheel: WheelGate,
    touch: TouchTracker,
    animator: PageAnimator,
    interruptions: InterruptionSchedule,
    /// Target index of the transition in flight, if any
    pending_target: Option<usize>,
    events: VecDeque<StreamEvent>,
    requests: VecDeque<SourceRequest>,
}

impl ViewportController {
    pub fn new(config: &AppConfig, viewport_height: u32) -> Self {
        Self {
            entries: Vec::new(),
            state: ViewportState::default(),
            viewport_height,
            prefetch_distance: config.stream.prefetch_distance,
            gestures: config.gestures.clone(),
            wheel: WheelGate::new(config.gestures.wheel_cooldown()),
            touch: TouchTracker::new(),
            animator: PageAnimator::new(config.scroll.clone()),
            interruptions: InterruptionSchedule::from_entries(&config.stream.interruptions),
            pending_target: None,
            events: VecDeque::new(),
            requests: VecDeque::new(),
        }
    }

    /// Install the initial pool and reset navigation to the top.
    ///
    /// Interruption triggers are session-scoped and survive seeding, so a
    /// refresh never re-fires an interstitial the reader already saw.
    pub fn seed(&mut self, moments: Vec<Moment>) {
        self.entries = moments.into_iter().map(StreamEntry::Moment).collect();
        self.state = ViewportState::default();
        self.pending_target = None;
        self.animator.set_offset(0);

        if !self.entries.is_empty() {
            self.events
                .push_back(StreamEvent::ActiveIndexChanged { index: 0 });
            self.splice_due_interruptions();
            self.check_pagination();
        }
    }

    // ---- gestures -------------------------------------------------------

    /// Wheel input. Hard-debounced: events inside the cooldown window are
    /// dropped, never buffered.
    pub fn on_wheel(&mut self, delta_y: f32, now: Instant) {
        if self.entries.is_empty() || delta_y == 0.0 {
            return;
        }
        if !self.wheel.try_accept(now) {
            return;
        }
        let direction = if delta_y > 0.0 { 1 } else { -1 };
        self.advance(direction, now);
    }

    /// Native scroll position report (scrollbar drag, keyboard paging in
    /// the host). Only authoritative while no transition is in flight.
    pub fn on_scroll(&mut self, scroll_top: u32) {
        if self.state.scroll != ScrollPhase::Idle {
            return;
        }
        if self.entries.is_empty() || self.viewport_height == 0 {
            return;
        }

        self.animator.set_offset(scroll_top);
        let index = ((scroll_top as f64 / self.viewport_height as f64).round() as usize)
            .min(self.entries.len() - 1);
        self.update_index(index);
    }

    pub fn on_touch_start(&mut self, y: f32) {
        let at_top =
            self.state.scroll == ScrollPhase::Idle && self.animator.current_offset() == 0;
        self.touch.start(y, at_top);
    }

    pub fn on_touch_move(&mut self, y: f32) {
        self.touch.drag(y);

        if self.touch.is_pulling() && self.state.refresh != RefreshPhase::Refreshing {
            self.state.refresh = RefreshPhase::Pulling;
            self.state.pull_delta = self
                .touch
                .displacement()
                .clamp(0.0, self.gestures.pull_cap_px);
        } else if self.state.refresh == RefreshPhase::Pulling {
            // Dragged back above the origin: the pull is abandoned.
            self.state.refresh = RefreshPhase::AtRest;
            self.state.pull_delta = 0.0;
        }
    }

    pub fn on_touch_end(&mut self, now: Instant) {
        match self.touch.release(self.gestures.swipe_threshold_px) {
            DragOutcome::PullRelease => self.finish_pull(),
            DragOutcome::SwipeNext => {
                self.reset_pull();
                self.advance(1, now);
            }
            DragOutcome::SwipePrev => {
                self.reset_pull();
                self.advance(-1, now);
            }
            DragOutcome::Tap => self.reset_pull(),
        }
    }

    // ---- navigation -----------------------------------------------------

    /// Move by `direction` pages, clamped to the stream bounds.
    pub fn advance(&mut self, direction: i32, now: Instant) {
        if self.entries.is_empty() {
            return;
        }
        let max = self.entries.len() as isize - 1;
        let target =
            (self.effective_index() as isize + direction as isize).clamp(0, max) as usize;
        self.begin_scroll_to(target, now);
    }

    /// Scroll to an absolute index, clamped to the stream bounds.
    pub fn jump_to(&mut self, index: usize, now: Instant) {
        if self.entries.is_empty() {
            return;
        }
        let target = index.min(self.entries.len() - 1);
        self.begin_scroll_to(target, now);
    }

    /// Drive the transition clock. Call once per frame.
    pub fn tick(&mut self, now: Instant) {
        if self.animator.tick(now) {
            if let Some(target) = self.pending_target.take() {
                self.settle_at(target);
            } else {
                self.state.scroll = ScrollPhase::Idle;
            }
        }
    }

    // ---- interactions on the active moment ------------------------------

    pub fn heart_active(&mut self) {
        if let Some(moment) = self.active_moment_mut() {
            let hearted = moment.toggle_heart();
            let id = moment.id.clone();
            self.events.push_back(StreamEvent::Hearted { id, hearted });
        }
    }

    pub fn save_active(&mut self) {
        if let Some(moment) = self.active_moment_mut() {
            let saved = moment.toggle_save();
            let id = moment.id.clone();
            self.events.push_back(StreamEvent::Saved { id, saved });
        }
    }

    pub fn open_comments(&mut self) {
        if let Some(moment) = self.active_moment() {
            let id = moment.id.clone();
            self.events.push_back(StreamEvent::CommentsOpened { id });
        }
    }

    pub fn report_active(&mut self) {
        if let Some(moment) = self.active_moment() {
            let id = moment.id.clone();
            self.events.push_back(StreamEvent::Reported { id });
        }
    }

    /// Programmatic refresh (key binding), same single-flight rule as the
    /// pull path.
    pub fn request_refresh(&mut self) {
        if self.state.refresh == RefreshPhase::Refreshing {
            return;
        }
        self.state.refresh = RefreshPhase::Refreshing;
        self.state.pull_delta = 0.0;
        self.requests.push_back(SourceRequest::Refresh);
        self.events.push_back(StreamEvent::RefreshStarted);
    }

    // ---- source completions ---------------------------------------------

    /// Append a fetched page. Append-only: results land even if the
    /// reader has since navigated elsewhere.
    pub fn apply_more(&mut self, moments: Vec<Moment>) {
        self.state.fetch = FetchPhase::Ready;
        let appended = moments.len();
        self.entries
            .extend(moments.into_iter().map(StreamEntry::Moment));
        self.events.push_back(StreamEvent::MoreLoaded { appended });
        tracing::debug!("Appended {} moments to the stream", appended);
    }

    /// A pagination request failed. The stream is unchanged; the next
    /// near-end crossing retries naturally.
    pub fn apply_more_failed(&mut self) {
        self.state.fetch = FetchPhase::Ready;
        self.events.push_back(StreamEvent::MoreFailed);
    }

    /// Replace the pool after a completed refresh and return to the top.
    pub fn apply_refresh(&mut self, moments: Vec<Moment>) {
        let count = moments.len();
        self.entries = moments.into_iter().map(StreamEntry::Moment).collect();
        self.state.refresh = RefreshPhase::AtRest;
        self.state.pull_delta = 0.0;
        self.state.scroll = ScrollPhase::Idle;
        self.pending_target = None;
        self.animator.set_offset(0);
        self.events
            .push_back(StreamEvent::RefreshCompleted { count });

        if self.entries.is_empty() {
            self.state.current_index = 0;
            return;
        }
        if self.state.current_index != 0 {
            self.state.current_index = 0;
            self.events
                .push_back(StreamEvent::ActiveIndexChanged { index: 0 });
        }
        self.splice_due_interruptions();
        self.check_pagination();
    }

    /// A refresh failed. The pool is unchanged and the reader keeps
    /// their place.
    pub fn apply_refresh_failed(&mut self) {
        self.state.refresh = RefreshPhase::AtRest;
        self.state.pull_delta = 0.0;
        self.events.push_back(StreamEvent::RefreshFailed);
    }

    // ---- host plumbing --------------------------------------------------

    pub fn poll_event(&mut self) -> Option<StreamEvent> {
        self.events.pop_front()
    }

    pub fn next_request(&mut self) -> Option<SourceRequest> {
        self.requests.pop_front()
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height;
        // A resize mid-transition completes it immediately at the target.
        if let Some(target) = self.pending_target.take() {
            self.settle_at(target);
        } else {
            self.animator
                .set_offset((self.state.current_index as u32).saturating_mul(height));
        }
    }

    // ---- accessors ------------------------------------------------------

    pub fn entries(&self) -> &[StreamEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Moments loaded so far, excluding interstitials. This is the offset
    /// pagination requests carry.
    pub fn moment_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_interruption()).count()
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn active_entry(&self) -> Option<&StreamEntry> {
        self.entries.get(self.state.current_index)
    }

    pub fn scroll_offset(&self) -> u32 {
        self.animator.current_offset()
    }

    pub fn is_scrolling(&self) -> bool {
        self.state.scroll == ScrollPhase::Scrolling
    }

    pub fn is_loading_more(&self) -> bool {
        self.state.fetch == FetchPhase::FetchingMore
    }

    pub fn refresh_phase(&self) -> RefreshPhase {
        self.state.refresh
    }

    pub fn pull_delta(&self) -> f32 {
        self.state.pull_delta
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    // ---- internals ------------------------------------------------------

    /// Where a newly issued navigation starts from: the in-flight target
    /// if a transition is running, the settled index otherwise.
    fn effective_index(&self) -> usize {
        self.pending_target.unwrap_or(self.state.current_index)
    }

    fn begin_scroll_to(&mut self, target: usize, now: Instant) {
        if target == self.effective_index() {
            return;
        }
        let offset = (target as u32).saturating_mul(self.viewport_height);
        if self.animator.scroll_to(offset, now) {
            self.state.scroll = ScrollPhase::Scrolling;
            self.pending_target = Some(target);
        } else {
            self.settle_at(target);
        }
    }

    fn settle_at(&mut self, index: usize) {
        self.state.scroll = ScrollPhase::Idle;
        self.pending_target = None;
        self.animator
            .set_offset((index as u32).saturating_mul(self.viewport_height));
        self.update_index(index);
    }

    fn update_index(&mut self, index: usize) {
        if index != self.state.current_index {
            self.state.current_index = index;
            self.events
                .push_back(StreamEvent::ActiveIndexChanged { index });
        }
        self.splice_due_interruptions();
        self.check_pagination();
    }

    /// Splice every newly due interstitial at its trigger position.
    ///
    /// Landing exactly on a trigger leaves the interstitial as the active
    /// entry; having jumped past one, the splice happens behind the
    /// reader and the index shifts to keep the same entry active.
    fn splice_due_interruptions(&mut self) {
        while let Some((at, interruption)) = self.interruptions.due(self.state.current_index) {
            let id = interruption.id.clone();
            let at = at.min(self.entries.len());
            self.entries
                .insert(at, StreamEntry::Interruption(interruption));
            self.events.push_back(StreamEvent::InterruptionShown { id });

            if self.state.current_index > at {
                self.state.current_index += 1;
                self.events.push_back(StreamEvent::ActiveIndexChanged {
                    index: self.state.current_index,
                });
            }
        }
    }

    fn check_pagination(&mut self) {
        if self.state.fetch != FetchPhase::Ready || self.entries.is_empty() {
            return;
        }
        if self.state.current_index + self.prefetch_distance >= self.entries.len() {
            let offset = self.moment_count();
            self.state.fetch = FetchPhase::FetchingMore;
            self.requests.push_back(SourceRequest::FetchMore { offset });
            self.events.push_back(StreamEvent::MoreRequested { offset });
        }
    }

    fn finish_pull(&mut self) {
        if self.state.refresh == RefreshPhase::Refreshing {
            self.state.pull_delta = 0.0;
            return;
        }
        let committed = self.state.pull_delta > self.gestures.pull_commit_px;
        self.state.pull_delta = 0.0;
        if committed {
            self.state.refresh = RefreshPhase::Refreshing;
            self.requests.push_back(SourceRequest::Refresh);
            self.events.push_back(StreamEvent::RefreshStarted);
        } else {
            self.state.refresh = RefreshPhase::AtRest;
        }
    }

    fn reset_pull(&mut self) {
        self.state.pull_delta = 0.0;
        if self.state.refresh == RefreshPhase::Pulling {
            self.state.refresh = RefreshPhase::AtRest;
        }
    }

    fn active_moment(&self) -> Option<&Moment> {
        self.active_entry().and_then(StreamEntry::as_moment)
    }

    fn active_moment_mut(&mut self) -> Option<&mut Moment> {
        let index = self.state.current_index;
        self.entries.get_mut(index).and_then(StreamEntry::as_moment_mut)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::moment::Category;

    const HEIGHT: u32 = 600;

    fn moment(id: &str) -> Moment {
        Moment {
            id: id.to_string(),
            category: Category::Validation,
            body: "hello".to_string(),
            alias: "a quiet fox".to_string(),
            heart_count: 0,
            reply_count: 0,
            hearted: false,
            saved: false,
            created_at: Utc::now(),
        }
    }

    fn pool(n: usize) -> Vec<Moment> {
        (0..n).map(|i| moment(&format!("m{}", i))).collect()
    }

    /// Instant transitions, no interstitials: navigation state is
    /// observable without ticking a clock.
    fn plain_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.scroll.smooth_enabled = false;
        config.stream.interruptions.clear();
        config
    }

    fn controller_with(config: &AppConfig, n: usize) -> ViewportController {
        let mut c = ViewportController::new(config, HEIGHT);
        c.seed(pool(n));
        c
    }

    fn drain_events(c: &mut ViewportController) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        while let Some(ev) = c.poll_event() {
            events.push(ev);
        }
        events
    }

    fn drain_requests(c: &mut ViewportController) -> Vec<SourceRequest> {
        let mut requests = Vec::new();
        while let Some(req) = c.next_request() {
            requests.push(req);
        }
        requests
    }

    #[test]
    fn test_seed_announces_first_entry() {
        let mut c = controller_with(&plain_config(), 8);

        let events = drain_events(&mut c);
        assert!(events.contains(&StreamEvent::ActiveIndexChanged { index: 0 }));
        assert_eq!(c.entry_count(), 8);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_wheel_debounce_drops_second_event() {
        let mut c = controller_with(&plain_config(), 8);
        let t0 = Instant::now();

        c.on_wheel(120.0, t0);
        assert_eq!(c.current_index(), 1);

        // Inside the 600 ms window: dropped, not queued.
        c.on_wheel(120.0, t0 + Duration::from_millis(300));
        assert_eq!(c.current_index(), 1);

        c.on_wheel(120.0, t0 + Duration::from_millis(600));
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_wheel_direction_and_clamp_at_top() {
        let mut c = controller_with(&plain_config(), 8);
        let t0 = Instant::now();

        c.on_wheel(-120.0, t0);
        assert_eq!(c.current_index(), 0);

        c.on_wheel(120.0, t0 + Duration::from_secs(1));
        c.on_wheel(-120.0, t0 + Duration::from_secs(2));
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_advance_clamps_at_bounds() {
        let mut c = controller_with(&plain_config(), 3);
        let t0 = Instant::now();

        for _ in 0..10 {
            c.advance(1, t0);
        }
        assert_eq!(c.current_index(), 2);

        for _ in 0..10 {
            c.advance(-1, t0);
        }
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_jump_to_clamps() {
        let mut c = controller_with(&plain_config(), 5);

        c.jump_to(999, Instant::now());
        assert_eq!(c.current_index(), 4);
    }

    #[test]
    fn test_single_flight_pagination() {
        let mut c = controller_with(&plain_config(), 8);
        let t0 = Instant::now();

        // prefetch_distance 2: index 6 of 8 crosses the near-end line.
        c.jump_to(6, t0);
        assert!(c.is_loading_more());
        assert_eq!(
            drain_requests(&mut c),
            vec![SourceRequest::FetchMore { offset: 8 }]
        );

        // Re-triggering while in flight is a no-op.
        c.advance(1, t0);
        assert_eq!(c.current_index(), 7);
        assert!(drain_requests(&mut c).is_empty());

        c.apply_more(pool(5));
        assert_eq!(c.entry_count(), 13);
        assert!(!c.is_loading_more());
    }

    #[test]
    fn test_failed_fetch_retries_on_next_crossing() {
        let mut c = controller_with(&plain_config(), 8);
        let t0 = Instant::now();

        c.jump_to(6, t0);
        drain_requests(&mut c);
        c.apply_more_failed();
        assert!(!c.is_loading_more());
        assert!(drain_events(&mut c).contains(&StreamEvent::MoreFailed));

        c.advance(1, t0);
        assert_eq!(
            drain_requests(&mut c),
            vec![SourceRequest::FetchMore { offset: 8 }]
        );
    }

    #[test]
    fn test_one_shot_interruption() {
        let mut config = plain_config();
        config.stream.interruptions = vec![crate::config::InterruptionEntry {
            index: 4,
            heading: "pause".to_string(),
            body: "breathe".to_string(),
        }];
        let mut c = controller_with(&config, 8);
        let t0 = Instant::now();

        // Walk forward one page at a time to index 4.
        for _ in 0..4 {
            c.advance(1, t0);
        }
        assert_eq!(c.current_index(), 4);
        assert_eq!(c.entry_count(), 9);
        assert!(c.active_entry().unwrap().is_interruption());

        let shown = drain_events(&mut c)
            .iter()
            .filter(|e| matches!(e, StreamEvent::InterruptionShown { .. }))
            .count();
        assert_eq!(shown, 1);

        // Forward, back past it, forward again: never re-spliced.
        c.advance(1, t0);
        c.jump_to(0, t0);
        c.jump_to(4, t0);
        assert_eq!(c.entry_count(), 9);
        let shown = drain_events(&mut c)
            .iter()
            .filter(|e| matches!(e, StreamEvent::InterruptionShown { .. }))
            .count();
        assert_eq!(shown, 0);
    }

    #[test]
    fn test_interruption_pushes_moment_down() {
        let mut config = plain_config();
        config.stream.interruptions = vec![crate::config::InterruptionEntry {
            index: 4,
            heading: "pause".to_string(),
            body: "breathe".to_string(),
        }];
        let mut c = controller_with(&config, 8);
        let t0 = Instant::now();

        for _ in 0..4 {
            c.advance(1, t0);
        }

        // The moment that held index 4 now sits one page later.
        let next = c.entries()[5].as_moment().unwrap();
        assert_eq!(next.id, "m4");
        assert_eq!(c.moment_count(), 8);
    }

    #[test]
    fn test_jumping_past_trigger_keeps_active_entry() {
        let mut config = plain_config();
        config.stream.interruptions = vec![crate::config::InterruptionEntry {
            index: 4,
            heading: "pause".to_string(),
            body: "breathe".to_string(),
        }];
        let mut c = controller_with(&config, 10);

        c.jump_to(6, Instant::now());

        // Spliced behind the reader: the entry they landed on stays
        // active, its index shifted by the insert.
        assert_eq!(c.entry_count(), 11);
        assert_eq!(c.current_index(), 7);
        assert_eq!(c.active_entry().unwrap().as_moment().unwrap().id, "m6");
        assert!(c.entries()[4].is_interruption());
    }

    #[test]
    fn test_touch_swipe_advances() {
        let mut c = controller_with(&plain_config(), 8);
        let t0 = Instant::now();

        // Finger up past the 50 px threshold: next page.
        c.on_touch_start(400.0);
        c.on_touch_move(330.0);
        c.on_touch_end(t0);
        assert_eq!(c.current_index(), 1);

        // Finger down away from the top: previous page.
        c.on_touch_start(200.0);
        c.on_touch_move(280.0);
        c.on_touch_end(t0);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_sub_threshold_swipe_is_ignored() {
        let mut c = controller_with(&plain_config(), 8);

        c.on_touch_start(400.0);
        c.on_touch_move(370.0);
        c.on_touch_end(Instant::now());
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_pull_commit_triggers_refresh() {
        let mut c = controller_with(&plain_config(), 8);

        c.on_touch_start(100.0);
        c.on_touch_move(195.0);
        assert_eq!(c.refresh_phase(), RefreshPhase::Pulling);
        assert_eq!(c.pull_delta(), 95.0);

        c.on_touch_end(Instant::now());
        assert_eq!(c.refresh_phase(), RefreshPhase::Refreshing);
        assert_eq!(c.pull_delta(), 0.0);
        assert_eq!(drain_requests(&mut c), vec![SourceRequest::Refresh]);

        c.apply_refresh(pool(3));
        assert_eq!(c.refresh_phase(), RefreshPhase::AtRest);
        assert_eq!(c.entry_count(), 3);
        assert_eq!(c.current_index(), 0);
        assert!(drain_events(&mut c).contains(&StreamEvent::RefreshCompleted { count: 3 }));
    }

    #[test]
    fn test_pull_below_commit_has_no_effect() {
        let mut c = controller_with(&plain_config(), 8);

        c.on_touch_start(100.0);
        c.on_touch_move(160.0);
        c.on_touch_end(Instant::now());

        assert_eq!(c.refresh_phase(), RefreshPhase::AtRest);
        assert_eq!(c.pull_delta(), 0.0);
        assert!(drain_requests(&mut c).is_empty());
    }

    #[test]
    fn test_pull_delta_is_capped() {
        let mut c = controller_with(&plain_config(), 8);

        c.on_touch_start(100.0);
        c.on_touch_move(400.0);
        assert_eq!(c.pull_delta(), 120.0);
    }

    #[test]
    fn test_pull_only_from_top() {
        let mut c = controller_with(&plain_config(), 8);
        c.jump_to(3, Instant::now());

        // The same downward drag away from the top is a swipe back.
        c.on_touch_start(100.0);
        c.on_touch_move(195.0);
        assert_eq!(c.refresh_phase(), RefreshPhase::AtRest);
        c.on_touch_end(Instant::now());

        assert_eq!(c.current_index(), 2);
        assert!(drain_requests(&mut c).is_empty());
    }

    #[test]
    fn test_second_pull_while_refreshing_is_ignored() {
        let mut c = controller_with(&plain_config(), 8);

        c.on_touch_start(100.0);
        c.on_touch_move(200.0);
        c.on_touch_end(Instant::now());
        assert_eq!(drain_requests(&mut c).len(), 1);

        c.on_touch_start(100.0);
        c.on_touch_move(200.0);
        c.on_touch_end(Instant::now());
        assert_eq!(c.refresh_phase(), RefreshPhase::Refreshing);
        assert!(drain_requests(&mut c).is_empty());
    }

    #[test]
    fn test_refresh_failure_keeps_pool_and_place() {
        let mut c = controller_with(&plain_config(), 8);
        c.jump_to(3, Instant::now());
        c.request_refresh();
        drain_requests(&mut c);

        c.apply_refresh_failed();

        assert_eq!(c.refresh_phase(), RefreshPhase::AtRest);
        assert_eq!(c.entry_count(), 8);
        assert_eq!(c.current_index(), 3);
        assert!(drain_events(&mut c).contains(&StreamEvent::RefreshFailed));
    }

    #[test]
    fn test_programmatic_refresh_resets_index() {
        let mut c = controller_with(&plain_config(), 8);
        c.jump_to(5, Instant::now());

        c.request_refresh();
        assert_eq!(drain_requests(&mut c), vec![SourceRequest::Refresh]);
        c.apply_refresh(pool(6));

        assert_eq!(c.current_index(), 0);
        assert_eq!(c.scroll_offset(), 0);
    }

    #[test]
    fn test_on_scroll_recomputes_index_when_idle() {
        let mut c = controller_with(&plain_config(), 8);

        c.on_scroll(1250);
        assert_eq!(c.current_index(), 2);
        assert!(drain_events(&mut c).contains(&StreamEvent::ActiveIndexChanged { index: 2 }));
    }

    #[test]
    fn test_on_scroll_ignored_while_scrolling() {
        let mut config = plain_config();
        config.scroll.smooth_enabled = true;
        config.scroll.animation_duration_ms = 300;
        let mut c = controller_with(&config, 8);
        let t0 = Instant::now();

        c.advance(1, t0);
        assert!(c.is_scrolling());
        assert_eq!(c.current_index(), 0);

        // Native scroll reports are not authoritative mid-transition.
        c.on_scroll(0);
        assert_eq!(c.current_index(), 0);

        c.tick(t0 + Duration::from_millis(300));
        assert!(!c.is_scrolling());
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_side_effects_fire_on_settle() {
        let mut config = plain_config();
        config.scroll.smooth_enabled = true;
        config.scroll.animation_duration_ms = 300;
        let mut c = controller_with(&config, 8);
        let t0 = Instant::now();

        c.jump_to(6, t0);
        // Still in flight: no index change, no pagination yet.
        assert_eq!(c.current_index(), 0);
        assert!(drain_requests(&mut c).is_empty());

        c.tick(t0 + Duration::from_millis(150));
        assert!(drain_requests(&mut c).is_empty());

        c.tick(t0 + Duration::from_millis(300));
        assert_eq!(c.current_index(), 6);
        assert_eq!(
            drain_requests(&mut c),
            vec![SourceRequest::FetchMore { offset: 8 }]
        );
    }

    #[test]
    fn test_retarget_during_transition_settles_once() {
        let mut config = plain_config();
        config.scroll.smooth_enabled = true;
        config.scroll.animation_duration_ms = 300;
        let mut c = controller_with(&config, 8);
        let t0 = Instant::now();

        c.advance(1, t0);
        c.advance(1, t0 + Duration::from_millis(50));

        c.tick(t0 + Duration::from_millis(350));
        assert_eq!(c.current_index(), 2);

        let changes: Vec<_> = drain_events(&mut c)
            .into_iter()
            .filter(|e| matches!(e, StreamEvent::ActiveIndexChanged { index } if *index > 0))
            .collect();
        assert_eq!(changes, vec![StreamEvent::ActiveIndexChanged { index: 2 }]);
    }

    #[test]
    fn test_empty_pool_guards() {
        let mut c = ViewportController::new(&plain_config(), HEIGHT);
        c.seed(Vec::new());
        let t0 = Instant::now();

        c.on_wheel(120.0, t0);
        c.on_scroll(1200);
        c.advance(1, t0);
        c.jump_to(3, t0);
        c.heart_active();

        assert_eq!(c.current_index(), 0);
        assert!(drain_requests(&mut c).is_empty());
        assert!(drain_events(&mut c).is_empty());
    }

    #[test]
    fn test_zero_viewport_height_never_divides() {
        let mut c = ViewportController::new(&plain_config(), 0);
        c.seed(pool(4));

        c.on_scroll(500);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_heart_and_save_patch_active_moment() {
        let mut c = controller_with(&plain_config(), 3);
        drain_events(&mut c);

        c.heart_active();
        c.save_active();

        let active = c.active_entry().unwrap().as_moment().unwrap();
        assert!(active.hearted);
        assert_eq!(active.heart_count, 1);
        assert!(active.saved);

        let events = drain_events(&mut c);
        assert!(events.contains(&StreamEvent::Hearted {
            id: "m0".to_string(),
            hearted: true
        }));
        assert!(events.contains(&StreamEvent::Saved {
            id: "m0".to_string(),
            saved: true
        }));

        // Toggling back also decrements the counter.
        c.heart_active();
        let active = c.active_entry().unwrap().as_moment().unwrap();
        assert!(!active.hearted);
        assert_eq!(active.heart_count, 0);
    }

    #[test]
    fn test_comment_and_report_emit_active_id() {
        let mut c = controller_with(&plain_config(), 3);
        c.advance(1, Instant::now());
        drain_events(&mut c);

        c.open_comments();
        c.report_active();

        let events = drain_events(&mut c);
        assert!(events.contains(&StreamEvent::CommentsOpened {
            id: "m1".to_string()
        }));
        assert!(events.contains(&StreamEvent::Reported {
            id: "m1".to_string()
        }));
    }

    #[test]
    fn test_interactions_on_interstitial_do_nothing() {
        let mut config = plain_config();
        config.stream.interruptions = vec![crate::config::InterruptionEntry {
            index: 1,
            heading: "pause".to_string(),
            body: "breathe".to_string(),
        }];
        let mut c = controller_with(&config, 4);
        c.advance(1, Instant::now());
        assert!(c.active_entry().unwrap().is_interruption());
        drain_events(&mut c);

        c.heart_active();
        c.save_active();
        c.open_comments();
        c.report_active();

        assert!(drain_events(&mut c).is_empty());
    }

    #[test]
    fn test_fetch_offset_skips_interstitials() {
        let mut config = plain_config();
        config.stream.interruptions = vec![crate::config::InterruptionEntry {
            index: 4,
            heading: "pause".to_string(),
            body: "breathe".to_string(),
        }];
        let mut c = controller_with(&config, 8);

        // Crossing 4 splices the interstitial (9 entries); index 7 is the
        // near-end line for 9.
        c.jump_to(7, Instant::now());

        assert_eq!(
            drain_requests(&mut c),
            vec![SourceRequest::FetchMore { offset: 8 }]
        );
    }
}
