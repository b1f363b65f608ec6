//! Single owner of all derived timeline state.
//!
//! A [`TimelineController`] is mounted on a view, fed the task list and
//! pumped once per frame. It owns the view, so dropping the controller
//! cancels the label refresh, detaches every listener and destroys the view.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use log::{debug, info};

use super::calendar;
use super::gesture::GestureTranslator;
use super::labels::{LabelRewriter, RewriteStats};
use super::lanes::LaneAllocator;
use super::reconcile::{DatasetReconciler, ReconcileStats};
use super::view::{EventKind, ListenerId, TimelineView, ViewEvent, ViewOptions};
use crate::config::Settings;
use crate::error::Result;
use crate::model::{Project, ProjectWindow, Task, Template};

pub const PROJECT_START_MARKER: &str = "project-start";
pub const PROJECT_END_MARKER: &str = "project-end";

/// Receives translated user intent. Implemented by whoever owns the tasks.
pub trait TimelineCallbacks {
    fn on_item_add(&mut self, start: NaiveDate, end: NaiveDate);
    fn on_item_update(&mut self, id: &str, start: NaiveDate, end: NaiveDate);
    fn on_item_select(&mut self, id: Option<&str>);
    fn on_item_remove(&mut self, id: &str);
}

/// Bounded-frequency timer with a cancellation flag.
#[derive(Debug, Clone)]
pub struct RefreshTimer {
    interval: Duration,
    last_run: Option<Instant>,
    cancelled: bool,
}

impl RefreshTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            cancelled: false,
        }
    }

    /// True at most once per interval; consumes the tick when true.
    pub fn due(&mut self, now: Instant) -> bool {
        if self.cancelled {
            return false;
        }
        let due = self
            .last_run
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval);
        if due {
            self.last_run = Some(now);
        }
        due
    }

    /// Time until the next tick, `None` once cancelled.
    pub fn next_in(&self, now: Instant) -> Option<Duration> {
        if self.cancelled {
            return None;
        }
        Some(match self.last_run {
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        })
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

pub struct TimelineController<V: TimelineView> {
    view: V,
    window: ProjectWindow,
    lanes: LaneAllocator,
    reconciler: DatasetReconciler,
    rewriter: LabelRewriter,
    translator: GestureTranslator,
    timer: RefreshTimer,
    listeners: Vec<ListenerId>,
    synced_revision: Option<u64>,
    destroyed: bool,
}

impl<V: TimelineView> TimelineController<V> {
    /// Configure `view` for `window` and start listening to it.
    pub fn mount(mut view: V, window: ProjectWindow, template: &Template, settings: &Settings) -> Self {
        view.set_template(template);
        configure_view(&mut view, &window);
        let listeners = [
            EventKind::Select,
            EventKind::ItemHover,
            EventKind::RangeChanged,
            EventKind::Redrawn,
        ]
        .into_iter()
        .map(|kind| view.on(kind))
        .collect();

        info!(
            "event=view_mount module=controller start={} end={} granularity={}",
            window.start(),
            window.end(),
            window.granularity()
        );

        Self {
            view,
            window,
            lanes: LaneAllocator::new(),
            reconciler: DatasetReconciler::new(settings.long_content_threshold),
            rewriter: LabelRewriter::default(),
            translator: GestureTranslator::new(&window),
            timer: RefreshTimer::new(settings.label_refresh_interval()),
            listeners,
            synced_revision: None,
            destroyed: false,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn window(&self) -> ProjectWindow {
        self.window
    }

    pub fn lanes(&self) -> &LaneAllocator {
        &self.lanes
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Replace the project window. Lanes are reassigned on the next sync.
    pub fn set_project_window(&mut self, window: ProjectWindow) {
        if self.destroyed || window == self.window {
            return;
        }
        self.window = window;
        self.translator = GestureTranslator::new(&window);
        self.lanes.clear();
        self.synced_revision = None;
        configure_view(&mut self.view, &window);
        info!(
            "event=window_change module=controller start={} end={} granularity={}",
            window.start(),
            window.end(),
            window.granularity()
        );
    }

    pub fn set_template(&mut self, template: &Template) {
        if !self.destroyed {
            self.view.set_template(template);
        }
    }

    /// Mirror an external selection (e.g. from the task table).
    pub fn select(&mut self, id: Option<&str>) {
        if self.destroyed {
            return;
        }
        let ids: Vec<String> = id.map(str::to_string).into_iter().collect();
        self.view.set_selection(&ids);
    }

    /// Push `tasks` into the view: assign lanes, then diff the datasets.
    pub fn sync_items(&mut self, tasks: &[Task]) -> Result<ReconcileStats> {
        if self.destroyed {
            return Ok(ReconcileStats::default());
        }
        let items = self.reconciler.visual_items(tasks, &mut self.lanes);
        self.reconciler
            .sync_lanes(self.view.lanes_mut(), self.lanes.lane_count())?;
        self.reconciler.reconcile(self.view.items_mut(), items)
    }

    /// Sync `project` if it changed since the last call.
    pub fn sync_project(&mut self, project: &Project) -> Result<Option<ReconcileStats>> {
        self.set_project_window(project.window());
        if self.synced_revision == Some(project.revision()) {
            return Ok(None);
        }
        let stats = self.sync_items(project.items())?;
        self.synced_revision = Some(project.revision());
        Ok(Some(stats))
    }

    /// Handle pending view events and run the label pass if it is due.
    /// Returns the number of events handled.
    pub fn pump(&mut self, now: Instant, callbacks: &mut dyn TimelineCallbacks) -> usize {
        if self.destroyed {
            return 0;
        }
        let events = self.view.drain_events();
        let handled = events.len();
        let mut relabel = false;

        for event in events {
            match event {
                ViewEvent::Select { ids } => {
                    callbacks.on_item_select(ids.first().map(String::as_str));
                }
                ViewEvent::ItemHover { id } => {
                    // Selecting on hover lets the user drag without clicking first.
                    self.view.set_selection(&[id]);
                }
                ViewEvent::RangeChanged | ViewEvent::Redrawn => relabel = true,
                ViewEvent::Add { start } => {
                    if let Some(range) = self.translator.on_add(start) {
                        debug!(
                            "event=item_add module=controller start={} end={}",
                            range.start, range.end
                        );
                        callbacks.on_item_add(range.start, range.end);
                    }
                }
                ViewEvent::Move(gesture) => {
                    if let Some(moved) = self.translator.on_move(gesture) {
                        if let Some(lane) = moved.lane {
                            self.lanes.assign(&moved.id, lane);
                            self.synced_revision = None;
                        }
                        callbacks.on_item_update(&moved.id, moved.start, moved.end);
                    }
                }
                ViewEvent::Remove { id } => {
                    let id = self.translator.on_remove(id);
                    callbacks.on_item_remove(&id);
                }
            }
        }

        if self.timer.due(now) {
            relabel = true;
        }
        if relabel {
            self.rewrite_labels();
        }
        handled
    }

    /// Run the label pass now.
    pub fn rewrite_labels(&mut self) -> RewriteStats {
        if self.destroyed {
            return RewriteStats::default();
        }
        let axis_start = self.view.visible_start();
        let labels = self.view.minor_labels_mut();
        self.rewriter.rewrite(
            labels,
            self.window.start(),
            self.window.granularity(),
            axis_start,
        )
    }

    /// When the event loop should wake up for the next label refresh.
    pub fn next_refresh_in(&self, now: Instant) -> Option<Duration> {
        self.timer.next_in(now)
    }

    /// Stop the timer, detach listeners and destroy the view. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.timer.cancel();
        for id in self.listeners.drain(..) {
            self.view.off(id);
        }
        self.view.destroy();
        self.destroyed = true;
        info!("event=view_destroy module=controller status=ok");
    }
}

impl<V: TimelineView> Drop for TimelineController<V> {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn configure_view<V: TimelineView>(view: &mut V, window: &ProjectWindow) {
    view.set_options(ViewOptions::for_window(window));
    view.clear_custom_markers();
    view.add_custom_marker(window.start(), PROJECT_START_MARKER);
    view.add_custom_marker(window.end(), PROJECT_END_MARKER);
    debug!(
        "event=view_configure module=controller markers={},{}",
        calendar::format_date(window.start()),
        calendar::format_date(window.end())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_fires_once_per_interval() {
        let mut timer = RefreshTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        assert_eq!(timer.next_in(t0), Some(Duration::ZERO));
        assert!(timer.due(t0));
        assert!(!timer.due(t0 + Duration::from_millis(50)));
        assert_eq!(
            timer.next_in(t0 + Duration::from_millis(50)),
            Some(Duration::from_millis(50))
        );
        assert!(timer.due(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = RefreshTimer::new(Duration::from_millis(100));
        timer.cancel();
        assert!(timer.is_cancelled());
        assert!(!timer.due(Instant::now()));
        assert_eq!(timer.next_in(Instant::now()), None);
    }
}
