//! The renderer seam.
//!
//! A [`TimelineView`] paints bars and axis ticks from two datasets (items
//! and lanes) and reports gestures and repaint notifications as
//! [`ViewEvent`]s. The engine never draws anything itself.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::calendar;
use super::gesture::MoveGesture;
use crate::error::DatasetError;
use crate::model::{AxisScale, Granularity, ProjectWindow, Template};

/// Anything stored in a [`Dataset`] is addressed by a key.
pub trait Keyed {
    type Key: Clone + Ord + std::fmt::Debug + std::fmt::Display;

    fn key(&self) -> Self::Key;
}

/// A task as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualItem {
    pub id: String,
    pub content: String,
    /// Hover text.
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub lane: usize,
    pub color: String,
    /// Content is long enough to be drawn in the compact style.
    pub long_content: bool,
}

impl Keyed for VisualItem {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

/// One row of the lane dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneRow {
    pub id: usize,
}

impl Keyed for LaneRow {
    type Key = usize;

    fn key(&self) -> usize {
        self.id
    }
}

/// Mutable collection the renderer reads from.
pub trait Dataset<T: Keyed> {
    /// Insert a new item. Fails if the key is already present.
    fn add(&mut self, item: T) -> Result<(), DatasetError>;
    /// Insert or replace.
    fn update(&mut self, item: T);
    fn remove(&mut self, key: &T::Key) -> Option<T>;
    fn get(&self, key: &T::Key) -> Option<&T>;
    fn ids(&self) -> Vec<T::Key>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered in-memory dataset.
#[derive(Debug, Clone)]
pub struct DataSet<T: Keyed> {
    items: BTreeMap<T::Key, T>,
}

impl<T: Keyed> Default for DataSet<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<T: Keyed> DataSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }
}

impl<T: Keyed> Dataset<T> for DataSet<T> {
    fn add(&mut self, item: T) -> Result<(), DatasetError> {
        let key = item.key();
        if self.items.contains_key(&key) {
            return Err(DatasetError::DuplicateId(key.to_string()));
        }
        self.items.insert(key, item);
        Ok(())
    }

    fn update(&mut self, item: T) {
        self.items.insert(item.key(), item);
    }

    fn remove(&mut self, key: &T::Key) -> Option<T> {
        self.items.remove(key)
    }

    fn get(&self, key: &T::Key) -> Option<&T> {
        self.items.get(key)
    }

    fn ids(&self) -> Vec<T::Key> {
        self.items.keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// How a minor axis label is currently presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    /// Still the renderer's own absolute text.
    #[default]
    Absolute,
    /// Rewritten to a relative counter.
    Relative,
    /// First half of a split week: relative text, no continuation edge.
    Flat,
    /// Second half of a split week: background only, no text.
    Continuation,
}

/// A minor axis label produced by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickLabel {
    pub text: String,
    /// ISO week tag of the segment, on week axes.
    pub week: Option<u32>,
    /// Hidden label used only to measure text.
    pub measure: bool,
    pub style: LabelStyle,
}

impl TickLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn week(text: impl Into<String>, week: u32) -> Self {
        Self {
            text: text.into(),
            week: Some(week),
            ..Default::default()
        }
    }
}

/// Which gestures the renderer may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Editable {
    pub add: bool,
    pub update_time: bool,
    pub update_group: bool,
    pub remove: bool,
}

impl Default for Editable {
    fn default() -> Self {
        Self {
            add: true,
            update_time: true,
            update_group: true,
            remove: true,
        }
    }
}

/// Snap applied by the renderer while dragging: truncate to the day, then
/// clamp to the project start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapRule {
    pub project_start: NaiveDate,
}

impl SnapRule {
    pub fn apply(&self, datetime: NaiveDateTime) -> NaiveDate {
        calendar::clamp_to_start(calendar::snap_to_day(datetime), self.project_start)
    }
}

/// Configuration handed to the renderer on mount and on window change.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub editable: Editable,
    pub snap: SnapRule,
    /// Initially visible range, half-open.
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Scroll limits, half-open.
    pub min: NaiveDate,
    pub max: NaiveDate,
    /// Narrowest and widest span the viewport may show.
    pub zoom_min: Duration,
    pub zoom_max: Duration,
    pub axis: AxisScale,
}

impl ViewOptions {
    /// Options for a project window: the range covers whole periods plus one
    /// trailing day so the last day gets a full column.
    pub fn for_window(window: &ProjectWindow) -> Self {
        let granularity = window.granularity();
        let (start, end) = calendar::expand_to_full_period(window.start(), window.end(), granularity);
        let end = end + Duration::days(1);
        Self {
            editable: Editable::default(),
            snap: SnapRule {
                project_start: window.start(),
            },
            start,
            end,
            min: start,
            max: end,
            zoom_min: Duration::days(1),
            zoom_max: Duration::days(365 * 2),
            axis: granularity.axis_scale(),
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.axis.unit
    }
}

/// Event categories a caller can subscribe to with [`TimelineView::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Select,
    ItemHover,
    RangeChanged,
    Redrawn,
}

/// Handle returned by [`TimelineView::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Something the renderer observed.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Select { ids: Vec<String> },
    ItemHover { id: String },
    RangeChanged,
    Redrawn,
    /// The user asked for a new item at a position. Renderers never create
    /// the item themselves.
    Add { start: Option<NaiveDateTime> },
    Move(MoveGesture),
    Remove { id: String },
}

impl ViewEvent {
    /// The subscription this event needs, or `None` for gestures, which
    /// are governed by [`Editable`].
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            ViewEvent::Select { .. } => Some(EventKind::Select),
            ViewEvent::ItemHover { .. } => Some(EventKind::ItemHover),
            ViewEvent::RangeChanged => Some(EventKind::RangeChanged),
            ViewEvent::Redrawn => Some(EventKind::Redrawn),
            ViewEvent::Add { .. } | ViewEvent::Move(_) | ViewEvent::Remove { .. } => None,
        }
    }
}

/// Bookkeeping for [`TimelineView::on`] / [`TimelineView::off`].
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    next: u64,
    listeners: BTreeMap<ListenerId, EventKind>,
}

impl ListenerRegistry {
    pub fn subscribe(&mut self, kind: EventKind) -> ListenerId {
        self.next += 1;
        let id = ListenerId(self.next);
        self.listeners.insert(id, kind);
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn kinds(&self) -> BTreeSet<EventKind> {
        self.listeners.values().copied().collect()
    }

    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Keep gestures and the events somebody listens to.
    pub fn deliverable(&self, event: &ViewEvent) -> bool {
        event.kind().map_or(true, |kind| self.is_listening(kind))
    }
}

/// The rendering primitive consumed by the controller.
pub trait TimelineView {
    fn set_options(&mut self, options: ViewOptions);
    fn set_template(&mut self, template: &Template);
    /// Vertical marker line with a label, e.g. the project start.
    fn add_custom_marker(&mut self, date: NaiveDate, tag: &str);
    fn clear_custom_markers(&mut self);
    fn on(&mut self, kind: EventKind) -> ListenerId;
    fn off(&mut self, id: ListenerId);
    fn set_selection(&mut self, ids: &[String]);
    fn items_mut(&mut self) -> &mut dyn Dataset<VisualItem>;
    fn lanes_mut(&mut self) -> &mut dyn Dataset<LaneRow>;
    /// Minor axis labels as currently rendered, in axis order.
    fn minor_labels_mut(&mut self) -> Vec<&mut TickLabel>;
    /// First date of the rendered axis.
    fn visible_start(&self) -> NaiveDate;
    /// Pending events for subscribed kinds and gestures.
    fn drain_events(&mut self) -> Vec<ViewEvent>;
    fn destroy(&mut self);
}
