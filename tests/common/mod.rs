#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use rust_timeline_editor::model::{Granularity, ProjectWindow, Template};
use rust_timeline_editor::timeline::{
    DataSet, Dataset, EventKind, LaneRow, ListenerId, ListenerRegistry, TickLabel, TimelineView,
    ViewEvent, ViewOptions, VisualItem,
};
use rust_timeline_editor::ui::timeline_view::build_axis;
use rust_timeline_editor::{EditorState, ProjectSetup, Settings};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// What happened to a view after its controller let go of it.
#[derive(Debug, Default)]
pub struct Probe {
    pub destroy_calls: usize,
    pub detached: usize,
}

/// In-memory renderer that records everything the controller does to it.
pub struct RecordingView {
    pub items: DataSet<VisualItem>,
    pub lanes: DataSet<LaneRow>,
    pub options: Option<ViewOptions>,
    pub template_id: Option<String>,
    pub markers: Vec<(NaiveDate, String)>,
    pub listeners: ListenerRegistry,
    pub selection: Vec<String>,
    pub labels: Vec<TickLabel>,
    pub axis_start: NaiveDate,
    pub queued: Vec<ViewEvent>,
    pub probe: Rc<RefCell<Probe>>,
}

impl RecordingView {
    pub fn new() -> (Self, Rc<RefCell<Probe>>) {
        let probe = Rc::new(RefCell::new(Probe::default()));
        let view = Self {
            items: DataSet::new(),
            lanes: DataSet::new(),
            options: None,
            template_id: None,
            markers: Vec::new(),
            listeners: ListenerRegistry::default(),
            selection: Vec::new(),
            labels: Vec::new(),
            axis_start: date(1970, 1, 1),
            queued: Vec::new(),
            probe: Rc::clone(&probe),
        };
        (view, probe)
    }

    /// Queue an event the way a renderer would: only if somebody listens.
    pub fn push(&mut self, event: ViewEvent) {
        if self.listeners.deliverable(&event) {
            self.queued.push(event);
        }
    }

    /// Regenerate absolute labels, as a renderer does after a redraw.
    pub fn regenerate_labels(&mut self) {
        if let Some(options) = &self.options {
            let (minor, _) = build_axis(options.start, options.end, options.granularity());
            self.axis_start = minor.first().map(|s| s.start).unwrap_or(options.start);
            self.labels = minor.into_iter().map(|s| s.label).collect();
        }
    }

    pub fn label_texts(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.text.as_str()).collect()
    }

    pub fn lane_of(&self, id: &str) -> Option<usize> {
        self.items.get(&id.to_string()).map(|item| item.lane)
    }
}

impl TimelineView for RecordingView {
    fn set_options(&mut self, options: ViewOptions) {
        self.options = Some(options);
        self.regenerate_labels();
    }

    fn set_template(&mut self, template: &Template) {
        self.template_id = Some(template.id.clone());
    }

    fn add_custom_marker(&mut self, date: NaiveDate, tag: &str) {
        self.markers.push((date, tag.to_string()));
    }

    fn clear_custom_markers(&mut self) {
        self.markers.clear();
    }

    fn on(&mut self, kind: EventKind) -> ListenerId {
        self.listeners.subscribe(kind)
    }

    fn off(&mut self, id: ListenerId) {
        if self.listeners.unsubscribe(id) {
            self.probe.borrow_mut().detached += 1;
        }
    }

    fn set_selection(&mut self, ids: &[String]) {
        self.selection = ids.to_vec();
    }

    fn items_mut(&mut self) -> &mut dyn Dataset<VisualItem> {
        &mut self.items
    }

    fn lanes_mut(&mut self) -> &mut dyn Dataset<LaneRow> {
        &mut self.lanes
    }

    fn minor_labels_mut(&mut self) -> Vec<&mut TickLabel> {
        self.labels.iter_mut().collect()
    }

    fn visible_start(&self) -> NaiveDate {
        self.axis_start
    }

    fn drain_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.queued)
    }

    fn destroy(&mut self) {
        self.probe.borrow_mut().destroy_calls += 1;
        self.items = DataSet::new();
        self.lanes = DataSet::new();
        self.queued.clear();
    }
}

pub fn window(start: NaiveDate, end: NaiveDate, granularity: Granularity) -> ProjectWindow {
    ProjectWindow::new(start, end, granularity).unwrap()
}

pub fn editor(start: NaiveDate, end: NaiveDate, granularity: Granularity) -> EditorState {
    EditorState::new(
        ProjectSetup {
            name: "Test Project".into(),
            start,
            end,
            granularity,
            template_id: "clean-default".into(),
        },
        &Settings::default(),
    )
    .unwrap()
}
