//! egui renderer for the timeline engine.
//!
//! [`EguiTimelineView`] keeps the item and lane datasets the controller
//! reconciles into, draws them on a scrollable canvas and turns pointer and
//! keyboard input into [`ViewEvent`]s. Axis labels are generated here in
//! absolute form (day numbers, ISO weeks, month names) and rewritten in
//! place by the controller's label pass.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use log::debug;

use crate::model::{Granularity, Template, TimelineViewport};
use crate::timeline::calendar;
use crate::timeline::view::{
    DataSet, Dataset, EventKind, LabelStyle, LaneRow, ListenerId, ListenerRegistry, TickLabel,
    TimelineView, ViewEvent, ViewOptions, VisualItem,
};
use crate::timeline::MoveGesture;
use crate::ui::theme::{self, CanvasColors};

const LANE_HEIGHT: f32 = theme::LANE_HEIGHT;
const LANE_GAP: f32 = theme::LANE_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = 7.0;
const MIN_BAR_WIDTH: f32 = 6.0;

/// One minor tick band on the axis, half-open `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisSegment {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: TickLabel,
}

/// Upper header row: month or year names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorLabel {
    pub date: NaiveDate,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Marker {
    date: NaiveDate,
    tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Move,
    ResizeStart,
    ResizeEnd,
}

#[derive(Debug, Clone)]
struct DragSnapshot {
    id: String,
    mode: DragMode,
    start: NaiveDate,
    end: NaiveDate,
    lane: usize,
    start_pointer_x: f32,
    /// Pointer position during the last frame of the drag.
    pointer: Pos2,
}

/// Build the absolute minor and major labels for `[start, end)`.
///
/// Week bands that cross a month boundary are split in two; the second half
/// carries the same ISO week tag and no text.
pub fn build_axis(
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
) -> (Vec<AxisSegment>, Vec<MajorLabel>) {
    let mut minor = Vec::new();
    let mut major = Vec::new();
    if start >= end {
        return (minor, major);
    }

    match granularity {
        Granularity::Day => {
            let mut date = start;
            while date < end {
                let next = date + Duration::days(1);
                minor.push(AxisSegment {
                    start: date,
                    end: next,
                    label: TickLabel::new(date.day().to_string()),
                });
                date = next;
            }
        }
        Granularity::Week => {
            let mut monday = calendar::week_start(start);
            while monday < end {
                let next = monday + Duration::days(7);
                let week = calendar::iso_week_number(monday);
                let seg_start = monday.max(start);
                let seg_end = next.min(end);
                let boundary = calendar::next_month(seg_start);
                if boundary > seg_start && boundary < seg_end {
                    minor.push(AxisSegment {
                        start: seg_start,
                        end: boundary,
                        label: TickLabel::week(format!("W{week}"), week),
                    });
                    minor.push(AxisSegment {
                        start: boundary,
                        end: seg_end,
                        label: TickLabel::week("", week),
                    });
                } else {
                    minor.push(AxisSegment {
                        start: seg_start,
                        end: seg_end,
                        label: TickLabel::week(format!("W{week}"), week),
                    });
                }
                monday = next;
            }
        }
        Granularity::Month => {
            let mut first = calendar::first_of_month(start);
            while first < end {
                let next = calendar::next_month(first);
                minor.push(AxisSegment {
                    start: first.max(start),
                    end: next.min(end),
                    label: TickLabel::new(first.format("%b").to_string()),
                });
                first = next;
            }
        }
    }

    // Major row: months for day/week axes, years for month axes.
    let mut date = start;
    while date < end {
        match granularity {
            Granularity::Day | Granularity::Week => {
                major.push(MajorLabel {
                    date,
                    text: date.format("%B %Y").to_string(),
                });
                date = calendar::next_month(date);
            }
            Granularity::Month => {
                major.push(MajorLabel {
                    date,
                    text: date.year().to_string(),
                });
                date = NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).unwrap_or(end);
            }
        }
    }

    (minor, major)
}

pub struct EguiTimelineView {
    items: DataSet<VisualItem>,
    lanes: DataSet<LaneRow>,
    options: Option<ViewOptions>,
    viewport: TimelineViewport,
    minor: Vec<AxisSegment>,
    major: Vec<MajorLabel>,
    markers: Vec<Marker>,
    selection: Vec<String>,
    listeners: ListenerRegistry,
    events: Vec<ViewEvent>,
    colors: CanvasColors,
    drag: Option<DragSnapshot>,
    hovered: Option<String>,
    axis_dirty: bool,
    redraw_pending: bool,
    fitted: bool,
    destroyed: bool,
}

impl Default for EguiTimelineView {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiTimelineView {
    pub fn new() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            items: DataSet::new(),
            lanes: DataSet::new(),
            options: None,
            viewport: TimelineViewport::new(today, today + Duration::days(30)),
            minor: Vec::new(),
            major: Vec::new(),
            markers: Vec::new(),
            selection: Vec::new(),
            listeners: ListenerRegistry::default(),
            events: Vec::new(),
            colors: CanvasColors::default(),
            drag: None,
            hovered: None,
            axis_dirty: false,
            redraw_pending: false,
            fitted: false,
            destroyed: false,
        }
    }

    pub fn items(&self) -> &DataSet<VisualItem> {
        &self.items
    }

    pub fn axis(&self) -> &[AxisSegment] {
        &self.minor
    }

    pub fn viewport(&self) -> &TimelineViewport {
        &self.viewport
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.range_changed();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.range_changed();
    }

    /// Fit the whole range into the canvas on the next frame.
    pub fn fit(&mut self) {
        self.fitted = false;
    }

    fn range_changed(&mut self) {
        self.axis_dirty = true;
        self.emit(ViewEvent::RangeChanged);
    }

    fn emit(&mut self, event: ViewEvent) {
        if self.destroyed || !self.listeners.deliverable(&event) {
            return;
        }
        self.events.push(event);
    }

    fn rebuild_axis(&mut self) {
        let (minor, major) = build_axis(
            self.viewport.start,
            self.viewport.end,
            self.granularity(),
        );
        self.minor = minor;
        self.major = major;
        self.axis_dirty = false;
        self.redraw_pending = true;
    }

    fn granularity(&self) -> Granularity {
        self.options
            .as_ref()
            .map(ViewOptions::granularity)
            .unwrap_or_default()
    }

    fn lane_y(&self, origin: Pos2, lane: usize) -> f32 {
        origin.y + HEADER_HEIGHT + lane as f32 * (LANE_HEIGHT + LANE_GAP)
    }

    fn lane_at(&self, origin: Pos2, y: f32) -> usize {
        let offset = (y - origin.y - HEADER_HEIGHT).max(0.0);
        let lane = (offset / (LANE_HEIGHT + LANE_GAP)).floor() as usize;
        lane.min(self.lanes.len().saturating_sub(1))
    }

    fn drag_days(&self, delta_x: f32) -> i64 {
        (delta_x / self.viewport.pixels_per_day).round() as i64
    }

    fn snap(&self, date: NaiveDate) -> NaiveDate {
        match &self.options {
            Some(options) => options.snap.apply(date.and_time(NaiveTime::MIN)),
            None => date,
        }
    }

    /// Where `drag` currently puts its item. The start goes through the snap
    /// rule and the end never precedes it, as on drop.
    fn drag_result(&self, drag: &DragSnapshot, origin: Pos2) -> (NaiveDate, NaiveDate, usize) {
        let days = Duration::days(self.drag_days(drag.pointer.x - drag.start_pointer_x));
        let (start, end, lane) = match drag.mode {
            DragMode::Move => (
                drag.start + days,
                drag.end + days,
                self.lane_at(origin, drag.pointer.y),
            ),
            DragMode::ResizeStart => ((drag.start + days).min(drag.end), drag.end, drag.lane),
            DragMode::ResizeEnd => (drag.start, drag.end + days, drag.lane),
        };
        let start = self.snap(start);
        (start, end.max(start), lane)
    }

    /// Dates and lane an item is drawn at, accounting for an active drag.
    fn preview(&self, item: &VisualItem, origin: Pos2) -> (NaiveDate, NaiveDate, usize) {
        match self.drag.as_ref().filter(|d| d.id == item.id) {
            Some(drag) => self.drag_result(drag, origin),
            None => (item.start, item.end, item.lane),
        }
    }

    fn finish_drag(&mut self, origin: Pos2) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let Some(item) = self.items.get(&drag.id) else {
            return;
        };
        let (start, end, lane) = self.drag_result(&drag, origin);
        if start == item.start && end == item.end && lane == item.lane {
            return;
        }
        let editable = self.options.as_ref().map(|o| o.editable).unwrap_or_default();
        self.emit(ViewEvent::Move(MoveGesture {
            id: drag.id,
            start: Some(start.and_time(NaiveTime::MIN)),
            end: Some(end.and_time(NaiveTime::MIN)),
            lane: editable.update_group.then_some(lane),
        }));
    }

    /// Draw the timeline into `ui` and collect the user's gestures.
    pub fn show(&mut self, ui: &mut Ui) {
        if self.destroyed || self.options.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label("No project loaded");
            });
            return;
        }
        let editable = self.options.as_ref().map(|o| o.editable).unwrap_or_default();
        let available = ui.available_size();

        if let Some(options) = &self.options {
            self.viewport
                .limit_span(available.x, options.zoom_min, options.zoom_max);
        }
        if !self.fitted && available.x > 0.0 {
            self.viewport.fit_width(available.x);
            self.fitted = true;
            self.range_changed();
        }

        // Ctrl+scroll zooms.
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
        if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
            if scroll_delta.y > 0.0 {
                self.zoom_in();
            } else if scroll_delta.y < 0.0 {
                self.zoom_out();
            }
        }

        let chart_width = self.viewport.total_width().max(available.x);
        let lane_count = self.lanes.len().max(1);
        let chart_height = HEADER_HEIGHT + lane_count as f32 * (LANE_HEIGHT + LANE_GAP) + 40.0;

        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let (response, painter) = ui.allocate_painter(
                    Vec2::new(chart_width, chart_height.max(available.y)),
                    Sense::click(),
                );
                let origin = response.rect.min;
                let mut consumed_click = false;

                painter.rect_filled(response.rect, 0.0, self.colors.background);
                self.draw_lanes(&painter, origin, chart_width);
                self.draw_axis(&painter, origin, chart_width, response.rect.height());
                self.draw_markers(&painter, origin, response.rect.height());

                let items: Vec<VisualItem> = self.items.iter().cloned().collect();
                let mut hovered_now: Option<String> = None;
                for item in &items {
                    let (start, end, lane) = self.preview(item, origin);
                    let y = self.lane_y(origin, lane) + LANE_GAP;
                    let is_selected = self.selection.contains(&item.id);
                    let bar_rect = self.draw_bar(&painter, origin, item, start, end, y, is_selected);

                    let bar_response = ui.interact(
                        bar_rect,
                        ui.make_persistent_id(("timeline-bar", &item.id)),
                        Sense::click_and_drag(),
                    );
                    let left_response = ui.interact(
                        Rect::from_center_size(
                            Pos2::new(bar_rect.left(), bar_rect.center().y),
                            Vec2::new(HANDLE_WIDTH, bar_rect.height()),
                        ),
                        ui.make_persistent_id(("timeline-resize-left", &item.id)),
                        Sense::drag(),
                    );
                    let right_response = ui.interact(
                        Rect::from_center_size(
                            Pos2::new(bar_rect.right(), bar_rect.center().y),
                            Vec2::new(HANDLE_WIDTH, bar_rect.height()),
                        ),
                        ui.make_persistent_id(("timeline-resize-right", &item.id)),
                        Sense::drag(),
                    );

                    if bar_response.clicked() {
                        self.selection = vec![item.id.clone()];
                        self.emit(ViewEvent::Select {
                            ids: self.selection.clone(),
                        });
                        consumed_click = true;
                    }

                    if editable.update_time {
                        for (resp, mode) in [
                            (&left_response, DragMode::ResizeStart),
                            (&right_response, DragMode::ResizeEnd),
                            (&bar_response, DragMode::Move),
                        ] {
                            if resp.drag_started() && self.drag.is_none() {
                                let pointer = resp.interact_pointer_pos().unwrap_or(bar_rect.center());
                                self.drag = Some(DragSnapshot {
                                    id: item.id.clone(),
                                    mode,
                                    start: item.start,
                                    end: item.end,
                                    lane: item.lane,
                                    start_pointer_x: pointer.x,
                                    pointer,
                                });
                                consumed_click = true;
                            }
                        }

                        let dragging = [&left_response, &right_response, &bar_response]
                            .into_iter()
                            .find(|r| r.dragged());
                        if let Some(resp) = dragging {
                            if let (Some(drag), Some(pointer)) =
                                (self.drag.as_mut(), resp.interact_pointer_pos())
                            {
                                if drag.id == item.id {
                                    drag.pointer = pointer;
                                }
                            }
                            let icon = match self.drag.as_ref().map(|d| d.mode) {
                                Some(DragMode::Move) => egui::CursorIcon::Grab,
                                _ => egui::CursorIcon::ResizeHorizontal,
                            };
                            ui.ctx().set_cursor_icon(icon);
                        }

                        let stopped = [&left_response, &right_response, &bar_response]
                            .into_iter()
                            .any(|r| r.drag_stopped());
                        if stopped && self.drag.as_ref().is_some_and(|d| d.id == item.id) {
                            self.finish_drag(origin);
                        }
                    }

                    if left_response.hovered() || right_response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                    }

                    if bar_response.hovered() || left_response.hovered() || right_response.hovered() {
                        hovered_now = Some(item.id.clone());
                        egui::show_tooltip_at_pointer(
                            ui.ctx(),
                            ui.layer_id(),
                            egui::Id::new(("timeline-tip", &item.id)),
                            |ui| {
                                ui.strong(&item.title);
                                ui.label(format!(
                                    "{} → {}",
                                    calendar::format_date(start),
                                    calendar::format_date(end),
                                ));
                            },
                        );
                    }
                }

                if hovered_now != self.hovered {
                    if let Some(id) = hovered_now.clone() {
                        self.emit(ViewEvent::ItemHover { id });
                    }
                    self.hovered = hovered_now;
                }

                if response.double_clicked() && !consumed_click && editable.add {
                    let start = response
                        .interact_pointer_pos()
                        .map(|p| self.viewport.x_to_datetime(p.x - origin.x));
                    debug!("event=add_gesture module=timeline_view start={start:?}");
                    self.emit(ViewEvent::Add { start });
                } else if response.clicked() && !consumed_click {
                    self.selection.clear();
                    self.emit(ViewEvent::Select { ids: Vec::new() });
                }
            });

        let delete = ui.input(|i| i.key_pressed(egui::Key::Delete));
        if delete && editable.remove && !ui.ctx().wants_keyboard_input() {
            if let Some(id) = self.selection.first().cloned() {
                self.emit(ViewEvent::Remove { id });
            }
        }

        // New labels are picked up by the label pass before the next paint.
        if self.axis_dirty {
            self.rebuild_axis();
        }
        if std::mem::take(&mut self.redraw_pending) {
            self.emit(ViewEvent::Redrawn);
        }
    }

    fn draw_lanes(&self, painter: &egui::Painter, origin: Pos2, width: f32) {
        for lane in 0..self.lanes.len() {
            let y = self.lane_y(origin, lane);
            if lane % 2 == 1 {
                painter.rect_filled(
                    Rect::from_min_size(
                        Pos2::new(origin.x, y),
                        Vec2::new(width, LANE_HEIGHT + LANE_GAP),
                    ),
                    0.0,
                    self.colors.lane_alt,
                );
            }
            painter.line_segment(
                [
                    Pos2::new(origin.x, y + LANE_HEIGHT + LANE_GAP),
                    Pos2::new(origin.x + width, y + LANE_HEIGHT + LANE_GAP),
                ],
                Stroke::new(0.5, self.colors.grid),
            );
        }
    }

    fn draw_axis(&self, painter: &egui::Painter, origin: Pos2, width: f32, height: f32) {
        painter.rect_filled(
            Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
            0.0,
            self.colors.header,
        );
        painter.line_segment(
            [
                Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
                Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
            ],
            Stroke::new(1.0, self.colors.grid),
        );

        for label in &self.major {
            let x = origin.x + self.viewport.date_to_x(label.date);
            painter.text(
                Pos2::new(x + 4.0, origin.y + 12.0),
                egui::Align2::LEFT_CENTER,
                &label.text,
                theme::font_header(),
                self.colors.text,
            );
        }

        for segment in &self.minor {
            let x0 = origin.x + self.viewport.date_to_x(segment.start);
            let x1 = origin.x + self.viewport.date_to_x(segment.end);
            let band = Rect::from_min_max(
                Pos2::new(x0, origin.y + 22.0),
                Pos2::new(x1, origin.y + HEADER_HEIGHT),
            );
            let style = segment.label.style;

            if matches!(style, LabelStyle::Flat | LabelStyle::Continuation) {
                painter.rect_filled(band, 0.0, self.colors.continuation);
            }
            // A continuation band joins the previous one, so no separator.
            if style != LabelStyle::Continuation {
                painter.line_segment(
                    [Pos2::new(x0, origin.y + 22.0), Pos2::new(x0, origin.y + height)],
                    Stroke::new(0.5, self.colors.grid),
                );
            }
            if !segment.label.text.is_empty() && x1 - x0 >= 14.0 {
                let color = if style == LabelStyle::Absolute {
                    self.colors.text_dim
                } else {
                    self.colors.text
                };
                painter
                    .with_clip_rect(band)
                    .text(
                        Pos2::new(x0 + 3.0, band.center().y),
                        egui::Align2::LEFT_CENTER,
                        &segment.label.text,
                        theme::font_sub(),
                        color,
                    );
            }
        }
    }

    fn draw_markers(&self, painter: &egui::Painter, origin: Pos2, height: f32) {
        for marker in &self.markers {
            let x = origin.x + self.viewport.date_to_x(marker.date);
            painter.line_segment(
                [
                    Pos2::new(x, origin.y + HEADER_HEIGHT),
                    Pos2::new(x, origin.y + height),
                ],
                Stroke::new(1.5, theme::MARKER_LINE),
            );
            let text = calendar::format_date(marker.date);
            let galley = painter.layout_no_wrap(text, theme::font_small(), Color32::WHITE);
            let badge = Rect::from_min_size(
                Pos2::new(x - galley.size().x / 2.0 - 4.0, origin.y + HEADER_HEIGHT - 1.0),
                Vec2::new(galley.size().x + 8.0, theme::MARKER_BADGE_HEIGHT),
            );
            painter.rect_filled(badge, Rounding::same(3.0), theme::MARKER_LINE);
            painter.galley(
                Pos2::new(badge.left() + 4.0, badge.top()),
                galley,
                Color32::WHITE,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_bar(
        &self,
        painter: &egui::Painter,
        origin: Pos2,
        item: &VisualItem,
        start: NaiveDate,
        end: NaiveDate,
        y: f32,
        is_selected: bool,
    ) -> Rect {
        let x_start = origin.x + self.viewport.date_to_x(start);
        let x_end = origin.x + self.viewport.date_to_x(end);
        let bar_width = (x_end - x_start).max(MIN_BAR_WIDTH);
        let inset = theme::BAR_INSET;
        let bar_rect = Rect::from_min_size(
            Pos2::new(x_start, y + inset),
            Vec2::new(bar_width, LANE_HEIGHT - inset * 2.0),
        );
        let rounding = Rounding::same(self.colors.bar_rounding);

        painter.rect_filled(
            bar_rect.translate(Vec2::new(1.0, 2.0)),
            rounding,
            Color32::from_black_alpha(35),
        );
        painter.rect_filled(bar_rect, rounding, theme::color_from_hex(&item.color));

        if is_selected {
            painter.rect_stroke(
                bar_rect.expand(1.5),
                Rounding::same(self.colors.bar_rounding + 1.5),
                Stroke::new(2.0, theme::ACCENT),
            );
            let handle_h = bar_rect.height() * 0.55;
            let handle_y = bar_rect.center().y - handle_h / 2.0;
            for x in [bar_rect.left() - 1.5, bar_rect.right() - 2.5] {
                painter.rect_filled(
                    Rect::from_min_size(Pos2::new(x, handle_y), Vec2::new(4.0, handle_h)),
                    Rounding::same(2.0),
                    theme::HANDLE_COLOR,
                );
            }
        }

        if bar_width > 30.0 {
            let font = if item.long_content {
                theme::font_small()
            } else {
                theme::font_bar(self.colors.font_size)
            };
            let galley = painter.layout_no_wrap(item.content.clone(), font, theme::TEXT_ON_BAR);
            let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
            painter.with_clip_rect(bar_rect.shrink(2.0)).galley(
                Pos2::new(bar_rect.left() + 6.0, text_y),
                galley,
                theme::TEXT_ON_BAR,
            );
        }

        bar_rect
    }
}

impl TimelineView for EguiTimelineView {
    fn set_options(&mut self, options: ViewOptions) {
        self.viewport.start = options.start;
        self.viewport.end = options.end;
        self.options = Some(options);
        self.fitted = false;
        self.axis_dirty = true;
        self.rebuild_axis();
    }

    fn set_template(&mut self, template: &Template) {
        self.colors = CanvasColors::from_template(template);
        self.redraw_pending = true;
    }

    fn add_custom_marker(&mut self, date: NaiveDate, tag: &str) {
        self.markers.retain(|m| m.tag != tag);
        self.markers.push(Marker {
            date,
            tag: tag.to_string(),
        });
    }

    fn clear_custom_markers(&mut self) {
        self.markers.clear();
    }

    fn on(&mut self, kind: EventKind) -> ListenerId {
        self.listeners.subscribe(kind)
    }

    fn off(&mut self, id: ListenerId) {
        self.listeners.unsubscribe(id);
    }

    fn set_selection(&mut self, ids: &[String]) {
        self.selection = ids.to_vec();
    }

    fn items_mut(&mut self) -> &mut dyn Dataset<VisualItem> {
        self.redraw_pending = true;
        &mut self.items
    }

    fn lanes_mut(&mut self) -> &mut dyn Dataset<LaneRow> {
        &mut self.lanes
    }

    fn minor_labels_mut(&mut self) -> Vec<&mut TickLabel> {
        self.minor.iter_mut().map(|s| &mut s.label).collect()
    }

    fn visible_start(&self) -> NaiveDate {
        self.minor
            .first()
            .map(|s| s.start)
            .unwrap_or(self.viewport.start)
    }

    fn drain_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }

    fn destroy(&mut self) {
        self.items = DataSet::new();
        self.lanes = DataSet::new();
        self.minor.clear();
        self.major.clear();
        self.markers.clear();
        self.selection.clear();
        self.listeners.clear();
        self.events.clear();
        self.drag = None;
        self.options = None;
        self.destroyed = true;
    }
}
