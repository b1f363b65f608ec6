mod common;

use std::time::{Duration, Instant};

use common::{date, editor, window, RecordingView};
use rust_timeline_editor::model::Granularity;
use rust_timeline_editor::timeline::calendar::iso_week_number;
use rust_timeline_editor::timeline::controller::{PROJECT_END_MARKER, PROJECT_START_MARKER};
use rust_timeline_editor::timeline::{
    Dataset, EventKind, LabelStyle, MoveGesture, TimelineController, ViewEvent,
};
use rust_timeline_editor::{Settings, TimelineCallbacks};

fn mount(
    editor: &rust_timeline_editor::EditorState,
) -> (TimelineController<RecordingView>, std::rc::Rc<std::cell::RefCell<common::Probe>>) {
    let (view, probe) = RecordingView::new();
    let mut controller = TimelineController::mount(
        view,
        editor.project().window(),
        editor.template(),
        &Settings::default(),
    );
    controller.sync_project(editor.project()).unwrap();
    (controller, probe)
}

#[test]
fn day_axis_counts_days_from_project_start() {
    let editor = editor(date(2026, 3, 1), date(2026, 3, 10), Granularity::Day);
    let (mut controller, _) = mount(&editor);

    controller.rewrite_labels();

    let texts = controller.view().label_texts();
    assert_eq!(&texts[..3], ["DAY1", "DAY2", "DAY3"]);
    assert_eq!(texts.last().copied(), Some("DAY10"));
}

#[test]
fn week_axis_counts_iso_weeks_and_merges_split_weeks() {
    let start = date(2026, 3, 1);
    let editor = editor(start, date(2026, 4, 30), Granularity::Week);
    let (mut controller, _) = mount(&editor);

    controller.rewrite_labels();
    let labels = &controller.view().labels;

    // The week holding 1 March starts in February, so it is split.
    let first_week = iso_week_number(start);
    let halves: Vec<_> = labels.iter().filter(|l| l.week == Some(first_week)).collect();
    assert_eq!(halves.len(), 2);
    assert_eq!(halves[0].text, "WEEK1");
    assert_eq!(halves[0].style, LabelStyle::Flat);
    assert_eq!(halves[1].text, "");
    assert_eq!(halves[1].style, LabelStyle::Continuation);

    let later = iso_week_number(date(2026, 3, 15));
    let label = labels
        .iter()
        .find(|l| l.week == Some(later) && !l.text.is_empty())
        .unwrap();
    assert_eq!(label.text, "WEEK3");
    assert_eq!(label.style, LabelStyle::Relative);
}

#[test]
fn label_pass_is_idempotent() {
    let editor = editor(date(2026, 3, 1), date(2026, 6, 30), Granularity::Week);
    let (mut controller, _) = mount(&editor);

    let first = controller.rewrite_labels();
    let snapshot = controller.view().labels.clone();
    let second = controller.rewrite_labels();

    assert!(first.changed() > 0);
    assert_eq!(second.changed(), 0);
    assert_eq!(controller.view().labels, snapshot);
}

#[test]
fn month_axis_uses_month_counters() {
    let editor = editor(date(2026, 3, 1), date(2026, 6, 15), Granularity::Month);
    let (mut controller, _) = mount(&editor);

    controller.rewrite_labels();

    assert_eq!(controller.view().label_texts(), ["MONTH1", "MONTH2", "MONTH3", "MONTH4"]);
}

#[test]
fn added_tasks_get_distinct_lanes_and_vacated_lanes_are_reused() {
    let mut editor = editor(date(2026, 3, 1), date(2026, 4, 30), Granularity::Day);
    let (mut controller, _) = mount(&editor);
    let now = Instant::now();
    let at = |d| Some(date(2026, 3, d).and_hms_opt(10, 0, 0).unwrap());

    controller.view_mut().push(ViewEvent::Add { start: at(2) });
    controller.view_mut().push(ViewEvent::Add { start: at(5) });
    assert_eq!(controller.pump(now, &mut editor), 2);
    controller.sync_project(editor.project()).unwrap();

    let first = editor.project().items()[0].id.clone();
    let second = editor.project().items()[1].id.clone();
    assert_eq!(controller.view().lane_of(&first), Some(0));
    assert_eq!(controller.view().lane_of(&second), Some(1));
    assert_eq!(controller.view().lanes.len(), 3);

    controller.view_mut().push(ViewEvent::Remove { id: first.clone() });
    controller.pump(now, &mut editor);
    controller.sync_project(editor.project()).unwrap();
    assert_eq!(controller.view().lane_of(&first), None);

    controller.view_mut().push(ViewEvent::Add { start: at(8) });
    controller.pump(now, &mut editor);
    controller.sync_project(editor.project()).unwrap();

    let third = editor.project().items()[1].id.clone();
    assert_eq!(controller.view().lane_of(&third), Some(0));
    assert_eq!(controller.view().lane_of(&second), Some(1));
}

#[test]
fn add_gesture_before_project_start_is_clamped() {
    let project_start = date(2026, 3, 1);
    let mut editor = editor(project_start, date(2026, 4, 30), Granularity::Week);
    let (mut controller, _) = mount(&editor);

    let early = date(2026, 2, 24).and_hms_opt(14, 0, 0).unwrap();
    controller.view_mut().push(ViewEvent::Add { start: Some(early) });
    controller.pump(Instant::now(), &mut editor);

    let task = &editor.project().items()[0];
    assert_eq!(task.start, project_start);
    assert_eq!(task.end, date(2026, 3, 8));
    assert_eq!(task.content, "New Task");
}

#[test]
fn moving_onto_an_occupied_lane_swaps_lanes() {
    let mut editor = editor(date(2026, 3, 1), date(2026, 4, 30), Granularity::Day);
    editor.on_item_add(date(2026, 3, 2), date(2026, 3, 4));
    editor.on_item_add(date(2026, 3, 5), date(2026, 3, 9));
    let (mut controller, _) = mount(&editor);
    let a = editor.project().items()[0].id.clone();
    let b = editor.project().items()[1].id.clone();

    controller.view_mut().push(ViewEvent::Move(MoveGesture {
        id: a.clone(),
        start: Some(date(2026, 3, 3).and_hms_opt(0, 0, 0).unwrap()),
        end: Some(date(2026, 3, 6).and_hms_opt(0, 0, 0).unwrap()),
        lane: Some(1),
    }));
    controller.pump(Instant::now(), &mut editor);
    controller.sync_project(editor.project()).unwrap();

    assert_eq!(controller.view().lane_of(&a), Some(1));
    assert_eq!(controller.view().lane_of(&b), Some(0));
    let moved = editor.project().get(&a).unwrap();
    assert_eq!((moved.start, moved.end), (date(2026, 3, 3), date(2026, 3, 6)));
}

#[test]
fn move_lane_change_is_applied_even_when_dates_are_unchanged() {
    let mut editor = editor(date(2026, 3, 1), date(2026, 4, 30), Granularity::Day);
    editor.on_item_add(date(2026, 3, 2), date(2026, 3, 4));
    let (mut controller, _) = mount(&editor);
    let a = editor.project().items()[0].id.clone();

    controller.view_mut().push(ViewEvent::Move(MoveGesture {
        id: a.clone(),
        start: Some(date(2026, 3, 2).and_hms_opt(0, 0, 0).unwrap()),
        end: Some(date(2026, 3, 4).and_hms_opt(0, 0, 0).unwrap()),
        lane: Some(1),
    }));
    controller.pump(Instant::now(), &mut editor);
    controller.sync_project(editor.project()).unwrap();

    assert_eq!(controller.view().lane_of(&a), Some(1));
    assert_eq!(controller.view().lanes.len(), 3);
}

#[test]
fn hover_selects_and_select_events_reach_the_owner() {
    let mut editor = editor(date(2026, 3, 1), date(2026, 4, 30), Granularity::Day);
    editor.on_item_add(date(2026, 3, 2), date(2026, 3, 4));
    let (mut controller, _) = mount(&editor);
    let a = editor.project().items()[0].id.clone();
    editor.on_item_select(None);

    controller.view_mut().push(ViewEvent::ItemHover { id: a.clone() });
    controller.pump(Instant::now(), &mut editor);
    assert_eq!(controller.view().selection, vec![a.clone()]);
    assert_eq!(editor.selected(), None);

    controller.view_mut().push(ViewEvent::Select { ids: vec![a.clone()] });
    controller.pump(Instant::now(), &mut editor);
    assert_eq!(editor.selected(), Some(a.as_str()));

    controller.view_mut().push(ViewEvent::Select { ids: vec![] });
    controller.pump(Instant::now(), &mut editor);
    assert_eq!(editor.selected(), None);
}

#[test]
fn mount_configures_the_view() {
    let editor = editor(date(2026, 3, 4), date(2026, 3, 19), Granularity::Week);
    let (controller, _) = mount(&editor);
    let view = controller.view();

    let options = view.options.as_ref().unwrap();
    assert_eq!(options.start, date(2026, 3, 2));
    assert_eq!(options.end, date(2026, 3, 23));
    assert_eq!(view.template_id.as_deref(), Some("clean-default"));
    assert_eq!(
        view.markers,
        vec![
            (date(2026, 3, 4), PROJECT_START_MARKER.to_string()),
            (date(2026, 3, 19), PROJECT_END_MARKER.to_string()),
        ]
    );
    for kind in [
        EventKind::Select,
        EventKind::ItemHover,
        EventKind::RangeChanged,
        EventKind::Redrawn,
    ] {
        assert!(view.listeners.is_listening(kind), "{kind:?}");
    }
    // Empty project: one lane plus the spare.
    assert_eq!(view.lanes.len(), 2);
}

#[test]
fn unchanged_project_is_not_resynced() {
    let mut editor = editor(date(2026, 3, 1), date(2026, 4, 30), Granularity::Day);
    let (mut controller, _) = mount(&editor);

    assert_eq!(controller.sync_project(editor.project()).unwrap(), None);

    editor.add_task_at_start();
    let stats = controller.sync_project(editor.project()).unwrap().unwrap();
    assert_eq!(stats.added, 1);
    assert_eq!(controller.view().items.len(), 1);
}

#[test]
fn granularity_change_reconfigures_view_and_labels() {
    let mut editor = editor(date(2026, 3, 1), date(2026, 6, 15), Granularity::Day);
    let (mut controller, _) = mount(&editor);
    controller.view_mut().markers.clear();

    editor.set_granularity(Granularity::Month);
    controller.sync_project(editor.project()).unwrap();
    controller.rewrite_labels();

    let view = controller.view();
    assert_eq!(view.options.as_ref().unwrap().granularity(), Granularity::Month);
    assert_eq!(view.markers.len(), 2);
    assert_eq!(view.label_texts()[0], "MONTH1");
}

#[test]
fn refresh_timer_relabels_regenerated_axis() {
    let mut editor = editor(date(2026, 3, 1), date(2026, 3, 10), Granularity::Day);
    let (mut controller, _) = mount(&editor);
    let t0 = Instant::now();

    controller.pump(t0, &mut editor);
    assert_eq!(controller.view().label_texts()[0], "DAY1");

    // The renderer redraws its own labels without telling anyone.
    controller.view_mut().regenerate_labels();
    controller.pump(t0 + Duration::from_millis(10), &mut editor);
    assert_eq!(controller.view().label_texts()[0], "1");

    controller.pump(t0 + Duration::from_millis(100), &mut editor);
    assert_eq!(controller.view().label_texts()[0], "DAY1");
}

#[test]
fn redraw_events_trigger_a_label_pass() {
    let mut editor = editor(date(2026, 3, 1), date(2026, 3, 10), Granularity::Day);
    let (mut controller, _) = mount(&editor);
    let t0 = Instant::now();
    controller.pump(t0, &mut editor);

    controller.view_mut().regenerate_labels();
    controller.view_mut().push(ViewEvent::Redrawn);
    controller.pump(t0 + Duration::from_millis(1), &mut editor);

    assert_eq!(controller.view().label_texts()[0], "DAY1");
}

#[test]
fn destroy_detaches_listeners_and_stops_refreshing() {
    let mut editor = editor(date(2026, 3, 1), date(2026, 3, 10), Granularity::Day);
    let (mut controller, probe) = mount(&editor);
    let now = Instant::now();
    assert!(controller.next_refresh_in(now).is_some());

    controller.destroy();

    assert!(controller.is_destroyed());
    assert_eq!(controller.next_refresh_in(now), None);
    assert_eq!(probe.borrow().detached, 4);
    assert_eq!(probe.borrow().destroy_calls, 1);
    assert!(controller.view().listeners.is_empty());

    // Events after teardown are never delivered.
    controller.view_mut().push(ViewEvent::Redrawn);
    assert_eq!(controller.pump(now, &mut editor), 0);

    controller.destroy();
    drop(controller);
    assert_eq!(probe.borrow().destroy_calls, 1);
}

#[test]
fn dropping_the_controller_tears_the_view_down() {
    let editor = editor(date(2026, 3, 1), date(2026, 3, 10), Granularity::Day);
    let (controller, probe) = mount(&editor);

    drop(controller);

    assert_eq!(probe.borrow().destroy_calls, 1);
    assert_eq!(probe.borrow().detached, 4);
}

#[test]
fn mounting_directly_from_a_window_works_without_an_editor() {
    let (view, _) = RecordingView::new();
    let template = rust_timeline_editor::model::template::default_template();
    let mut controller = TimelineController::mount(
        view,
        window(date(2026, 1, 1), date(2026, 1, 5), Granularity::Day),
        &template,
        &Settings::default(),
    );
    let stats = controller.sync_items(&[]).unwrap();
    assert_eq!(stats.added, 0);
    assert_eq!(controller.lanes().lane_count(), 2);
}
