use std::collections::HashSet;

use log::debug;

use super::lanes::LaneAllocator;
use super::view::{Dataset, LaneRow, VisualItem};
use crate::error::Result;
use crate::model::Task;

/// The operations needed to turn one item set into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub remove: Vec<String>,
    pub add: Vec<VisualItem>,
    pub update: Vec<VisualItem>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.add.is_empty() && self.update.is_empty()
    }
}

/// Counts of what a reconcile call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Split `next` against the ids already rendered.
///
/// Ids in both sets are always updated; comparing fields is left to the
/// renderer.
pub fn plan<'a, I>(existing_ids: I, next: Vec<VisualItem>) -> ReconcilePlan
where
    I: IntoIterator<Item = &'a str>,
{
    let existing: HashSet<&str> = existing_ids.into_iter().collect();
    let next_ids: HashSet<&str> = next.iter().map(|item| item.id.as_str()).collect();

    let mut remove: Vec<String> = existing
        .iter()
        .filter(|id| !next_ids.contains(*id))
        .map(|id| id.to_string())
        .collect();
    remove.sort();

    let (update, add): (Vec<VisualItem>, Vec<VisualItem>) = next
        .iter()
        .cloned()
        .partition(|item| existing.contains(item.id.as_str()));

    ReconcilePlan {
        remove,
        add,
        update,
    }
}

/// Project a task onto the renderer's item shape.
pub fn to_visual_item(task: &Task, lane: usize, long_content_threshold: usize) -> VisualItem {
    VisualItem {
        id: task.id.clone(),
        content: task.content.clone(),
        title: task.content.clone(),
        start: task.start,
        end: task.end,
        lane,
        color: task.color.clone(),
        long_content: task.is_long(long_content_threshold),
    }
}

/// Keeps a renderer's item and lane datasets in step with a task list.
#[derive(Debug, Clone)]
pub struct DatasetReconciler {
    long_content_threshold: usize,
}

impl DatasetReconciler {
    pub fn new(long_content_threshold: usize) -> Self {
        Self {
            long_content_threshold,
        }
    }

    /// Build visual items for `tasks`, assigning lanes on the way.
    pub fn visual_items(&self, tasks: &[Task], lanes: &mut LaneAllocator) -> Vec<VisualItem> {
        lanes.sync(tasks.iter().map(|t| t.id.as_str()));
        tasks
            .iter()
            .map(|task| {
                let lane = lanes.lane_of(&task.id).unwrap_or(0);
                to_visual_item(task, lane, self.long_content_threshold)
            })
            .collect()
    }

    /// Apply the diff between what `items` holds and `next`.
    pub fn reconcile(
        &self,
        items: &mut dyn Dataset<VisualItem>,
        next: Vec<VisualItem>,
    ) -> Result<ReconcileStats> {
        let existing = items.ids();
        let plan = plan(existing.iter().map(String::as_str), next);
        let stats = ReconcileStats {
            added: plan.add.len(),
            updated: plan.update.len(),
            removed: plan.remove.len(),
        };

        for id in &plan.remove {
            items.remove(id);
        }
        for item in plan.add {
            items.add(item)?;
        }
        for item in plan.update {
            items.update(item);
        }

        debug!(
            "event=reconcile module=reconcile added={} updated={} removed={}",
            stats.added, stats.updated, stats.removed
        );
        Ok(stats)
    }

    /// Make the lane dataset hold exactly rows `0..count`.
    pub fn sync_lanes(&self, rows: &mut dyn Dataset<LaneRow>, count: usize) -> Result<()> {
        let existing: HashSet<usize> = rows.ids().into_iter().collect();
        for id in 0..count {
            if !existing.contains(&id) {
                rows.add(LaneRow { id })?;
            }
        }
        for id in existing.into_iter().filter(|id| *id >= count) {
            rows.remove(&id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::view::DataSet;
    use chrono::NaiveDate;

    fn item(id: &str) -> VisualItem {
        let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        VisualItem {
            id: id.into(),
            content: id.into(),
            title: id.into(),
            start: day,
            end: day,
            lane: 0,
            color: "#3B82F6".into(),
            long_content: false,
        }
    }

    #[test]
    fn plan_splits_into_disjoint_sets() {
        let plan = plan(["a", "b"], vec![item("b"), item("c")]);
        assert_eq!(plan.remove, vec!["a".to_string()]);
        assert_eq!(plan.add, vec![item("c")]);
        assert_eq!(plan.update, vec![item("b")]);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let reconciler = DatasetReconciler::new(20);
        let mut items: DataSet<VisualItem> = DataSet::new();
        let first = reconciler
            .reconcile(&mut items, vec![item("a"), item("b")])
            .unwrap();
        assert_eq!(first, ReconcileStats { added: 2, updated: 0, removed: 0 });
        let second = reconciler
            .reconcile(&mut items, vec![item("a"), item("b")])
            .unwrap();
        assert_eq!(second, ReconcileStats { added: 0, updated: 2, removed: 0 });
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn reconcile_to_empty_removes_everything() {
        let reconciler = DatasetReconciler::new(20);
        let mut items: DataSet<VisualItem> = DataSet::new();
        reconciler.reconcile(&mut items, vec![item("a"), item("b")]).unwrap();
        let stats = reconciler.reconcile(&mut items, Vec::new()).unwrap();
        assert_eq!(stats.removed, 2);
        assert!(items.is_empty());
    }

    #[test]
    fn lane_rows_track_the_requested_count() {
        let reconciler = DatasetReconciler::new(20);
        let mut rows: DataSet<LaneRow> = DataSet::new();
        reconciler.sync_lanes(&mut rows, 4).unwrap();
        assert_eq!(rows.ids(), vec![0, 1, 2, 3]);
        reconciler.sync_lanes(&mut rows, 2).unwrap();
        assert_eq!(rows.ids(), vec![0, 1]);
    }
}
