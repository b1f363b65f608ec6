use std::collections::{BTreeSet, HashMap, HashSet};

/// Assigns every task its own row, reusing the lowest vacated lane.
///
/// Once an id has a lane it keeps it until the id disappears from a
/// [`sync`](LaneAllocator::sync) or is moved with
/// [`assign`](LaneAllocator::assign).
#[derive(Debug, Clone, Default)]
pub struct LaneAllocator {
    lanes: HashMap<String, usize>,
}

impl LaneAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the assignment in line with the current task ids.
    ///
    /// Ids no longer present are released first, so their lanes can be
    /// handed to new ids in the same call.
    pub fn sync<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ids: Vec<&str> = ids.into_iter().collect();
        let live: HashSet<&str> = ids.iter().copied().collect();
        self.lanes.retain(|id, _| live.contains(id.as_str()));

        let mut used: BTreeSet<usize> = self.lanes.values().copied().collect();
        for id in ids {
            if self.lanes.contains_key(id) {
                continue;
            }
            let lane = lowest_free(&used);
            used.insert(lane);
            self.lanes.insert(id.to_string(), lane);
        }
    }

    /// Move `id` to `lane`. A task already on that lane takes over the
    /// moved task's old lane, so no two tasks share a row.
    pub fn assign(&mut self, id: &str, lane: usize) {
        let previous = self.lanes.get(id).copied();
        if previous == Some(lane) {
            return;
        }
        let occupant = self
            .lanes
            .iter()
            .find(|(other, l)| **l == lane && other.as_str() != id)
            .map(|(other, _)| other.clone());
        if let Some(occupant) = occupant {
            match previous {
                Some(old) => {
                    self.lanes.insert(occupant, old);
                }
                None => {
                    let mut used: BTreeSet<usize> = self.lanes.values().copied().collect();
                    used.insert(lane);
                    let free = lowest_free(&used);
                    self.lanes.insert(occupant, free);
                }
            }
        }
        self.lanes.insert(id.to_string(), lane);
    }

    pub fn lane_of(&self, id: &str) -> Option<usize> {
        self.lanes.get(id).copied()
    }

    /// Rows the renderer must show: every used lane plus one empty buffer
    /// lane below them as a drop target.
    pub fn lane_count(&self) -> usize {
        self.lanes.values().copied().max().unwrap_or(0) + 2
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn clear(&mut self) {
        self.lanes.clear();
    }
}

fn lowest_free(used: &BTreeSet<usize>) -> usize {
    let mut lane = 0;
    while used.contains(&lane) {
        lane += 1;
    }
    lane
}
