use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::data::model::{Block, Commit, Dataset, User};

/// Lookup tables derived from a [`Dataset`].
///
/// Built once per `set_data` and never updated independently of the dataset it was built from.
#[derive(Debug, Clone, Default)]
pub struct DatasetIndex {
    commit_pos_by_id: HashMap<String, usize>,
    block_by_name: HashMap<String, usize>,
    user_by_name: HashMap<String, usize>,
    date_spans: BTreeMap<NaiveDate, (u32, u32)>,
    lane_count: u32,
}

impl DatasetIndex {
    /// Build the tables. With `only_primary` the displayed lanes stop at the end of the first
    /// block.
    pub fn build(ds: &Dataset, only_primary: bool) -> Self {
        let commit_pos_by_id = ds
            .commits
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        let block_by_name = ds
            .meta
            .blocks
            .iter()
            .enumerate()
            .map(|(i, b)| (b.name.clone(), i))
            .collect();
        let user_by_name = ds
            .meta
            .users
            .iter()
            .enumerate()
            .map(|(i, u)| (u.name.clone(), i))
            .collect();

        let mut date_spans = BTreeMap::<NaiveDate, (u32, u32)>::new();
        for (t, raw) in ds.meta.dates.iter().enumerate() {
            let Some(date) = parse_calendar_date(raw) else {
                continue;
            };
            let t = t as u32;
            date_spans
                .entry(date)
                .and_modify(|span| {
                    span.0 = span.0.min(t);
                    span.1 = span.1.max(t);
                })
                .or_insert((t, t));
        }

        let last_block = if only_primary {
            ds.meta.blocks.first()
        } else {
            ds.meta.blocks.last()
        };
        let lane_count = last_block.map(Block::end_exclusive).unwrap_or(0);

        Self {
            commit_pos_by_id,
            block_by_name,
            user_by_name,
            date_spans,
            lane_count,
        }
    }

    /// Number of displayed lanes.
    pub fn lane_count(&self) -> u32 {
        self.lane_count
    }

    pub fn commit_position(&self, id: &str) -> Option<usize> {
        self.commit_pos_by_id.get(id).copied()
    }

    pub fn block_position(&self, name: &str) -> Option<usize> {
        self.block_by_name.get(name).copied()
    }

    pub fn user_position(&self, name: &str) -> Option<usize> {
        self.user_by_name.get(name).copied()
    }

    /// First and last time index carrying `date`.
    pub fn date_span(&self, date: NaiveDate) -> Option<(u32, u32)> {
        self.date_spans.get(&date).copied()
    }
}

/// A dataset paired with its derived index.
#[derive(Debug, Clone)]
pub struct IndexedDataset {
    data: Arc<Dataset>,
    index: DatasetIndex,
}

impl IndexedDataset {
    pub fn new(data: Arc<Dataset>, only_primary: bool) -> Self {
        let index = DatasetIndex::build(&data, only_primary);
        Self { data, index }
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn shared(&self) -> Arc<Dataset> {
        Arc::clone(&self.data)
    }

    pub fn index(&self) -> &DatasetIndex {
        &self.index
    }

    pub fn commits(&self) -> &[Commit] {
        &self.data.commits
    }

    pub fn commit_count(&self) -> usize {
        self.data.commits.len()
    }

    pub fn lane_count(&self) -> u32 {
        self.index.lane_count
    }

    pub fn blocks(&self) -> &[Block] {
        &self.data.meta.blocks
    }

    pub fn users(&self) -> &[User] {
        &self.data.meta.users
    }

    pub fn dates(&self) -> &[String] {
        &self.data.meta.dates
    }

    pub fn focus_time(&self) -> u32 {
        self.data.meta.focus_time
    }

    pub fn commit(&self, id: &str) -> Option<&Commit> {
        self.index
            .commit_position(id)
            .and_then(|i| self.data.commits.get(i))
    }

    pub fn block(&self, name: &str) -> Option<&Block> {
        self.index
            .block_position(name)
            .and_then(|i| self.data.meta.blocks.get(i))
    }

    pub fn user(&self, name: &str) -> Option<&User> {
        self.index
            .user_position(name)
            .and_then(|i| self.data.meta.users.get(i))
    }

    /// Index of the block whose lane range contains `lane`.
    pub fn block_index_for_lane(&self, lane: u32) -> Option<usize> {
        let blocks = &self.data.meta.blocks;
        let after = blocks.partition_point(|b| b.start <= lane);
        let i = after.checked_sub(1)?;
        blocks[i].contains(lane).then_some(i)
    }

    pub fn block_for_lane(&self, lane: u32) -> Option<&Block> {
        self.block_index_for_lane(lane)
            .map(|i| &self.data.meta.blocks[i])
    }

    /// Contributor owning `lane`.
    pub fn user_for_lane(&self, lane: u32) -> Option<&User> {
        self.block_for_lane(lane).and_then(|b| self.user(&b.name))
    }

    /// Commits whose time lies in `[min_time, max_time)`, in dataset order.
    pub fn commits_in_time_range(&self, min_time: u32, max_time: u32) -> &[Commit] {
        let commits = &self.data.commits;
        let lo = commits.partition_point(|c| c.time < min_time);
        let hi = commits.partition_point(|c| c.time < max_time);
        &commits[lo..hi.max(lo)]
    }

    /// First commit (dataset order) whose id starts with `prefix`.
    pub fn commit_by_prefix(&self, prefix: &str) -> Option<&Commit> {
        if prefix.is_empty() {
            return None;
        }
        self.data.commits.iter().find(|c| c.id.starts_with(prefix))
    }

    pub fn date_span(&self, date: NaiveDate) -> Option<(u32, u32)> {
        self.index.date_span(date)
    }
}

/// Parse the leading `YYYY-MM-DD` of a date or datetime string.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

#[cfg(test)]
#[path = "../../tests/unit/data/index.rs"]
mod tests;
