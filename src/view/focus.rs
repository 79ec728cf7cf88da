//! Focus targets accepted by [`NetworkView::focus_on_lane`] and
//! [`NetworkView::focus_on_commit`].
//!
//! [`NetworkView::focus_on_lane`]: crate::view::NetworkView::focus_on_lane
//! [`NetworkView::focus_on_commit`]: crate::view::NetworkView::focus_on_commit

use std::str::FromStr;

use chrono::NaiveDate;

use crate::data::index::IndexedDataset;
use crate::foundation::error::{GitnetError, GitnetResult};

/// Row to bring to the top of the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FocusLane {
    /// Lane index. Signed so out-of-range input can be reported instead of wrapping.
    Lane(i64),
    /// Start lane of the contributor's block.
    Contributor(String),
}

impl FocusLane {
    /// Integers become [`FocusLane::Lane`], anything else a contributor name.
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        match t.parse::<i64>() {
            Ok(n) => Self::Lane(n),
            Err(_) => Self::Contributor(t.to_string()),
        }
    }

    /// Lane index inside `[0, lane_count)`.
    pub fn resolve(&self, ds: &IndexedDataset) -> GitnetResult<u32> {
        let lane_count = ds.lane_count();
        match self {
            Self::Lane(n) => u32::try_from(*n)
                .ok()
                .filter(|&lane| lane < lane_count)
                .ok_or_else(|| {
                    GitnetError::invalid_target(format!(
                        "lane {n} outside [0, {lane_count})"
                    ))
                }),
            Self::Contributor(name) => {
                let block = ds.block(name).ok_or_else(|| {
                    GitnetError::invalid_target(format!("unknown contributor '{name}'"))
                })?;
                if block.start >= lane_count {
                    return Err(GitnetError::invalid_target(format!(
                        "contributor '{name}' is not displayed"
                    )));
                }
                Ok(block.start)
            }
        }
    }
}

impl FromStr for FocusLane {
    type Err = GitnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Column to center horizontally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FocusCommit {
    Time(u32),
    /// Full commit id or a prefix of one.
    Hash(String),
    Date(NaiveDate),
}

impl FocusCommit {
    /// All digits is a time index, `YYYY-MM-DD` a date, anything else a commit id or prefix.
    pub fn parse(s: &str) -> GitnetResult<Self> {
        let t = s.trim();
        if t.is_empty() {
            return Err(GitnetError::invalid_target("empty commit target"));
        }
        if t.bytes().all(|b| b.is_ascii_digit()) {
            return t
                .parse::<u32>()
                .map(Self::Time)
                .map_err(|_| GitnetError::invalid_target(format!("time index '{t}' too large")));
        }
        if looks_like_date(t) {
            return NaiveDate::parse_from_str(t, "%Y-%m-%d")
                .map(Self::Date)
                .map_err(|e| GitnetError::invalid_target(format!("bad date '{t}': {e}")));
        }
        Ok(Self::Hash(t.to_string()))
    }

    /// Time coordinate to center on. Dates resolve to the midpoint of their columns.
    pub fn resolve(&self, ds: &IndexedDataset) -> GitnetResult<f64> {
        match self {
            Self::Time(t) => {
                if (*t as usize) < ds.commit_count() {
                    Ok(f64::from(*t))
                } else {
                    Err(GitnetError::invalid_target(format!(
                        "time {t} outside [0, {})",
                        ds.commit_count()
                    )))
                }
            }
            Self::Hash(h) => ds
                .commit(h)
                .or_else(|| ds.commit_by_prefix(h))
                .map(|c| f64::from(c.time))
                .ok_or_else(|| GitnetError::invalid_target(format!("no commit matches '{h}'"))),
            Self::Date(d) => ds
                .date_span(*d)
                .map(|(first, last)| (f64::from(first) + f64::from(last)) / 2.0)
                .ok_or_else(|| GitnetError::invalid_target(format!("no commit on {d}"))),
        }
    }
}

impl FromStr for FocusCommit {
    type Err = GitnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn looks_like_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

#[cfg(test)]
#[path = "../../tests/unit/view/focus.rs"]
mod tests;
