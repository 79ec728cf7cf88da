use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{GitnetError, GitnetResult};

/// One commit, already placed on the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub id: String,
    /// Column index. Unique and strictly increasing in dataset order.
    pub time: u32,
    /// Row index ("space" in the GitHub network payload).
    #[serde(alias = "space")]
    pub lane: u32,
    /// Primary parent first, merge parents after it.
    #[serde(default)]
    pub parents: Vec<ParentRef>,
    #[serde(default)]
    pub author: String,
    /// ISO-8601 date string.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "gravatar", skip_serializing_if = "Option::is_none")]
    pub gravatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

/// Edge to an already-placed ancestor.
///
/// Deserializes from `{ "time": .., "lane": .. }` or from the `[id, time, space]` triple.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub time: u32,
    pub lane: u32,
}

impl ParentRef {
    pub fn new(time: u32, lane: u32) -> Self {
        Self {
            id: None,
            time,
            lane,
        }
    }
}

impl<'de> Deserialize<'de> for ParentRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Triple(String, u32, u32),
            Obj {
                #[serde(default)]
                id: Option<String>,
                time: u32,
                #[serde(alias = "space")]
                lane: u32,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Triple(id, time, lane) => ParentRef {
                id: Some(id),
                time,
                lane,
            },
            Repr::Obj { id, time, lane } => ParentRef { id, time, lane },
        })
    }
}

/// Contiguous lane range owned by one contributor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    pub start: u32,
    pub count: u32,
}

impl Block {
    /// Last lane of the block (inclusive). `start - 1` for an empty block.
    pub fn end(&self) -> i64 {
        i64::from(self.start) + i64::from(self.count) - 1
    }

    /// One past the last lane.
    pub fn end_exclusive(&self) -> u32 {
        self.start.saturating_add(self.count)
    }

    pub fn contains(&self, lane: u32) -> bool {
        lane >= self.start && i64::from(lane) <= self.end()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Head {
    #[serde(alias = "id")]
    pub commit_id: String,
    #[serde(alias = "name")]
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    #[serde(alias = "repo")]
    pub repo_name: String,
    #[serde(default)]
    pub heads: Vec<Head>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMeta {
    /// `dates[t]` is the calendar date of the commit at time `t`.
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub users: Vec<User>,
    /// Time index the view initially centers on.
    #[serde(default, alias = "focus")]
    pub focus_time: u32,
}

/// The whole laid-out network as delivered by a data source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub meta: DatasetMeta,
    #[serde(default)]
    pub commits: Vec<Commit>,
}

#[derive(Deserialize)]
struct ChunkRepr {
    commits: Vec<Commit>,
}

impl Dataset {
    pub fn from_json_str(s: &str) -> GitnetResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read a `{ "meta": .., "commits": .. }` document.
    pub fn from_path(path: &Path) -> GitnetResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read dataset '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Combine the two network endpoint payloads: the meta document and a chunk holding
    /// `commits`.
    pub fn from_meta_and_chunk(meta_json: &str, chunk_json: &str) -> GitnetResult<Self> {
        let meta: DatasetMeta = serde_json::from_str(meta_json)?;
        let chunk: ChunkRepr = serde_json::from_str(chunk_json)?;
        Ok(Self {
            meta,
            commits: chunk.commits,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Check the structural invariants the renderer relies on.
    pub fn validate(&self) -> GitnetResult<()> {
        if self.meta.dates.len() != self.commits.len() {
            return Err(GitnetError::validation(format!(
                "dates has {} entries but there are {} commits",
                self.meta.dates.len(),
                self.commits.len()
            )));
        }

        let mut prev_end: Option<u32> = None;
        for block in &self.meta.blocks {
            if let Some(end) = prev_end
                && block.start < end
            {
                return Err(GitnetError::validation(format!(
                    "block '{}' starts at lane {} inside the previous block",
                    block.name, block.start
                )));
            }
            prev_end = Some(block.end_exclusive());
        }

        let lane_known = |lane: u32| self.meta.blocks.iter().any(|b| b.contains(lane));

        let mut prev_time: Option<u32> = None;
        for commit in &self.commits {
            if let Some(prev) = prev_time
                && commit.time <= prev
            {
                return Err(GitnetError::validation(format!(
                    "commit {} has time {} after time {prev}",
                    commit.id, commit.time
                )));
            }
            prev_time = Some(commit.time);

            if !lane_known(commit.lane) {
                return Err(GitnetError::validation(format!(
                    "commit {} is on lane {} outside every block",
                    commit.id, commit.lane
                )));
            }

            for parent in &commit.parents {
                if parent.time >= commit.time {
                    return Err(GitnetError::validation(format!(
                        "commit {} references parent time {} not before its own time {}",
                        commit.id, parent.time, commit.time
                    )));
                }
                if !lane_known(parent.lane) {
                    return Err(GitnetError::validation(format!(
                        "commit {} references parent lane {} outside every block",
                        commit.id, parent.lane
                    )));
                }
            }
        }

        if !self.commits.is_empty() && self.meta.focus_time as usize >= self.commits.len() {
            return Err(GitnetError::validation(format!(
                "focus time {} is past the last commit",
                self.meta.focus_time
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/model.rs"]
mod tests;
