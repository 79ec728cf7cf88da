//! Dataset builders shared by the unit tests.

use std::sync::Arc;

use crate::data::index::IndexedDataset;
use crate::data::model::{Block, Commit, Dataset, DatasetMeta, Head, ParentRef, User};

pub(crate) fn commit(id: &str, time: u32, lane: u32, parents: &[(u32, u32)]) -> Commit {
    Commit {
        id: id.to_string(),
        time,
        lane,
        parents: parents
            .iter()
            .map(|&(t, l)| ParentRef::new(t, l))
            .collect(),
        author: format!("author-{lane}"),
        date: format!("2014-01-{:02}T12:00:00Z", (time % 28) + 1),
        message: format!("message {id}"),
        gravatar_url: None,
        login: None,
    }
}

pub(crate) fn block(name: &str, start: u32, count: u32) -> Block {
    Block {
        name: name.to_string(),
        start,
        count,
    }
}

pub(crate) fn user(name: &str, heads: &[(&str, &str)]) -> User {
    User {
        name: name.to_string(),
        repo_name: "repo".to_string(),
        heads: heads
            .iter()
            .map(|&(id, label)| Head {
                commit_id: id.to_string(),
                label: label.to_string(),
            })
            .collect(),
    }
}

/// Dates are one calendar day per commit, starting 2014-01-01.
pub(crate) fn dataset(commits: Vec<Commit>, blocks: Vec<Block>, users: Vec<User>) -> Dataset {
    let dates = commits
        .iter()
        .map(|c| format!("2014-01-{:02}", (c.time % 28) + 1))
        .collect();
    let focus_time = commits.last().map(|c| c.time).unwrap_or(0);
    Dataset {
        meta: DatasetMeta {
            dates,
            blocks,
            users,
            focus_time,
        },
        commits,
    }
}

/// Two contributors: `alice` on lane 0, `bob` on lanes 1..=2, with a branch and a merge.
pub(crate) fn branch_and_merge() -> Dataset {
    dataset(
        vec![
            commit("c0", 0, 0, &[]),
            commit("c1", 1, 1, &[(0, 0)]),
            commit("c2", 2, 0, &[(0, 0), (1, 1)]),
        ],
        vec![block("alice", 0, 1), block("bob", 1, 2)],
        vec![
            user("alice", &[("c2", "master")]),
            user("bob", &[("c1", "feature")]),
        ],
    )
}

pub(crate) fn indexed(ds: Dataset) -> IndexedDataset {
    IndexedDataset::new(Arc::new(ds), false)
}

/// `n` commits in a straight line on lane 0, one contributor.
pub(crate) fn linear(n: u32) -> Dataset {
    let commits = (0..n)
        .map(|t| {
            if t == 0 {
                commit(&format!("c{t}"), t, 0, &[])
            } else {
                commit(&format!("c{t}"), t, 0, &[(t - 1, 0)])
            }
        })
        .collect();
    dataset(commits, vec![block("alice", 0, 1)], vec![user("alice", &[])])
}
