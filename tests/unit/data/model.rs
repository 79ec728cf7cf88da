use super::*;
use serde_json::json;

fn github_payload() -> serde_json::Value {
    json!({
        "meta": {
            "focus": 2,
            "dates": ["2014-01-30", "2014-01-31", "2014-02-01"],
            "blocks": [
                {"name": "alice", "start": 0, "count": 1},
                {"name": "bob", "start": 1, "count": 2}
            ],
            "users": [
                {"name": "alice", "repo": "proj", "heads": [{"id": "c2", "name": "master"}]},
                {"name": "bob", "repo": "proj", "heads": [{"id": "c1", "name": "feature"}]}
            ],
            "spacemap": [[[0, 3]]]
        },
        "commits": [
            {"id": "c0", "time": 0, "space": 0, "parents": [], "author": "A",
             "date": "2014-01-30T10:00:00Z", "message": "init", "gravatar": "https://x/a.png"},
            {"id": "c1", "time": 1, "space": 1, "parents": [["c0", 0, 0]], "author": "B",
             "date": "2014-01-31T10:00:00Z", "message": "feature"},
            {"id": "c2", "time": 2, "space": 0, "parents": [["c0", 0, 0], ["c1", 1, 1]],
             "author": "A", "date": "2014-02-01T10:00:00Z", "message": "merge"}
        ]
    })
}

#[test]
fn parses_github_network_shape() {
    let ds: Dataset = serde_json::from_value(github_payload()).unwrap();
    assert_eq!(ds.meta.focus_time, 2);
    assert_eq!(ds.meta.users[0].repo_name, "proj");
    assert_eq!(ds.meta.users[0].heads[0].commit_id, "c2");
    assert_eq!(ds.meta.users[0].heads[0].label, "master");
    assert_eq!(ds.commits[1].lane, 1);
    assert_eq!(
        ds.commits[2].parents,
        vec![
            ParentRef {
                id: Some("c0".to_string()),
                time: 0,
                lane: 0
            },
            ParentRef {
                id: Some("c1".to_string()),
                time: 1,
                lane: 1
            },
        ]
    );
    assert_eq!(
        ds.commits[0].gravatar_url.as_deref(),
        Some("https://x/a.png")
    );
    ds.validate().unwrap();
}

#[test]
fn parents_accept_object_form() {
    let p: ParentRef = serde_json::from_value(json!({"time": 3, "lane": 2})).unwrap();
    assert_eq!(p, ParentRef::new(3, 2));
}

#[test]
fn meta_and_chunk_combine() {
    let payload = github_payload();
    let meta = payload["meta"].to_string();
    let chunk = json!({"commits": payload["commits"]}).to_string();
    let ds = Dataset::from_meta_and_chunk(&meta, &chunk).unwrap();
    assert_eq!(ds.commits.len(), 3);
    assert_eq!(ds.meta.blocks.len(), 2);
}

#[test]
fn block_end_and_contains() {
    let b = Block {
        name: "bob".to_string(),
        start: 1,
        count: 2,
    };
    assert_eq!(b.end(), 2);
    assert_eq!(b.end_exclusive(), 3);
    assert!(b.contains(1));
    assert!(b.contains(2));
    assert!(!b.contains(3));
    assert!(!b.contains(0));
}

#[test]
fn validate_rejects_broken_invariants() {
    let mut ds: Dataset = serde_json::from_value(github_payload()).unwrap();
    ds.meta.dates.pop();
    assert!(matches!(ds.validate(), Err(GitnetError::Validation(_))));

    let mut ds: Dataset = serde_json::from_value(github_payload()).unwrap();
    ds.commits[1].parents[0].time = 5;
    assert!(ds.validate().is_err());

    let mut ds: Dataset = serde_json::from_value(github_payload()).unwrap();
    ds.commits[2].lane = 9;
    assert!(ds.validate().is_err());

    let mut ds: Dataset = serde_json::from_value(github_payload()).unwrap();
    ds.commits.swap(0, 1);
    assert!(ds.validate().is_err());
}

#[test]
fn empty_dataset_is_valid() {
    let ds = Dataset::default();
    assert!(ds.is_empty());
    ds.validate().unwrap();
}
