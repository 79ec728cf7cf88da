use super::*;
use crate::foundation::error::GitnetError;
use crate::test_support::branch_and_merge;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gitnet-source-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn single_file_round_trips() {
    let dir = temp_dir("single");
    let path = dir.join("network.json");
    std::fs::write(&path, serde_json::to_string(&branch_and_merge()).unwrap()).unwrap();

    let ds = JsonFileSource::single(&path).load().unwrap().unwrap();
    assert_eq!(ds, branch_and_merge());
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn meta_and_chunk_are_combined() {
    let dir = temp_dir("pair");
    let full = branch_and_merge();
    let meta = dir.join("meta.json");
    let chunk = dir.join("chunk.json");
    std::fs::write(&meta, serde_json::to_string(&full.meta).unwrap()).unwrap();
    std::fs::write(
        &chunk,
        serde_json::json!({ "commits": full.commits }).to_string(),
    )
    .unwrap();

    let ds = JsonFileSource::meta_and_chunk(&meta, &chunk)
        .load()
        .unwrap()
        .unwrap();
    assert_eq!(ds.commits.len(), 3);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn invalid_datasets_are_rejected() {
    let dir = temp_dir("invalid");
    let path = dir.join("network.json");
    let mut broken = branch_and_merge();
    broken.meta.dates.clear();
    std::fs::write(&path, serde_json::to_string(&broken).unwrap()).unwrap();

    let err = JsonFileSource::single(&path).load().unwrap_err();
    assert!(matches!(err, GitnetError::Validation(_)));
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn missing_files_carry_context() {
    let err = JsonFileSource::single("/nonexistent/gitnet.json")
        .load()
        .unwrap_err();
    assert!(format!("{err:#}").contains("gitnet.json"));
}
