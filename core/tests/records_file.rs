use std::fs;
use std::path::PathBuf;

use sapper_core::*;

fn scratch_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("sapper-{}-{}.txt", name, std::process::id()));
    let _ = fs::remove_file(&path);
    path
}

#[test]
fn missing_file_loads_empty_and_is_created_on_append() {
    let path = scratch_path("missing");

    let mut store = RecordStore::load(FileRecordLog::new(&path)).unwrap();
    assert_eq!(store.best_time(Difficulty::Easy), None);

    store
        .append(&GameResult {
            elapsed_secs: 61.5,
            outcome: Outcome::Win,
            difficulty: Difficulty::Hard,
        })
        .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "61.5,win,hard\n");
    let reloaded = RecordStore::load(FileRecordLog::new(&path)).unwrap();
    assert_eq!(reloaded.best_time(Difficulty::Hard), Some(61.5));
    fs::remove_file(&path).unwrap();
}

#[test]
fn corrupt_lines_do_not_block_loading() {
    let path = scratch_path("corrupt");
    fs::write(
        &path,
        "12.0,win,easy\nnot,a,number,at all\n\n9.75,win,easy\n3,lose,easy\n",
    )
    .unwrap();

    let store = RecordStore::load(FileRecordLog::new(&path)).unwrap();

    assert_eq!(store.best_time(Difficulty::Easy), Some(9.75));
    assert_eq!(store.best_time(Difficulty::Medium), None);
    fs::remove_file(&path).unwrap();
}

#[test]
fn non_utf8_line_is_skipped() {
    let path = scratch_path("bytes");
    fs::write(&path, b"12.0,win,easy\n\xff\xfe,win,easy\n9.5,win,easy\r\n").unwrap();

    let store = RecordStore::load(FileRecordLog::new(&path)).unwrap();

    assert_eq!(store.best_time(Difficulty::Easy), Some(9.5));
    fs::remove_file(&path).unwrap();
}

#[test]
fn appends_accumulate_in_order() {
    let path = scratch_path("order");
    let mut store = RecordStore::load(FileRecordLog::new(&path)).unwrap();

    for (elapsed_secs, outcome) in [(4.0, Outcome::Lose), (20.25, Outcome::Win)] {
        store
            .append(&GameResult {
                elapsed_secs,
                outcome,
                difficulty: Difficulty::Medium,
            })
            .unwrap();
    }

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "4,lose,medium\n20.25,win,medium\n"
    );
    fs::remove_file(&path).unwrap();
}
