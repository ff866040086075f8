//! Balance cache behaviour: single-file retention per address, last-write
//! wins on read, and tolerant row parsing.

use std::fs;

use nockwallet::cache::BalanceCache;
use tempfile::TempDir;

const ADDRESS: &str = "BLFpcache000000000000000000000000";

fn cache_files(dir: &TempDir, address: &str) -> Vec<String> {
    let prefix = format!("{}_", address);
    fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| name.starts_with(&prefix))
        .collect()
}

#[test]
fn retention_is_one_file_per_address() {
    let dir = TempDir::new().unwrap();
    let cache = BalanceCache::new(dir.path().to_path_buf());

    for i in 0..5u64 {
        let raw = format!("n{i},1,src-{i},{},10{i}\n", i * 100);
        cache.record_snapshot(ADDRESS, &raw);
    }

    assert_eq!(cache_files(&dir, ADDRESS).len(), 1);

    // Read returns the content of the last successful write.
    let entry = cache.read_snapshot(ADDRESS);
    assert_eq!(entry.total_balance_nicks, 400);
    assert_eq!(entry.notes.len(), 1);
    assert_eq!(entry.notes[0].name, "n4");
    assert!(entry.captured_at.is_some());
}

#[test]
fn addresses_do_not_evict_each_other() {
    let dir = TempDir::new().unwrap();
    let cache = BalanceCache::new(dir.path().to_path_buf());

    let other = "BLFpother000000000000000000000000";
    cache.record_snapshot(ADDRESS, "a,1,s,100,1\n");
    cache.record_snapshot(other, "b,1,s,200,1\n");
    cache.record_snapshot(ADDRESS, "a,1,s,300,2\n");

    assert_eq!(cache_files(&dir, ADDRESS).len(), 1);
    assert_eq!(cache_files(&dir, other).len(), 1);
    assert_eq!(cache.read_snapshot(ADDRESS).total_balance_nicks, 300);
    assert_eq!(cache.read_snapshot(other).total_balance_nicks, 200);
}

#[test]
fn missing_snapshot_reads_as_empty_entry() {
    let dir = TempDir::new().unwrap();
    let cache = BalanceCache::new(dir.path().to_path_buf());

    let entry = cache.read_snapshot(ADDRESS);
    assert_eq!(entry.address, ADDRESS);
    assert_eq!(entry.total_balance_nicks, 0);
    assert_eq!(entry.total_balance_nock, 0.0);
    assert!(entry.notes.is_empty());
    assert!(entry.captured_at.is_none());
}

// A short row must not abort the parse of the rows after it.
#[test]
fn short_rows_are_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let cache = BalanceCache::new(dir.path().to_path_buf());

    let raw = "\
name,version,source,assets,height
n1,1,src-1,65536,120
badrow,1
n2,1,src-2,32768,121
";
    let entry = cache.record_snapshot(ADDRESS, raw);
    assert_eq!(entry.notes.len(), 2);
    assert_eq!(entry.total_balance_nicks, 98304);
    assert_eq!(entry.total_balance_nock, 1.5);
    assert_eq!(entry.notes[1].block_height, "121");
}

// Rows whose asset column is not an integer contribute nothing but do not
// poison the snapshot.
#[test]
fn non_integer_asset_column_is_skipped() {
    let dir = TempDir::new().unwrap();
    let cache = BalanceCache::new(dir.path().to_path_buf());

    let raw = "n1,1,s1,not-a-number,5\nn2,1,s2,4096,6\n";
    let entry = cache.record_snapshot(ADDRESS, raw);
    assert_eq!(entry.notes.len(), 1);
    assert_eq!(entry.total_balance_nicks, 4096);
}

// The cache is best-effort: a write that cannot land on disk is logged,
// not surfaced, and the parsed entry still comes back.
#[test]
fn cache_write_failure_still_returns_parsed_entry() {
    let dir = TempDir::new().unwrap();
    let blocked = dir.path().join("not_a_directory");
    fs::write(&blocked, "occupied").unwrap();

    let cache = BalanceCache::new(blocked);
    let entry = cache.record_snapshot(ADDRESS, "n1,1,s1,100,5\n");
    assert_eq!(entry.notes.len(), 1);
    assert_eq!(entry.total_balance_nicks, 100);
    assert!(entry.captured_at.is_some());

    // Nothing was persisted, so a read comes back empty.
    let reread = cache.read_snapshot(ADDRESS);
    assert!(reread.notes.is_empty());
    assert!(reread.captured_at.is_none());
}

#[test]
fn fetch_then_cache_round_trip_preserves_raw_text() {
    let dir = TempDir::new().unwrap();
    let cache = BalanceCache::new(dir.path().to_path_buf());

    let raw = "n1,1,s1,100,5\n";
    cache.record_snapshot(ADDRESS, raw);

    let files = cache_files(&dir, ADDRESS);
    let stored = fs::read_to_string(dir.path().join(&files[0])).unwrap();
    assert_eq!(stored, raw);

    let entry = cache.read_snapshot(ADDRESS);
    assert_eq!(entry.total_balance_nicks, 100);
    assert_eq!(entry.notes[0].source, "s1");
}
