//! Disk hash table properties from the specification's testable-properties
//! list: append-then-search, update-then-search, and a large insertion set
//! with no collisions lost across buckets.

use dreid_engine::dht::DiskHashTable;
use tempfile::tempdir;

#[test]
fn append_then_search_returns_stored_value() {
    let dir = tempdir().unwrap();
    let dht = DiskHashTable::open(dir.path(), 16, "edges", 32, 8).unwrap();

    let key = [7u8; 32];
    let val = 123456789u64.to_le_bytes();
    dht.append(&key, &val).unwrap();

    let mut out = [0u8; 8];
    assert!(dht.search(&key, &mut out).unwrap());
    assert_eq!(out, val);
}

#[test]
fn update_after_insert_changes_search_result() {
    let dir = tempdir().unwrap();
    let dht = DiskHashTable::open(dir.path(), 16, "edges", 32, 8).unwrap();

    let mut key = [0u8; 32];
    key[0] = 9;
    dht.insert(&key, &1u64.to_le_bytes()).unwrap();
    assert!(dht.update(&key, &2u64.to_le_bytes()).unwrap());

    let mut out = [0u8; 8];
    dht.search(&key, &mut out).unwrap();
    assert_eq!(u64::from_le_bytes(out), 2);
}

#[test]
fn one_hundred_thousand_insertions_all_found() {
    let dir = tempdir().unwrap();
    let dht = DiskHashTable::open(dir.path(), 16, "stress", 32, 8).unwrap();

    let n = 100_000u64;
    for i in 0..n {
        let mut key = [0u8; 32];
        key[0..8].copy_from_slice(&i.to_le_bytes());
        dht.insert(&key, &(i.wrapping_mul(31)).to_le_bytes()).unwrap();
    }
    for i in 0..n {
        let mut key = [0u8; 32];
        key[0..8].copy_from_slice(&i.to_le_bytes());
        let mut out = [0u8; 8];
        assert!(dht.search(&key, &mut out).unwrap(), "key {} missing", i);
        assert_eq!(u64::from_le_bytes(out), i.wrapping_mul(31));
    }
}
