//! Disk queue properties from the specification's testable-properties
//! list: strict FIFO, a `pop` on an exhausted queue returning `None`, and
//! round-tripping interleaved push/pop across a block boundary.

use dreid_engine::dq::DiskQueue;
use tempfile::tempdir;

#[test]
fn fifo_and_pop_on_empty_queue() {
    let dir = tempdir().unwrap();
    let dq = DiskQueue::open(dir.path(), "q", 16, 4096).unwrap();

    for i in 0..11u64 {
        let mut rec = vec![0u8; 16];
        rec[0..8].copy_from_slice(&i.to_le_bytes());
        dq.push(&rec).unwrap();
    }
    for i in 0..11u64 {
        let rec = dq.pop().unwrap().unwrap();
        assert_eq!(u64::from_le_bytes(rec[0..8].try_into().unwrap()), i);
    }
    assert!(dq.pop().unwrap().is_none());
}

#[test]
fn interleaved_push_pop_across_block_boundary_preserves_order() {
    let dir = tempdir().unwrap();
    // rec_len = 16, block_size = 64 KiB => 4096 records per block.
    let dq = DiskQueue::open(dir.path(), "q", 16, 64 * 1024).unwrap();

    let mut next_push = 0u64;
    let mut next_pop = 0u64;
    let mut push_n = |dq: &DiskQueue, count: u64, next_push: &mut u64| {
        for _ in 0..count {
            let mut rec = vec![0u8; 16];
            rec[0..8].copy_from_slice(&next_push.to_le_bytes());
            dq.push(&rec).unwrap();
            *next_push += 1;
        }
    };
    let mut pop_n = |dq: &DiskQueue, count: u64, next_pop: &mut u64| {
        for _ in 0..count {
            let rec = dq.pop().unwrap().unwrap();
            assert_eq!(u64::from_le_bytes(rec[0..8].try_into().unwrap()), *next_pop);
            *next_pop += 1;
        }
    };

    push_n(&dq, 50_000, &mut next_push);
    pop_n(&dq, 30_000, &mut next_pop);
    assert!(dq.free_block_count() > 0);
    push_n(&dq, 50_000, &mut next_push);
    pop_n(&dq, next_push - next_pop, &mut next_pop);

    assert!(dq.pop().unwrap().is_none());

    let recs_per_block = 64 * 1024 / 16;
    let peak_live = 70_000u64; // after the second push batch, before it drains
    let max_blocks = (peak_live + recs_per_block - 1) / recs_per_block;
    assert!(dq.data_file_len().unwrap() <= max_blocks * 64 * 1024);
}
