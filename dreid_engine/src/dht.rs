//! Bucketed disk hash table: a sharded, append-mostly `(key, value)` store.
//!
//! Grounded in `original_source/gen/src/dht.cpp` and `dht.h`: the bucket
//! file's `search`/`append`/`update` sequential-scan contract, and the
//! table-level `search`/`insert`/`append`/`update` dispatch over a bucket
//! cache, are carried over structurally. Two deliberate departures from the
//! original: the default bucket-id hash is `blake3` rather than MD5 (the
//! specification explicitly excludes MD5 as *a specific choice*, not hashing
//! itself), and file access uses `std::fs`/`std::io::{Read, Write, Seek}`
//! rather than `fopen`/`fread`, matching the teacher's own preference for
//! safe, typed I/O over raw C file handles.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// 12-bit bucket address: 4,096 buckets per table, per spec.md §4.4.
pub const BUCKET_COUNT: u16 = 4096;
const BUCKET_MASK: u16 = BUCKET_COUNT - 1;

/// Scan buffer size for [`BucketFile::search`], matching the original's
/// `TABLE_BUFF_SIZE` thread-local read buffer (here just a stack-local
/// `Vec`, since Rust's ownership model makes a shared thread-local buffer
/// an unnecessary complication for a buffer that is this cheap to own).
const SCAN_BUFFER_BYTES: usize = 4 * 1024 * 1024;

/// The default bucket-id function: the top 12 bits of a `blake3` hash of
/// the key. Any hash with a uniform 12-bit prefix satisfies spec.md §4.4;
/// `blake3` is fast, allocation-free, and not the disallowed MD5.
pub fn default_bucket_id(key: &[u8]) -> u16 {
    let digest = blake3::hash(key);
    let bytes = digest.as_bytes();
    (((bytes[0] as u16) << 4) | (bytes[1] as u16 >> 4)) & BUCKET_MASK
}

/// One shard of the table: a single append-mostly file of fixed-width
/// `(key || value)` records.
pub struct BucketFile {
    path: PathBuf,
    key_len: usize,
    val_len: usize,
    rec_len: usize,
    file: Mutex<File>,
    rec_cnt: Mutex<u64>,
}

impl BucketFile {
    fn open(path: PathBuf, key_len: usize, val_len: usize) -> Result<BucketFile> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        let rec_len = key_len + val_len;
        let len = file
            .metadata()
            .map_err(|e| Error::io(path.display().to_string(), e))?
            .len();
        let rec_cnt = if rec_len > 0 { len / rec_len as u64 } else { 0 };
        Ok(BucketFile {
            path,
            key_len,
            val_len,
            rec_len,
            file: Mutex::new(file),
            rec_cnt: Mutex::new(rec_cnt),
        })
    }

    pub fn record_count(&self) -> u64 {
        *self.rec_cnt.lock().unwrap()
    }

    /// Sequentially scans the bucket file in `SCAN_BUFFER_BYTES` chunks,
    /// comparing the leading `key_len` bytes of each record. Returns the
    /// absolute file offset of the matching record, and copies its value
    /// bytes out if `val_out` is provided.
    pub fn search(&self, key: &[u8], val_out: Option<&mut [u8]>) -> Result<Option<u64>> {
        debug_assert_eq!(key.len(), self.key_len);
        let mut file = self.file.lock().unwrap();
        file.seek(SeekFrom::Start(0)).map_err(|e| self.ioerr(e))?;

        let max_recs = (SCAN_BUFFER_BYTES / self.rec_len).max(1);
        let mut buf = vec![0u8; max_recs * self.rec_len];
        let mut base_offset: u64 = 0;

        loop {
            let n = read_fill(&mut *file, &mut buf).map_err(|e| self.ioerr(e))?;
            if n == 0 {
                break;
            }
            let recs = n / self.rec_len;
            for i in 0..recs {
                let start = i * self.rec_len;
                let rec = &buf[start..start + self.rec_len];
                if &rec[..self.key_len] == key {
                    if let Some(out) = val_out {
                        out.copy_from_slice(&rec[self.key_len..self.rec_len]);
                    }
                    return Ok(Some(base_offset + start as u64));
                }
            }
            base_offset += n as u64;
            if n < buf.len() {
                break;
            }
        }
        Ok(None)
    }

    pub fn append(&self, key: &[u8], val: &[u8]) -> Result<()> {
        debug_assert_eq!(key.len(), self.key_len);
        debug_assert_eq!(val.len(), self.val_len);
        let mut file = self.file.lock().unwrap();
        file.seek(SeekFrom::End(0)).map_err(|e| self.ioerr(e))?;
        file.write_all(key).map_err(|e| self.ioerr(e))?;
        file.write_all(val).map_err(|e| self.ioerr(e))?;
        file.flush().map_err(|e| self.ioerr(e))?;
        drop(file);
        *self.rec_cnt.lock().unwrap() += 1;
        Ok(())
    }

    pub fn update(&self, key: &[u8], val: &[u8]) -> Result<bool> {
        debug_assert_eq!(val.len(), self.val_len);
        match self.search(key, None)? {
            Some(offset) => {
                let mut file = self.file.lock().unwrap();
                file.seek(SeekFrom::Start(offset + self.key_len as u64))
                    .map_err(|e| self.ioerr(e))?;
                file.write_all(val).map_err(|e| self.ioerr(e))?;
                file.flush().map_err(|e| self.ioerr(e))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn ioerr(&self, e: std::io::Error) -> Error {
        Error::io(self.path.display().to_string(), e)
    }
}

fn read_fill(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match file.read(&mut buf[total..])? {
            0 => break,
            n => total += n,
        }
    }
    Ok(total)
}

pub type BucketIdFn = fn(&[u8]) -> u16;

/// A bucketed table of fixed-width `(key, value)` records, sharded by a
/// pluggable 12-bit bucket-id function into up to 4,096 `BucketFile`s.
pub struct DiskHashTable {
    path: PathBuf,
    key_len: usize,
    val_len: usize,
    bucket_fn: BucketIdFn,
    /// Guards bucket-file open calls, capping open-file-descriptor churn
    /// the way spec.md §9 calls for (`bucket_id_mtx`), and doubles as the
    /// cache of already-open buckets.
    buckets: Mutex<HashMap<u16, Arc<BucketFile>>>,
}

impl DiskHashTable {
    /// Opens (creating if needed) the table directory
    /// `<root>/<level>/<name>/`, per spec.md §6.
    pub fn open(root: &Path, level: u8, name: &str, key_len: usize, val_len: usize) -> Result<DiskHashTable> {
        let path = root.join(level.to_string()).join(name);
        std::fs::create_dir_all(&path).map_err(|e| Error::io(path.display().to_string(), e))?;
        Ok(DiskHashTable {
            path,
            key_len,
            val_len,
            bucket_fn: default_bucket_id,
            buckets: Mutex::new(HashMap::new()),
        })
    }

    /// Opens the table with a caller-supplied bucket-id function, for tests
    /// or for research runs wanting a different hash.
    pub fn open_with_bucket_fn(
        root: &Path,
        level: u8,
        name: &str,
        key_len: usize,
        val_len: usize,
        bucket_fn: BucketIdFn,
    ) -> Result<DiskHashTable> {
        let mut dht = DiskHashTable::open(root, level, name, key_len, val_len)?;
        dht.bucket_fn = bucket_fn;
        Ok(dht)
    }

    fn bucket(&self, key: &[u8]) -> Result<Arc<BucketFile>> {
        let id = (self.bucket_fn)(key) & BUCKET_MASK;
        let mut buckets = self.buckets.lock().unwrap();
        if let Some(bf) = buckets.get(&id) {
            return Ok(Arc::clone(bf));
        }
        let fspec = self.path.join(format!("{}_{:03x}", self.path.file_name().unwrap().to_string_lossy(), id));
        let bf = Arc::new(BucketFile::open(fspec, self.key_len, self.val_len)?);
        buckets.insert(id, Arc::clone(&bf));
        Ok(bf)
    }

    pub fn search(&self, key: &[u8], val_out: &mut [u8]) -> Result<bool> {
        Ok(self.bucket(key)?.search(key, Some(val_out))?.is_some())
    }

    /// Inserts `(key, val)` only if `key` is not already present.
    pub fn insert(&self, key: &[u8], val: &[u8]) -> Result<bool> {
        let bucket = self.bucket(key)?;
        if bucket.search(key, None)?.is_some() {
            return Ok(false);
        }
        bucket.append(key, val)?;
        Ok(true)
    }

    /// Always appends, for callers (like the traversal engine) that have
    /// already proven the key is unique.
    pub fn append(&self, key: &[u8], val: &[u8]) -> Result<()> {
        self.bucket(key)?.append(key, val)
    }

    pub fn update(&self, key: &[u8], val: &[u8]) -> Result<bool> {
        self.bucket(key)?.update(key, val)
    }
}
