//! Append-only write-ahead log file
//!
//! ## Recovery
//!
//! [`Wal::open`] reads the whole file, decodes frames front to back and stops
//! at the first frame that is incomplete or fails its checksum. Everything
//! from that offset on is truncated, so after recovery the log is always a
//! prefix of the appended history. No partially written entry is ever replayed.

use crate::encoding::{decode_entry, encode_entry};
use crate::entry::WalEntry;
use crate::error::WalError;
use crate::mode::DurabilityMode;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Default WAL file name inside a data directory
pub const WAL_FILE_NAME: &str = "quiver.wal";

/// Outcome of reading an existing log on open
#[derive(Debug, Default)]
pub struct WalReplay {
    /// Entries in append order
    pub entries: Vec<WalEntry>,
    /// Length of the valid prefix in bytes
    pub valid_len: u64,
    /// Bytes dropped from the tail (torn or corrupt frames)
    pub truncated_bytes: u64,
}

/// File operations the writer needs beyond `Write`
trait LogFile: Write + Send {
    fn sync_data(&mut self) -> std::io::Result<()>;

    /// Cut the file to `len` bytes and position the cursor there
    fn truncate_to(&mut self, len: u64) -> std::io::Result<()>;
}

impl LogFile for File {
    fn sync_data(&mut self) -> std::io::Result<()> {
        File::sync_data(self)
    }

    fn truncate_to(&mut self, len: u64) -> std::io::Result<()> {
        self.set_len(len)?;
        self.seek(SeekFrom::Start(len))?;
        Ok(())
    }
}

struct WalWriter {
    file: Box<dyn LogFile>,
    len: u64,
    unsynced: usize,
    last_sync: Instant,
    /// Set when a failed append could not be rolled back
    wedged: bool,
}

impl WalWriter {
    fn sync(&mut self) -> std::io::Result<()> {
        self.file.sync_data()?;
        self.unsynced = 0;
        self.last_sync = Instant::now();
        Ok(())
    }

    /// Drop whatever a failed append left past `self.len`
    fn roll_back(&mut self) {
        if let Err(e) = self.file.truncate_to(self.len) {
            error!(len = self.len, error = %e, "WAL rollback failed, refusing further appends");
            self.wedged = true;
        }
    }
}

/// Write-ahead log
///
/// Appends are serialized by an internal mutex. Callers that need log order
/// to match apply order must hold their own lock across `append` and apply.
pub struct Wal {
    path: PathBuf,
    mode: DurabilityMode,
    writer: Mutex<WalWriter>,
}

impl Wal {
    /// Open (or create) the log at `path` and recover its contents.
    pub fn open(path: impl AsRef<Path>, mode: DurabilityMode) -> Result<(Self, WalReplay), WalError> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;

        let replay = read_entries(&buf);
        if replay.truncated_bytes > 0 {
            warn!(
                path = %path.display(),
                valid_len = replay.valid_len,
                truncated_bytes = replay.truncated_bytes,
                "Truncating damaged WAL tail"
            );
            file.set_len(replay.valid_len)?;
            file.sync_all()?;
        }
        file.seek(SeekFrom::Start(replay.valid_len))?;

        info!(
            path = %path.display(),
            entries = replay.entries.len(),
            mode = mode.description(),
            "Opened WAL"
        );

        let wal = Wal::with_file(path, mode, Box::new(file), replay.valid_len);
        Ok((wal, replay))
    }

    fn with_file(path: PathBuf, mode: DurabilityMode, file: Box<dyn LogFile>, len: u64) -> Self {
        Wal {
            path,
            mode,
            writer: Mutex::new(WalWriter {
                file,
                len,
                unsynced: 0,
                last_sync: Instant::now(),
                wedged: false,
            }),
        }
    }

    /// Append one entry, fsyncing according to the durability mode.
    ///
    /// On error the file is cut back to its length before the call, so a
    /// failed append never leaves bytes that replay would see.
    pub fn append(&self, entry: &WalEntry) -> Result<(), WalError> {
        let frame = encode_entry(entry)?;
        let mut writer = self.writer.lock();
        if writer.wedged {
            return Err(WalError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "log holds bytes from a failed append",
            )));
        }

        if let Err(e) = writer.file.write_all(&frame) {
            writer.roll_back();
            return Err(e.into());
        }

        let pending = writer.unsynced + 1;
        let sync_now = match self.mode {
            DurabilityMode::None => false,
            DurabilityMode::Strict => true,
            DurabilityMode::Batched {
                interval_ms,
                batch_size,
            } => {
                pending >= batch_size
                    || writer.last_sync.elapsed() >= Duration::from_millis(interval_ms)
            }
        };

        if sync_now {
            if let Err(e) = writer.sync() {
                writer.roll_back();
                return Err(e.into());
            }
        } else {
            writer.unsynced = pending;
        }
        writer.len += frame.len() as u64;

        debug!(kind = entry.kind(), collection = entry.collection(), "WAL append");
        Ok(())
    }

    /// Force an fsync of everything appended so far.
    pub fn sync(&self) -> Result<(), WalError> {
        let mut writer = self.writer.lock();
        if writer.unsynced > 0 {
            writer.sync()?;
        }
        Ok(())
    }

    /// Fsync if appends are pending and the batching interval has passed.
    ///
    /// Appends only check the interval when they run, so an idle log needs
    /// this called periodically to honor the window. No-op outside
    /// `Batched` mode. Returns whether an fsync happened.
    pub fn sync_if_due(&self) -> Result<bool, WalError> {
        let DurabilityMode::Batched { interval_ms, .. } = self.mode else {
            return Ok(false);
        };
        let mut writer = self.writer.lock();
        if writer.unsynced == 0 || writer.last_sync.elapsed() < Duration::from_millis(interval_ms) {
            return Ok(false);
        }
        writer.sync()?;
        Ok(true)
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durability mode in effect
    pub fn mode(&self) -> DurabilityMode {
        self.mode
    }

    /// Current log length in bytes
    pub fn len(&self) -> u64 {
        self.writer.lock().len
    }

    /// Check if nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for Wal {
    fn drop(&mut self) {
        if let Err(e) = self.sync() {
            warn!(path = %self.path.display(), error = %e, "WAL sync on close failed");
        }
    }
}

/// Decode the longest valid prefix of `buf`.
pub fn read_entries(buf: &[u8]) -> WalReplay {
    let mut replay = WalReplay::default();
    let mut offset = 0usize;

    while offset < buf.len() {
        match decode_entry(&buf[offset..], offset as u64) {
            Ok((entry, used)) => {
                replay.entries.push(entry);
                offset += used;
            }
            Err(e) => {
                warn!(error = %e, "Stopping WAL replay");
                break;
            }
        }
    }

    replay.valid_len = offset as u64;
    replay.truncated_bytes = (buf.len() - offset) as u64;
    replay
}
