// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Append-Only Operation Log Writer
//!
//! This is the CANONICAL durability layer.
//! - Every write is fsync'd before the operation becomes visible
//! - No rewriting; the only truncation is dropping a torn final frame on open
//! - Bincode serialization for determinism
//!
//! # File Format
//! ```text
//! [Header: 16 bytes][Frame][Frame][Frame]...
//! ```
//!
//! Header:
//! - version: u32 (1)
//! - protocol: u32
//! - reserved: u64 (0)
//!
//! Frame:
//! - len: u32
//! - crc32: u32 (of the payload)
//! - payload: bincode(Operation)

use spynet_kernel::event::Operation;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const LOG_VERSION: u32 = 1;
pub const PROTOCOL_VERSION: u32 = 1;
pub const HEADER_LEN: usize = 16;
const FRAME_HEADER_LEN: usize = 8;

#[derive(Error, Debug)]
pub enum EventLogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid header")]
    InvalidHeader,

    #[error("Operation log corrupted at offset {offset}")]
    Corrupted { offset: usize },
}

pub type Result<T> = std::result::Result<T, EventLogError>;

/// Operation Log File Header (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventLogHeader {
    pub version: u32,
    pub protocol: u32,
    pub reserved: u64,
}

impl EventLogHeader {
    pub fn new() -> Self {
        Self {
            version: LOG_VERSION,
            protocol: PROTOCOL_VERSION,
            reserved: 0,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.protocol.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.reserved.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(EventLogError::InvalidHeader);
        }
        Ok(Self {
            version: read_u32(&bytes[0..4]),
            protocol: read_u32(&bytes[4..8]),
            reserved: u64::from_le_bytes([
                bytes[8], bytes[9], bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15],
            ]),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != LOG_VERSION || self.protocol != PROTOCOL_VERSION {
            return Err(EventLogError::InvalidHeader);
        }
        Ok(())
    }
}

impl Default for EventLogHeader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Encodes one operation as a length- and CRC-prefixed frame.
pub fn encode_frame(op: &Operation) -> Result<Vec<u8>> {
    let payload = op
        .encode()
        .map_err(|e| EventLogError::Serialization(e.to_string()))?;

    let mut frame = Vec::with_capacity(FRAME_HEADER_LEN + payload.len());
    frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frame.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Frames decoded from a log body.
#[derive(Debug, Clone)]
pub struct FrameScan {
    pub operations: Vec<Operation>,
    /// Bytes of the body covered by complete frames.
    pub valid_len: usize,
    /// The body ended in an incomplete or unchecksummed frame.
    pub torn_tail: bool,
}

/// Decodes every frame of a log body (the bytes after the header).
///
/// A damaged final frame is a torn write and is reported, not fatal.
/// Damage anywhere else fails closed.
pub fn scan_frames(body: &[u8]) -> Result<FrameScan> {
    let mut operations = Vec::new();
    let mut offset = 0;
    let mut torn_tail = false;

    while offset < body.len() {
        let remaining = body.len() - offset;
        if remaining < FRAME_HEADER_LEN {
            torn_tail = true;
            break;
        }

        let len = read_u32(&body[offset..offset + 4]) as usize;
        let crc = read_u32(&body[offset + 4..offset + 8]);
        if remaining - FRAME_HEADER_LEN < len {
            torn_tail = true;
            break;
        }

        let start = offset + FRAME_HEADER_LEN;
        let end = start + len;
        let payload = &body[start..end];
        if crc32fast::hash(payload) != crc {
            if end == body.len() {
                torn_tail = true;
                break;
            }
            return Err(EventLogError::Corrupted { offset });
        }

        match Operation::decode(payload) {
            Ok((op, read)) if read == len => operations.push(op),
            _ => return Err(EventLogError::Corrupted { offset }),
        }
        offset = end;
    }

    Ok(FrameScan { operations, valid_len: offset, torn_tail })
}

/// Append-Only Operation Log Writer
///
/// # Safety Guarantees
/// - Write + fsync before returning
/// - No buffering without explicit flush
pub struct EventLogWriter {
    path: PathBuf,
    file: BufWriter<File>,
    event_count: u64,
}

impl EventLogWriter {
    /// Open or create an operation log file
    ///
    /// An existing file has its header validated and its frames counted; a torn
    /// final frame is cut off so new frames never follow garbage.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&path)?;

        let mut event_count = 0;

        if file.metadata()?.len() == 0 {
            file.write_all(&EventLogHeader::new().to_bytes())?;
            file.sync_all()?; // fsync header
        } else {
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;

            EventLogHeader::from_bytes(&bytes)?.validate()?;

            let scan = scan_frames(&bytes[HEADER_LEN..])?;
            if scan.torn_tail {
                tracing::warn!(
                    "Dropping torn frame at end of {:?} (offset {})",
                    path,
                    HEADER_LEN + scan.valid_len
                );
                file.set_len((HEADER_LEN + scan.valid_len) as u64)?;
                file.sync_all()?;
            }
            event_count = scan.operations.len() as u64;
        }
        file.seek(SeekFrom::End(0))?;

        Ok(Self {
            path,
            file: BufWriter::new(file),
            event_count,
        })
    }

    /// Append an operation to the log
    ///
    /// Only returns Ok() after a durable write
    pub fn append(&mut self, op: &Operation) -> Result<()> {
        let frame = encode_frame(op)?;

        self.file.write_all(&frame)?;
        self.file.flush()?;
        // Force fsync (critical for crash safety)
        self.file.get_ref().sync_all()?;

        self.event_count += 1;
        Ok(())
    }

    /// Number of operations in the log
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
