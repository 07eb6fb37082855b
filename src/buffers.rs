//! Numbered ASCII text buffers.
//!
//! The registry is an ordinary value: callers create it, grow or shrink it,
//! and pass it by reference to whatever needs text storage.

use crate::error::{CrackError, CrackResult};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, info, warn};

pub const DEFAULT_BUFFER_SIZE: usize = 5000;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum BufferFilter {
    #[default]
    None,
    /// Letters only.
    Alpha,
    /// Letters and digits.
    Alphanum,
    /// Letters only, lowercased.
    Lalpha,
    /// Letters only, uppercased.
    Ualpha,
    /// Letters only, case swapped.
    Flipcase,
    /// Digits only.
    Num,
    /// Strip spaces and newlines.
    Esp,
    /// Strip newlines.
    Enl,
}

impl BufferFilter {
    fn map(self, byte: u8) -> Option<u8> {
        let keep = match self {
            BufferFilter::None => true,
            BufferFilter::Alpha
            | BufferFilter::Lalpha
            | BufferFilter::Ualpha
            | BufferFilter::Flipcase => byte.is_ascii_alphabetic(),
            BufferFilter::Alphanum => byte.is_ascii_alphanumeric(),
            BufferFilter::Num => byte.is_ascii_digit(),
            BufferFilter::Esp => !is_space(byte) && !is_newline(byte),
            BufferFilter::Enl => !is_newline(byte),
        };
        if !keep {
            return None;
        }

        Some(match self {
            BufferFilter::Lalpha => byte.to_ascii_lowercase(),
            BufferFilter::Ualpha => byte.to_ascii_uppercase(),
            BufferFilter::Flipcase if byte.is_ascii_uppercase() => byte.to_ascii_lowercase(),
            BufferFilter::Flipcase => byte.to_ascii_uppercase(),
            _ => byte,
        })
    }

    /// What the buffer is guaranteed to contain after filtering.
    fn resulting_class(self) -> Self {
        match self {
            BufferFilter::Lalpha | BufferFilter::Ualpha | BufferFilter::Flipcase => {
                BufferFilter::Alpha
            }
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum WriteMode {
    /// Fail if the file already exists.
    Create,
    Overwrite,
    Append,
}

#[derive(Debug, Clone)]
pub struct Buffer {
    data: Vec<u8>,
    capacity: usize,
    filter: BufferFilter,
}

impl Buffer {
    fn with_capacity(capacity: usize) -> CrackResult<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)?;
        Ok(Self {
            data,
            capacity,
            filter: BufferFilter::None,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn filter(&self) -> BufferFilter {
        self.filter
    }
}

#[derive(Debug, Default)]
pub struct BufferRegistry {
    buffers: Vec<Buffer>,
}

impl BufferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `count` empty buffers of the default size.
    pub fn with_buffers(count: usize) -> CrackResult<Self> {
        let mut registry = Self::new();
        registry.create(count)?;
        Ok(registry)
    }

    pub fn count(&self) -> usize {
        self.buffers.len()
    }

    /// Grows or shrinks the registry to exactly `count` buffers.
    ///
    /// New buffers start empty at the default size; shrinking discards the
    /// highest-numbered buffers.
    pub fn create(&mut self, count: usize) -> CrackResult<()> {
        let current = self.buffers.len();
        if count < current {
            info!("Buffers {} to {} will be discarded", count, current - 1);
            self.buffers.truncate(count);
        } else if count > current {
            debug!(
                "Creating {} buffers with {} default length",
                count - current,
                DEFAULT_BUFFER_SIZE
            );
            self.buffers.try_reserve_exact(count - current)?;
            for _ in current..count {
                self.buffers.push(Buffer::with_capacity(DEFAULT_BUFFER_SIZE)?);
            }
        }
        Ok(())
    }

    pub fn get(&self, id: usize) -> CrackResult<&Buffer> {
        self.buffers.get(id).ok_or_else(|| unknown(id, self.count()))
    }

    fn get_mut(&mut self, id: usize) -> CrackResult<&mut Buffer> {
        let count = self.count();
        self.buffers.get_mut(id).ok_or_else(|| unknown(id, count))
    }

    /// Reallocates a buffer to `capacity` bytes. Contents are cleared.
    pub fn resize(&mut self, id: usize, capacity: usize) -> CrackResult<()> {
        let buffer = self.get_mut(id)?;
        *buffer = Buffer::with_capacity(capacity)?;
        Ok(())
    }

    pub fn clear(&mut self, id: usize) -> CrackResult<()> {
        let buffer = self.get_mut(id)?;
        buffer.data.clear();
        buffer.filter = BufferFilter::None;
        Ok(())
    }

    /// Replaces a buffer's contents, growing it when needed.
    pub fn set(&mut self, id: usize, text: &[u8]) -> CrackResult<()> {
        if text.len() > self.get(id)?.capacity {
            self.resize(id, text.len())?;
        }
        let buffer = self.get_mut(id)?;
        buffer.data.clear();
        buffer.data.extend_from_slice(text);
        buffer.filter = BufferFilter::None;
        Ok(())
    }

    /// Loads a regular ASCII file into a buffer, read under a shared lock.
    ///
    /// On a non-ASCII byte the buffer is left empty at its original size.
    pub fn load_file<P: AsRef<Path>>(&mut self, id: usize, path: P) -> CrackResult<usize> {
        let path = path.as_ref();
        self.clear(id)?;

        let meta = fs::metadata(path)?;
        if !meta.is_file() {
            return Err(CrackError::Buffer(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        let mut file = File::open(path)?;
        file.lock_shared()?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        file.unlock()?;
        if let Some(pos) = content
            .iter()
            .position(|&b| !(b.is_ascii_graphic() || b == b' ' || is_newline(b) || b == b'\t'))
        {
            warn!(
                "{} is not ASCII: unknown character {:#04x} at byte {}",
                path.display(),
                content[pos],
                pos
            );
            return Err(CrackError::Buffer(format!(
                "{} contains non-ASCII byte {:#04x} at offset {}",
                path.display(),
                content[pos],
                pos
            )));
        }

        self.set(id, &content)?;
        info!("Loaded {} bytes into buffer {}", content.len(), id);
        Ok(content.len())
    }

    /// Writes a buffer to disk under an exclusive lock.
    ///
    /// `Overwrite` truncates only once the lock is held.
    pub fn save_file<P: AsRef<Path>>(&self, id: usize, path: P, mode: WriteMode) -> CrackResult<()> {
        let buffer = self.get(id)?;
        let mut options = OpenOptions::new();
        match mode {
            WriteMode::Create => options.write(true).create_new(true),
            WriteMode::Overwrite => options.write(true).create(true).truncate(false),
            WriteMode::Append => options.append(true).create(true),
        };

        let mut file = options.open(path.as_ref())?;
        file.lock()?;
        if mode == WriteMode::Overwrite {
            file.set_len(0)?;
        }
        file.write_all(&buffer.data)?;
        file.flush()?;
        file.unlock()?;
        info!(
            "Wrote {} bytes from buffer {} to {}",
            buffer.len(),
            id,
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn copy(&mut self, from: usize, to: usize) -> CrackResult<()> {
        if from == to {
            return Ok(());
        }
        let text = self.get(from)?.data.clone();
        self.set(to, &text)
    }

    pub fn filter(&mut self, id: usize, filter: BufferFilter) -> CrackResult<()> {
        debug!("Applying filter {} to buffer {}", filter, id);
        let buffer = self.get_mut(id)?;
        let filtered: Vec<u8> = buffer.data.iter().filter_map(|&b| filter.map(b)).collect();
        buffer.data = filtered;
        buffer.filter = filter.resulting_class();
        Ok(())
    }

    /// Borrows one buffer's text and another buffer's storage at once.
    ///
    /// The output is grown to hold at least the input's length. Using the
    /// same buffer for both is rejected.
    pub fn pair_mut(&mut self, input: usize, output: usize) -> CrackResult<(&[u8], &mut Vec<u8>)> {
        if input == output {
            return Err(CrackError::Buffer(format!(
                "input and output must be different buffers (both are {})",
                input
            )));
        }
        let count = self.count();
        if input >= count {
            return Err(unknown(input, count));
        }
        if output >= count {
            return Err(unknown(output, count));
        }

        let needed = self.buffers[input].len();
        if self.buffers[output].capacity < needed {
            self.resize(output, needed)?;
        }

        let (in_buf, out_buf) = if input < output {
            let (head, tail) = self.buffers.split_at_mut(output);
            (&head[input], &mut tail[0])
        } else {
            let (head, tail) = self.buffers.split_at_mut(input);
            (&tail[0], &mut head[output])
        };

        out_buf.data.clear();
        out_buf.data.resize(needed, 0);
        out_buf.filter = BufferFilter::None;
        Ok((&in_buf.data, &mut out_buf.data))
    }
}

fn unknown(id: usize, count: usize) -> CrackError {
    CrackError::Buffer(format!("buffer {} does not exist ({} allocated)", id, count))
}

fn is_space(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

fn is_newline(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}
