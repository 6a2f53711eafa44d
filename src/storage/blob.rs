//! Off-row storage for chars and vectors that are too large to keep inline.
//!
//! Every table has one append-only blob file shared by both kinds of
//! content. A row refers to its payload through a descriptor holding the
//! byte offset into that file and the payload length. Payloads are only ever
//! appended; nothing is overwritten or compacted.
//!
//! The functions here open the file for the duration of one call and take no
//! locks. Two concurrent appends to the same file would race on the
//! end-of-file offset, so callers must serialize them (see
//! [`Relation::store`](crate::Relation::store)).

use std::{
    fs::{File, OpenOptions},
    io::{ErrorKind, Read, Seek, SeekFrom, Write},
    path::Path,
};

use crate::{
    common::error::{Result, ValueError},
    core::value::{decode_floats, encode_floats},
    db::table::Table,
};

/// Descriptor of a chars payload in a blob file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextData {
    /// Byte offset of the payload in the blob file.
    pub offset: u64,

    /// Payload length in bytes.
    pub len: usize,

    /// The payload, once loaded or before being dumped.
    pub text: Option<Vec<u8>>,
}

impl TextData {
    /// A descriptor for content that has not been written yet.
    pub fn new(text: impl Into<Vec<u8>>) -> Self {
        let text = text.into();
        Self {
            offset: 0,
            len: text.len(),
            text: Some(text),
        }
    }

    /// A descriptor for content already stored at `offset`.
    pub fn at(offset: u64, len: usize) -> Self {
        Self {
            offset,
            len,
            text: None,
        }
    }

    /// Hands the loaded payload to the caller.
    pub fn take_text(&mut self) -> Option<Vec<u8>> {
        self.text.take()
    }
}

/// Descriptor of a vector payload in a blob file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorData {
    /// Byte offset of the payload in the blob file.
    pub offset: u64,

    /// Number of components; the payload is `dim * 4` bytes.
    pub dim: usize,

    /// The payload, once loaded or before being dumped.
    pub vector: Option<Vec<f32>>,
}

impl VectorData {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            offset: 0,
            dim: vector.len(),
            vector: Some(vector),
        }
    }

    pub fn at(offset: u64, dim: usize) -> Self {
        Self {
            offset,
            dim,
            vector: None,
        }
    }

    pub fn take_vector(&mut self) -> Option<Vec<f32>> {
        self.vector.take()
    }

    fn byte_len(&self) -> Result<usize> {
        self.dim.checked_mul(size_of::<f32>()).ok_or_else(|| {
            ValueError::invalid(format!("vector dimension {} is too large", self.dim))
        })
    }
}

/// Loads and appends chars payloads.
pub struct TextUtils;

impl TextUtils {
    /// Reads `data.len` bytes at `data.offset` from the table's blob file into
    /// `data.text`.
    pub fn load_text<T: Table + ?Sized>(table: &T, data: &mut TextData) -> Result<()> {
        let path = table.text_vector_data_file();
        let mut file = open_for_read(&path)?;
        let text = read_at(&mut file, &path, data.offset, data.len)?;

        tracing::debug!(path = %path.display(), offset = data.offset, len = data.len, "loaded text");
        data.text = Some(text);
        Ok(())
    }

    /// Appends `data.text` to the table's blob file and records where it
    /// landed in `data.offset`.
    pub fn dump_text<T: Table + ?Sized>(table: &T, data: &mut TextData) -> Result<()> {
        let path = table.text_vector_data_file();
        let text = data
            .text
            .as_deref()
            .ok_or_else(|| ValueError::invalid("text descriptor has no content to dump"))?;
        let payload = text.get(..data.len).ok_or_else(|| {
            ValueError::invalid(format!(
                "text descriptor length {} exceeds content length {}",
                data.len,
                text.len()
            ))
        })?;

        let mut file = open_for_append(&path)?;
        let offset = append(&mut file, &path, payload)?;

        tracing::debug!(path = %path.display(), offset, len = data.len, "dumped text");
        data.offset = offset;
        Ok(())
    }
}

/// Loads and appends vector payloads as little-endian `f32`s.
pub struct VectorUtils;

impl VectorUtils {
    /// Reads `data.dim` components at `data.offset` into `data.vector`.
    pub fn load_vector<T: Table + ?Sized>(table: &T, data: &mut VectorData) -> Result<()> {
        let path = table.text_vector_data_file();
        let mut file = open_for_read(&path)?;
        let bytes = read_at(&mut file, &path, data.offset, data.byte_len()?)?;

        tracing::debug!(path = %path.display(), offset = data.offset, dim = data.dim, "loaded vector");
        data.vector = Some(decode_floats(&bytes));
        Ok(())
    }

    /// Appends `data.vector` to the table's blob file and records where it
    /// landed in `data.offset`.
    pub fn dump_vector<T: Table + ?Sized>(table: &T, data: &mut VectorData) -> Result<()> {
        let path = table.text_vector_data_file();
        let vector = data
            .vector
            .as_deref()
            .ok_or_else(|| ValueError::invalid("vector descriptor has no content to dump"))?;
        let components = vector.get(..data.dim).ok_or_else(|| {
            ValueError::invalid(format!(
                "vector descriptor dimension {} exceeds content dimension {}",
                data.dim,
                vector.len()
            ))
        })?;

        let mut file = open_for_append(&path)?;
        let offset = append(&mut file, &path, &encode_floats(components))?;

        tracing::debug!(path = %path.display(), offset, dim = data.dim, "dumped vector");
        data.offset = offset;
        Ok(())
    }
}

fn open_for_read(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| {
        tracing::warn!(path = %path.display(), error = %source, "failed to open blob file");
        ValueError::IoOpen {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Opens an existing blob file for writing. The file is never created here;
/// creating it is part of creating the table.
fn open_for_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| {
            tracing::warn!(path = %path.display(), error = %source, "failed to open blob file");
            ValueError::IoOpen {
                path: path.to_path_buf(),
                source,
            }
        })
}

fn read_error(path: &Path, source: std::io::Error) -> ValueError {
    tracing::warn!(path = %path.display(), error = %source, "failed to read blob data");
    ValueError::IoRead {
        path: path.to_path_buf(),
        source,
    }
}

fn write_error(path: &Path, source: std::io::Error) -> ValueError {
    tracing::warn!(path = %path.display(), error = %source, "failed to write blob data");
    ValueError::IoWrite {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads exactly `len` bytes starting at `offset`.
///
/// A range reaching past the end of the file is a read error, checked before
/// any buffer is allocated. Short reads are accumulated. A read of zero bytes
/// before `len` is reached means the file shrank underneath us and is also a
/// read error, as is any error other than `Interrupted`.
pub(crate) fn read_at<R: Read + Seek>(
    reader: &mut R,
    path: &Path,
    offset: u64,
    len: usize,
) -> Result<Vec<u8>> {
    let file_len = reader
        .seek(SeekFrom::End(0))
        .map_err(|e| read_error(path, e))?;
    let in_bounds = u64::try_from(len)
        .ok()
        .and_then(|len| offset.checked_add(len))
        .is_some_and(|end| end <= file_len);
    if !in_bounds {
        return Err(read_error(
            path,
            std::io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("{len} bytes at offset {offset} lie past the end of a {file_len} byte blob"),
            ),
        ));
    }

    reader
        .seek(SeekFrom::Start(offset))
        .map_err(|e| read_error(path, e))?;

    let mut buffer = vec![0u8; len];
    let mut filled = 0;
    while filled < len {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => {
                return Err(read_error(
                    path,
                    std::io::Error::new(
                        ErrorKind::UnexpectedEof,
                        format!("blob ends after {filled} of {len} bytes at offset {offset}"),
                    ),
                ));
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(read_error(path, e)),
        }
    }
    Ok(buffer)
}

/// Appends `bytes` at the end of the file and returns the offset they start
/// at. Short writes are accumulated; a zero-byte write is an error.
pub(crate) fn append<W: Write + Seek>(writer: &mut W, path: &Path, bytes: &[u8]) -> Result<u64> {
    let end = writer
        .seek(SeekFrom::End(0))
        .map_err(|e| write_error(path, e))?;

    let mut written = 0;
    while written < bytes.len() {
        match writer.write(&bytes[written..]) {
            Ok(0) => {
                return Err(write_error(
                    path,
                    std::io::Error::new(
                        ErrorKind::WriteZero,
                        format!("wrote {written} of {} bytes", bytes.len()),
                    ),
                ));
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(write_error(path, e)),
        }
    }
    writer.flush().map_err(|e| write_error(path, e))?;
    Ok(end)
}
