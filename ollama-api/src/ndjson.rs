//! Newline-delimited JSON stream decoding.
//!
//! Ollama streams long-running operations as one JSON object per line. Chunk
//! boundaries on the wire are arbitrary, so lines are reassembled from raw
//! bytes before parsing; a line may span several chunks and a chunk may carry
//! several lines.

use async_stream::try_stream;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// A value decoded from one line of a streamed response.
pub trait StreamItem: DeserializeOwned {
    /// Whether this item is the last one the server will send.
    ///
    /// The decoder stops reading as soon as it yields a final item.
    fn is_final(&self) -> bool {
        false
    }
}

/// Reassembles lines from byte chunks.
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    buf: Vec<u8>,
    // bytes of `buf` already known to hold no newline
    searched: usize,
}

impl LineBuffer {
    pub(crate) fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Take the next complete line, without its terminator.
    pub(crate) fn next_line(&mut self) -> Option<Vec<u8>> {
        let Some(offset) = self.buf[self.searched..].iter().position(|&b| b == b'\n') else {
            self.searched = self.buf.len();
            return None;
        };

        let mut line: Vec<u8> = self.buf.drain(..=self.searched + offset).collect();
        self.searched = 0;
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(line)
    }

    /// Take whatever is left once the source is exhausted.
    pub(crate) fn finish(&mut self) -> Option<Vec<u8>> {
        self.searched = 0;
        if self.buf.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.buf))
    }
}

fn parse_line<T: DeserializeOwned>(line: &[u8]) -> Result<Option<T>> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return Ok(None);
    }

    tracing::trace!("Received NDJSON line: {}", String::from_utf8_lossy(line));

    serde_json::from_slice(line)
        .map(Some)
        .map_err(|source| Error::Decode {
            line: String::from_utf8_lossy(line).into_owned(),
            source,
        })
}

/// Decode a byte stream of newline-delimited JSON into typed items.
///
/// The source is only polled when the returned stream is polled, and dropping
/// the returned stream drops the source. The first transport or decode error
/// is yielded as the last item.
pub fn decode<T, S, E>(bytes: S) -> impl Stream<Item = Result<T>>
where
    T: StreamItem,
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: Into<Error>,
{
    try_stream! {
        let mut bytes = std::pin::pin!(bytes);
        let mut lines = LineBuffer::default();
        let mut finished = false;

        'read: while let Some(chunk) = bytes.next().await {
            let chunk = chunk.map_err(Into::<Error>::into)?;
            lines.push(&chunk);

            while let Some(line) = lines.next_line() {
                if let Some(item) = parse_line::<T>(&line)? {
                    finished = item.is_final();
                    yield item;
                    if finished {
                        break 'read;
                    }
                }
            }
        }

        // The last object need not be newline-terminated.
        if !finished {
            if let Some(line) = lines.finish() {
                if let Some(item) = parse_line::<T>(&line)? {
                    yield item;
                }
            }
        }
    }
}
