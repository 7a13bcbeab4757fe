//! Incremental decoder for chat-completion event streams.
//!
//! Bytes arrive in arbitrary pieces: a line, or a UTF-8 sequence, may be split
//! across two chunks. The decoder buffers raw bytes and only interprets
//! complete lines. Malformed `data:` payloads are skipped, not fatal.

use tracing::debug;

use crate::gateway::types::ChatChunk;

pub const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// `choices[0].delta.content` of one chunk.
    Delta(String),
    /// The literal `data: [DONE]` terminator.
    Done,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
    done: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the terminal marker has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feeds one chunk of bytes and returns the events completed by it.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.pending.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            if let Some(event) = self.decode_line(&line[..line.len() - 1]) {
                events.push(event);
            }
        }
        events
    }

    /// Flushes a trailing line that had no newline.
    pub fn finish(&mut self) -> Vec<SseEvent> {
        let rest = std::mem::take(&mut self.pending);
        self.decode_line(&rest).into_iter().collect()
    }

    fn decode_line(&mut self, raw: &[u8]) -> Option<SseEvent> {
        let line = String::from_utf8_lossy(raw);
        let line = line.trim_end_matches('\r');
        let data = line.strip_prefix("data:")?.trim();

        if data == DONE_MARKER {
            self.done = true;
            return Some(SseEvent::Done);
        }

        match serde_json::from_str::<ChatChunk>(data) {
            Ok(chunk) => chunk.into_content().filter(|c| !c.is_empty()).map(SseEvent::Delta),
            Err(e) => {
                debug!("skipping malformed stream chunk: {e}");
                None
            }
        }
    }
}

/// Concatenates every content fragment in a complete stream body.
#[cfg(test)]
pub fn collect_content(body: &[u8]) -> (String, bool) {
    let mut decoder = SseDecoder::new();
    let mut events = decoder.push(body);
    events.extend(decoder.finish());

    let text = events
        .into_iter()
        .filter_map(|e| match e {
            SseEvent::Delta(text) => Some(text),
            SseEvent::Done => None,
        })
        .collect();
    (text, decoder.is_done())
}
