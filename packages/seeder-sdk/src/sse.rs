//! Incremental `text/event-stream` decoding for the unread-count feed.

use crate::error::SdkError;
use crate::SdkResult;
use seeder_core::CountEvent;

const COUNT_EVENT: &str = "message";

#[derive(Debug, Default)]
pub(crate) struct EventDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl EventDecoder {
    /// Feeds raw bytes and returns every event they complete.
    pub(crate) fn feed(&mut self, chunk: &[u8]) -> Vec<SdkResult<CountEvent>> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(end) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=end).collect();
            let line = String::from_utf8_lossy(&raw);
            if let Some(event) = self.line(line.trim_end_matches(&['\n', '\r'][..])) {
                events.push(event);
            }
        }
        events
    }

    fn line(&mut self, line: &str) -> Option<SdkResult<CountEvent>> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SdkResult<CountEvent>> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.data).join("\n");

        if event.as_deref().is_some_and(|name| name != COUNT_EVENT) {
            return None;
        }
        Some(serde_json::from_str(&data).map_err(SdkError::from))
    }
}
