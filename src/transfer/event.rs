//! Trace events emitted by the transfer layer.

use std::fmt;
use std::io;

/// One protocol-level event observed while a transfer runs.
///
/// Events are delivered in the order they happen on the connection. Header
/// events carry the header text exactly as formatted for the wire; data events
/// carry the payload bytes of one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent<'a> {
    /// Informational text produced by the transfer layer (newline terminated).
    Text(&'a str),
    /// The request head sent to the server, as one block.
    HeaderOut(&'a [u8]),
    /// One response header line (status line, header, or the terminating blank line).
    HeaderIn(&'a [u8]),
    /// A chunk of request body sent to the server.
    DataOut(&'a [u8]),
    /// A chunk of response body received from the server.
    DataIn(&'a [u8]),
}

/// Direction of a header or data event relative to the local side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Local side to server
    Out,
    /// Server to local side
    In,
}

/// Whether an event carries protocol headers or payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Protocol headers
    Header,
    /// Payload bytes
    Data,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Out => "OUT",
            Direction::In => "IN",
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Header => "HEADER",
            Category::Data => "DATA",
        })
    }
}

impl<'a> TraceEvent<'a> {
    /// Raw bytes carried by the event.
    pub fn bytes(&self) -> &'a [u8] {
        match *self {
            TraceEvent::Text(text) => text.as_bytes(),
            TraceEvent::HeaderOut(bytes)
            | TraceEvent::HeaderIn(bytes)
            | TraceEvent::DataOut(bytes)
            | TraceEvent::DataIn(bytes) => bytes,
        }
    }

    /// Direction and category of a packet-like event; `None` for text events.
    pub fn flow(&self) -> Option<(Direction, Category)> {
        match self {
            TraceEvent::Text(_) => None,
            TraceEvent::HeaderOut(_) => Some((Direction::Out, Category::Header)),
            TraceEvent::HeaderIn(_) => Some((Direction::In, Category::Header)),
            TraceEvent::DataOut(_) => Some((Direction::Out, Category::Data)),
            TraceEvent::DataIn(_) => Some((Direction::In, Category::Data)),
        }
    }
}

/// Receiver for trace events.
///
/// The transfer layer calls `on_event` synchronously, on the task that drives
/// the transfer, once per event. An error aborts the transfer.
pub trait TraceSink {
    /// Handles one event.
    fn on_event(&mut self, event: TraceEvent<'_>) -> io::Result<()>;
}

impl<F> TraceSink for F
where
    F: FnMut(TraceEvent<'_>) -> io::Result<()>,
{
    fn on_event(&mut self, event: TraceEvent<'_>) -> io::Result<()> {
        self(event)
    }
}

/// Sink that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl TraceSink for Discard {
    fn on_event(&mut self, _event: TraceEvent<'_>) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_covers_every_packet_event() {
        assert_eq!(TraceEvent::Text("x\n").flow(), None);
        assert_eq!(
            TraceEvent::HeaderOut(b"GET / HTTP/1.1\r\n").flow(),
            Some((Direction::Out, Category::Header))
        );
        assert_eq!(
            TraceEvent::HeaderIn(b"HTTP/1.1 200 OK\r\n").flow(),
            Some((Direction::In, Category::Header))
        );
        assert_eq!(
            TraceEvent::DataOut(b"a=1").flow(),
            Some((Direction::Out, Category::Data))
        );
        assert_eq!(
            TraceEvent::DataIn(b"ok\n").flow(),
            Some((Direction::In, Category::Data))
        );
    }

    #[test]
    fn test_bytes_expose_payload() {
        assert_eq!(TraceEvent::Text("hello\n").bytes(), b"hello\n");
        assert_eq!(TraceEvent::DataIn(b"ok\n").bytes(), b"ok\n");
        assert!(TraceEvent::HeaderIn(b"").bytes().is_empty());
    }

    #[test]
    fn test_closure_sink_receives_events() {
        let mut seen = Vec::new();
        let mut sink = |event: TraceEvent<'_>| -> io::Result<()> {
            seen.push(event.bytes().len());
            Ok(())
        };
        sink.on_event(TraceEvent::DataIn(b"abc")).unwrap();
        sink.on_event(TraceEvent::Text("x\n")).unwrap();
        assert_eq!(seen, vec![3, 2]);
    }

    #[test]
    fn test_direction_and_category_labels() {
        assert_eq!(Direction::Out.to_string(), "OUT");
        assert_eq!(Direction::In.to_string(), "IN");
        assert_eq!(Category::Header.to_string(), "HEADER");
        assert_eq!(Category::Data.to_string(), "DATA");
    }
}
