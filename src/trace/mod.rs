//! Synthetic packet rendering of transfer trace events.
//!
//! [`PacketTrace`] turns each [`TraceEvent`] into a line that reads like a packet
//! capture record. The addresses in those records are labels only: the local
//! side is a fixed placeholder and the remote side is the independently resolved
//! address of the target host.

use std::io::{self, Write};
use std::net::Ipv4Addr;

use chrono::{DateTime, Local};

use crate::config::{HTTPS_PORT, LOCAL_PEER_LABEL};
use crate::transfer::{Category, Direction, TraceEvent, TraceSink};

type Clock = Box<dyn FnMut() -> DateTime<Local>>;

/// Per-run packet trace context.
///
/// Owns the sequence counter and the remote label for exactly one transfer. The
/// counter starts at 1 and advances by one for every event, whatever its kind;
/// timestamps never go backwards even if the wall clock does.
pub struct PacketTrace<W: Write> {
    out: W,
    remote: String,
    counter: u64,
    last_stamp: Option<DateTime<Local>>,
    clock: Clock,
}

impl<W: Write> PacketTrace<W> {
    /// Creates a trace that writes records to `out`, labeling the remote side
    /// `<remote_ip>:443`.
    pub fn new(out: W, remote_ip: Ipv4Addr) -> Self {
        Self::with_clock(out, remote_ip, Box::new(Local::now))
    }

    fn with_clock(out: W, remote_ip: Ipv4Addr, clock: Clock) -> Self {
        Self {
            out,
            remote: format!("{remote_ip}:{HTTPS_PORT}"),
            counter: 0,
            last_stamp: None,
            clock,
        }
    }

    /// Number of events recorded so far.
    pub fn packets(&self) -> u64 {
        self.counter
    }

    /// Returns a `HH:MM:SS.mmm` timestamp no earlier than the previous one.
    fn stamp(&mut self) -> String {
        let now = (self.clock)();
        let stamp = match self.last_stamp {
            Some(last) if now < last => last,
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp.format("%H:%M:%S%.3f").to_string()
    }

    fn write_summary(
        &mut self,
        ts: &str,
        direction: Direction,
        category: Category,
        len: usize,
    ) -> io::Result<()> {
        let (src, dst) = match direction {
            Direction::Out => (LOCAL_PEER_LABEL, self.remote.as_str()),
            Direction::In => (self.remote.as_str(), LOCAL_PEER_LABEL),
        };
        writeln!(
            self.out,
            "[{ts}] [PACKET {}] {direction} {src} -> {dst} | {category} | {len} bytes",
            self.counter
        )
    }
}

impl<W: Write> TraceSink for PacketTrace<W> {
    fn on_event(&mut self, event: TraceEvent<'_>) -> io::Result<()> {
        self.counter += 1;
        let ts = self.stamp();
        let bytes = event.bytes();

        match event.flow() {
            None => {
                let text = String::from_utf8_lossy(bytes);
                writeln!(self.out, "[{ts}] [INFO] {}", text.trim_end_matches(['\r', '\n']))
            }
            Some((direction, category)) => {
                self.write_summary(&ts, direction, category, bytes.len())?;
                match category {
                    Category::Header => {
                        let text = String::from_utf8_lossy(bytes);
                        writeln!(self.out, "{}", text.trim_end_matches(['\r', '\n']))
                    }
                    Category::Data => Ok(()),
                }
            }
        }
    }
}
