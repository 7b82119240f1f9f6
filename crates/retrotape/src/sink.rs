//! Telemetry sink interface and the JSON-lines implementation.

use std::io::{self, Write};
use std::net::TcpStream;

use serde::Serialize;

/// Scalars published for one resolved tape pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TargetReport {
    /// Signed pixels from the frame center; positive is right of center.
    pub offset: f32,
    pub left_distance: f32,
    pub right_distance: f32,
}

/// Downstream control channel for per-frame target scalars.
///
/// The driver publishes only for frames with a valid resolved pair;
/// absence of a publish *is* the "no valid target" signal, so sinks never
/// see zero-filled placeholder reports.
pub trait TelemetrySink {
    fn publish(&mut self, report: &TargetReport) -> io::Result<()>;
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for Box<T> {
    fn publish(&mut self, report: &TargetReport) -> io::Result<()> {
        (**self).publish(report)
    }
}

/// Publishes one JSON object per report, tagged with the output table name,
/// to any writer.
pub struct JsonLineSink<W: Write> {
    table: String,
    writer: W,
}

#[derive(Serialize)]
struct ReportLine<'a> {
    table: &'a str,
    offset: f32,
    left_distance: f32,
    right_distance: f32,
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(table: impl Into<String>, writer: W) -> Self {
        Self {
            table: table.into(),
            writer,
        }
    }
}

impl JsonLineSink<io::Stdout> {
    /// Publish to standard output.
    pub fn stdout(table: impl Into<String>) -> Self {
        Self::new(table, io::stdout())
    }
}

impl JsonLineSink<TcpStream> {
    /// Publish over a TCP connection to a remote consumer.
    pub fn connect(table: impl Into<String>, addr: &str) -> io::Result<Self> {
        Ok(Self::new(table, TcpStream::connect(addr)?))
    }
}

impl<W: Write> TelemetrySink for JsonLineSink<W> {
    fn publish(&mut self, report: &TargetReport) -> io::Result<()> {
        let line = ReportLine {
            table: &self.table,
            offset: report.offset,
            left_distance: report.left_distance,
            right_distance: report.right_distance,
        };
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
