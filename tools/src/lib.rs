//! Introspection and debugging tools for the terrawire codec.
//!
//! This crate provides utilities for looking at captured traffic:
//!
//! - Split a capture into frames and list their kinds and sizes
//! - Decode every frame into structured JSON
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use std::fmt::Write as _;

use anyhow::Result;
use codec::{decode_body, CodecContext, Packet};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wire::FrameIter;

/// Installs a console subscriber. `RUST_LOG` overrides the default level.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);
    // A second init (as in tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}

/// How one frame of a capture fared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    Decoded,
    Unknown,
    Invalid(String),
}

/// A one-line summary of a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameSummary {
    pub offset: usize,
    pub kind: u8,
    pub name: Option<&'static str>,
    pub total_len: usize,
    pub status: FrameStatus,
}

/// Frame listing for a capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub total_bytes: usize,
    pub frames: Vec<FrameSummary>,
    /// Set when the capture could not be split to the end.
    pub split_error: Option<SplitError>,
}

/// Where and why frame splitting stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitError {
    pub offset: usize,
    pub message: String,
}

/// Splits `bytes` into frames and tries to decode each one.
pub fn inspect_capture(bytes: &[u8], ctx: &CodecContext<'_>) -> InspectReport {
    let mut frames = Vec::new();
    let mut split_error = None;
    let mut iter = FrameIter::new(bytes, &ctx.wire_limits);
    loop {
        let offset = iter.offset();
        let Some(item) = iter.next() else { break };
        match item {
            Ok((offset, frame)) => {
                let status = match decode_body(frame, ctx) {
                    Ok(packet) if packet.is_unknown() => FrameStatus::Unknown,
                    Ok(_) => FrameStatus::Decoded,
                    Err(err) => FrameStatus::Invalid(err.to_string()),
                };
                frames.push(FrameSummary {
                    offset,
                    kind: frame.kind().raw(),
                    name: frame.kind().name(),
                    total_len: frame.total_len(),
                    status,
                });
            }
            Err(err) => {
                tracing::debug!(offset, %err, "capture split stopped");
                split_error = Some(SplitError {
                    offset,
                    message: err.to_string(),
                });
            }
        }
    }
    InspectReport {
        total_bytes: bytes.len(),
        frames,
        split_error,
    }
}

/// One decoded frame of a capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedFrame<'a> {
    pub offset: usize,
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packet: Option<Packet<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Decoded contents of a capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodeOutput<'a> {
    pub frames: Vec<DecodedFrame<'a>>,
    pub split_error: Option<SplitError>,
}

/// Decodes every frame in `bytes`. Per-frame failures are recorded, not returned.
pub fn decode_capture<'a>(bytes: &'a [u8], ctx: &CodecContext<'_>) -> DecodeOutput<'a> {
    let mut frames = Vec::new();
    let mut split_error = None;
    let mut iter = FrameIter::new(bytes, &ctx.wire_limits);
    loop {
        let offset = iter.offset();
        let Some(item) = iter.next() else { break };
        match item {
            Ok((offset, frame)) => {
                let (packet, error) = match decode_body(frame, ctx) {
                    Ok(packet) => (Some(packet), None),
                    Err(err) => (None, Some(err.to_string())),
                };
                frames.push(DecodedFrame {
                    offset,
                    kind: frame.kind().raw(),
                    packet,
                    error,
                });
            }
            Err(err) => {
                split_error = Some(SplitError {
                    offset,
                    message: err.to_string(),
                });
            }
        }
    }
    DecodeOutput {
        frames,
        split_error,
    }
}

/// Renders a decode as JSON.
pub fn decode_capture_json(bytes: &[u8], ctx: &CodecContext<'_>) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(decode_capture(bytes, ctx))?)
}

/// Renders an inspect report as text.
#[must_use]
pub fn format_inspect(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} bytes, {} frames",
        report.total_bytes,
        report.frames.len()
    );
    for frame in &report.frames {
        let name = frame.name.unwrap_or("?");
        let status = match &frame.status {
            FrameStatus::Decoded => "ok".to_string(),
            FrameStatus::Unknown => "opaque".to_string(),
            FrameStatus::Invalid(err) => format!("invalid: {err}"),
        };
        let _ = writeln!(
            out,
            "  @{:<8} kind {:>3} {:<20} {:>6} bytes  {status}",
            frame.offset, frame.kind, name, frame.total_len
        );
    }
    if let Some(err) = &report.split_error {
        let _ = writeln!(out, "  stopped at offset {}: {}", err.offset, err.message);
    }
    out
}

/// Renders a decode as one line per frame.
#[must_use]
pub fn format_decode_pretty(output: &DecodeOutput<'_>) -> String {
    let mut out = String::new();
    for frame in &output.frames {
        match (&frame.packet, &frame.error) {
            (Some(packet), _) => {
                let _ = writeln!(out, "@{} {packet:?}", frame.offset);
            }
            (None, Some(err)) => {
                let _ = writeln!(out, "@{} kind {} error: {err}", frame.offset, frame.kind);
            }
            (None, None) => {}
        }
    }
    if let Some(err) = &output.split_error {
        let _ = writeln!(out, "stopped at offset {}: {}", err.offset, err.message);
    }
    out
}
