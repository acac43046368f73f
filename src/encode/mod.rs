//! Video capture: frame sinks and the fixed-rate capture loop.
//!
//! Sinks consume rendered frames in tick order; [`capture::capture_video`] drives the engine.

pub(crate) mod capture;
/// `ffmpeg`-based sink (MP4 or WebM output via system `ffmpeg`).
pub(crate) mod ffmpeg;
/// Generic frame sink trait and the in-memory sink.
pub(crate) mod sink;
