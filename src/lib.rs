//! Dotwave is a parametric halftone graphics generator.
//!
//! A grid of circles is modulated by one of several animated waveforms, layered over a flat or
//! gradient background, darkened toward chosen edges and framed by a border. The API is
//! engine-oriented:
//!
//! - Build a [`ParameterState`] (from JSON, presets or code)
//! - Create an [`Engine`] and drive it with [`Engine::tick`]
//! - Export stills ([`Engine::snapshot_png`], [`Engine::export_vector`]) or stream a timed capture
//!   into a [`FrameSink`] with [`Engine::capture_video`]
#![forbid(unsafe_code)]

mod engine;
mod foundation;

pub(crate) mod animation;
pub(crate) mod encode;
pub(crate) mod export;
pub(crate) mod field;
pub(crate) mod render;
pub(crate) mod scene;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rect, Rgba8, Rgba8Premul};
pub use crate::foundation::error::{DotwaveError, DotwaveResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::smoother::{PanBounds, SmoothedParams, TimingMode};
pub use crate::encode::capture::{CaptureOpts, CaptureStats};
pub use crate::encode::ffmpeg::{
    DEFAULT_BITRATE, FfmpegSink, FfmpegSinkOpts, VideoCodec, is_ffmpeg_on_path,
};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::engine::{Engine, EngineOpts};
pub use crate::export::raster::write_png;
#[cfg(feature = "vector-export")]
pub use crate::export::svg::rasterize_svg;
pub use crate::field::sampler::SizeMode;
pub use crate::field::waveform::Pattern;
pub use crate::render::backend::FrameRGBA;
pub use crate::render::blend::BlendMode;
pub use crate::scene::presets;
pub use crate::scene::state::{
    AnimationConfig, AutoPan, Background, BorderConfig, ColorStop, DarkOverlayConfig,
    GradientKind, HalftoneConfig, OverlayEdges, ParameterState,
};
