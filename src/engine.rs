use std::path::Path;

use crate::animation::smoother::{SmoothedParams, Smoother, TimingMode};
use crate::encode::capture::{CaptureOpts, CaptureStats};
use crate::encode::sink::FrameSink;
use crate::export::raster;
use crate::field::noise::Perlin2;
use crate::field::particles::RainField;
use crate::field::waveform::Pattern;
use crate::foundation::core::Canvas;
use crate::foundation::error::DotwaveResult;
use crate::render::backend::FrameRGBA;
use crate::render::compositor::{self, FieldInputs};
use crate::render::surface::Surface;
use crate::scene::state::ParameterState;

/// Engine construction options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineOpts {
    /// Seed for the noise permutation and the raindrop generator.
    pub seed: u64,
    /// How animation time advances.
    pub timing: TimingMode,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            seed: 1,
            timing: TimingMode::Smoothed,
        }
    }
}

/// Tick-driven halftone renderer.
///
/// The engine owns the raster surface and all animation state. The [`ParameterState`] is passed
/// into every call and never retained.
#[derive(Debug)]
pub struct Engine {
    surface: Surface,
    smoother: Smoother,
    noise: Perlin2,
    rain: RainField,
    opts: EngineOpts,
}

impl Engine {
    /// Create an engine with a transparent `canvas`-sized surface at time zero.
    pub fn new(canvas: Canvas, opts: EngineOpts) -> Self {
        Self {
            surface: Surface::new(canvas),
            smoother: Smoother::new(opts.timing),
            noise: Perlin2::new(opts.seed),
            rain: RainField::new(opts.seed.wrapping_add(1)),
            opts,
        }
    }

    /// Options this engine was created with.
    pub fn opts(&self) -> EngineOpts {
        self.opts
    }

    /// Current surface size.
    pub fn canvas(&self) -> Canvas {
        self.surface.canvas()
    }

    /// Reallocate the surface; edges are clamped into `1..=Canvas::MAX_EDGE`.
    ///
    /// The new surface is transparent until the next [`Engine::render`].
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, width: u32, height: u32) {
        let canvas = Canvas::clamped(width, height);
        if canvas != (Canvas { width, height }) {
            tracing::warn!(width, height, clamped = ?canvas, "canvas size clamped");
        }
        self.surface = Surface::new(canvas);
    }

    /// Step smoothing, time and particles by `dt` seconds.
    ///
    /// Drops are discarded as soon as the pattern leaves rain; otherwise nothing moves while
    /// animation is disabled.
    pub fn advance(&mut self, state: &ParameterState, dt: f64) {
        let anim = &state.animation;
        let raining =
            anim.pattern == Pattern::Rain && self.smoother.mode() == TimingMode::Smoothed;
        if !raining && !self.rain.is_empty() {
            tracing::debug!(live = self.rain.len(), "pattern left rain; clearing drops");
            self.rain.clear();
        }
        if !anim.enabled {
            return;
        }
        self.smoother.advance(anim, dt);

        if raining {
            self.rain.advance(dt);
            let canvas = self.surface.canvas();
            let p = self.smoother.params();
            self.rain
                .maybe_spawn(canvas.w(), canvas.h(), p.frequency, p.speed, anim.ease);
        }
    }

    /// Draw one frame of `state` at the current animation time.
    ///
    /// Rendering does not advance time: two renders without an [`Engine::advance`] in between
    /// produce identical pixels.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn render(&mut self, state: &ParameterState) {
        self.smoother.prime(&state.animation);
        let inputs = FieldInputs {
            smoother: &self.smoother,
            noise: &self.noise,
            rain: &self.rain,
        };
        if let Err(err) = compositor::compose(&mut self.surface, state, inputs) {
            tracing::error!(%err, "frame composition failed");
        }
    }

    /// [`Engine::advance`] followed by [`Engine::render`].
    pub fn tick(&mut self, state: &ParameterState, dt: f64) {
        self.advance(state, dt);
        self.render(state);
    }

    /// SVG document of `state` at the current animation time and surface size.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn export_vector(&mut self, state: &ParameterState) -> DotwaveResult<String> {
        #[cfg(feature = "vector-export")]
        {
            self.smoother.prime(&state.animation);
            let inputs = FieldInputs {
                smoother: &self.smoother,
                noise: &self.noise,
                rain: &self.rain,
            };
            Ok(crate::export::svg::document(
                state,
                self.surface.canvas(),
                inputs,
            ))
        }
        #[cfg(not(feature = "vector-export"))]
        {
            let _ = state;
            Err(crate::foundation::error::DotwaveError::export_unavailable(
                "dotwave was built without the `vector-export` feature",
            ))
        }
    }

    /// Copy of the most recently rendered pixels (premultiplied RGBA8).
    pub fn frame(&self) -> FrameRGBA {
        let canvas = self.surface.canvas();
        FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: self.surface.frame_bytes().to_vec(),
            premultiplied: true,
        }
    }

    /// Write the current frame as PNG at `scale` times the surface size.
    ///
    /// For `scale > 1` the frame is re-rendered at the larger size, written, and the surface is
    /// restored and rendered again at its original size.
    #[tracing::instrument(skip(self, state))]
    pub fn snapshot_png(
        &mut self,
        state: &ParameterState,
        path: &Path,
        scale: u32,
    ) -> DotwaveResult<()> {
        if scale <= 1 {
            return raster::write_png(&self.frame(), path);
        }

        let original = self.surface.canvas();
        let big = original.scaled(scale);
        self.resize(big.width, big.height);
        self.render(state);
        let written = raster::write_png(&self.frame(), path);

        self.resize(original.width, original.height);
        self.render(state);
        written
    }

    /// Render `opts.duration_secs` of animation at `opts.fps` into `sink`.
    pub fn capture_video(
        &mut self,
        state: &ParameterState,
        opts: CaptureOpts,
        sink: &mut dyn FrameSink,
    ) -> DotwaveResult<CaptureStats> {
        crate::encode::capture::capture_video(self, state, opts, sink)
    }

    /// Elapsed animation time.
    pub fn time(&self) -> f64 {
        self.smoother.time()
    }

    /// Current smoothed animation parameters, including the auto-panned center.
    pub fn smoothed(&self) -> &SmoothedParams {
        self.smoother.params()
    }

    /// Breath oscillator value in `[0, 1]`.
    pub fn breath_phase(&self) -> f64 {
        self.smoother.breath_phase()
    }

    /// Number of live raindrops.
    pub fn live_raindrops(&self) -> usize {
        self.rain.len()
    }
}
