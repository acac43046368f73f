use crate::encode::sink::{FrameSink, SinkConfig};
use crate::engine::Engine;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{DotwaveError, DotwaveResult};
use crate::scene::state::ParameterState;

/// Timed capture settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureOpts {
    /// Capture frame rate; each frame advances the engine by one frame duration.
    pub fps: Fps,
    /// Length of the capture in seconds.
    pub duration_secs: f64,
}

impl Default for CaptureOpts {
    fn default() -> Self {
        Self {
            fps: Fps { num: 60, den: 1 },
            duration_secs: 5.0,
        }
    }
}

impl CaptureOpts {
    /// Number of frames the capture renders (`floor(duration * fps)`).
    pub fn frame_count(&self) -> u64 {
        if !self.duration_secs.is_finite() {
            return 0;
        }
        self.fps.secs_to_frames_floor(self.duration_secs)
    }
}

/// Summary of a finished capture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureStats {
    /// Frames pushed into the sink.
    pub frames: u64,
    /// Animation time at the end of the capture.
    pub end_time: f64,
}

/// Tick `engine` at a fixed rate and stream every rendered frame into `sink`.
///
/// A capture of zero frames never starts the sink.
#[tracing::instrument(skip(engine, state, sink))]
pub(crate) fn capture_video(
    engine: &mut Engine,
    state: &ParameterState,
    opts: CaptureOpts,
    sink: &mut dyn FrameSink,
) -> DotwaveResult<CaptureStats> {
    if opts.fps.num == 0 || opts.fps.den == 0 {
        return Err(DotwaveError::validation("capture fps must be non-zero"));
    }

    let frames = opts.frame_count();
    if frames == 0 {
        tracing::info!("capture has no frames; sink not started");
        return Ok(CaptureStats {
            frames: 0,
            end_time: engine.time(),
        });
    }

    let canvas = engine.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: opts.fps,
    })?;

    let dt = opts.fps.frame_duration_secs();
    for i in 0..frames {
        engine.tick(state, dt);
        sink.push_frame(FrameIndex(i), &engine.frame())?;
    }
    sink.end()?;

    let stats = CaptureStats {
        frames,
        end_time: engine.time(),
    };
    tracing::info!(
        frames = stats.frames,
        width = canvas.width,
        height = canvas.height,
        fps = opts.fps.as_f64(),
        "capture finished"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/capture.rs"]
mod tests;
