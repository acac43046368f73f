use super::*;
use crate::animation::smoother::TimingMode;
use crate::encode::sink::InMemorySink;
use crate::engine::EngineOpts;
use crate::foundation::core::Canvas;

fn small_state() -> ParameterState {
    let mut s = ParameterState::default();
    s.canvas = Canvas::clamped(40, 20);
    s.halftone.density = 8;
    s.border.thickness = 2.0;
    s
}

fn engine(timing: TimingMode) -> Engine {
    Engine::new(
        Canvas::clamped(40, 20),
        EngineOpts {
            seed: 7,
            timing,
        },
    )
}

#[test]
fn default_opts_are_five_seconds_at_sixty() {
    let o = CaptureOpts::default();
    assert_eq!(o.fps, Fps::new(60, 1).unwrap());
    assert_eq!(o.frame_count(), 300);
}

#[test]
fn frame_count_floors_and_rejects_nonsense() {
    let fps = Fps::new(10, 1).unwrap();
    let count = |duration_secs| CaptureOpts { fps, duration_secs }.frame_count();
    assert_eq!(count(0.55), 5);
    assert_eq!(count(-1.0), 0);
    assert_eq!(count(f64::NAN), 0);
    assert_eq!(count(f64::INFINITY), 0);
}

#[test]
fn capture_pushes_every_frame_in_order() {
    let state = small_state();
    let mut e = engine(TimingMode::Fixed);
    let mut sink = InMemorySink::new();
    let opts = CaptureOpts {
        fps: Fps::new(10, 1).unwrap(),
        duration_secs: 0.5,
    };

    let stats = capture_video(&mut e, &state, opts, &mut sink).unwrap();

    assert_eq!(stats.frames, 5);
    assert!((stats.end_time - 5.0 * 0.005).abs() < 1e-12);
    assert!(sink.is_ended());
    assert_eq!(
        sink.config(),
        Some(&SinkConfig {
            width: 40,
            height: 20,
            fps: opts.fps,
        })
    );
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4]);
    for (_, f) in sink.frames() {
        assert_eq!((f.width, f.height), (40, 20));
        assert_eq!(f.data.len(), 40 * 20 * 4);
        assert!(f.premultiplied);
    }
}

#[test]
fn zero_length_capture_never_starts_sink() {
    let state = small_state();
    let mut e = engine(TimingMode::Smoothed);
    let mut sink = InMemorySink::new();
    let opts = CaptureOpts {
        fps: Fps::new(60, 1).unwrap(),
        duration_secs: 0.0,
    };

    let stats = capture_video(&mut e, &state, opts, &mut sink).unwrap();

    assert_eq!(stats.frames, 0);
    assert!(sink.config().is_none());
    assert!(!sink.is_ended());
    assert!(sink.frames().is_empty());
}

#[test]
fn zero_fps_is_rejected() {
    let state = small_state();
    let mut e = engine(TimingMode::Smoothed);
    let mut sink = InMemorySink::new();
    let opts = CaptureOpts {
        fps: Fps { num: 0, den: 1 },
        duration_secs: 1.0,
    };
    assert!(matches!(
        capture_video(&mut e, &state, opts, &mut sink),
        Err(DotwaveError::Validation(_))
    ));
    assert!(sink.config().is_none());
}
