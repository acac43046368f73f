use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::{DotwaveError, DotwaveResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;

const FFMPEG: &str = "ffmpeg";

/// Default target bitrate in bits per second.
pub const DEFAULT_BITRATE: u64 = 25_000_000;

/// Video codec chosen from the output container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoCodec {
    /// VP9 in a WebM container.
    Vp9,
    /// H.264 in an MP4 container.
    H264,
}

impl VideoCodec {
    /// `.webm` selects VP9; every other extension selects H.264.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("webm") => Self::Vp9,
            _ => Self::H264,
        }
    }

    fn encoder_args(self) -> &'static [&'static str] {
        match self {
            Self::Vp9 => &["-c:v", "libvpx-vp9"],
            Self::H264 => &["-c:v", "libx264", "-movflags", "+faststart"],
        }
    }
}

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output file; the extension picks the codec.
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
    /// Opaque color translucent pixels are flattened onto.
    pub background: Rgba8,
    /// `None` leaves the encoder's own rate control.
    pub bitrate: Option<u64>,
}

impl FfmpegSinkOpts {
    /// Options for `out_path` at [`DEFAULT_BITRATE`] over black.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: Rgba8::rgb(0, 0, 0),
            bitrate: Some(DEFAULT_BITRATE),
        }
    }

    /// Codec implied by the output path.
    pub fn codec(&self) -> VideoCodec {
        VideoCodec::for_path(&self.out_path)
    }

    /// Full ffmpeg argument list for a capture of `cfg`.
    fn command_args(&self, cfg: &SinkConfig) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        let mut push = |a: &str| args.push(a.into());

        push(if self.overwrite { "-y" } else { "-n" });
        for a in ["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba"] {
            push(a);
        }
        push("-s");
        push(&format!("{}x{}", cfg.width, cfg.height));
        // Rawvideo has no header, so the rate must precede the input.
        push("-r");
        push(&format!("{}/{}", cfg.fps.num, cfg.fps.den));
        for a in ["-i", "pipe:0", "-an"] {
            push(a);
        }
        for &a in self.codec().encoder_args() {
            push(a);
        }
        push("-pix_fmt");
        push("yuv420p");
        if let Some(bps) = self.bitrate {
            push("-b:v");
            push(&bps.to_string());
        }
        args.push(self.out_path.clone().into_os_string());
        args
    }

    fn prepare_output(&self) -> DotwaveResult<()> {
        let path = &self.out_path;
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            use anyhow::Context as _;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create output directory '{}'", dir.display()))?;
        }
        if !self.overwrite && path.exists() {
            return Err(DotwaveError::validation(format!(
                "output file '{}' already exists",
                path.display()
            )));
        }
        Ok(())
    }
}

/// A running ffmpeg child; stderr is collected on a separate thread so a chatty encoder cannot
/// block on a full pipe.
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
}

impl Encoder {
    fn spawn(args: Vec<OsString>) -> DotwaveResult<Self> {
        let mut child = Command::new(FFMPEG)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DotwaveError::encode(format!("spawn ffmpeg: {e}")))?;

        let (Some(stdin), Some(mut stderr)) = (child.stdin.take(), child.stderr.take()) else {
            let _ = child.kill();
            return Err(DotwaveError::encode("ffmpeg pipes unavailable"));
        };
        let stderr = std::thread::spawn(move || {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf).map(|_| buf)
        });
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn write(&mut self, bytes: &[u8]) -> DotwaveResult<()> {
        self.stdin
            .write_all(bytes)
            .map_err(|e| DotwaveError::encode(format!("write frame to ffmpeg: {e}")))
    }

    fn finish(self) -> DotwaveResult<()> {
        let Self {
            mut child,
            stdin,
            stderr,
        } = self;
        drop(stdin);

        let status = child
            .wait()
            .map_err(|e| DotwaveError::encode(format!("wait for ffmpeg: {e}")))?;
        let log = match stderr.join() {
            Ok(Ok(bytes)) => String::from_utf8_lossy(&bytes).trim().to_owned(),
            Ok(Err(e)) => format!("(stderr unreadable: {e})"),
            Err(_) => "(stderr reader panicked)".to_owned(),
        };
        if status.success() {
            if !log.is_empty() {
                tracing::debug!(%log, "ffmpeg finished with output");
            }
            Ok(())
        } else {
            Err(DotwaveError::encode(format!("ffmpeg {status}: {log}")))
        }
    }
}

/// Sink that pipes opaque RGBA frames into the system `ffmpeg`.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
    size: (u32, u32),
    opaque: Vec<u8>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Sink writing to `opts.out_path`; nothing is spawned until [`FrameSink::begin`].
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            size: (0, 0),
            opaque: Vec::new(),
            last_idx: None,
        }
    }
}

/// yuv420p subsamples chroma by two on both axes.
fn check_dimensions(cfg: &SinkConfig) -> DotwaveResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(DotwaveError::validation("fps must be non-zero"));
    }
    let (w, h) = (cfg.width, cfg.height);
    if w == 0 || h == 0 || !w.is_multiple_of(2) || !h.is_multiple_of(2) {
        return Err(DotwaveError::validation(format!(
            "video frames must have even, non-zero edges; got {w}x{h}"
        )));
    }
    Ok(())
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> DotwaveResult<()> {
        check_dimensions(&cfg)?;
        self.opts.prepare_output()?;
        if !is_ffmpeg_on_path() {
            return Err(DotwaveError::encode("video capture needs `ffmpeg` on PATH"));
        }

        tracing::debug!(
            out = %self.opts.out_path.display(),
            codec = ?self.opts.codec(),
            width = cfg.width,
            height = cfg.height,
            "spawning ffmpeg"
        );
        self.encoder = Some(Encoder::spawn(self.opts.command_args(&cfg))?);
        self.size = (cfg.width, cfg.height);
        self.opaque = vec![0; cfg.width as usize * cfg.height as usize * 4];
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> DotwaveResult<()> {
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(DotwaveError::encode("ffmpeg sink is not running"));
        };
        if self.last_idx.is_some_and(|last| idx.0 <= last.0) {
            return Err(DotwaveError::encode(format!(
                "frame {} arrived out of order",
                idx.0
            )));
        }
        if (frame.width, frame.height) != self.size || frame.data.len() != self.opaque.len() {
            return Err(DotwaveError::validation(format!(
                "frame is {}x{} ({} bytes), sink expects {}x{}",
                frame.width,
                frame.height,
                frame.data.len(),
                self.size.0,
                self.size.1
            )));
        }
        self.last_idx = Some(idx);

        flatten_onto(&mut self.opaque, &frame.data, self.opts.background);
        encoder.write(&self.opaque)
    }

    fn end(&mut self) -> DotwaveResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| DotwaveError::encode("ffmpeg sink is not running"))?;
        encoder.finish()
    }
}

/// Composite premultiplied RGBA8 `src` over opaque `bg` into `dst`.
///
/// Both slices hold whole pixels; a trailing partial pixel is left untouched.
fn flatten_onto(dst: &mut [u8], src: &[u8], bg: Rgba8) {
    let bg = [bg.r, bg.g, bg.b].map(u16::from);
    for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let inv = 255 - u16::from(px[3]);
        for c in 0..3 {
            out[c] = (u16::from(px[c]) + mul_div255_u16(bg[c], inv)).min(255) as u8;
        }
        out[3] = 255;
    }
}

/// `true` when `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new(FFMPEG)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
