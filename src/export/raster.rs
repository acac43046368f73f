use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{DotwaveError, DotwaveResult};
use crate::render::backend::FrameRGBA;

/// Write `frame` as a PNG file at `path`, creating parent directories.
///
/// PNG stores straight alpha, so premultiplied frames are converted first.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> DotwaveResult<()> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(DotwaveError::render(format!(
            "frame buffer is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut straight;
    let frame = if frame.premultiplied {
        straight = frame.clone();
        straight.unpremultiply();
        &straight
    } else {
        frame
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;

    tracing::debug!(path = %path.display(), width = frame.width, height = frame.height, "wrote png");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/raster.rs"]
mod tests;
