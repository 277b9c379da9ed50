use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::{core::FrameIndex, error::RibbonResult, math::unpremultiply_rgba8_in_place},
    render::surface::FrameRGBA,
};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in device pixels.
    pub width: u32,
    /// Output height in device pixels.
    pub height: u32,
}

/// Consumer of drawn frames.
///
/// `push_frame` is called in strictly increasing `FrameIndex` order; throttled frames are never
/// pushed, so indices may have gaps.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> RibbonResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RibbonResult<()>;
    fn end(&mut self) -> RibbonResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RibbonResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RibbonResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> RibbonResult<()> {
        Ok(())
    }
}

/// Writes each frame as `frame-00000.png`, `frame-00001.png`, ... (straight alpha).
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> RibbonResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame dir '{}'", self.dir.display()))?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RibbonResult<()> {
        let path = self.dir.join(format!("frame-{:05}.png", idx.0));
        let mut data = frame.data.clone();
        if frame.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        image::save_buffer_with_format(
            &path,
            &data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote frame");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> RibbonResult<()> {
        tracing::info!(
            frames = self.written.len(),
            dir = %self.dir.display(),
            "frame sequence complete"
        );
        Ok(())
    }
}
