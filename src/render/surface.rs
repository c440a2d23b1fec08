use crate::foundation::core::{Canvas, FrameRGBA};
use crate::foundation::error::{MascotError, MascotResult};

/// Presentation target for rendered frames.
///
/// Pairing contract: the frame loop calls `begin_frame` once per frame to
/// acquire the target and query its current dimensions (resize/rotation shows
/// up here), renders, then calls `present` with the finished frame. Either
/// call may fail transiently during surface lifecycle transitions; the caller
/// drops that frame and continues.
pub trait Surface: Send {
    /// Acquire the target for one frame and return its current dimensions.
    fn begin_frame(&mut self) -> MascotResult<Canvas>;
    /// Present one finished frame.
    fn present(&mut self, frame: &FrameRGBA) -> MascotResult<()>;
}

/// In-memory surface for tests, demos, and headless runs.
///
/// Keeps the most recently presented frame and a running frame count.
pub struct OffscreenSurface {
    canvas: Canvas,
    last_frame: Option<FrameRGBA>,
    presented: u64,
}

impl OffscreenSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas { width, height },
            last_frame: None,
            presented: 0,
        }
    }

    /// Change the reported dimensions; takes effect at the next `begin_frame`.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas = Canvas { width, height };
    }

    /// The most recently presented frame, if any.
    pub fn last_frame(&self) -> Option<&FrameRGBA> {
        self.last_frame.as_ref()
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Surface for OffscreenSurface {
    fn begin_frame(&mut self) -> MascotResult<Canvas> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(MascotError::render("surface has zero-sized dimensions"));
        }
        Ok(self.canvas)
    }

    fn present(&mut self, frame: &FrameRGBA) -> MascotResult<()> {
        self.last_frame = Some(frame.clone());
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
