use std::sync::Arc;

use kurbo::Affine;

use crate::animation::pose::{PartPose, Pose};
use crate::assets::provider::PartImage;
use crate::foundation::core::{Canvas, FrameRGBA, Transform2D, Vec2};
use crate::foundation::error::{MascotError, MascotResult};
use crate::scene::rig::{CharacterRig, Part};

/// Frame background, cleared before parts are drawn.
pub const BACKGROUND_RGBA: [u8; 4] = [0, 0, 0, 255];

#[derive(Clone)]
struct ImagePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

/// CPU compositor: draws a posed [`CharacterRig`] into an RGBA8 frame.
///
/// Reuses one `vello_cpu` render context and output pixmap across frames,
/// recreating both when the canvas size changes. Part images are prepared as
/// pixmap paints on first use and cached per part, so a compositor instance
/// is tied to the rig it renders.
pub struct Compositor {
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
    paints: [Option<ImagePaint>; 10],
    clear_rgba: [u8; 4],
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    pub fn new() -> Self {
        Self {
            ctx: None,
            pixmap: None,
            paints: [const { None }; 10],
            clear_rgba: BACKGROUND_RGBA,
        }
    }

    /// Return a compositor with a configured background color.
    pub fn with_clear_rgba(mut self, clear: [u8; 4]) -> Self {
        self.clear_rgba = clear;
        self
    }

    /// Composite one frame.
    ///
    /// Draws body, both arms, then the head group as one rigid unit: the
    /// group affine (neck translation, rigid rotation, base scale) is
    /// prepended to every child placement, so eyes and mouth inherit the
    /// head's rotation structurally. There is no per-part error path — every
    /// rig image is guaranteed present (placeholder substitution upstream).
    pub fn render(
        &mut self,
        rig: &CharacterRig,
        pose: &Pose,
        canvas: Canvas,
    ) -> MascotResult<FrameRGBA> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(MascotError::render("canvas dimensions must be non-zero"));
        }
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| MascotError::render("canvas width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| MascotError::render("canvas height exceeds u16"))?;

        self.ensure_paints(rig)?;

        let group = &pose.head_group;
        let group_affine = Affine::translate(group.anchor)
            * Affine::rotate((group.rotation_deg as f64).to_radians())
            * Affine::scale(group.scale as f64);

        let eye_left = eye_part(pose.blinking, true);
        let eye_right = eye_part(pose.blinking, false);
        let mouth = if pose.mouth_open {
            Part::MouthOpen
        } else {
            Part::MouthClosed
        };

        let mut pixmap = match self.pixmap.take() {
            Some(pm) if pm.width() == w && pm.height() == h => pm,
            _ => vello_cpu::Pixmap::new(w, h),
        };
        pixmap.data_as_u8_slice_mut().fill(0);

        self.with_ctx_mut(w, h, |this, ctx| {
            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

            // Background fill.
            let [cr, cg, cb, ca] = this.clear_rgba;
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(cr, cg, cb, ca));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                canvas.width as f64,
                canvas.height as f64,
            ));

            this.draw_part(ctx, Part::Body, &pose.body, Affine::IDENTITY)?;
            this.draw_part(ctx, Part::ArmLeft, &pose.arm_left, Affine::IDENTITY)?;
            this.draw_part(ctx, Part::ArmRight, &pose.arm_right, Affine::IDENTITY)?;

            this.draw_part(ctx, Part::Head, &group.head, group_affine)?;
            this.draw_part(ctx, eye_left, &group.eye_left, group_affine)?;
            this.draw_part(ctx, eye_right, &group.eye_right, group_affine)?;
            this.draw_part(ctx, mouth, &group.mouth, group_affine)?;

            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        let out = FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
        };
        self.pixmap = Some(pixmap);
        Ok(out)
    }

    /// Draw one sprite: translate to its target, rotate, fit-width scale,
    /// pivoted at `pivot_frac` of its own size. `pre` is the parent transform
    /// (identity for screen-level parts, the group affine for head children).
    fn draw_part(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        part: Part,
        pp: &PartPose,
        pre: Affine,
    ) -> MascotResult<()> {
        let p = self.paints[part.index()]
            .clone()
            .ok_or_else(|| MascotError::render("part paint missing"))?;

        // Fit the sprite to the authored display width regardless of the
        // source art resolution.
        let fit = (pp.target_w as f64) / (p.w.max(1) as f64);
        let local = Transform2D {
            translate: pp.translate,
            rotation_rad: (pp.rotation_deg as f64).to_radians(),
            scale: Vec2::new(fit, fit),
            anchor: Vec2::new(pp.pivot_frac.x * p.w as f64, pp.pivot_frac.y * p.h as f64),
        };

        ctx.set_transform(affine_to_cpu(pre * local.to_affine()));
        ctx.set_paint(p.paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, p.w as f64, p.h as f64));
        Ok(())
    }

    fn ensure_paints(&mut self, rig: &CharacterRig) -> MascotResult<()> {
        for part in Part::ALL {
            if self.paints[part.index()].is_none() {
                self.paints[part.index()] = Some(image_paint(rig.image(part))?);
            }
        }
        Ok(())
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> MascotResult<R>,
    ) -> MascotResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }
}

fn eye_part(blinking: bool, left: bool) -> Part {
    match (blinking, left) {
        (true, true) => Part::EyeLeftClosed,
        (true, false) => Part::EyeRightClosed,
        (false, true) => Part::EyeLeftOpen,
        (false, false) => Part::EyeRightOpen,
    }
}

fn image_paint(img: &PartImage) -> MascotResult<ImagePaint> {
    let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
    Ok(ImagePaint {
        paint: vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        },
        w: img.width,
        h: img.height,
    })
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> MascotResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MascotError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MascotError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(MascotError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
