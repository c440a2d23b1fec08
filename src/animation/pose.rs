use kurbo::Vec2;

use crate::emotion::state::EmotionSnapshot;
use crate::foundation::core::Canvas;

/// The pose profile: fixed design constants that define the character's look.
///
/// Lengths are design units at the 500x700 reference canvas; the solver
/// multiplies by the screen-derived base scale where appropriate.
pub mod profile {
    /// Reference canvas width the part sizes were authored against.
    pub const DESIGN_WIDTH: f32 = 500.0;
    /// Reference canvas height the part sizes were authored against.
    pub const DESIGN_HEIGHT: f32 = 700.0;

    /// Displayed body width.
    pub const BODY_TARGET_W: f32 = 260.0;
    /// Displayed head width.
    pub const HEAD_TARGET_W: f32 = 220.0;
    /// Displayed arm width.
    pub const ARM_TARGET_W: f32 = 170.0;
    /// Displayed eye width.
    pub const EYE_TARGET_W: f32 = 60.0;
    /// Displayed mouth width.
    pub const MOUTH_TARGET_W: f32 = 90.0;

    /// Body center offset below screen center, screen px.
    pub const BODY_OFFSET_Y: f32 = 120.0;
    /// Arm center distance from screen center, design units.
    pub const ARM_OFFSET_X: f32 = 95.0;
    /// Arm center offset below screen center, screen px.
    pub const ARM_OFFSET_Y: f32 = 70.0;
    /// Neck anchor offset above screen center, screen px.
    pub const NECK_OFFSET_Y: f32 = -10.0;

    /// Head pivot as a fraction of the head image size (bottom-center, the
    /// neck joint).
    pub const HEAD_PIVOT_X: f32 = 0.5;
    pub const HEAD_PIVOT_Y: f32 = 0.9;
    /// Eye offsets from the neck anchor, head-local design units.
    pub const EYE_OFFSET_X: f32 = 38.0;
    pub const EYE_OFFSET_Y: f32 = -82.0;
    /// Mouth offset from the neck anchor, head-local design units.
    pub const MOUTH_OFFSET_Y: f32 = -45.0;

    /// Vertical bounce amplitude per unit arousal, screen px.
    pub const BOUNCE_AMPLITUDE: f32 = 10.0;
    /// Bounce angular speed: base + per-unit-arousal term, rad/s.
    pub const BOUNCE_SPEED_BASE: f32 = 2.0;
    pub const BOUNCE_SPEED_AROUSAL: f32 = 2.0;

    /// Arm swing amplitude per unit arousal, degrees.
    pub const ARM_SWING_AMPLITUDE: f32 = 15.0;
    /// Arm swing angular speed: base + per-unit-arousal term, rad/s.
    pub const ARM_SWING_SPEED_BASE: f32 = 1.5;

    /// Head tilt per unit valence, degrees.
    pub const TILT_PER_VALENCE: f32 = 10.0;
    /// Idle head sway amplitude (degrees) and speed (rad/s).
    pub const SWAY_AMPLITUDE: f32 = 3.0;
    pub const SWAY_SPEED: f32 = 1.5;

    /// Arousal above this opens the mouth (exclusive boundary).
    pub const MOUTH_OPEN_THRESHOLD: f32 = 0.6;
}

/// Placement for one part: where to put it, how to rotate it, and how wide it
/// should appear.
///
/// `target_w` is a display width; the compositor fits each sprite to it
/// against the image's own pixel width, so replacement art of any resolution
/// keeps the authored proportions. `pivot_frac` is the rotation/placement
/// pivot as a fraction of the image's own size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartPose {
    pub translate: Vec2,
    pub rotation_deg: f32,
    pub target_w: f32,
    pub pivot_frac: Vec2,
}

impl PartPose {
    fn centered(x: f32, y: f32, target_w: f32, rotation_deg: f32) -> Self {
        Self {
            translate: Vec2::new(x as f64, y as f64),
            rotation_deg,
            target_w,
            pivot_frac: Vec2::new(0.5, 0.5),
        }
    }
}

/// The head and its attached eyes/mouth, composited as one rotating rigid
/// body pivoting at the neck anchor.
///
/// Child placements are in head-local design units; the group transform
/// (anchor translation, rigid rotation, base scale) maps them to the screen,
/// so children rotate with the head structurally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadGroupPose {
    /// Neck point in screen space.
    pub anchor: Vec2,
    /// Rigid rotation for the whole group, degrees.
    pub rotation_deg: f32,
    /// Uniform group scale (the screen-derived base scale).
    pub scale: f32,
    pub head: PartPose,
    pub eye_left: PartPose,
    pub eye_right: PartPose,
    pub mouth: PartPose,
}

/// The complete per-frame pose: placements for every part plus the discrete
/// sprite selectors. Entirely a function of its inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub body: PartPose,
    pub arm_left: PartPose,
    pub arm_right: PartPose,
    pub head_group: HeadGroupPose,
    /// Closed-eye sprites selected while true.
    pub blinking: bool,
    /// Open-mouth sprite selected while true.
    pub mouth_open: bool,
}

/// Derive the pose for one frame.
///
/// Pure and deterministic: identical `(elapsed, blinking, emotion, canvas)`
/// inputs always yield an identical pose.
pub fn solve(elapsed: f32, blinking: bool, emotion: EmotionSnapshot, canvas: Canvas) -> Pose {
    use profile::*;

    let width = canvas.width as f32;
    let height = canvas.height as f32;
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let base_scale = (width / DESIGN_WIDTH).min(height / DESIGN_HEIGHT);

    let bounce_speed = BOUNCE_SPEED_BASE + BOUNCE_SPEED_AROUSAL * emotion.arousal;
    let bounce = BOUNCE_AMPLITUDE * emotion.arousal * (elapsed * bounce_speed).sin();

    let swing_speed = ARM_SWING_SPEED_BASE + emotion.arousal;
    let swing = ARM_SWING_AMPLITUDE * emotion.arousal * (elapsed * swing_speed).sin();

    let tilt = TILT_PER_VALENCE * emotion.valence;
    let sway = SWAY_AMPLITUDE * (elapsed * SWAY_SPEED).sin();
    let head_rotation = tilt + sway;

    let head_group = HeadGroupPose {
        anchor: Vec2::new(
            center_x as f64,
            (center_y + NECK_OFFSET_Y + bounce) as f64,
        ),
        rotation_deg: head_rotation,
        scale: base_scale,
        head: PartPose {
            translate: Vec2::ZERO,
            rotation_deg: 0.0,
            target_w: HEAD_TARGET_W,
            pivot_frac: Vec2::new(HEAD_PIVOT_X as f64, HEAD_PIVOT_Y as f64),
        },
        eye_left: PartPose::centered(-EYE_OFFSET_X, EYE_OFFSET_Y, EYE_TARGET_W, 0.0),
        eye_right: PartPose::centered(EYE_OFFSET_X, EYE_OFFSET_Y, EYE_TARGET_W, 0.0),
        mouth: PartPose::centered(0.0, MOUTH_OFFSET_Y, MOUTH_TARGET_W, 0.0),
    };

    Pose {
        body: PartPose::centered(
            center_x,
            center_y + BODY_OFFSET_Y + bounce,
            BODY_TARGET_W * base_scale,
            0.0,
        ),
        arm_left: PartPose::centered(
            center_x - ARM_OFFSET_X * base_scale,
            center_y + ARM_OFFSET_Y + bounce,
            ARM_TARGET_W * base_scale,
            swing,
        ),
        arm_right: PartPose::centered(
            center_x + ARM_OFFSET_X * base_scale,
            center_y + ARM_OFFSET_Y + bounce,
            ARM_TARGET_W * base_scale,
            -swing,
        ),
        head_group,
        blinking,
        mouth_open: emotion.arousal > MOUTH_OPEN_THRESHOLD,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/pose.rs"]
mod tests;
