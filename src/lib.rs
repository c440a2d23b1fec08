//! Mascot drives a small animated 2D character avatar.
//!
//! A fixed set of named image parts (body, arms, head, eyes, mouth) is
//! composited every frame with time-varying offsets, rotations, and scales
//! derived from two emotion parameters (valence, arousal). The public API is
//! loop-oriented:
//!
//! - Resolve part images through an [`ImageProvider`] (placeholders on failure)
//! - Build a [`CharacterRig`]
//! - Run a [`FrameScheduler`] against a [`Surface`]
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod assets;
pub mod emotion;
pub mod render;
pub mod scene;
pub mod session;

pub use crate::foundation::core::{
    Affine, Canvas, FrameRGBA, Point, Rgba8Premul, Transform2D, Vec2,
};
pub use crate::foundation::error::{MascotError, MascotResult};

pub use crate::animation::clock::AnimationClock;
pub use crate::animation::pose::{HeadGroupPose, PartPose, Pose, solve};
pub use crate::assets::provider::{
    AssetSource, DirAssetSource, ImageProvider, MemAssetSource, PartImage,
};
pub use crate::emotion::state::{EmotionSnapshot, EmotionState};
pub use crate::render::compositor::Compositor;
pub use crate::render::surface::{OffscreenSurface, Surface};
pub use crate::scene::rig::{CharacterRig, Part};
pub use crate::session::frame_loop::{FrameScheduler, ScenePipeline};
