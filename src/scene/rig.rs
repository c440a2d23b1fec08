use crate::assets::provider::{ImageProvider, PartImage};
use crate::foundation::core::Rgba8Premul;

/// The character's visual parts. Each maps to one logical asset name and a
/// per-part placeholder color used when the art fails to load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    Body,
    Head,
    ArmLeft,
    ArmRight,
    EyeLeftOpen,
    EyeLeftClosed,
    EyeRightOpen,
    EyeRightClosed,
    MouthOpen,
    MouthClosed,
}

impl Part {
    /// Every part, in load order.
    pub const ALL: [Part; 10] = [
        Part::Body,
        Part::Head,
        Part::ArmLeft,
        Part::ArmRight,
        Part::EyeLeftOpen,
        Part::EyeLeftClosed,
        Part::EyeRightOpen,
        Part::EyeRightClosed,
        Part::MouthOpen,
        Part::MouthClosed,
    ];

    /// Logical asset name for this part.
    pub fn asset_name(self) -> &'static str {
        match self {
            Part::Body => "model/body.png",
            Part::Head => "model/head.png",
            Part::ArmLeft => "model/arm.left.png",
            Part::ArmRight => "model/arm.right.png",
            Part::EyeLeftOpen => "model/eye.left.open.png",
            Part::EyeLeftClosed => "model/eye.left.closed.png",
            Part::EyeRightOpen => "model/eye.right.open.png",
            Part::EyeRightClosed => "model/eye.right.closed.png",
            Part::MouthOpen => "model/mouth.open.png",
            Part::MouthClosed => "model/mouth.closed.png",
        }
    }

    /// Placeholder fill for this part when its art is missing.
    pub fn fallback_color(self) -> Rgba8Premul {
        let (r, g, b) = match self {
            Part::Body => (0x8B, 0x73, 0x55),
            Part::Head => (0xFF, 0xDB, 0xAC),
            Part::ArmLeft | Part::ArmRight => (0xCD, 0x85, 0x3F),
            Part::EyeLeftOpen | Part::EyeLeftClosed | Part::EyeRightOpen | Part::EyeRightClosed => {
                (0x00, 0x00, 0x00)
            }
            Part::MouthOpen | Part::MouthClosed => (0xFF, 0x6B, 0x6B),
        };
        Rgba8Premul::from_straight_rgba(r, g, b, 0xFF)
    }

    /// Stable dense index, used by the compositor's paint cache.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The fully-resolved set of part images for one character.
///
/// Construction resolves every part eagerly, so a rig is always complete and
/// drawable: there is no "not yet loaded" state, and load failures have
/// already degraded to placeholders inside the provider.
pub struct CharacterRig {
    images: [PartImage; 10],
}

impl CharacterRig {
    /// Resolve all parts through `provider` and assemble the rig.
    pub fn load(provider: &mut ImageProvider) -> Self {
        Self {
            images: Part::ALL
                .map(|part| provider.resolve(part.asset_name(), part.fallback_color())),
        }
    }

    /// Image handle for `part`.
    pub fn image(&self, part: Part) -> &PartImage {
        &self.images[part.index()]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/rig.rs"]
mod tests;
