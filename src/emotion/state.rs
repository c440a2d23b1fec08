use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;
use tracing::{debug, error, info};

use crate::assets::provider::AssetSource;

/// Logical name of the persisted emotion resource.
pub const EMOTION_ASSET_NAME: &str = "model/emotion.json";

pub const DEFAULT_VALENCE: f32 = 0.3;
pub const DEFAULT_AROUSAL: f32 = 0.5;

/// Step applied to either axis by one tap event.
const TAP_STEP: f32 = 0.1;

/// Clamp a valence value into `[-1, 1]`.
pub fn clamp_valence(v: f32) -> f32 {
    v.clamp(-1.0, 1.0)
}

/// Clamp an arousal value into `[0, 1]`.
pub fn clamp_arousal(a: f32) -> f32 {
    a.clamp(0.0, 1.0)
}

/// Point-in-time copy of the two emotion scalars, consumed by the pose solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmotionSnapshot {
    /// Positive/negative axis, `[-1, 1]`.
    pub valence: f32,
    /// Activation/intensity axis, `[0, 1]`.
    pub arousal: f32,
}

/// Shared emotion state: two bounded scalars mutated by the input context and
/// read every frame by the render context.
///
/// Each field is stored as an f32 bit pattern in an atomic, so reads and
/// writes need no lock. There is no cross-field atomicity; each clamp-then-
/// store is independent.
pub struct EmotionState {
    valence_bits: AtomicU32,
    arousal_bits: AtomicU32,
}

impl Default for EmotionState {
    fn default() -> Self {
        Self::new()
    }
}

impl EmotionState {
    /// State with the default valence/arousal pair (0.3, 0.5).
    pub fn new() -> Self {
        Self::with(DEFAULT_VALENCE, DEFAULT_AROUSAL)
    }

    /// State with explicit initial values, clamped into range.
    pub fn with(valence: f32, arousal: f32) -> Self {
        Self {
            valence_bits: AtomicU32::new(clamp_valence(valence).to_bits()),
            arousal_bits: AtomicU32::new(clamp_arousal(arousal).to_bits()),
        }
    }

    pub fn valence(&self) -> f32 {
        f32::from_bits(self.valence_bits.load(Ordering::Relaxed))
    }

    pub fn arousal(&self) -> f32 {
        f32::from_bits(self.arousal_bits.load(Ordering::Relaxed))
    }

    pub fn set_valence(&self, v: f32) {
        self.valence_bits
            .store(clamp_valence(v).to_bits(), Ordering::Relaxed);
    }

    pub fn set_arousal(&self, a: f32) {
        self.arousal_bits
            .store(clamp_arousal(a).to_bits(), Ordering::Relaxed);
    }

    /// Copy both scalars for one frame's pose derivation.
    pub fn snapshot(&self) -> EmotionSnapshot {
        EmotionSnapshot {
            valence: self.valence(),
            arousal: self.arousal(),
        }
    }

    /// Map one discrete tap at `(x, y)` on a `width` x `height` surface onto
    /// the emotion axes: left/right halves nudge valence down/up, top/bottom
    /// halves nudge arousal up/down.
    pub fn apply_tap(&self, x: f32, y: f32, width: u32, height: u32) {
        let center_x = width as f32 / 2.0;
        let center_y = height as f32 / 2.0;

        if x < center_x {
            self.set_valence(self.valence() - TAP_STEP);
        } else {
            self.set_valence(self.valence() + TAP_STEP);
        }

        if y < center_y {
            self.set_arousal(self.arousal() + TAP_STEP);
        } else {
            self.set_arousal(self.arousal() - TAP_STEP);
        }

        debug!(
            valence = self.valence(),
            arousal = self.arousal(),
            "tap applied"
        );
    }

    /// Serialize to the compact persisted form `{"valence":V,"arousal":A}`.
    pub fn to_json(&self) -> String {
        #[derive(Serialize)]
        struct EmotionFile {
            valence: f32,
            arousal: f32,
        }

        // Two plain floats cannot fail to serialize.
        serde_json::to_string(&EmotionFile {
            valence: self.valence(),
            arousal: self.arousal(),
        })
        .unwrap_or_else(|_| String::from("{}"))
    }

    /// Permissively parse `text` and store the result.
    ///
    /// Non-JSON input leaves both fields at their defaults. A JSON object
    /// contributes each of `valence`/`arousal` only when the field is
    /// numeric; the other field falls back to its default independently
    /// (partial recovery, not all-or-nothing). Never panics or propagates.
    pub fn load_json(&self, text: &str) {
        let parsed: serde_json::Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => {
                error!(error = %e, "failed to parse emotion JSON, using defaults");
                self.set_valence(DEFAULT_VALENCE);
                self.set_arousal(DEFAULT_AROUSAL);
                return;
            }
        };

        let field = |name: &str, default: f32| -> f32 {
            parsed
                .get(name)
                .and_then(serde_json::Value::as_f64)
                .map(|v| v as f32)
                .unwrap_or(default)
        };

        self.set_valence(field("valence", DEFAULT_VALENCE));
        self.set_arousal(field("arousal", DEFAULT_AROUSAL));
    }

    /// Load the persisted emotion resource from `source`.
    ///
    /// An absent or unreadable resource keeps the defaults; a malformed one
    /// is handled by [`EmotionState::load_json`]. Never fatal.
    pub fn load_from_source(&self, source: &dyn AssetSource) {
        match source.open(EMOTION_ASSET_NAME) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                self.load_json(&text);
                info!(
                    valence = self.valence(),
                    arousal = self.arousal(),
                    "loaded emotion state"
                );
            }
            Err(e) => {
                error!(error = %e, "failed to load {EMOTION_ASSET_NAME}, using defaults");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emotion/state.rs"]
mod tests;
