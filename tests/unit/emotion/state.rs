use super::*;

#[test]
fn clamp_valence_into_range_and_idempotent() {
    assert_eq!(clamp_valence(-2.0), -1.0);
    assert_eq!(clamp_valence(2.0), 1.0);
    assert_eq!(clamp_valence(0.25), 0.25);
    for v in [-5.0f32, -1.0, -0.3, 0.0, 0.7, 1.0, 9.0] {
        assert_eq!(clamp_valence(clamp_valence(v)), clamp_valence(v));
    }
}

#[test]
fn clamp_arousal_into_range_and_idempotent() {
    assert_eq!(clamp_arousal(-0.5), 0.0);
    assert_eq!(clamp_arousal(1.5), 1.0);
    for a in [-1.0f32, 0.0, 0.4, 1.0, 3.0] {
        assert_eq!(clamp_arousal(clamp_arousal(a)), clamp_arousal(a));
    }
}

#[test]
fn setters_clamp_before_storing() {
    let state = EmotionState::new();
    state.set_valence(7.0);
    state.set_arousal(-7.0);
    assert_eq!(state.valence(), 1.0);
    assert_eq!(state.arousal(), 0.0);
}

#[test]
fn defaults_are_applied() {
    let state = EmotionState::new();
    assert_eq!(state.valence(), 0.3);
    assert_eq!(state.arousal(), 0.5);
}

#[test]
fn load_json_clamps_out_of_range_fields() {
    let state = EmotionState::new();
    state.load_json(r#"{"valence":-2,"arousal":0.7}"#);
    assert_eq!(state.valence(), -1.0);
    assert_eq!(state.arousal(), 0.7);
}

#[test]
fn load_json_empty_object_yields_defaults() {
    let state = EmotionState::with(0.9, 0.9);
    state.load_json("{}");
    assert_eq!(state.valence(), DEFAULT_VALENCE);
    assert_eq!(state.arousal(), DEFAULT_AROUSAL);
}

#[test]
fn load_json_garbage_yields_defaults_without_panicking() {
    let state = EmotionState::with(0.9, 0.9);
    state.load_json("not json");
    assert_eq!(state.valence(), DEFAULT_VALENCE);
    assert_eq!(state.arousal(), DEFAULT_AROUSAL);
}

#[test]
fn load_json_recovers_per_field() {
    // One unusable field must not discard the other.
    let state = EmotionState::new();
    state.load_json(r#"{"valence":"oops","arousal":0.8}"#);
    assert_eq!(state.valence(), DEFAULT_VALENCE);
    assert_eq!(state.arousal(), 0.8);
}

#[test]
fn to_json_is_compact_and_reloadable() {
    let state = EmotionState::with(-0.5, 0.25);
    let text = state.to_json();
    assert_eq!(text, r#"{"valence":-0.5,"arousal":0.25}"#);

    let reloaded = EmotionState::new();
    reloaded.load_json(&text);
    assert_eq!(reloaded.valence(), -0.5);
    assert_eq!(reloaded.arousal(), 0.25);
}

#[test]
fn tap_quadrants_nudge_both_axes() {
    let state = EmotionState::with(0.0, 0.5);

    // Top-left: valence down, arousal up.
    state.apply_tap(10.0, 10.0, 100, 100);
    assert!((state.valence() - -0.1).abs() < 1e-6);
    assert!((state.arousal() - 0.6).abs() < 1e-6);

    // Bottom-right: valence up, arousal down.
    state.apply_tap(90.0, 90.0, 100, 100);
    assert!(state.valence().abs() < 1e-6);
    assert!((state.arousal() - 0.5).abs() < 1e-6);
}

#[test]
fn tap_saturates_at_bounds() {
    let state = EmotionState::with(1.0, 0.0);
    for _ in 0..3 {
        // Bottom-right keeps pushing valence up and arousal down.
        state.apply_tap(90.0, 90.0, 100, 100);
    }
    assert_eq!(state.valence(), 1.0);
    assert_eq!(state.arousal(), 0.0);
}

#[test]
fn load_from_missing_source_keeps_defaults() {
    let source = crate::assets::provider::MemAssetSource::new();
    let state = EmotionState::new();
    state.load_from_source(&source);
    assert_eq!(state.valence(), DEFAULT_VALENCE);
    assert_eq!(state.arousal(), DEFAULT_AROUSAL);
}

#[test]
fn load_from_source_reads_persisted_fields() {
    let mut source = crate::assets::provider::MemAssetSource::new();
    source.insert(
        EMOTION_ASSET_NAME,
        br#"{"valence":0.9,"arousal":0.1}"#.to_vec(),
    );
    let state = EmotionState::new();
    state.load_from_source(&source);
    assert_eq!(state.valence(), 0.9);
    assert_eq!(state.arousal(), 0.1);
}
