use super::*;

#[test]
fn starts_open() {
    let clock = AnimationClock::new();
    assert!(!clock.blinking());
    assert_eq!(clock.elapsed(), 0.0);
}

#[test]
fn blink_triggers_at_interval_and_releases_after_duration() {
    let mut clock = AnimationClock::new();

    clock.advance(BLINK_INTERVAL);
    assert!(clock.blinking());

    // Still inside the closed window.
    clock.advance(0.19);
    assert!(clock.blinking());

    // Past the closed duration measured from the trigger.
    clock.advance(0.02);
    assert!(!clock.blinking());
}

#[test]
fn blink_repeats_every_interval() {
    let mut clock = AnimationClock::new();
    let mut blinks = 0;
    // 10 seconds in 10ms steps crosses the 3s interval three times.
    let mut was_blinking = false;
    for _ in 0..1000 {
        clock.advance(0.01);
        if clock.blinking() && !was_blinking {
            blinks += 1;
        }
        was_blinking = clock.blinking();
    }
    assert_eq!(blinks, 3);
}

#[test]
fn elapsed_accumulates() {
    let mut clock = AnimationClock::new();
    clock.advance(0.5);
    clock.advance(0.25);
    assert!((clock.elapsed() - 0.75).abs() < 1e-6);
}
