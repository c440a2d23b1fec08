use std::sync::{Arc, Mutex};
use std::time::Duration;

use mascot::{
    CharacterRig, Compositor, DirAssetSource, EmotionState, FrameScheduler, ImageProvider,
    OffscreenSurface, ScenePipeline, Surface,
};

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let source = DirAssetSource::new("assets");
    let emotion = Arc::new(EmotionState::new());
    emotion.load_from_source(&source);

    let mut provider = ImageProvider::new(Box::new(source));
    let rig = CharacterRig::load(&mut provider);

    let surface = Arc::new(Mutex::new(OffscreenSurface::new(500, 700)));
    let pipeline =
        ScenePipeline::new(rig).with_compositor(Compositor::new().with_clear_rgba([18, 20, 28, 255]));
    let mut scheduler = FrameScheduler::new(
        pipeline,
        surface.clone() as Arc<Mutex<dyn Surface>>,
        emotion.clone(),
    );

    scheduler.start()?;

    // Simulate a couple of input taps while the loop runs: right half lifts
    // valence, top half lifts arousal.
    for _ in 0..3 {
        std::thread::sleep(Duration::from_millis(500));
        emotion.apply_tap(400.0, 100.0, 500, 700);
    }
    std::thread::sleep(Duration::from_millis(500));

    scheduler.stop();

    let surface = surface.lock().expect("surface lock");
    eprintln!(
        "presented {} frames; final emotion {}",
        surface.presented(),
        emotion.to_json()
    );

    if let Some(frame) = surface.last_frame() {
        let out_path = std::path::Path::new("target").join("mascot_last_frame.png");
        image::save_buffer_with_format(
            &out_path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        eprintln!("wrote {}", out_path.display());
    }

    Ok(())
}
