use mascot::{
    Canvas, CharacterRig, Compositor, DirAssetSource, EmotionSnapshot, ImageProvider, solve,
};

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    // Missing art degrades to per-part placeholders, so this works even with
    // an empty assets directory.
    let mut provider = ImageProvider::new(Box::new(DirAssetSource::new("assets")));
    let rig = CharacterRig::load(&mut provider);

    let canvas = Canvas {
        width: 500,
        height: 700,
    };
    let emotion = EmotionSnapshot {
        valence: 0.8,
        arousal: 0.9,
    };
    let pose = solve(0.6, false, emotion, canvas);

    let mut compositor = Compositor::new();
    let frame = compositor.render(&rig, &pose, canvas)?;

    let out_path = std::path::Path::new("target").join("mascot_one_frame.png");
    image::save_buffer_with_format(
        &out_path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )?;

    eprintln!("wrote {}", out_path.display());
    Ok(())
}
