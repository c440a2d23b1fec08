use super::*;

use crate::foundation::core::{Canvas, FrameRGBA};

fn frame(width: u32, height: u32) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: vec![0; (width * height * 4) as usize],
    }
}

#[test]
fn begin_frame_reports_current_dimensions() {
    let mut surface = OffscreenSurface::new(320, 480);
    assert_eq!(
        surface.begin_frame().unwrap(),
        Canvas {
            width: 320,
            height: 480
        }
    );

    surface.resize(640, 360);
    assert_eq!(
        surface.begin_frame().unwrap(),
        Canvas {
            width: 640,
            height: 360
        }
    );
}

#[test]
fn zero_sized_surface_refuses_begin() {
    let mut surface = OffscreenSurface::new(0, 480);
    assert!(surface.begin_frame().is_err());
}

#[test]
fn present_retains_last_frame_and_counts() {
    let mut surface = OffscreenSurface::new(8, 8);
    assert!(surface.last_frame().is_none());
    assert_eq!(surface.presented(), 0);

    surface.present(&frame(8, 8)).unwrap();
    surface.present(&frame(8, 8)).unwrap();
    assert_eq!(surface.presented(), 2);
    assert_eq!(surface.last_frame().unwrap().width, 8);
}
