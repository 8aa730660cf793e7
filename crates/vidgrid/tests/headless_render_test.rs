//! Headless rendering integration tests.
//!
//! These tests need a GPU adapter (real or software fallback). When none is
//! available they print a note and return early.

use image::{Rgba, RgbaImage};
use vidgrid::*;

const VIDEO_COLOR: [u8; 4] = [180, 40, 40, 255];

fn video() -> FrameSequence {
    let frames = vec![RgbaImage::from_pixel(64, 36, Rgba(VIDEO_COLOR)); 2];
    FrameSequence::from_frames(frames, 30.0, true).unwrap()
}

fn is_missing_gpu(e: &VidgridError) -> bool {
    let message = e.to_string();
    message.contains("graphics adapter") || message.contains("graphics device")
}

/// Renders or returns `None` when the machine has no usable adapter.
fn render(options: &Options, width: u32, height: u32, frames: u32) -> Option<RgbaImage> {
    match render_to_image(options, &mut video(), width, height, frames) {
        Ok(image) => Some(image),
        Err(e) if is_missing_gpu(&e) => {
            eprintln!("Skipping headless test: no GPU adapter available ({e})");
            None
        }
        Err(e) => panic!("headless render failed: {e}"),
    }
}

fn luminance(px: &Rgba<u8>) -> u32 {
    u32::from(px[0]) + u32::from(px[1]) + u32::from(px[2])
}

#[test]
fn headless_frame_has_expected_size_and_content() {
    let Some(image) = render(&Options::default(), 160, 120, 3) else {
        return;
    };
    assert_eq!(image.dimensions(), (160, 120));

    let first = image.get_pixel(0, 0);
    let uniform = image.pixels().all(|px| px == first);
    assert!(!uniform, "scene should not be a flat colour");

    // The video covers the whole view
    let reddish = image
        .pixels()
        .filter(|px| u16::from(px[0]) > u16::from(px[1]) + 60)
        .count();
    assert!(reddish > (160 * 120) / 4, "video plane should fill the background");
}

#[test]
fn squares_glow_around_centred_pointer() {
    let Some(image) = render(&Options::default(), 200, 200, 2) else {
        return;
    };

    let block_mean = |cx: u32, cy: u32| {
        let mut total = 0;
        for y in cy - 4..=cy + 4 {
            for x in cx - 4..=cx + 4 {
                total += luminance(image.get_pixel(x, y));
            }
        }
        total / 81
    };
    let centre = block_mean(100, 100);
    let corner = block_mean(10, 10);
    assert!(centre > corner, "centre {centre} should be brighter than corner {corner}");
}

#[test]
fn render_to_file_writes_png() {
    let path = std::env::temp_dir().join(format!("vidgrid-headless-{}.png", std::process::id()));
    match render_to_file(&path, &Options::default(), &mut video(), 96, 64, 1) {
        Ok(()) => {
            let saved = image::open(&path).unwrap();
            assert_eq!((saved.width(), saved.height()), (96, 64));
            std::fs::remove_file(&path).unwrap();
        }
        Err(e) if is_missing_gpu(&e) => {
            eprintln!("Skipping headless file test: no GPU adapter available ({e})");
        }
        Err(e) => panic!("render_to_file failed: {e}"),
    }
}

#[test]
fn zero_frames_is_rejected_before_touching_the_gpu() {
    let result = render_to_image(&Options::default(), &mut video(), 64, 64, 0);
    assert!(matches!(
        result,
        Err(VidgridError::InvalidOption { name: "frames", .. })
    ));
}
