mod common;

use common::synthetic_image::{guided_mode_u8, noise_u8};
use waveguide_loss::image::ImageU8;
use waveguide_loss::locate::find_edges;
use waveguide_loss::region::SelectionWindow;
use waveguide_loss::{locate_waveguide, AnalysisError};

/// Uniform 100×50 frame with projection peaks at columns 10 and 90.
fn reference_frame() -> Vec<u8> {
    let (w, h) = (100usize, 50usize);
    let mut data = vec![20u8; w * h];
    for y in 0..h {
        data[y * w + 10] = 200;
        data[y * w + 90] = 200;
    }
    data
}

#[test]
fn reference_scenario_selection_bounds() {
    let data = reference_frame();
    let img = ImageU8 {
        w: 100,
        h: 50,
        stride: 100,
        data: &data,
    };
    let pos = locate_waveguide(&img, 0.2, 0.8).expect("locate");
    assert_eq!((pos.x_start, pos.x_end), (10, 90));
    let window = SelectionWindow::new(0.2, 0.8).unwrap();
    assert_eq!(pos.selection_columns(window), (26, 74));
    // Flat rows: the first row wins the argmax.
    assert_eq!(pos.y_center, 0);
}

#[test]
fn full_window_bounds_hold_on_noise() {
    for (seed, (w, h)) in [(2usize, 1usize), (2, 7), (3, 3), (17, 9), (64, 48), (201, 33)]
        .into_iter()
        .enumerate()
    {
        let image = noise_u8(w, h, seed as u64);
        let img = image.as_view();
        let pos = locate_waveguide(&img, 0.0, 1.0).expect("locate on noise");
        assert!(pos.x_start < pos.x_end, "seed={seed} pos={pos:?}");
        assert!(pos.x_end < img.w);
        assert!(pos.y_center < img.h, "seed={seed} pos={pos:?}");
    }
}

#[test]
fn edges_found_on_guided_mode() {
    let image = guided_mode_u8(400, 120, (37, 351), 64, 0.003);
    assert_eq!(find_edges(&image.as_view()).unwrap(), (37, 351));
    let pos = locate_waveguide(&image.as_view(), 0.1, 0.9).unwrap();
    assert_eq!(pos.y_center, 64);
}

#[test]
fn narrow_images_are_rejected() {
    for (w, h) in [(1usize, 1usize), (1, 10), (0, 0)] {
        let data = vec![50u8; w * h];
        let img = ImageU8 {
            w,
            h,
            stride: w,
            data: &data,
        };
        let err = locate_waveguide(&img, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyRegion(_)), "{w}x{h}: {err:?}");
    }
}
