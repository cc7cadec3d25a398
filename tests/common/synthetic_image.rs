#![allow(dead_code)]

use waveguide_loss::image::GrayImageU8;

/// Frame with two bright sample edges and a horizontal waveguide of constant
/// vertical profile whose intensity decays as `peak·exp(-decay·(x - edges.0))`.
pub fn waveguide_u8(
    width: usize,
    height: usize,
    edges: (usize, usize),
    peak: f64,
    decay: f64,
) -> GrayImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(edges.0 < edges.1 && edges.1 < width, "edges must be ordered");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        let row = &mut img[y * width..(y + 1) * width];
        for (x, px) in row.iter_mut().enumerate() {
            *px = if x == edges.0 || x == edges.1 {
                255
            } else if x > edges.0 && x < edges.1 {
                let v = peak * (-decay * (x - edges.0) as f64).exp();
                v.round().clamp(1.0, 254.0) as u8
            } else {
                2
            };
        }
    }
    GrayImageU8::new(width, height, img).expect("buffer matches dimensions")
}

/// Like [`waveguide_u8`] but the band is Gaussian in y around `row` on a dim
/// background, the way a real guided mode looks.
pub fn guided_mode_u8(
    width: usize,
    height: usize,
    edges: (usize, usize),
    row: usize,
    decay: f64,
) -> GrayImageU8 {
    let mut img = vec![6u8; width * height];
    for y in 0..height {
        let dy = y as f64 - row as f64;
        let profile = (-dy * dy / 18.0).exp();
        for x in 0..width {
            let idx = y * width + x;
            if x == edges.0 || x == edges.1 {
                img[idx] = 255;
            } else if x > edges.0 && x < edges.1 {
                let v = 6.0 + 220.0 * profile * (-decay * (x - edges.0) as f64).exp();
                img[idx] = v.round().min(254.0) as u8;
            }
        }
    }
    GrayImageU8::new(width, height, img).expect("buffer matches dimensions")
}

/// Deterministic pseudo-random 8-bit noise (64-bit LCG).
pub fn noise_u8(width: usize, height: usize, seed: u64) -> GrayImageU8 {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let data = (0..width * height)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 56) as u8
        })
        .collect();
    GrayImageU8::new(width, height, data).expect("buffer matches dimensions")
}
