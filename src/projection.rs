//! Intensity projections of an 8-bit view onto either axis.
use crate::image::{ImageU8, ImageView};

/// Per-column sum over all rows; length equals the view width.
pub fn column_projection(img: &ImageU8<'_>) -> Vec<u64> {
    let mut proj = vec![0u64; img.w];
    for row in img.rows() {
        for (acc, &px) in proj.iter_mut().zip(row) {
            *acc += px as u64;
        }
    }
    proj
}

/// Per-row sum over all columns; length equals the view height.
pub fn row_projection(img: &ImageU8<'_>) -> Vec<u64> {
    img.rows()
        .map(|row| row.iter().map(|&px| px as u64).sum())
        .collect()
}

/// Index of the maximum; ties resolve to the first occurrence.
pub fn argmax(values: &[u64]) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
