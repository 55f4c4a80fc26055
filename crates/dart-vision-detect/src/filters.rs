//! Small fixed-kernel filters on 8-bit gray images.
//!
//! All filters clamp coordinates at the border and return a new image of the
//! same size; inputs are never modified.

use dart_vision_core::GrayImage;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];
const SHARPEN_KERNEL: Kernel3 = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];

/// 5-tap binomial weights (sum 16).
const BINOMIAL5: [u32; 5] = [1, 4, 6, 4, 1];

#[inline]
fn clamp_idx(i: isize, n: usize) -> usize {
    i.clamp(0, n as isize - 1) as usize
}

/// Separable 5×5 binomial smoothing (Gaussian approximation, σ ≈ 1).
pub fn gaussian_blur5(src: &GrayImage) -> GrayImage {
    let (w, h) = (src.width, src.height);
    if w == 0 || h == 0 {
        return src.clone();
    }
    let mut tmp = vec![0u32; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u32;
            for (k, &wk) in BINOMIAL5.iter().enumerate() {
                let xx = clamp_idx(x as isize + k as isize - 2, w);
                acc += wk * src.get(xx, y) as u32;
            }
            tmp[y * w + x] = acc;
        }
    }
    let mut out = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u32;
            for (k, &wk) in BINOMIAL5.iter().enumerate() {
                let yy = clamp_idx(y as isize + k as isize - 2, h);
                acc += wk * tmp[yy * w + x];
            }
            out.set(x, y, ((acc + 128) / 256) as u8);
        }
    }
    out
}

/// Pixelwise `|a - b|`. Images must have equal size.
pub fn abs_diff(a: &GrayImage, b: &GrayImage) -> GrayImage {
    debug_assert_eq!((a.width, a.height), (b.width, b.height));
    GrayImage {
        width: a.width,
        height: a.height,
        data: a
            .data
            .iter()
            .zip(b.data.iter())
            .map(|(&p, &q)| p.abs_diff(q))
            .collect(),
    }
}

#[inline]
fn convolve3_at(src: &GrayImage, x: usize, y: usize, k: &Kernel3) -> f32 {
    let (w, h) = (src.width, src.height);
    let mut acc = 0.0f32;
    for (ky, row) in k.iter().enumerate() {
        let yy = clamp_idx(y as isize + ky as isize - 1, h);
        for (kx, &kv) in row.iter().enumerate() {
            let xx = clamp_idx(x as isize + kx as isize - 1, w);
            acc += kv * src.get(xx, yy) as f32;
        }
    }
    acc
}

/// Laplacian-style sharpening.
pub fn sharpen(src: &GrayImage) -> GrayImage {
    let mut out = GrayImage::new(src.width, src.height);
    for y in 0..src.height {
        for x in 0..src.width {
            let v = convolve3_at(src, x, y, &SHARPEN_KERNEL);
            out.set(x, y, v.round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}

/// Sobel gradient magnitude, scaled so a unit step of height `d` maps to `d`.
pub fn sobel_magnitude(src: &GrayImage) -> GrayImage {
    let mut out = GrayImage::new(src.width, src.height);
    for y in 0..src.height {
        for x in 0..src.width {
            let gx = convolve3_at(src, x, y, &SOBEL_KERNEL_X);
            let gy = convolve3_at(src, x, y, &SOBEL_KERNEL_Y);
            let mag = 0.25 * (gx * gx + gy * gy).sqrt();
            out.set(x, y, mag.round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}

/// Binarize: pixels strictly above `threshold` become 255, others 0.
pub fn threshold_binary(src: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage {
        width: src.width,
        height: src.height,
        data: src
            .data
            .iter()
            .map(|&v| if v > threshold { 255 } else { 0 })
            .collect(),
    }
}
