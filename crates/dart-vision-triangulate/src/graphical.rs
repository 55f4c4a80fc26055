//! Raster consensus: draw the three lines additively and average the bright overlap.

use dart_vision_core::{GrayImage, Point2, PolarLine, ViewTriple};

/// Visit every pixel of the integer Bresenham line from `a` to `b`.
pub fn bresenham(a: (i32, i32), b: (i32, i32), mut visit: impl FnMut(i32, i32)) {
    let (mut x, mut y) = a;
    let dx = (b.0 - a.0).abs();
    let dy = -(b.1 - a.1).abs();
    let sx = if a.0 < b.0 { 1 } else { -1 };
    let sy = if a.1 < b.1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        visit(x, y);
        if x == b.0 && y == b.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[inline]
fn to_pixel(p: Point2<f32>) -> (i32, i32) {
    // nearest pixel whose center is p
    ((p.x - 0.5).round() as i32, (p.y - 0.5).round() as i32)
}

/// Stroke mask of one line: `value` on every pixel within `radius` of the
/// rasterized line, zero elsewhere. `None` when the line misses the canvas.
pub fn stroke_mask(
    line: &PolarLine,
    width: usize,
    height: usize,
    value: u8,
    radius: u32,
) -> Option<GrayImage> {
    let seg = line.clip_to_rect(width, height)?;
    let mut mask = GrayImage::new(width, height);
    let r = radius as i32;
    bresenham(to_pixel(seg.p0), to_pixel(seg.p1), |x, y| {
        for oy in -r..=r {
            for ox in -r..=r {
                let (px, py) = (x + ox, y + oy);
                if px >= 0 && py >= 0 && (px as usize) < width && (py as usize) < height {
                    mask.set(px as usize, py as usize, value);
                }
            }
        }
    });
    Some(mask)
}

/// Accumulation canvas: the sum of the three stroke masks, saturating at 255.
pub fn accumulate(
    lines: &ViewTriple<PolarLine>,
    width: usize,
    height: usize,
    value: u8,
    radius: u32,
) -> GrayImage {
    let mut canvas = GrayImage::new(width, height);
    for (_, line) in lines.iter() {
        let Some(mask) = stroke_mask(line, width, height, value, radius) else {
            continue;
        };
        for (i, &v) in mask.data.iter().enumerate() {
            if v != 0 {
                canvas.add_saturating((i % width) as i32, (i / width) as i32, v);
            }
        }
    }
    canvas
}

/// Mean pixel center of every canvas pixel strictly brighter than `threshold`.
pub fn bright_centroid(canvas: &GrayImage, threshold: u8) -> Option<(Point2<f32>, usize)> {
    let (mut sx, mut sy, mut n) = (0.0f64, 0.0f64, 0usize);
    for (i, &v) in canvas.data.iter().enumerate() {
        if v > threshold {
            sx += (i % canvas.width) as f64 + 0.5;
            sy += (i / canvas.width) as f64 + 0.5;
            n += 1;
        }
    }
    if n == 0 {
        return None;
    }
    Some((
        Point2::new((sx / n as f64) as f32, (sy / n as f64) as f32),
        n,
    ))
}
