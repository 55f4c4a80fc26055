#![allow(dead_code)]

use dart_vision::core::{Frame, GrayImage, Point2, ViewTriple};

pub const SIZE: usize = 200;
pub const BACKGROUND: u8 = 40;
pub const DART: u8 = 230;

/// Where every synthetic barrel points: 40 px above the board center, in
/// the "20" wedge.
pub const TIP: (f32, f32) = (100.0, 60.0);

/// Far end of each view's synthetic barrel.
pub fn barrel_ends() -> ViewTriple<Point2<f32>> {
    ViewTriple::new(
        Point2::new(100.0, 160.0),
        Point2::new(150.0, 147.0),
        Point2::new(50.0, 147.0),
    )
}

pub fn background() -> GrayImage {
    GrayImage {
        width: SIZE,
        height: SIZE,
        data: vec![BACKGROUND; SIZE * SIZE],
    }
}

/// Paint a filled capsule from `a` to `b`.
pub fn paint_bar(img: &mut GrayImage, a: Point2<f32>, b: Point2<f32>, radius: f32, v: u8) {
    let ab = b - a;
    let len2 = ab.norm_squared();
    for y in 0..img.height {
        for x in 0..img.width {
            let p = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
            let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
            if (p - (a + ab * t)).norm() <= radius {
                img.set(x, y, v);
            }
        }
    }
}

/// Empty board in every view, then the same board with one dart.
pub fn synthetic_throw() -> (ViewTriple<GrayImage>, ViewTriple<GrayImage>) {
    let tip = Point2::new(TIP.0, TIP.1);
    let previous = ViewTriple::from_fn(|_| background());
    let current = barrel_ends().map(|end| {
        let mut img = background();
        paint_bar(&mut img, tip, end, 2.5, DART);
        img
    });
    (previous, current)
}

pub fn frames(images: &ViewTriple<GrayImage>) -> ViewTriple<Frame> {
    images.each_ref().map(|img| Frame::from_gray(img.clone()))
}
