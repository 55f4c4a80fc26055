//! Connected components of a binary change mask, filtered by area and aspect.

use dart_vision_core::GrayImage;

use crate::params::BlobFilterParams;

/// One 8-connected foreground component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blob {
    pub area: usize,
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl Blob {
    pub fn bbox_size(&self) -> (usize, usize) {
        (self.max_x - self.min_x + 1, self.max_y - self.min_y + 1)
    }

    /// Long side over short side of the bounding box (>= 1).
    pub fn aspect(&self) -> f32 {
        let (w, h) = self.bbox_size();
        w.max(h) as f32 / w.min(h) as f32
    }

    pub fn passes(&self, params: &BlobFilterParams) -> bool {
        let aspect = self.aspect();
        self.area >= params.min_area
            && self.area <= params.max_area
            && aspect >= params.min_aspect
            && aspect <= params.max_aspect
    }
}

/// Label the 8-connected non-zero components of `mask`.
pub fn find_blobs(mask: &GrayImage) -> Vec<Blob> {
    let (w, h) = (mask.width, mask.height);
    let mut visited = vec![false; w * h];
    let mut blobs = Vec::new();
    let mut stack = Vec::new();

    for start in 0..w * h {
        if visited[start] || mask.data[start] == 0 {
            continue;
        }
        visited[start] = true;
        stack.push(start);
        let mut blob = Blob {
            area: 0,
            min_x: usize::MAX,
            min_y: usize::MAX,
            max_x: 0,
            max_y: 0,
        };

        while let Some(idx) = stack.pop() {
            let (x, y) = (idx % w, idx / w);
            blob.area += 1;
            blob.min_x = blob.min_x.min(x);
            blob.min_y = blob.min_y.min(y);
            blob.max_x = blob.max_x.max(x);
            blob.max_y = blob.max_y.max(y);

            for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                        continue;
                    }
                    let n = ny as usize * w + nx as usize;
                    if !visited[n] && mask.data[n] != 0 {
                        visited[n] = true;
                        stack.push(n);
                    }
                }
            }
        }
        blobs.push(blob);
    }
    blobs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(img: &mut GrayImage, x0: usize, y0: usize, x1: usize, y1: usize) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                img.set(x, y, 255);
            }
        }
    }

    #[test]
    fn separates_components_and_measures_them() {
        let mut img = GrayImage::new(20, 10);
        fill(&mut img, 1, 1, 10, 2); // 10x2 bar
        fill(&mut img, 15, 5, 17, 7); // 3x3 square
        let mut blobs = find_blobs(&img);
        blobs.sort_by_key(|b| b.min_x);
        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0].area, 20);
        assert_eq!(blobs[0].aspect(), 5.0);
        assert_eq!(blobs[1].area, 9);
        assert_eq!(blobs[1].aspect(), 1.0);
    }

    #[test]
    fn diagonal_neighbours_are_connected() {
        let mut img = GrayImage::new(4, 4);
        for i in 0..4 {
            img.set(i, i, 255);
        }
        let blobs = find_blobs(&img);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].area, 4);
    }

    #[test]
    fn filter_uses_area_and_aspect_bounds() {
        let params = BlobFilterParams {
            min_area: 10,
            max_area: 100,
            min_aspect: 3.0,
            max_aspect: 10.0,
        };
        let bar = Blob {
            area: 20,
            min_x: 0,
            min_y: 0,
            max_x: 9,
            max_y: 1,
        };
        let square = Blob {
            area: 16,
            min_x: 0,
            min_y: 0,
            max_x: 3,
            max_y: 3,
        };
        assert!(bar.passes(&params));
        assert!(!square.passes(&params));
    }
}
