use nalgebra::{Matrix2, Point2, Vector2};

/// Centroid and dominant direction of a 2D point set.
#[derive(Clone, Copy, Debug)]
pub struct PrincipalAxis {
    pub centroid: Point2<f32>,
    /// Unit eigenvector of the largest covariance eigenvalue.
    pub direction: Vector2<f32>,
    /// Eigenvalues, largest first.
    pub eigenvalues: [f32; 2],
}

impl PrincipalAxis {
    /// Ratio of the spread across the axis to the spread along it (0 = perfect line).
    pub fn anisotropy(&self) -> f32 {
        if self.eigenvalues[0] <= 0.0 {
            return 1.0;
        }
        self.eigenvalues[1].max(0.0) / self.eigenvalues[0]
    }
}

/// Two-component PCA of `points`.
///
/// Returns `None` for fewer than two points or a set without spread.
pub fn principal_axis(points: &[Point2<f32>]) -> Option<PrincipalAxis> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let (mut mx, mut my) = (0.0f64, 0.0f64);
    for p in points {
        mx += p.x as f64;
        my += p.y as f64;
    }
    mx /= n;
    my /= n;

    let (mut sxx, mut sxy, mut syy) = (0.0f64, 0.0f64, 0.0f64);
    for p in points {
        let dx = p.x as f64 - mx;
        let dy = p.y as f64 - my;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }
    let cov = Matrix2::new(sxx / n, sxy / n, sxy / n, syy / n);
    let eig = cov.symmetric_eigen();

    let (major, minor) = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
        (0, 1)
    } else {
        (1, 0)
    };
    let lambda_major = eig.eigenvalues[major];
    if !lambda_major.is_finite() || lambda_major <= 1e-12 {
        return None;
    }
    let v = eig.eigenvectors.column(major);
    let dir = Vector2::new(v[0] as f32, v[1] as f32);
    let norm = dir.norm();
    if norm <= f32::EPSILON {
        return None;
    }

    Some(PrincipalAxis {
        centroid: Point2::new(mx as f32, my as f32),
        direction: dir / norm,
        eigenvalues: [lambda_major as f32, eig.eigenvalues[minor] as f32],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn recovers_direction_of_noisy_line() {
        let angle = 0.6f32;
        let (s, c) = angle.sin_cos();
        let pts: Vec<Point2<f32>> = (-50..=50)
            .map(|t| {
                let t = t as f32;
                let jitter = if (t as i32) % 2 == 0 { 0.5 } else { -0.5 };
                Point2::new(100.0 + t * c - jitter * s, 80.0 + t * s + jitter * c)
            })
            .collect();
        let axis = principal_axis(&pts).expect("axis");
        assert_abs_diff_eq!(axis.centroid.x, 100.0, epsilon = 0.1);
        assert_abs_diff_eq!(axis.centroid.y, 80.0, epsilon = 0.1);
        // direction is defined up to sign
        let dot = (axis.direction.x * c + axis.direction.y * s).abs();
        assert_abs_diff_eq!(dot, 1.0, epsilon = 1e-3);
        assert!(axis.anisotropy() < 0.01);
    }

    #[test]
    fn coincident_points_have_no_axis() {
        let pts = vec![Point2::new(3.0f32, 4.0); 10];
        assert!(principal_axis(&pts).is_none());
        assert!(principal_axis(&pts[..1]).is_none());
    }
}
