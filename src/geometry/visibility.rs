use crate::config::{RouteConfig, EARTH_RADIUS};
use crate::geometry::vector::{dot, length, normalize, sub, Vec3};

/// Sphere centred at the origin that blocks line of sight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Occluder {
    pub radius: f64,
}

impl Occluder {
    pub fn earth() -> Self {
        Occluder {
            radius: EARTH_RADIUS,
        }
    }

    pub fn from_config(config: &RouteConfig) -> Self {
        Occluder {
            radius: config.occluder_radius,
        }
    }

    /// True when the segment `p1 → p2` does not cross the sphere's interior.
    ///
    /// Ray–sphere intersection along the unit ray from `p1`: the segment is
    /// blocked when at least one intersection parameter falls inside `[0, d]`.
    /// Tangent rays are visible. A zero-length segment is visible.
    pub fn visible(&self, p1: Vec3, p2: Vec3) -> bool {
        let diff = sub(p2, p1);
        let Ok(ray) = normalize(diff) else {
            return true;
        };

        let b = dot(ray, p1);
        let discriminant = b * b - dot(p1, p1) + self.radius * self.radius;
        if discriminant <= 0.0 {
            return true;
        }

        let sqrt_d = discriminant.sqrt();
        let t_plus = -b + sqrt_d;
        let t_minus = -b - sqrt_d;
        if t_plus < 0.0 && t_minus < 0.0 {
            return true;
        }

        let d = length(diff);
        t_plus > d && t_minus > d
    }
}

impl Default for Occluder {
    fn default() -> Self {
        Occluder::earth()
    }
}

/// Line of sight around the Earth sphere.
pub fn visible(p1: Vec3, p2: Vec3) -> bool {
    Occluder::earth().visible(p1, p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_side_points_see_each_other() {
        assert!(visible([6.5, 0.0, 0.0], [6.5, 1.0, 0.0]));
        let r = EARTH_RADIUS;
        assert!(visible([r, 0.0, 0.0], [r, 1.0, 0.0]));
    }

    #[test]
    fn opposite_points_are_blocked() {
        let r = EARTH_RADIUS;
        assert!(!visible([r, 0.0, 0.0], [-r, 0.0, 0.0]));
        for axis in 0..3 {
            let mut a = [0.0; 3];
            let mut b = [0.0; 3];
            a[axis] = 6.4;
            b[axis] = -6.4;
            assert!(!visible(a, b));
            assert!(!visible(b, a));
        }
    }

    #[test]
    fn tangent_ray_is_visible() {
        let occluder = Occluder { radius: 1.0 };
        assert!(occluder.visible([-2.0, 1.0, 0.0], [2.0, 1.0, 0.0]));
        assert!(!occluder.visible([-2.0, 0.999, 0.0], [2.0, 0.999, 0.0]));
    }

    #[test]
    fn sphere_behind_or_beyond_segment_does_not_block() {
        let occluder = Occluder { radius: 1.0 };
        // Sphere lies behind the start point.
        assert!(occluder.visible([2.0, 0.0, 0.0], [5.0, 0.0, 0.0]));
        // Sphere lies past the end point.
        assert!(occluder.visible([5.0, 0.0, 0.0], [2.0, 0.0, 0.0]));
    }

    #[test]
    fn zero_length_segment_is_visible() {
        assert!(visible([7.0, 0.0, 0.0], [7.0, 0.0, 0.0]));
    }

    #[test]
    fn visibility_is_symmetric() {
        let points = [
            [6.8, 0.3, -0.2],
            [-6.6, 1.0, 0.5],
            [0.0, 6.9, 0.1],
            [4.9, 4.9, 0.0],
            [0.2, -0.4, -6.75],
            [6.372, 0.0, 0.0],
        ];
        for &a in &points {
            for &b in &points {
                assert_eq!(visible(a, b), visible(b, a), "{a:?} {b:?}");
            }
        }
    }
}
