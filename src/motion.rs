use crate::config::Calibration;
use crate::marker::Marker;
use nalgebra as na;
use std::fmt;

/// Compass direction in screen space, where negative `dy` points north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Unknown,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::North => "NORTH",
            Direction::NorthEast => "NORTH-EAST",
            Direction::East => "EAST",
            Direction::SouthEast => "SOUTH-EAST",
            Direction::South => "SOUTH",
            Direction::SouthWest => "SOUTH-WEST",
            Direction::West => "WEST",
            Direction::NorthWest => "NORTH-WEST",
            Direction::Unknown => "UNKNOWN",
        }
    }

    fn classify(dx: f32, dy: f32) -> Self {
        if dx == 0.0 {
            return if dy < 0.0 {
                Direction::North
            } else if dy > 0.0 {
                Direction::South
            } else {
                Direction::Unknown
            };
        }

        let slope = dy / dx;
        let flat = (-1.0..=1.0).contains(&slope);

        if dx < 0.0 {
            if flat {
                Direction::West
            } else if slope > 1.0 {
                Direction::NorthWest
            } else {
                Direction::SouthWest
            }
        } else if flat {
            Direction::East
        } else if slope > 1.0 {
            Direction::SouthEast
        } else {
            Direction::NorthEast
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Frame-to-frame motion of a marker.
#[derive(Debug, Clone, Copy)]
pub struct MotionEstimator {
    fps: f32,
    marker_width_m: f32,
    direction_threshold: f32,
}

impl Default for MotionEstimator {
    fn default() -> Self {
        Self::new(&Calibration::default())
    }
}

impl MotionEstimator {
    pub fn new(cal: &Calibration) -> Self {
        Self {
            fps: cal.fps,
            marker_width_m: cal.marker_width_m,
            direction_threshold: cal.direction_threshold,
        }
    }

    /// Barycenter displacement in px/s.
    pub fn instant_pixel_speed(
        &self,
        current: Option<&Marker>,
        previous: Option<&Marker>,
    ) -> Option<f32> {
        let (current, previous) = (current?, previous?);

        Some(na::distance(&current.barycenter, &previous.barycenter) * self.fps)
    }

    /// Converts px/s into km/h using the known marker width as scale.
    pub fn instant_real_speed(&self, pixel_speed: Option<f32>, current: &Marker) -> Option<f32> {
        let mps = pixel_speed? * self.marker_width_m / current.mean_width;

        Some(mps * crate::config::MPS_TO_KMH)
    }

    pub fn direction(&self, current: Option<&Marker>, previous: Option<&Marker>) -> Direction {
        let (current, previous) = match (current, previous) {
            (Some(c), Some(p)) => (c, p),
            _ => return Direction::Unknown,
        };

        let delta = current.barycenter - previous.barycenter;
        if delta.x == 0.0 && delta.y == 0.0 {
            return Direction::Unknown;
        }

        // too slow to tell where it's heading
        if current.mean_width / delta.norm() >= self.direction_threshold {
            return Direction::Unknown;
        }

        Direction::classify(delta.x, delta.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn marker(x: f32, y: f32, mean_width: f32) -> Marker {
        Marker {
            width_a: mean_width,
            width_b: mean_width,
            mean_width,
            barycenter: na::Point2::new(x, y),
        }
    }

    #[test]
    fn test_missing_markers() {
        let est = MotionEstimator::default();
        let m = marker(2.0, 0.0, 10.0);

        assert_eq!(est.instant_pixel_speed(None, Some(&m)), None);
        assert_eq!(est.instant_pixel_speed(Some(&m), None), None);
        assert_eq!(est.instant_pixel_speed(None, None), None);
        assert_eq!(est.instant_real_speed(None, &m), None);
        assert_eq!(est.direction(Some(&m), None), Direction::Unknown);
        assert_eq!(est.direction(None, Some(&m)), Direction::Unknown);
    }

    #[test]
    fn test_moving_north() {
        let est = MotionEstimator::default();
        let prev = marker(2.0, 0.0, 10.0);
        let curr = marker(2.0, -40.0, 10.0);

        let px = est.instant_pixel_speed(Some(&curr), Some(&prev)).unwrap();
        assert_relative_eq!(px, 1200.0);

        // 1200 px/s * 0.6 m / 10 px = 72 m/s
        let kmh = est.instant_real_speed(Some(px), &curr).unwrap();
        assert_relative_eq!(kmh, 259.2, epsilon = 1e-3);

        assert_eq!(est.direction(Some(&curr), Some(&prev)), Direction::North);
    }

    #[test]
    fn test_standing_still() {
        let est = MotionEstimator::default();
        let m = marker(5.0, 5.0, 10.0);

        assert_eq!(est.instant_pixel_speed(Some(&m), Some(&m)), Some(0.0));
        assert_eq!(est.direction(Some(&m), Some(&m)), Direction::Unknown);
    }

    #[test]
    fn test_slow_motion_has_no_direction() {
        let est = MotionEstimator::default();
        let prev = marker(0.0, 0.0, 32.0);

        // 32 / 2 = 16, right at the threshold
        assert_eq!(
            est.direction(Some(&marker(2.0, 0.0, 32.0)), Some(&prev)),
            Direction::Unknown
        );
        assert_eq!(
            est.direction(Some(&marker(4.0, 0.0, 32.0)), Some(&prev)),
            Direction::East
        );
    }

    #[test]
    fn test_compass() {
        let est = MotionEstimator::default();
        let prev = marker(0.0, 0.0, 10.0);
        let cases = [
            ((-10.0, 0.0), Direction::West),
            ((-10.0, -10.0), Direction::West),
            ((-10.0, -20.0), Direction::NorthWest),
            ((0.0, -10.0), Direction::North),
            ((10.0, -20.0), Direction::NorthEast),
            ((10.0, 5.0), Direction::East),
            ((10.0, 20.0), Direction::SouthEast),
            ((0.0, 10.0), Direction::South),
            ((-10.0, 20.0), Direction::SouthWest),
        ];

        for ((x, y), expected) in cases {
            let got = est.direction(Some(&marker(x, y, 10.0)), Some(&prev));
            assert_eq!(got, expected, "dx={} dy={}", x, y);
        }
    }

    #[test]
    fn test_diagonal_slopes_stay_horizontal() {
        let est = MotionEstimator::default();
        let prev = marker(0.0, 0.0, 10.0);
        let cases = [
            ((10.0, 10.0), Direction::East),
            ((10.0, -10.0), Direction::East),
            ((-10.0, 10.0), Direction::West),
            ((-10.0, -10.0), Direction::West),
        ];

        for ((x, y), expected) in cases {
            let got = est.direction(Some(&marker(x, y, 10.0)), Some(&prev));
            assert_eq!(got, expected, "dx={} dy={}", x, y);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Direction::NorthWest.to_string(), "NORTH-WEST");
        assert_eq!(Direction::Unknown.to_string(), "UNKNOWN");
    }
}
