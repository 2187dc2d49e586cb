use crate::region::Region;
use nalgebra as na;

/// Two matched regions taken as the halves of one physical marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub width_a: f32,
    pub width_b: f32,
    pub mean_width: f32,
    pub barycenter: na::Point2<f32>,
}

impl Marker {
    pub fn from_pair(a: &Region, b: &Region) -> Self {
        Self {
            width_a: a.width,
            width_b: b.width,
            mean_width: (a.width + b.width) / 2.0,
            barycenter: na::center(&a.center(), &b.center()),
        }
    }
}
