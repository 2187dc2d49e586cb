use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

/// Candidate patch produced by segmentation: contour area, (width,height) of
/// the oriented bbox and (x,y) of its center
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub area: f32,
    #[serde(rename = "w")]
    pub width: f32,
    #[serde(rename = "h")]
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

impl Region {
    #[inline]
    pub fn new(area: f32, width: f32, height: f32, center: (f32, f32)) -> Self {
        Self {
            area,
            width,
            height,
            x: center.0,
            y: center.1,
        }
    }

    #[inline(always)]
    pub fn center(&self) -> na::Point2<f32> {
        na::Point2::new(self.x, self.y)
    }

    #[inline(always)]
    pub fn is_eligible(&self, min_area: f32) -> bool {
        self.area > min_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligibility_is_strict() {
        assert!(!Region::new(80.0, 10.0, 8.0, (0.0, 0.0)).is_eligible(80.0));
        assert!(Region::new(80.5, 10.0, 8.0, (0.0, 0.0)).is_eligible(80.0));
    }

    #[test]
    fn test_short_field_names() {
        let r: Region =
            serde_json::from_str(r#"{"area":100,"w":10,"h":12,"x":4,"y":-2}"#).unwrap();
        assert_eq!(r, Region::new(100.0, 10.0, 12.0, (4.0, -2.0)));
    }
}
