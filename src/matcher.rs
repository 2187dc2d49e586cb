use crate::config::Calibration;
use crate::marker::Marker;
use crate::region::Region;
use nalgebra as na;

#[inline]
fn within(v: f32, (lo, hi): (f32, f32)) -> bool {
    lo <= v && v <= hi
}

/// Pairs regions into a marker. Greedy: the first pair, in input order,
/// that passes both the area and the distance window wins.
#[derive(Debug, Clone, Copy)]
pub struct MarkerMatcher {
    min_area: f32,
    area_ratio: (f32, f32),
    distance_ratio: (f32, f32),
}

impl Default for MarkerMatcher {
    fn default() -> Self {
        Self::new(&Calibration::default())
    }
}

impl MarkerMatcher {
    pub fn new(cal: &Calibration) -> Self {
        Self {
            min_area: cal.min_region_area,
            area_ratio: cal.area_ratio,
            distance_ratio: cal.distance_ratio,
        }
    }

    pub fn is_pair(&self, a: &Region, b: &Region) -> bool {
        if !within(a.area / b.area, self.area_ratio) {
            return false;
        }

        let dist = na::distance(&a.center(), &b.center());
        let mean_width = (a.width + b.width) / 2.0;

        within(dist / mean_width, self.distance_ratio)
    }

    pub fn find_marker(&self, regions: &[Region]) -> Option<Marker> {
        let eligible: Vec<&Region> = regions
            .iter()
            .filter(|r| r.is_eligible(self.min_area))
            .collect();

        for (idx, a) in eligible.iter().enumerate() {
            for b in &eligible[idx + 1..] {
                if self.is_pair(a, b) {
                    return Some(Marker::from_pair(a, b));
                }
            }
        }

        None
    }
}

#[inline]
pub fn find_marker(regions: &[Region]) -> Option<Marker> {
    MarkerMatcher::default().find_marker(regions)
}
