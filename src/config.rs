use crate::error::Error;
use serde_derive::Deserialize;
use std::path::Path;

/// Nominal frame rate the speed formula assumes.
pub const FRAMES_PER_SECOND: f32 = 30.0;

/// Real width of one marker half, in meters.
pub const MARKER_WIDTH_M: f32 = 0.6;

pub const MPS_TO_KMH: f32 = 3.6;

/// Regions with an area at or below this (px²) never take part in matching.
pub const MIN_REGION_AREA: f32 = 80.0;

pub const AREA_RATIO_MIN: f32 = 0.8;
pub const AREA_RATIO_MAX: f32 = 1.2;

// real marker geometry gives ~0.4375
pub const DISTANCE_RATIO_MIN: f32 = 0.2;
pub const DISTANCE_RATIO_MAX: f32 = 0.6;

/// Number of accumulated samples after which a smoothed mean is published.
pub const SPEED_WINDOW: i32 = 14;

/// `mean_width / distance` at or above this means the marker is standing
/// still (roughly below 4 km/h) and no direction is reported.
pub const DIRECTION_THRESHOLD: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Calibration {
    pub fps: f32,
    pub marker_width_m: f32,
    pub min_region_area: f32,
    pub area_ratio: (f32, f32),
    pub distance_ratio: (f32, f32),
    pub speed_window: i32,
    pub direction_threshold: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            fps: FRAMES_PER_SECOND,
            marker_width_m: MARKER_WIDTH_M,
            min_region_area: MIN_REGION_AREA,
            area_ratio: (AREA_RATIO_MIN, AREA_RATIO_MAX),
            distance_ratio: (DISTANCE_RATIO_MIN, DISTANCE_RATIO_MAX),
            speed_window: SPEED_WINDOW,
            direction_threshold: DIRECTION_THRESHOLD,
        }
    }
}

/// HSV window and blur used to turn a frame into a binary mask.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    pub hsv_lower: [f64; 3],
    pub hsv_upper: [f64; 3],
    pub blur_kernel: i32,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            hsv_lower: [29.0, 86.0, 6.0],
            hsv_upper: [64.0, 255.0, 255.0],
            blur_kernel: 11,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub calibration: Calibration,
    pub segmentation: SegmentationConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(contents)?)
    }
}
