use crate::config::{Calibration, SPEED_WINDOW};
use crate::error::Error;

/// Windowed average of instantaneous speeds.
///
/// The value is never mutated in place: `update` consumes the old state and
/// returns the next one. Means start at `-1.0` (nothing published yet) and keep
/// their last value across resets until the next window completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedAggregator {
    pub mean_px_speed: f32,
    pub mean_kmh_speed: f32,
    pub sum_px_speed: f32,
    pub sum_kmh_speed: f32,
    /// `-1` while there is no data in the current window
    pub frame_count: i32,
    window: i32,
}

impl Default for SpeedAggregator {
    fn default() -> Self {
        Self::new(SPEED_WINDOW)
    }
}

impl SpeedAggregator {
    pub fn new(window: i32) -> Self {
        Self {
            mean_px_speed: -1.0,
            mean_kmh_speed: -1.0,
            sum_px_speed: 0.0,
            sum_kmh_speed: 0.0,
            frame_count: -1,
            window,
        }
    }

    #[inline]
    pub fn with_calibration(cal: &Calibration) -> Self {
        Self::new(cal.speed_window)
    }

    pub fn update(
        self,
        px_speed: Option<f32>,
        kmh_speed: Option<f32>,
        previous_marker_present: bool,
    ) -> Result<Self, Error> {
        let mut next = self;

        match (px_speed, kmh_speed) {
            (Some(px), Some(kmh)) => {
                next.sum_px_speed += px;
                next.sum_kmh_speed += kmh;
                next.frame_count += 1;

                if next.frame_count == next.window {
                    // window overlaps by one sample, hence `+ 1`
                    let samples = (next.frame_count + 1) as f32;
                    next.mean_px_speed = next.sum_px_speed / samples;
                    next.mean_kmh_speed = next.sum_kmh_speed / samples;

                    next.sum_px_speed = px;
                    next.sum_kmh_speed = kmh;
                    next.frame_count = 0;

                    tracing::debug!(
                        px = next.mean_px_speed,
                        kmh = next.mean_kmh_speed,
                        "published mean speed"
                    );
                }
            }
            (None, None) => (),
            (px, kmh) => {
                return Err(Error::ContractViolation(format!(
                    "pixel speed {:?} and real speed {:?} must be both present or both absent",
                    px, kmh
                )));
            }
        }

        if !previous_marker_present {
            next.sum_px_speed = 0.0;
            next.sum_kmh_speed = 0.0;
            next.frame_count = -1;
        }

        Ok(next)
    }

    /// Last published `(px/s, km/h)` mean, if any window has completed.
    pub fn smoothed(&self) -> Option<(f32, f32)> {
        if self.mean_px_speed < 0.0 || self.mean_kmh_speed < 0.0 {
            None
        } else {
            Some((self.mean_px_speed, self.mean_kmh_speed))
        }
    }
}
