use crate::aggregator::SpeedAggregator;
use crate::config::Calibration;
use crate::error::Error;
use crate::marker::Marker;
use crate::matcher::MarkerMatcher;
use crate::motion::{Direction, MotionEstimator};
use crate::region::Region;
use crate::{DisplaySink, Frame, FrameSource};

/// Everything carried from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingState {
    pub previous_marker: Option<Marker>,
    pub aggregator: SpeedAggregator,
}

impl TrackingState {
    pub fn new(cal: &Calibration) -> Self {
        Self {
            previous_marker: None,
            aggregator: SpeedAggregator::with_calibration(cal),
        }
    }
}

impl Default for TrackingState {
    fn default() -> Self {
        Self::new(&Calibration::default())
    }
}

/// Per-frame render request.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub frame: u64,
    pub acquired: bool,
    pub barycenter: Option<(f32, f32)>,
    pub direction: Direction,
    // (px/s, km/h)
    pub instant: Option<(f32, f32)>,
    pub smoothed: Option<(f32, f32)>,
}

impl DisplayState {
    pub fn no_target(frame: u64, smoothed: Option<(f32, f32)>) -> Self {
        Self {
            frame,
            acquired: false,
            barycenter: None,
            direction: Direction::Unknown,
            instant: None,
            smoothed,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub acquired: u64,
}

pub struct Tracker {
    matcher: MarkerMatcher,
    estimator: MotionEstimator,
    state: TrackingState,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(&Calibration::default())
    }
}

impl Tracker {
    pub fn new(cal: &Calibration) -> Self {
        Self {
            matcher: MarkerMatcher::new(cal),
            estimator: MotionEstimator::new(cal),
            state: TrackingState::new(cal),
        }
    }

    #[inline]
    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    /// Pure per-frame transition: takes the old state by value and returns the
    /// next one together with what should be displayed.
    pub fn step(
        &self,
        state: TrackingState,
        frame: u64,
        regions: &[Region],
    ) -> Result<(TrackingState, DisplayState), Error> {
        let current = self.matcher.find_marker(regions);
        let previous = state.previous_marker;

        let (aggregator, display) = match current.as_ref() {
            Some(marker) => {
                let px = self
                    .estimator
                    .instant_pixel_speed(Some(marker), previous.as_ref());
                let kmh = self.estimator.instant_real_speed(px, marker);
                let direction = self.estimator.direction(Some(marker), previous.as_ref());

                let aggregator = state.aggregator.update(px, kmh, previous.is_some())?;

                let display = DisplayState {
                    frame,
                    acquired: true,
                    barycenter: Some((marker.barycenter.x, marker.barycenter.y)),
                    direction,
                    instant: px.zip(kmh),
                    smoothed: aggregator.smoothed(),
                };

                (aggregator, display)
            }
            None => {
                let aggregator = state.aggregator.update(None, None, false)?;

                (aggregator, DisplayState::no_target(frame, aggregator.smoothed()))
            }
        };

        let next = TrackingState {
            previous_marker: current,
            aggregator,
        };

        Ok((next, display))
    }

    pub fn process(&mut self, frame: &Frame) -> Result<DisplayState, Error> {
        let (next, display) = self.step(self.state, frame.index, &frame.regions)?;

        match (self.state.previous_marker.is_some(), next.previous_marker.is_some()) {
            (false, true) => tracing::info!(frame = frame.index, "target acquired"),
            (true, false) => tracing::info!(frame = frame.index, "target lost"),
            _ => (),
        }

        self.state = next;

        Ok(display)
    }

    /// Drives the loop until the source is exhausted or the sink asks to stop.
    pub fn run<S, D>(&mut self, source: &mut S, sink: &mut D) -> Result<RunSummary, Error>
    where
        S: FrameSource + ?Sized,
        D: DisplaySink + ?Sized,
    {
        let mut summary = RunSummary::default();

        while let Some(frame) = source.next_frame()? {
            let display = self.process(&frame)?;

            tracing::debug!(
                frame = frame.index,
                regions = frame.len(),
                acquired = display.acquired,
                direction = %display.direction,
                "frame processed"
            );

            summary.frames += 1;
            if display.acquired {
                summary.acquired += 1;
            }

            if !sink.render(&frame, &display)? {
                tracing::info!(frame = frame.index, "stop requested");
                break;
            }
        }

        tracing::info!(
            frames = summary.frames,
            acquired = summary.acquired,
            "run finished"
        );

        Ok(summary)
    }
}
