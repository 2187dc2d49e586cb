use crate::error::Error;
use crate::{DisplaySink, DisplayState, Frame};

use opencv::{
    core::{self, Point},
    highgui, imgproc,
    prelude::*,
};

const ESC: i32 = 27;

pub fn speed_text(state: &DisplayState) -> String {
    match state.smoothed {
        Some((px, kmh)) => format!("{:.1} km/h ({:.0} px/s)", kmh, px),
        None => "speed unavailable".to_string(),
    }
}

pub fn status_text(state: &DisplayState) -> String {
    if state.acquired {
        format!("TARGET {}", state.direction)
    } else {
        "NO TARGET".to_string()
    }
}

/// Emits one event per frame instead of drawing anything.
#[derive(Debug, Default)]
pub struct LogSink;

impl DisplaySink for LogSink {
    fn render(&mut self, _frame: &Frame, state: &DisplayState) -> Result<bool, Error> {
        if state.acquired {
            tracing::info!(
                frame = state.frame,
                direction = %state.direction,
                "{}",
                speed_text(state)
            );
        } else {
            tracing::debug!(frame = state.frame, "no target");
        }

        Ok(true)
    }
}

/// Draws a cross-hair on the marker and a status overlay, shows it in a
/// window. ESC stops the loop.
pub struct WindowSink {
    window: String,
}

impl WindowSink {
    pub fn new<S: ToString>(window: S) -> Result<Self, Error> {
        let window = window.to_string();
        highgui::named_window(&window, highgui::WINDOW_AUTOSIZE)?;

        Ok(Self { window })
    }

    fn draw(&self, image: &mut core::Mat, state: &DisplayState) -> Result<(), Error> {
        let color = if state.acquired {
            core::Scalar::new(0.0, 255.0, 0.0, 0.0)
        } else {
            core::Scalar::new(0.0, 0.0, 255.0, 0.0)
        };
        let status = status_text(state);

        if let Some((x, y)) = state.barycenter {
            let (x, y) = (x as i32, y as i32);
            imgproc::line(
                image,
                Point::new(x - 15, y),
                Point::new(x + 15, y),
                color,
                2,
                imgproc::LINE_AA,
                0,
            )?;
            imgproc::line(
                image,
                Point::new(x, y - 15),
                Point::new(x, y + 15),
                color,
                2,
                imgproc::LINE_AA,
                0,
            )?;
        }

        for (row, text) in [status, speed_text(state)].iter().enumerate() {
            imgproc::put_text(
                image,
                text,
                Point::new(10, 30 + 30 * row as i32),
                imgproc::FONT_HERSHEY_SIMPLEX,
                0.9,
                color,
                2,
                imgproc::LINE_AA,
                false,
            )?;
        }

        Ok(())
    }
}

impl DisplaySink for WindowSink {
    fn render(&mut self, frame: &Frame, state: &DisplayState) -> Result<bool, Error> {
        let Some(image) = frame.image.as_ref() else {
            return Ok(true);
        };

        let mut canvas = image.try_clone()?;
        self.draw(&mut canvas, state)?;
        highgui::imshow(&self.window, &canvas)?;

        Ok(highgui::wait_key(1)? != ESC)
    }
}

impl Drop for WindowSink {
    fn drop(&mut self) {
        if let Err(err) = highgui::destroy_all_windows() {
            tracing::warn!("failed to close windows: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;

    #[test]
    fn test_overlay_text() {
        let mut state = DisplayState::no_target(3, None);
        assert_eq!(status_text(&state), "NO TARGET");
        assert_eq!(speed_text(&state), "speed unavailable");

        state.acquired = true;
        state.direction = Direction::SouthWest;
        state.smoothed = Some((1200.0, 259.2));
        assert_eq!(status_text(&state), "TARGET SOUTH-WEST");
        assert_eq!(speed_text(&state), "259.2 km/h (1200 px/s)");
    }

    #[test]
    fn test_log_sink_never_stops() {
        let frame = Frame::from_regions(0, vec![]);
        let state = DisplayState::no_target(0, None);
        assert!(LogSink.render(&frame, &state).unwrap());
    }
}
