pub mod aggregator;
pub mod config;
pub mod display;
pub mod error;
pub mod frame;
pub mod marker;
pub mod matcher;
pub mod motion;
pub mod region;
pub mod replay;
pub mod segmentation;
pub mod tracker;
pub mod video;

pub use frame::Frame;
pub use marker::Marker;
pub use motion::Direction;
pub use region::Region;
pub use tracker::{DisplayState, Tracker, TrackingState};

use error::Error;
use opencv::core::Mat;

/// Yields frames in order; `Ok(None)` is the end of the stream.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, Error>;
}

/// Turns an image into candidate regions.
pub trait Segmenter {
    fn segment(&mut self, image: &Mat) -> Result<Vec<Region>, Error>;
}

pub trait DisplaySink {
    /// Returns `false` when the consumer wants the loop to stop.
    fn render(&mut self, frame: &Frame, state: &DisplayState) -> Result<bool, Error>;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    #[inline]
    fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        (**self).next_frame()
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for Box<T> {
    #[inline]
    fn render(&mut self, frame: &Frame, state: &DisplayState) -> Result<bool, Error> {
        (**self).render(frame, state)
    }
}
