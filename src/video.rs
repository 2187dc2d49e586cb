use crate::error::Error;
use crate::{Frame, FrameSource, Segmenter};

use opencv::{core::Mat, prelude::*, videoio};
use std::path::Path;

/// Reads a video file frame by frame and segments each frame as it comes in.
pub struct VideoSource<S> {
    cap: videoio::VideoCapture,
    segmenter: S,
    index: u64,
}

impl<S: Segmenter> VideoSource<S> {
    pub fn open<P: AsRef<Path>>(path: P, segmenter: S) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }

        let name = path.to_string_lossy();
        let cap = videoio::VideoCapture::from_file(&name, videoio::CAP_ANY)?;
        if !cap.is_opened()? {
            return Err(Error::OpenVideo(name.into_owned()));
        }

        let width = cap.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let height = cap.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
        let fps = cap.get(videoio::CAP_PROP_FPS)?;
        let total = cap.get(videoio::CAP_PROP_FRAME_COUNT)? as i32;

        tracing::info!(width, height, fps, total, "opened {}", path.display());

        Ok(Self {
            cap,
            segmenter,
            index: 0,
        })
    }
}

impl<S: Segmenter> FrameSource for VideoSource<S> {
    fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        let mut mat = Mat::default();

        if !self.cap.read(&mut mat)? || mat.empty() {
            return Ok(None);
        }

        let regions = self.segmenter.segment(&mat)?;
        let frame = Frame {
            index: self.index,
            image: Some(mat),
            regions,
        };
        self.index += 1;

        Ok(Some(frame))
    }
}

impl<S> Drop for VideoSource<S> {
    fn drop(&mut self) {
        if let Err(err) = self.cap.release() {
            tracing::warn!("failed to release capture: {}", err);
        }
    }
}
