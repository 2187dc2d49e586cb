use crate::config::SegmentationConfig;
use crate::error::Error;
use crate::region::Region;
use crate::Segmenter;

use opencv::{
    core::{self, Mat, Point, Vector},
    imgproc,
    prelude::*,
};

/// Colour-threshold segmentation: HSV, blur, range mask, external contours,
/// one rotated bbox per contour.
pub struct HsvSegmenter {
    config: SegmentationConfig,
    hsv: Mat,
    blurred: Mat,
    mask: Mat,
}

impl HsvSegmenter {
    pub fn new(config: SegmentationConfig) -> Self {
        Self {
            config,
            hsv: Mat::default(),
            blurred: Mat::default(),
            mask: Mat::default(),
        }
    }
}

impl Default for HsvSegmenter {
    fn default() -> Self {
        Self::new(SegmentationConfig::default())
    }
}

impl Segmenter for HsvSegmenter {
    fn segment(&mut self, image: &Mat) -> Result<Vec<Region>, Error> {
        if image.empty() {
            return Ok(Vec::new());
        }

        imgproc::cvt_color(image, &mut self.hsv, imgproc::COLOR_BGR2HSV, 0)?;

        // kernel must be odd
        let k = self.config.blur_kernel.max(1) | 1;
        imgproc::gaussian_blur(
            &self.hsv,
            &mut self.blurred,
            core::Size::new(k, k),
            0.0,
            0.0,
            core::BORDER_DEFAULT,
        )?;

        let [l0, l1, l2] = self.config.hsv_lower;
        let [u0, u1, u2] = self.config.hsv_upper;
        core::in_range(
            &self.blurred,
            &core::Scalar::new(l0, l1, l2, 0.0),
            &core::Scalar::new(u0, u1, u2, 0.0),
            &mut self.mask,
        )?;

        let mut contours = Vector::<Vector<Point>>::new();
        imgproc::find_contours(
            &self.mask,
            &mut contours,
            imgproc::RETR_EXTERNAL,
            imgproc::CHAIN_APPROX_SIMPLE,
            Point::new(0, 0),
        )?;

        let mut regions = Vec::with_capacity(contours.len());
        for contour in contours.iter() {
            let area = imgproc::contour_area(&contour, false)? as f32;
            let rect = imgproc::min_area_rect(&contour)?;

            regions.push(Region::new(
                area,
                rect.size.width,
                rect.size.height,
                (rect.center.x, rect.center.y),
            ));
        }

        tracing::trace!(count = regions.len(), "segmented regions");

        Ok(regions)
    }
}
