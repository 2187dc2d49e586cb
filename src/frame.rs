use crate::region::Region;
use opencv::core::Mat;

pub struct Frame {
    pub index: u64,
    // absent when regions come from a dump rather than from video
    pub image: Option<Mat>,
    pub regions: Vec<Region>,
}

impl Frame {
    #[inline]
    pub fn from_regions(index: u64, regions: Vec<Region>) -> Self {
        Self {
            index,
            image: None,
            regions,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
