use crate::error::Error;
use crate::region::Region;
use crate::{Frame, FrameSource};

use std::io::BufRead;
use std::path::Path;

/// Replays pre-segmented regions, one frame per line:
/// `<frame index>:[{"area":..,"w":..,"h":..,"x":..,"y":..}, ...]`.
/// A line without `:` is an empty frame.
pub struct RegionReplay<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl RegionReplay<std::io::BufReader<std::fs::File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }

        let file = std::fs::File::open(path)?;

        Ok(Self::new(std::io::BufReader::new(file)))
    }
}

impl<R: BufRead> RegionReplay<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    fn parse_line(&self, line: &str) -> Result<(Option<u64>, Vec<Region>), Error> {
        let Some(idx) = line.find(':') else {
            return Ok((None, Vec::new()));
        };

        let (head, vector) = line.split_at(idx);
        let index = head.trim().parse().map_err(|_| Error::FrameIndex {
            line: self.line_no,
            index: head.to_string(),
        })?;
        let regions = serde_json::from_str(&vector[1..]).map_err(|source| Error::Json {
            line: self.line_no,
            source,
        })?;

        Ok((Some(index), regions))
    }
}

impl<R: BufRead> FrameSource for RegionReplay<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        let line = match self.lines.next() {
            Some(line) => line?,
            None => return Ok(None),
        };

        self.line_no += 1;
        let (index, regions) = self.parse_line(&line)?;
        let index = index.unwrap_or(self.line_no as u64 - 1);

        Ok(Some(Frame::from_regions(index, regions)))
    }
}
