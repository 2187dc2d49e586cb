use markspeed::error::Error;
use markspeed::replay::RegionReplay;
use markspeed::{DisplaySink, DisplayState, Frame, Tracker};

#[derive(Default)]
struct Collect {
    states: Vec<DisplayState>,
    stop_after: Option<usize>,
}

impl DisplaySink for Collect {
    fn render(&mut self, _frame: &Frame, state: &DisplayState) -> Result<bool, Error> {
        self.states.push(state.clone());
        Ok(self.stop_after.map_or(true, |n| self.states.len() < n))
    }
}

fn line(idx: usize, x: f32, y: f32) -> String {
    format!(
        "{}:[{{\"area\":500,\"w\":3,\"h\":3,\"x\":{},\"y\":{}}},\
         {{\"area\":100,\"w\":10,\"h\":10,\"x\":{},\"y\":{}}},\
         {{\"area\":110,\"w\":10,\"h\":10,\"x\":{},\"y\":{}}}]",
        idx,
        x + 50.0,
        y,
        x - 2.0,
        y,
        x + 2.0,
        y
    )
}

fn dump(positions: &[(f32, f32)]) -> String {
    positions
        .iter()
        .enumerate()
        .map(|(idx, &(x, y))| line(idx, x, y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn heading_east_then_lost() {
    let positions: Vec<(f32, f32)> = (0..17).map(|i| (100.0 + 2.0 * i as f32, 50.0)).collect();

    let mut data = dump(&positions);
    data.push_str("\n17:[]\n");

    let mut source = RegionReplay::new(data.as_bytes());
    let mut sink = Collect::default();
    let mut tracker = Tracker::default();

    let summary = tracker.run(&mut source, &mut sink).unwrap();
    assert_eq!(summary.frames, 18);
    assert_eq!(summary.acquired, 17);

    let first = &sink.states[0];
    assert!(first.acquired);
    assert_eq!(first.barycenter, Some((100.0, 50.0)));
    assert_eq!(first.direction.to_string(), "UNKNOWN");

    for state in &sink.states[1..17] {
        assert_eq!(state.direction.to_string(), "EAST");
        let (px, _) = state.instant.unwrap();
        assert!((px - 60.0).abs() < 1e-3);
    }

    assert!(sink.states[14].smoothed.is_none());
    let (px, kmh) = sink.states[15].smoothed.unwrap();
    assert!((px - 60.0).abs() < 1e-3);
    // 60 px/s * 0.6 m / 10 px * 3.6
    assert!((kmh - 12.96).abs() < 1e-3);

    let last = sink.states.last().unwrap();
    assert!(!last.acquired);
    assert_eq!(last.smoothed, sink.states[16].smoothed);
    assert!(tracker.state().previous_marker.is_none());
    assert_eq!(tracker.state().aggregator.frame_count, -1);
}

#[test]
fn sink_can_stop_the_loop() {
    let positions: Vec<(f32, f32)> = (0..10).map(|i| (i as f32, 0.0)).collect();
    let data = dump(&positions);

    let mut source = RegionReplay::new(data.as_bytes());
    let mut sink = Collect {
        stop_after: Some(4),
        ..Default::default()
    };

    let summary = Tracker::default().run(&mut source, &mut sink).unwrap();
    assert_eq!(summary.frames, 4);
    assert_eq!(sink.states.len(), 4);
}
