//! Tracking CSV → [`TrackingRecord`]
//!
//! Expected headers follow the Big Data Bowl input files (`game_id`,
//! `play_id`, `nfl_id`, `frame_id`, `x`, `y`, ...). Columns the model does not
//! know are ignored; optional columns may be missing entirely.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::{Result, TrajectoryError};
use crate::models::{PlayKey, TrackingRecord};

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    /// Rows dropped by the [`RecordFilter`]
    pub filtered: u32,
}

/// Restricts ingestion before routes are assembled.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFilter {
    pub play: Option<PlayKey>,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn play(play: PlayKey) -> Self {
        Self { play: Some(play) }
    }

    fn accepts(&self, record: &TrackingRecord) -> bool {
        self.play.map_or(true, |play| record.play_key() == play)
    }
}

/// Parse tracking rows from any reader. The first row must be the header.
///
/// A truncated or unparseable row fails the whole read with
/// [`TrajectoryError::MalformedRecord`].
pub fn read_tracking_records<R: Read>(
    reader: R,
    filter: &RecordFilter,
) -> Result<(Vec<TrackingRecord>, ParseStats)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut stats = ParseStats::default();

    for (row, result) in csv_reader.deserialize::<TrackingRecord>().enumerate() {
        stats.total_rows += 1;
        // header is line 1
        let record = result.map_err(|e| row_error(e, row as u64 + 2))?;

        if !filter.accepts(&record) {
            stats.filtered += 1;
            continue;
        }

        stats.parsed += 1;
        records.push(record);
    }

    info!(
        total = stats.total_rows,
        parsed = stats.parsed,
        filtered = stats.filtered,
        "tracking CSV parsed"
    );

    Ok((records, stats))
}

/// Open and parse a tracking CSV file.
pub fn read_tracking_csv(
    path: &Path,
    filter: &RecordFilter,
) -> Result<(Vec<TrackingRecord>, ParseStats)> {
    let file = File::open(path)?;
    read_tracking_records(file, filter)
}

fn row_error(e: csv::Error, fallback_line: u64) -> TrajectoryError {
    let line = e.position().map_or(fallback_line, |pos| pos.line());
    let reason = match e.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        csv::ErrorKind::UnequalLengths { expected_len, len, .. } => {
            format!("expected {} fields, found {}", expected_len, len)
        }
        _ => return TrajectoryError::Csv(e),
    };
    TrajectoryError::MalformedRecord { line, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
game_id,play_id,player_to_predict,nfl_id,frame_id,play_direction,player_name,player_position,player_side,player_role,x,y,s,ball_land_x,ball_land_y
2023090700,101,True,54527,1,right,Bryan Cook,FS,Defense,Defensive Coverage,52.33,36.94,0.09,63.26,-0.22
2023090700,101,True,54527,2,right,Bryan Cook,FS,Defense,Defensive Coverage,52.33,36.94,0.04,63.26,-0.22
2023090700,101,False,46137,1,right,Justin Reid,SS,Defense,Defensive Coverage,NA,33.0,0.2,63.26,-0.22
2023090700,194,True,44930,1,left,Patrick Mahomes,QB,Offense,Passer,70.1,25.2,0.4,NA,NA
";

    #[test]
    fn test_parse_sample() {
        let (records, stats) = read_tracking_records(SAMPLE.as_bytes(), &RecordFilter::all()).unwrap();

        assert_eq!(stats.total_rows, 4);
        assert_eq!(stats.parsed, 4);

        let first = &records[0];
        assert_eq!(first.game_id, 2023090700);
        assert_eq!(first.nfl_id, 54527);
        assert_eq!(first.x, Some(52.33));
        assert_eq!(first.player_role.as_deref(), Some("Defensive Coverage"));
        assert_eq!(first.ball_land_y, Some(-0.22));

        // NA coordinates become None and are left for the loader to reject
        assert_eq!(records[2].x, None);
        assert_eq!(records[3].ball_land(), None);
    }

    #[test]
    fn test_play_filter() {
        let filter = RecordFilter::play(PlayKey::new(2023090700, 194));
        let (records, stats) = read_tracking_records(SAMPLE.as_bytes(), &filter).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(stats.filtered, 3);
        assert_eq!(records[0].player_name.as_deref(), Some("Patrick Mahomes"));
    }

    #[test]
    fn test_unparseable_row_fails_read() {
        let data = "\
game_id,play_id,nfl_id,frame_id,x,y
2023090700,101,1,1,10.0,20.0
not_a_game,101,1,2,10.0,20.0
2023090700,101,1,3,11.0,20.0
";
        let err = read_tracking_records(data.as_bytes(), &RecordFilter::all()).unwrap_err();
        assert!(err.is_data_integrity());
        match err {
            TrajectoryError::MalformedRecord { line, .. } => assert_eq!(line, 3),
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_row_fails_read() {
        let data = "\
game_id,play_id,nfl_id,frame_id,x,y
2023090700,101,1,1,10.0,20.0
2023090700,101,1,2,11.0
";
        let err = read_tracking_records(data.as_bytes(), &RecordFilter::all()).unwrap_err();
        assert!(matches!(err, TrajectoryError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn test_malformed_row_outside_filter_still_fails() {
        let filter = RecordFilter::play(PlayKey::new(2023090700, 194));
        let data = "\
game_id,play_id,nfl_id,frame_id,x,y
2023090700,101,1,x,10.0,20.0
2023090700,194,2,1,11.0,20.0
";
        assert!(read_tracking_records(data.as_bytes(), &filter).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = read_tracking_csv(Path::new("/nonexistent/tracking.csv"), &RecordFilter::all())
            .unwrap_err();
        assert!(matches!(err, TrajectoryError::Io(_)));
    }
}
