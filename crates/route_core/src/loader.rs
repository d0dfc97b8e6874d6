//! # Trajectory Loader
//!
//! Groups tracking records by (play, player) and orders each group into a
//! [`RouteSequence`].
//!
//! ## Pipeline
//! 1. Validate every record's coordinates ([`TrackingRecord::into_frame`])
//! 2. Bucket frames by [`RouteKey`]
//! 3. Sort each bucket by frame id and build the sequence, which rejects
//!    duplicate frame ids
//! 4. Keep per-play context (ball landing, play direction) on the side

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::csv_source::{read_tracking_csv, RecordFilter};
use crate::error::Result;
use crate::models::{
    BallLanding, FieldPoint, PassOutcome, Play, PlayDirection, PlayKey, PlayerFrame, RouteKey,
    RouteSequence, TrackingRecord,
};

/// Play context gathered while loading.
#[derive(Debug, Clone, Default)]
struct PlayContext {
    /// (frame_id, nfl_id) of the record the landing spot came from
    ball_land_source: Option<(u32, u32)>,
    ball_land: Option<FieldPoint>,
    outcome: Option<PassOutcome>,
    direction: Option<PlayDirection>,
}

impl PlayContext {
    fn observe(&mut self, record: &TrackingRecord) {
        if let Some(spot) = record.ball_land() {
            let source = (record.frame_id, record.nfl_id);
            if self.ball_land_source.map_or(true, |current| source < current) {
                self.ball_land_source = Some(source);
                self.ball_land = Some(spot);
            }
        }
        if self.direction.is_none() {
            self.direction = record.play_direction.as_deref().and_then(|d| d.parse().ok());
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrajectoryLoader {
    offense_only: bool,
}

impl TrajectoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only passer and route runners.
    pub fn offense_only(mut self) -> Self {
        self.offense_only = true;
        self
    }

    /// Assemble route sequences from raw records.
    ///
    /// Record order does not matter. Empty input gives an empty map.
    pub fn load<I>(&self, records: I) -> Result<RouteMap>
    where
        I: IntoIterator<Item = TrackingRecord>,
    {
        let mut buckets: BTreeMap<RouteKey, Vec<PlayerFrame>> = BTreeMap::new();
        let mut plays: BTreeMap<PlayKey, PlayContext> = BTreeMap::new();
        let mut record_count = 0usize;

        for record in records {
            record_count += 1;
            plays.entry(record.play_key()).or_default().observe(&record);

            let frame = record.into_frame()?;
            buckets.entry(frame.key).or_default().push(frame);
        }

        let mut routes = BTreeMap::new();
        for (key, mut frames) in buckets {
            frames.sort_by_key(|f| f.frame_id);
            let route = RouteSequence::new(key, frames)?;
            if self.offense_only && !route.is_offensive() {
                continue;
            }
            debug!(route = %key, frames = route.len(), "route assembled");
            routes.insert(key, route);
        }

        if self.offense_only {
            plays.retain(|play, _| routes.keys().any(|k| k.play == *play));
        }

        info!(
            records = record_count,
            routes = routes.len(),
            plays = plays.len(),
            "tracking data loaded"
        );

        Ok(RouteMap { routes, plays })
    }

    /// Read a tracking CSV and assemble its routes.
    pub fn load_csv(&self, path: &Path, filter: &RecordFilter) -> Result<RouteMap> {
        let (records, _stats) = read_tracking_csv(path, filter)?;
        self.load(records)
    }
}

/// Route sequences keyed by (play, player), iterated in key order.
#[derive(Debug, Clone, Default)]
pub struct RouteMap {
    routes: BTreeMap<RouteKey, RouteSequence>,
    plays: BTreeMap<PlayKey, PlayContext>,
}

/// Per-player point lists for one play, ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayTrajectories {
    pub play: PlayKey,
    /// One trajectory per player, ascending player id
    pub points: Vec<Vec<(f64, f64)>>,
    /// Legend label per trajectory
    pub labels: Vec<String>,
    pub ball_land: Option<(f64, f64)>,
}

impl RouteMap {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, key: &RouteKey) -> Option<&RouteSequence> {
        self.routes.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RouteKey, &RouteSequence)> {
        self.routes.iter()
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteSequence> {
        self.routes.values()
    }

    /// Distinct plays, ascending.
    pub fn plays(&self) -> Vec<PlayKey> {
        self.plays.keys().copied().collect()
    }

    pub fn routes_for_play(&self, play: PlayKey) -> Vec<&RouteSequence> {
        let start = RouteKey { play, nfl_id: u32::MIN };
        let end = RouteKey { play, nfl_id: u32::MAX };
        self.routes.range(start..=end).map(|(_, route)| route).collect()
    }

    pub fn offensive_routes_for_play(&self, play: PlayKey) -> Vec<&RouteSequence> {
        self.routes_for_play(play)
            .into_iter()
            .filter(|route| route.is_offensive())
            .collect()
    }

    /// Attach a pass result to a play's ball landing. Returns false for an
    /// unknown play.
    pub fn set_pass_outcome(&mut self, play: PlayKey, outcome: PassOutcome) -> bool {
        match self.plays.get_mut(&play) {
            Some(ctx) => {
                ctx.outcome = Some(outcome);
                true
            }
            None => false,
        }
    }

    pub fn ball_landing(&self, play: PlayKey) -> Option<BallLanding> {
        let ctx = self.plays.get(&play)?;
        ctx.ball_land.map(|position| BallLanding { position, outcome: ctx.outcome })
    }

    /// Assemble the [`Play`] view, or `None` if the play was never loaded.
    pub fn play(&self, play: PlayKey) -> Option<Play> {
        let ctx = self.plays.get(&play)?;
        Some(Play {
            key: play,
            players: self.routes_for_play(play).iter().map(|r| r.key().nfl_id).collect(),
            ball_landing: self.ball_landing(play),
            direction: ctx.direction,
        })
    }

    pub fn play_trajectories(&self, play: PlayKey) -> PlayTrajectories {
        let routes = self.routes_for_play(play);
        PlayTrajectories {
            play,
            points: routes.iter().map(|r| r.points()).collect(),
            labels: routes.iter().map(|r| r.label()).collect(),
            ball_land: self.ball_landing(play).map(|b| b.position.as_tuple()),
        }
    }
}
