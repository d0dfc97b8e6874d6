//! # Tracking Data Model
//!
//! Read-only views over NFL player-tracking data.
//!
//! - [`TrackingRecord`]: one raw CSV row, every measured value optional
//! - [`PlayerFrame`]: one validated position sample
//! - [`RouteSequence`]: ordered frames for one (play, player) pair
//! - [`Play`]: participants and ball landing for one passing down

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IntegrityIssue, Result, TrajectoryError};

/// Unique play identifier. `play_id` alone repeats across games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayKey {
    pub game_id: u64,
    pub play_id: u32,
}

impl PlayKey {
    pub fn new(game_id: u64, play_id: u32) -> Self {
        Self { game_id, play_id }
    }
}

impl fmt::Display for PlayKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Game: {}, Play: {}", self.game_id, self.play_id)
    }
}

/// (play, player) pair identifying one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    pub play: PlayKey,
    pub nfl_id: u32,
}

impl RouteKey {
    pub fn new(game_id: u64, play_id: u32, nfl_id: u32) -> Self {
        Self { play: PlayKey::new(game_id, play_id), nfl_id }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "game {} / play {} / player {}",
            self.play.game_id, self.play.play_id, self.nfl_id
        )
    }
}

/// Field position in yards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldPoint {
    /// Along the field (0-120, end zones included)
    pub x: f64,
    /// Across the field (0-53.3)
    pub y: f64,
}

impl FieldPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &FieldPoint) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Error returned when a label does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown label: '{}'", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    Offense,
    Defense,
}

impl FromStr for TeamSide {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offense" => Ok(TeamSide::Offense),
            "defense" => Ok(TeamSide::Defense),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TeamSide::Offense => write!(f, "Offense"),
            TeamSide::Defense => write!(f, "Defense"),
        }
    }
}

/// Player role within a passing play, as labelled in the tracking data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    Passer,
    TargetedReceiver,
    OtherRouteRunner,
    DefensiveCoverage,
    Other(String),
}

impl PlayerRole {
    /// Passer, targeted receiver and other route runners.
    pub fn is_offensive(&self) -> bool {
        matches!(
            self,
            PlayerRole::Passer | PlayerRole::TargetedReceiver | PlayerRole::OtherRouteRunner
        )
    }

    /// Parse a tracking label; unknown labels are kept verbatim.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Passer" => PlayerRole::Passer,
            "Targeted Receiver" => PlayerRole::TargetedReceiver,
            "Other Route Runner" => PlayerRole::OtherRouteRunner,
            "Defensive Coverage" => PlayerRole::DefensiveCoverage,
            other => PlayerRole::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerRole::Passer => write!(f, "Passer"),
            PlayerRole::TargetedReceiver => write!(f, "Targeted Receiver"),
            PlayerRole::OtherRouteRunner => write!(f, "Other Route Runner"),
            PlayerRole::DefensiveCoverage => write!(f, "Defensive Coverage"),
            PlayerRole::Other(label) => write!(f, "{}", label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayDirection {
    Left,
    Right,
}

impl FromStr for PlayDirection {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(PlayDirection::Left),
            "right" => Ok(PlayDirection::Right),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

/// How the pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassOutcome {
    Completion,
    Incompletion,
    ThrowAway,
}

impl FromStr for PassOutcome {
    type Err = UnknownLabel;

    /// Accepts full names and the single-letter pass_result codes (C / I / TA).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "c" | "complete" | "completion" => Ok(PassOutcome::Completion),
            "i" | "incomplete" | "incompletion" => Ok(PassOutcome::Incompletion),
            "ta" | "throwaway" => Ok(PassOutcome::ThrowAway),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

impl fmt::Display for PassOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PassOutcome::Completion => write!(f, "Completion"),
            PassOutcome::Incompletion => write!(f, "Incompletion"),
            PassOutcome::ThrowAway => write!(f, "Throw-away"),
        }
    }
}

/// Where the ball came down, if the data has it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallLanding {
    pub position: FieldPoint,
    pub outcome: Option<PassOutcome>,
}

/// One row of the tracking CSV.
///
/// Measured values are optional so that gaps reach the loader and are
/// reported as integrity errors instead of failing the whole parse.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub game_id: u64,
    pub play_id: u32,
    pub nfl_id: u32,
    pub frame_id: u32,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub y: Option<f64>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub player_position: Option<String>,
    #[serde(default)]
    pub player_side: Option<String>,
    #[serde(default)]
    pub player_role: Option<String>,
    #[serde(default)]
    pub play_direction: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ball_land_x: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ball_land_y: Option<f64>,
}

impl TrackingRecord {
    /// Minimal record with a position, for building inputs by hand.
    pub fn at(game_id: u64, play_id: u32, nfl_id: u32, frame_id: u32, x: f64, y: f64) -> Self {
        Self {
            game_id,
            play_id,
            nfl_id,
            frame_id,
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn route_key(&self) -> RouteKey {
        RouteKey::new(self.game_id, self.play_id, self.nfl_id)
    }

    pub fn play_key(&self) -> PlayKey {
        PlayKey::new(self.game_id, self.play_id)
    }

    /// Ball landing spot when both coordinates are present and finite.
    pub fn ball_land(&self) -> Option<FieldPoint> {
        match (self.ball_land_x, self.ball_land_y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(FieldPoint::new(x, y)),
            _ => None,
        }
    }

    /// Validate coordinates and convert into a [`PlayerFrame`].
    pub fn into_frame(self) -> Result<PlayerFrame> {
        let key = self.route_key();
        let frame_id = self.frame_id;
        let x = finite_coord(self.x, key, frame_id, 'x')?;
        let y = finite_coord(self.y, key, frame_id, 'y')?;

        Ok(PlayerFrame {
            key,
            frame_id,
            position: FieldPoint::new(x, y),
            side: self.player_side.as_deref().and_then(|s| s.parse().ok()),
            role: non_empty(self.player_role).map(|r| PlayerRole::from_label(&r)),
            position_label: non_empty(self.player_position),
            player_name: non_empty(self.player_name),
        })
    }
}

fn finite_coord(value: Option<f64>, key: RouteKey, frame_id: u32, axis: char) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(TrajectoryError::integrity(
            key,
            IntegrityIssue::MissingCoordinate { frame_id, axis },
        )),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "NA")
}

/// One player's position at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerFrame {
    pub key: RouteKey,
    pub frame_id: u32,
    pub position: FieldPoint,
    pub side: Option<TeamSide>,
    pub role: Option<PlayerRole>,
    /// Position label (WR, QB, CB ...)
    pub position_label: Option<String>,
    pub player_name: Option<String>,
}

/// Frames of one (play, player) pair in frame order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSequence {
    key: RouteKey,
    frames: Vec<PlayerFrame>,
}

impl RouteSequence {
    /// Build a sequence from frames already in frame order.
    ///
    /// Rejects empty input, frames from another key, and frame ids that
    /// repeat or go backwards.
    pub fn new(key: RouteKey, frames: Vec<PlayerFrame>) -> Result<Self> {
        if frames.is_empty() {
            return Err(TrajectoryError::integrity(key, IntegrityIssue::EmptyRoute));
        }

        let mut previous: Option<u32> = None;
        for frame in &frames {
            if frame.key != key {
                return Err(TrajectoryError::integrity(
                    key,
                    IntegrityIssue::KeyMismatch { frame_id: frame.frame_id, found: frame.key },
                ));
            }
            if let Some(prev) = previous {
                if frame.frame_id == prev {
                    return Err(TrajectoryError::integrity(
                        key,
                        IntegrityIssue::DuplicateFrame { frame_id: frame.frame_id },
                    ));
                }
                if frame.frame_id < prev {
                    return Err(TrajectoryError::integrity(
                        key,
                        IntegrityIssue::NonMonotonicFrame { previous: prev, next: frame.frame_id },
                    ));
                }
            }
            previous = Some(frame.frame_id);
        }

        Ok(Self { key, frames })
    }

    pub fn key(&self) -> RouteKey {
        self.key
    }

    pub fn frames(&self) -> &[PlayerFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// (x, y) trajectory in frame order.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.frames.iter().map(|f| f.position.as_tuple()).collect()
    }

    pub fn start(&self) -> FieldPoint {
        self.frames[0].position
    }

    pub fn end(&self) -> FieldPoint {
        self.frames[self.frames.len() - 1].position
    }

    /// Player name if any frame carries one, else `Player {nfl_id}`.
    pub fn label(&self) -> String {
        self.frames
            .iter()
            .find_map(|f| f.player_name.clone())
            .unwrap_or_else(|| format!("Player {}", self.key.nfl_id))
    }

    pub fn side(&self) -> Option<TeamSide> {
        self.frames.iter().find_map(|f| f.side)
    }

    pub fn role(&self) -> Option<&PlayerRole> {
        self.frames.iter().find_map(|f| f.role.as_ref())
    }

    pub fn position_label(&self) -> Option<&str> {
        self.frames.iter().find_map(|f| f.position_label.as_deref())
    }

    /// Offensive route runner or passer. Falls back to the team side when
    /// the role column is absent.
    pub fn is_offensive(&self) -> bool {
        match self.role() {
            Some(role) => role.is_offensive(),
            None => self.side() == Some(TeamSide::Offense),
        }
    }

    /// Total distance covered in yards.
    pub fn path_length(&self) -> f64 {
        self.frames
            .windows(2)
            .map(|w| w[0].position.distance_to(&w[1].position))
            .sum()
    }
}

/// One passing down.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Play {
    pub key: PlayKey,
    /// Participating players, ascending
    pub players: Vec<u32>,
    pub ball_landing: Option<BallLanding>,
    pub direction: Option<PlayDirection>,
}
