use thiserror::Error;

use crate::models::RouteKey;

/// What is wrong with a route's frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    EmptyRoute,
    DuplicateFrame { frame_id: u32 },
    NonMonotonicFrame { previous: u32, next: u32 },
    MissingCoordinate { frame_id: u32, axis: char },
    KeyMismatch { frame_id: u32, found: RouteKey },
}

impl std::fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            IntegrityIssue::EmptyRoute => write!(f, "route has no frames"),
            IntegrityIssue::DuplicateFrame { frame_id } => {
                write!(f, "duplicate frame {}", frame_id)
            }
            IntegrityIssue::NonMonotonicFrame { previous, next } => {
                write!(f, "frame {} follows frame {}", next, previous)
            }
            IntegrityIssue::MissingCoordinate { frame_id, axis } => {
                write!(f, "missing {} coordinate at frame {}", axis, frame_id)
            }
            IntegrityIssue::KeyMismatch { frame_id, found } => {
                write!(f, "frame {} belongs to {}", frame_id, found)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum TrajectoryError {
    #[error("data integrity error ({key}): {issue}")]
    DataIntegrity { key: RouteKey, issue: IntegrityIssue },

    /// A row that is truncated or whose fields do not parse.
    #[error("malformed tracking row at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render error: {0}")]
    Render(String),

    #[error("config error: {0}")]
    Config(String),
}

impl TrajectoryError {
    pub fn integrity(key: RouteKey, issue: IntegrityIssue) -> Self {
        TrajectoryError::DataIntegrity { key, issue }
    }

    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            TrajectoryError::DataIntegrity { .. } | TrajectoryError::MalformedRecord { .. }
        )
    }
}

impl From<serde_json::Error> for TrajectoryError {
    fn from(e: serde_json::Error) -> Self {
        TrajectoryError::Config(e.to_string())
    }
}

impl From<serde_yaml::Error> for TrajectoryError {
    fn from(e: serde_yaml::Error) -> Self {
        TrajectoryError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrajectoryError>;
