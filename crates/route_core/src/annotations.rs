//! Play-level tags drawn alongside the routes.
//!
//! Values are supplied by the caller; nothing here derives them from
//! tracking data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{PassOutcome, UnknownLabel};

/// 포켓 상태 (pocket cleanliness)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PocketType {
    Clean,
    Collapsed,
}

impl FromStr for PocketType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clean" => Ok(PocketType::Clean),
            "collapsed" | "dirty" => Ok(PocketType::Collapsed),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

impl fmt::Display for PocketType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PocketType::Clean => write!(f, "Clean"),
            PocketType::Collapsed => write!(f, "Collapsed"),
        }
    }
}

/// Named receiver route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteConcept {
    Mesh,
    Flood,
    Verticals,
    Other(String),
}

impl FromStr for RouteConcept {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(UnknownLabel(s.to_string()));
        }
        Ok(match trimmed.to_ascii_lowercase().as_str() {
            "mesh" => RouteConcept::Mesh,
            "flood" => RouteConcept::Flood,
            "verticals" | "four verts" => RouteConcept::Verticals,
            _ => RouteConcept::Other(trimmed.to_string()),
        })
    }
}

impl fmt::Display for RouteConcept {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RouteConcept::Mesh => write!(f, "Mesh"),
            RouteConcept::Flood => write!(f, "Flood"),
            RouteConcept::Verticals => write!(f, "Verticals"),
            RouteConcept::Other(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayAnnotations {
    pub pocket: Option<PocketType>,
    pub blitz: Option<bool>,
    pub route_concept: Option<RouteConcept>,
    pub outcome: Option<PassOutcome>,
}

impl PlayAnnotations {
    pub fn is_empty(&self) -> bool {
        self.pocket.is_none()
            && self.blitz.is_none()
            && self.route_concept.is_none()
            && self.outcome.is_none()
    }

    /// Text lines for the plot, in a fixed order. Unset tags are skipped.
    pub fn caption_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(pocket) = self.pocket {
            lines.push(format!("Pocket: {}", pocket));
        }
        if let Some(blitz) = self.blitz {
            lines.push(format!("Blitz: {}", if blitz { "Yes" } else { "No" }));
        }
        if let Some(concept) = &self.route_concept {
            lines.push(format!("Concept: {}", concept));
        }
        if let Some(outcome) = self.outcome {
            lines.push(format!("Ball: {}", outcome));
        }
        lines
    }
}
