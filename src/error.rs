use thiserror::Error;

use crate::waypoint::WaypointId;

/// Programmer errors raised by graph construction and queries. A search that simply finds no
/// route is not an error and is reported as [None] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Lattice spacing must be strictly positive.
    #[error("lattice spacing must be positive, got {0}")]
    NonPositiveSpacing(i32),
    /// The query needs at least one waypoint.
    #[error("graph has no waypoints")]
    EmptyGraph,
    /// A source waypoint was named that the graph does not own.
    #[error("waypoint {0} is not part of this graph")]
    UnknownWaypoint(WaypointId),
}

pub type Result<T> = std::result::Result<T, GraphError>;
