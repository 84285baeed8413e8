use grid_util::point::Point;
use log::debug;
use std::collections::VecDeque;

use crate::error::{GraphError, Result};
use crate::graph::WaypointGraph;
use crate::waypoint::{Waypoint, WaypointId};

/// Per-traversal bookkeeping, indexed by waypoint index. Only meaningful for the most recent
/// search of the [PathFinder] that owns it.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    visited: Vec<bool>,
    distance: Vec<u32>,
    parent: Vec<Option<usize>>,
}

impl SearchState {
    pub fn with_capacity(n: usize) -> SearchState {
        SearchState {
            visited: Vec::with_capacity(n),
            distance: Vec::with_capacity(n),
            parent: Vec::with_capacity(n),
        }
    }
    fn reset(&mut self, n: usize) {
        self.visited.clear();
        self.visited.resize(n, false);
        self.distance.clear();
        self.distance.resize(n, 0);
        self.parent.clear();
        self.parent.resize(n, None);
    }
    pub fn len(&self) -> usize {
        self.visited.len()
    }
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
    pub fn visited(&self, ix: usize) -> bool {
        self.visited.get(ix).copied().unwrap_or(false)
    }
    pub fn distance(&self, ix: usize) -> Option<u32> {
        self.distance.get(ix).copied()
    }
    pub fn parent(&self, ix: usize) -> Option<usize> {
        self.parent.get(ix).copied().flatten()
    }
}

/// Where a successful search started and the waypoint it stopped at, as graph indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Found {
    pub source: usize,
    pub target: usize,
}

/// A reconstructed route, ordered from the target back towards the source. The source itself
/// is not part of the route, so searching from a waypoint to itself yields an empty route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route<'g> {
    waypoints: Vec<&'g Waypoint>,
}

impl<'g> Route<'g> {
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &'g Waypoint> + '_ {
        self.waypoints.iter().copied()
    }
    /// The waypoint the route leads to.
    pub fn target(&self) -> Option<&'g Waypoint> {
        self.waypoints.first().copied()
    }
    pub fn ids(&self) -> Vec<WaypointId> {
        self.iter().map(Waypoint::id).collect()
    }
    pub fn positions(&self) -> Vec<Point> {
        self.iter().map(Waypoint::position).collect()
    }
    /// Source-to-target order, starting at the waypoint after the source.
    pub fn into_forward(mut self) -> Vec<&'g Waypoint> {
        self.waypoints.reverse();
        self.waypoints
    }
}

impl<'g> IntoIterator for Route<'g> {
    type Item = &'g Waypoint;
    type IntoIter = std::vec::IntoIter<&'g Waypoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.into_iter()
    }
}

/// Breadth-first route search over a [WaypointGraph]. The graph is only borrowed immutably;
/// all traversal state lives in the finder, so separate finders may search one graph from
/// several threads at once.
#[derive(Clone, Debug, Default)]
pub struct PathFinder {
    state: SearchState,
}

impl PathFinder {
    pub fn new() -> PathFinder {
        PathFinder::default()
    }

    /// Pre-sizes the search state for `graph`.
    pub fn for_graph(graph: &WaypointGraph) -> PathFinder {
        PathFinder {
            state: SearchState::with_capacity(graph.len()),
        }
    }

    /// State left behind by the most recent search.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Computes a route from `source` (or the first waypoint of the graph when [None]) to the
    /// waypoint with id `target`. Returns `Ok(None)` if the target is unknown or cannot be
    /// reached.
    pub fn find_path<'g>(
        &mut self,
        graph: &'g WaypointGraph,
        source: Option<WaypointId>,
        target: WaypointId,
    ) -> Result<Option<Route<'g>>> {
        Ok(self
            .search(graph, source, target)?
            .map(|found| self.reconstruct(graph, found)))
    }

    /// Same as [find_path](Self::find_path) with the target given as a waypoint.
    pub fn find_path_to<'g>(
        &mut self,
        graph: &'g WaypointGraph,
        source: Option<WaypointId>,
        target: &Waypoint,
    ) -> Result<Option<Route<'g>>> {
        self.find_path(graph, source, target.id())
    }

    /// Snaps both points onto their nearest waypoints and searches between those.
    pub fn find_path_between_points<'g>(
        &mut self,
        graph: &'g WaypointGraph,
        from: Point,
        to: Point,
    ) -> Result<Option<Route<'g>>> {
        let source = graph.find_nearest_waypoint(from)?.id();
        let target = graph.find_nearest_waypoint(to)?.id();
        debug!("Snapped {} to waypoint {} and {} to waypoint {}", from, source, to, target);
        self.find_path(graph, Some(source), target)
    }

    /// The raw breadth-first search. Neighbours are marked visited when discovered and the
    /// target is accepted both when discovered and when dequeued. The source is only marked
    /// visited once its own neighbours have been expanded.
    pub fn search(
        &mut self,
        graph: &WaypointGraph,
        source: Option<WaypointId>,
        target: WaypointId,
    ) -> Result<Option<Found>> {
        let source_ix = match source {
            Some(id) => graph
                .index_of(id)
                .ok_or(GraphError::UnknownWaypoint(id))?,
            None => {
                if graph.is_empty() {
                    return Err(GraphError::EmptyGraph);
                }
                0
            }
        };
        self.state.reset(graph.len());

        let target_ix = match graph.index_of(target) {
            Some(ix) => ix,
            None => {
                debug!("Waypoint {} is not part of the graph", target);
                return Ok(None);
            }
        };
        if graph.unreachable(source_ix, target_ix) {
            debug!("{} is not reachable from waypoint index {}", target, source_ix);
            return Ok(None);
        }

        let found = |ix| Found {
            source: source_ix,
            target: ix,
        };
        let mut queue = VecDeque::new();
        queue.push_back(source_ix);
        while let Some(current) = queue.pop_front() {
            if current == target_ix {
                return Ok(Some(found(current)));
            }
            let Some(waypoint) = graph.get(current) else {
                continue;
            };
            let next_distance = self.state.distance[current] + 1;
            for &neighbour in waypoint.neighbour_indices() {
                if self.state.visited[neighbour] {
                    continue;
                }
                self.state.visited[neighbour] = true;
                self.state.distance[neighbour] = next_distance;
                self.state.parent[neighbour] = Some(current);
                queue.push_back(neighbour);
                if neighbour == target_ix {
                    return Ok(Some(found(neighbour)));
                }
            }
            self.state.visited[source_ix] = true;
        }
        debug!("Search from index {} exhausted without reaching {}", source_ix, target);
        Ok(None)
    }

    /// Walks parent links back from the found target, collecting waypoints until the source
    /// (exclusive) or a waypoint without a parent is reached.
    pub fn reconstruct<'g>(&self, graph: &'g WaypointGraph, found: Found) -> Route<'g> {
        let mut cursor = Some(found.target);
        let waypoints = std::iter::from_fn(|| {
            let current = cursor?;
            if current == found.source {
                return None;
            }
            cursor = Some(self.state.parent(current)?);
            graph.get(current)
        })
        .collect::<Vec<&Waypoint>>();
        Route { waypoints }
    }
}
