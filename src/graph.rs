use core::fmt;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;
use itertools::Itertools;
use log::info;
use petgraph::unionfind::UnionFind;

use crate::config::GridConfig;
use crate::error::{GraphError, Result};
use crate::waypoint::{Waypoint, WaypointId};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// [WaypointGraph] owns every [Waypoint] in insertion order and keeps their connected
/// components in a [UnionFind] so that unreachable queries can be rejected without a search.
/// Waypoints refer to each other by their index in this graph.
#[derive(Clone, Debug)]
pub struct WaypointGraph {
    config: GridConfig,
    waypoints: FxIndexMap<WaypointId, Waypoint>,
    pub(crate) components: UnionFind<usize>,
    pub(crate) components_dirty: bool,
}

impl WaypointGraph {
    pub fn new(config: GridConfig) -> WaypointGraph {
        WaypointGraph {
            config,
            waypoints: FxIndexMap::default(),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Registers a waypoint and returns its index. Registering an id twice keeps the original
    /// waypoint and returns its index.
    pub fn add_waypoint(&mut self, id: WaypointId, position: Point) -> usize {
        let entry = self.waypoints.entry(id);
        let ix = entry.index();
        entry.or_insert_with(|| Waypoint::new(id, position));
        self.components_dirty = true;
        ix
    }

    /// Links `from` to `to` in that direction only. Links to indices the graph does not hold are
    /// ignored.
    pub fn add_neighbour(&mut self, from: usize, to: usize) {
        debug_assert!(to < self.waypoints.len());
        if to >= self.waypoints.len() {
            return;
        }
        if let Some((_, waypoint)) = self.waypoints.get_index_mut(from) {
            waypoint.add_neighbour(to);
            self.components_dirty = true;
        }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// All waypoints in enumeration order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Waypoint> + '_ {
        self.waypoints.values()
    }

    pub fn get(&self, ix: usize) -> Option<&Waypoint> {
        self.waypoints.get_index(ix).map(|(_, w)| w)
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.get(&id)
    }

    pub fn index_of(&self, id: WaypointId) -> Option<usize> {
        self.waypoints.get_index_of(&id)
    }

    /// The first waypoint in enumeration order, used as the source when none is given.
    pub fn first(&self) -> Option<&Waypoint> {
        self.get(0)
    }

    /// Neighbours of the waypoint at `ix`, in link order.
    pub fn neighbours(&self, ix: usize) -> impl Iterator<Item = &Waypoint> + '_ {
        self.get(ix)
            .map(|w| w.neighbour_indices())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&n| self.get(n))
    }

    /// Every directed link as a `(from, to)` pair, for drawing.
    pub fn edges(&self) -> impl Iterator<Item = (&Waypoint, &Waypoint)> + '_ {
        self.waypoints.values().enumerate().flat_map(move |(ix, from)| {
            self.neighbours(ix).map(move |to| (from, to))
        })
    }

    /// Finds the waypoint closest to `point` by Euclidean distance. Ties go to the waypoint
    /// enumerated first. Coordinates are integral, so fractional positions must be rounded by
    /// the caller before the lookup.
    pub fn find_nearest_waypoint(&self, point: Point) -> Result<&Waypoint> {
        self.nearest_index(point)
            .and_then(|ix| self.get(ix))
            .ok_or(GraphError::EmptyGraph)
    }

    pub(crate) fn nearest_index(&self, point: Point) -> Option<usize> {
        let mut closest: Option<(usize, i64)> = None;
        for (ix, waypoint) in self.waypoints.values().enumerate() {
            let distance = waypoint.distance_squared(&point);
            match closest {
                Some((_, best)) if distance >= best => {}
                _ => closest = Some((ix, distance)),
            }
        }
        closest.map(|(ix, _)| ix)
    }

    /// Whether links were added since the components were last generated. While dirty,
    /// [unreachable](Self::unreachable) only rejects out of range indices.
    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Checks if `a` and `b` are on the same component.
    pub fn reachable(&self, a: usize, b: usize) -> bool {
        !self.unreachable(a, b)
    }

    /// Checks if `a` and `b` are not on the same component. Out of range indices are
    /// unreachable.
    pub fn unreachable(&self, a: usize, b: usize) -> bool {
        let n = self.len();
        if a < n && b < n && !self.components_dirty {
            !self.components.equiv(a, b)
        } else {
            a >= n || b >= n
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and joins every linked pair of waypoints.
    pub fn generate_components(&mut self) {
        let n = self.len();
        self.components = UnionFind::new(n);
        self.components_dirty = false;
        for (ix, waypoint) in self.waypoints.values().enumerate() {
            for &neighbour in waypoint.neighbour_indices() {
                self.components.union(ix, neighbour);
            }
        }
        info!("Generated connected components for {} waypoints", n);
    }
}

impl fmt::Display for WaypointGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Graph {}x{} spaced {}: {} waypoints",
            self.config.width,
            self.config.height,
            self.config.spacing,
            self.len()
        )?;
        for (ix, waypoint) in self.waypoints.values().enumerate() {
            let ids = self.neighbours(ix).map(|n| n.id()).join(", ");
            writeln!(f, "{} -> [{}]", waypoint, ids)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::IdAllocator;

    /// Three waypoints on a line with a one-way link from the last back to the first.
    fn small_graph(ids: &mut IdAllocator) -> WaypointGraph {
        let mut graph = WaypointGraph::new(GridConfig::default());
        let a = graph.add_waypoint(ids.next_id(), Point::new(0, 0));
        let b = graph.add_waypoint(ids.next_id(), Point::new(10, 0));
        let c = graph.add_waypoint(ids.next_id(), Point::new(20, 0));
        graph.add_neighbour(a, b);
        graph.add_neighbour(b, a);
        graph.add_neighbour(c, a);
        graph
    }

    #[test]
    fn neighbours_resolve_in_link_order() {
        let graph = small_graph(&mut IdAllocator::new());
        let ids = graph
            .neighbours(0)
            .map(|w| w.id().get())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![2]);
        assert_eq!(graph.neighbours(2).count(), 1);
        assert_eq!(graph.neighbours(99).count(), 0);
        assert_eq!(graph.edges().count(), 3);
    }

    #[test]
    fn nearest_waypoint_exact_and_tie() {
        let graph = small_graph(&mut IdAllocator::new());
        assert_eq!(
            graph.find_nearest_waypoint(Point::new(20, 0)).unwrap().id().get(),
            3
        );
        // Equidistant from the first two waypoints, the first enumerated wins.
        assert_eq!(
            graph.find_nearest_waypoint(Point::new(5, 3)).unwrap().id().get(),
            1
        );
    }

    #[test]
    fn nearest_waypoint_on_empty_graph_fails() {
        let graph = WaypointGraph::new(GridConfig::default());
        assert_eq!(
            graph.find_nearest_waypoint(Point::new(0, 0)),
            Err(GraphError::EmptyGraph)
        );
    }

    #[test]
    fn components_follow_links() {
        let mut ids = IdAllocator::new();
        let mut graph = small_graph(&mut ids);
        let first = graph.first().unwrap().id();
        // Re-registering an id keeps the original waypoint.
        assert_eq!(graph.add_waypoint(first, Point::new(100, 100)), 0);
        assert_eq!(graph.get(0).unwrap().position(), Point::new(0, 0));
        let lone = graph.add_waypoint(ids.next_id(), Point::new(100, 100));
        assert_eq!(lone, 3);
        assert!(graph.components_dirty);
        graph.update();
        assert!(!graph.components_dirty);
        assert!(graph.reachable(0, 2));
        assert!(graph.unreachable(0, lone));
        assert!(graph.unreachable(0, 17));
    }

    /// Links added after the components were generated must not be rejected as unreachable.
    #[test]
    fn stale_components_do_not_reject_new_links() {
        let mut ids = IdAllocator::new();
        let mut graph = small_graph(&mut ids);
        let lone = graph.add_waypoint(ids.next_id(), Point::new(100, 100));
        graph.generate_components();
        assert!(graph.unreachable(0, lone));
        graph.add_neighbour(0, lone);
        assert!(graph.components_dirty());
        assert!(graph.reachable(0, lone));
        graph.update();
        assert!(!graph.components_dirty());
        assert!(graph.reachable(0, lone));
    }

    #[test]
    fn display_lists_adjacency() {
        let text = format!("{}", small_graph(&mut IdAllocator::new()));
        assert!(text.contains("3 waypoints"));
        assert!(text.contains("Waypoint 3 (20, 0) -> [1]"));
    }
}
