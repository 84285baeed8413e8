//! # waypoint_graph
//!
//! Builds rectangular lattices of waypoints with 4-directional adjacency and finds routes
//! between them using
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search). The lattice
//! topology is fixed once built; every search keeps its visited flags, distances and parent
//! links in its own [PathFinder], so one graph can serve many searches at once.
//! [Connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) are
//! pre-computed to avoid flood-filling behaviour if no route exists.
//!
//! ```
//! use grid_util::point::Point;
//! use waypoint_graph::{GridConfig, GridGraphBuilder, PathFinder};
//!
//! let graph = GridGraphBuilder::new(GridConfig::new(150, 150, 50)).build().unwrap();
//! let mut finder = PathFinder::for_graph(&graph);
//! let route = finder
//!     .find_path_between_points(&graph, Point::new(40, 40), Point::new(110, 110))
//!     .unwrap()
//!     .unwrap();
//! // Routes run from the target back towards the source.
//! assert_eq!(route.positions(), vec![Point::new(100, 100), Point::new(50, 100)]);
//! ```
mod builder;
mod config;
mod error;
mod graph;
mod search;
mod waypoint;

pub use crate::builder::GridGraphBuilder;
pub use crate::config::{GridConfig, SURFACE_DIVISIONS};
pub use crate::error::{GraphError, Result};
pub use crate::graph::WaypointGraph;
pub use crate::search::{Found, PathFinder, Route, SearchState};
pub use crate::waypoint::{IdAllocator, Waypoint, WaypointId, N_SMALLVEC_SIZE};
