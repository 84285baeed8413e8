use grid_util::point::Point;
use log::{info, warn};

use crate::config::GridConfig;
use crate::error::Result;
use crate::graph::WaypointGraph;
use crate::waypoint::{IdAllocator, WaypointId};

/// Builds 4-connected lattices of waypoints covering the region described by a [GridConfig].
/// The builder owns the [IdAllocator], so waypoint ids stay unique across every graph it
/// builds.
#[derive(Clone, Debug)]
pub struct GridGraphBuilder {
    pub config: GridConfig,
    ids: IdAllocator,
}

impl GridGraphBuilder {
    pub fn new(config: GridConfig) -> GridGraphBuilder {
        GridGraphBuilder::with_allocator(config, IdAllocator::new())
    }

    /// Continues numbering from an existing allocator.
    pub fn with_allocator(config: GridConfig, ids: IdAllocator) -> GridGraphBuilder {
        GridGraphBuilder { config, ids }
    }

    pub fn allocator(&self) -> &IdAllocator {
        &self.ids
    }

    /// Produces a fresh graph. Waypoints are created column by column, top to bottom within a
    /// column. Each waypoint is then linked to the lattice positions above, below, left and
    /// right of it, in that order, whenever they exist.
    pub fn build(&mut self) -> Result<WaypointGraph> {
        if let Err(e) = self.config.validate() {
            warn!("Refusing to build lattice: {}", e);
            return Err(e);
        }
        let lattice = self.create_lattice();
        let mut graph = WaypointGraph::new(self.config);
        link_lattice(&mut graph, &lattice);
        graph.generate_components();
        info!(
            "Built {}x{} lattice with {} waypoints",
            lattice.len(),
            lattice.first().map_or(0, |column| column.len()),
            graph.len()
        );
        Ok(graph)
    }

    fn create_lattice(&mut self) -> Vec<Vec<(WaypointId, Point)>> {
        let rows = self.config.row_positions().collect::<Vec<i32>>();
        self.config
            .column_positions()
            .map(|x| {
                rows.iter()
                    .map(|&y| (self.ids.next_id(), Point::new(x, y)))
                    .collect()
            })
            .collect()
    }
}

/// Registers every lattice position and links it to its existing 4-neighbours.
fn link_lattice(graph: &mut WaypointGraph, lattice: &[Vec<(WaypointId, Point)>]) {
    // Lattice indices resolve to graph indices once every waypoint is registered, so
    // registration happens column-major before linking.
    let indices = lattice
        .iter()
        .map(|column| {
            column
                .iter()
                .map(|&(id, position)| graph.add_waypoint(id, position))
                .collect::<Vec<usize>>()
        })
        .collect::<Vec<_>>();
    for col in 0..indices.len() {
        for row in 0..indices[col].len() {
            let current = indices[col][row];
            let candidates = [
                (col as i64, row as i64 - 1),
                (col as i64, row as i64 + 1),
                (col as i64 - 1, row as i64),
                (col as i64 + 1, row as i64),
            ];
            for (c, r) in candidates {
                if c < 0 || r < 0 {
                    continue;
                }
                if let Some(&neighbour) = indices
                    .get(c as usize)
                    .and_then(|column| column.get(r as usize))
                {
                    graph.add_neighbour(current, neighbour);
                }
            }
        }
    }
}
