use core::fmt;
use grid_util::point::Point;
use smallvec::SmallVec;

/// Lattice waypoints have at most four neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Identity of a [Waypoint]. Handed out in creation order by an [IdAllocator].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaypointId(u64);

impl WaypointId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic source of [WaypointId]s. Identifiers start at 1 and are never reused for the
/// lifetime of the allocator.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> IdAllocator {
        IdAllocator { next: 1 }
    }
}

impl IdAllocator {
    pub fn new() -> IdAllocator {
        IdAllocator::default()
    }
    pub fn next_id(&mut self) -> WaypointId {
        let id = WaypointId(self.next);
        self.next += 1;
        id
    }
    /// The identifier the next call to [next_id](Self::next_id) will return.
    pub fn peek(&self) -> WaypointId {
        WaypointId(self.next)
    }
}

/// A vertex of the navigation graph. Neighbours are stored as indices into the owning
/// [WaypointGraph](crate::WaypointGraph), in the order they were linked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Waypoint {
    id: WaypointId,
    position: Point,
    neighbours: SmallVec<[usize; N_SMALLVEC_SIZE]>,
}

impl Waypoint {
    pub fn new(id: WaypointId, position: Point) -> Waypoint {
        Waypoint {
            id,
            position,
            neighbours: SmallVec::new(),
        }
    }
    pub fn id(&self) -> WaypointId {
        self.id
    }
    pub fn x(&self) -> i32 {
        self.position.x
    }
    pub fn y(&self) -> i32 {
        self.position.y
    }
    pub fn position(&self) -> Point {
        self.position
    }
    /// Indices of the neighbouring waypoints in link order. Resolve them through
    /// [WaypointGraph::neighbours](crate::WaypointGraph::neighbours).
    pub fn neighbour_indices(&self) -> &[usize] {
        &self.neighbours
    }
    /// Appends a link unconditionally. No duplicate check and no reverse link.
    pub fn add_neighbour(&mut self, index: usize) {
        self.neighbours.push(index);
    }
    /// Squared Euclidean distance to `point`, widened so lattice-sized coordinates cannot
    /// overflow.
    pub fn distance_squared(&self, point: &Point) -> i64 {
        let dx = self.position.x as i64 - point.x as i64;
        let dy = self.position.y as i64 - point.y as i64;
        dx * dx + dy * dy
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Waypoint {} ({}, {})",
            self.id, self.position.x, self.position.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_start_at_one() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.peek().get(), 1);
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert_eq!(a.get(), 1);
        assert!(a < b && b < c);
        assert_eq!(ids.peek().get(), 4);
    }

    #[test]
    fn add_neighbour_keeps_order_and_duplicates() {
        let mut ids = IdAllocator::new();
        let mut w = Waypoint::new(ids.next_id(), Point::new(5, 7));
        w.add_neighbour(3);
        w.add_neighbour(1);
        w.add_neighbour(3);
        assert_eq!(w.neighbour_indices(), &[3, 1, 3]);
        assert_eq!((w.x(), w.y()), (5, 7));
    }

    #[test]
    fn distance_squared_is_euclidean() {
        let w = Waypoint::new(IdAllocator::new().next_id(), Point::new(0, 0));
        assert_eq!(w.distance_squared(&Point::new(3, 4)), 25);
        assert_eq!(w.distance_squared(&Point::new(0, 0)), 0);
    }
}
