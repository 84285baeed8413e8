use grid_util::point::Point;
use waypoint_graph::{GridConfig, GridGraphBuilder, PathFinder};

// In this example a lattice is laid over a 1000x600 surface with waypoints every 100 units.
// An agent standing at A walks to B:
//  A . . . . . . . .
//  . . . . . . . . .
//  . . . . . . . . .
//  . . . . . . . . .
//  . . . . . . . . B
fn main() {
    let mut builder = GridGraphBuilder::new(GridConfig::from_surface(1000, 600));
    let graph = builder.build().unwrap();
    println!("{}", graph);
    let mut finder = PathFinder::for_graph(&graph);
    let agent = Point::new(120, 80);
    let goal = Point::new(930, 480);
    match finder.find_path_between_points(&graph, agent, goal) {
        Ok(Some(route)) => {
            println!("A route has been found:");
            for waypoint in route.into_forward() {
                println!("{}", waypoint);
            }
        }
        Ok(None) => println!("No route available"),
        Err(e) => println!("Could not search: {}", e),
    }
}
