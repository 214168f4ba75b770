/*!

Congestion-aware negotiated routing of switchbox arcs over a 2D tile grid.

A [`pathfinder::Pathfinder`] owns a [`grid::Grid`] built from a caller-
supplied [`target_model::TargetModel`], accumulates flows through a
[`flow::FlowRegistry`], and negotiates a legal assignment of switchbox
crossbar settings via repeated rip-up-and-reroute passes, pricing arcs by
their historical over-capacity so that congestion drives flows off the
arcs that caused it in earlier iterations.

```ignore
use aie_pathfinder::config::PathfinderConfig;
use aie_pathfinder::pathfinder::Pathfinder;
use aie_pathfinder::port::{Bundle, PathNode, Port, TileID};
use aie_pathfinder::testutil::UniformMeshModel;

let model = UniformMeshModel::new();
let mut pf = Pathfinder::new(3, 3, &model, PathfinderConfig::default());
let src = PathNode::new(TileID::new(0, 0), Port::new(Bundle::Dma, 0));
let dst = PathNode::new(TileID::new(3, 3), Port::new(Bundle::Dma, 0));
pf.add_flow(src, dst, false).unwrap();
let (solution, report) = pf.find_paths(100);
assert!(report.converged());
assert!(solution.is_some());
```

*/

pub mod config;
pub mod dijkstra;
pub mod error;
pub mod flow;
pub mod grid;
pub mod matrix;
pub mod pathfinder;
pub mod port;
pub mod switch_settings;
pub mod target_model;
pub mod testutil;

pub use config::PathfinderConfig;
pub use error::PathfinderError;
pub use pathfinder::Pathfinder;
pub use switch_settings::{IterationReport, RoutingSolution, SwitchSettings, SwitchboxSetting};
