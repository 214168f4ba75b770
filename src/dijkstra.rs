/*!

Single-source shortest paths over the (tile,port) routing graph, weighted
by current per-arc demand.

Uses a `BinaryHeap`-backed lazy-deletion Dijkstra rather than a bespoke
indexed d-ary heap with decrease-key support: with non-negative weights,
skipping stale heap entries once a node is finalized gives the same
result as eager decrease-key, and `BinaryHeap` plus a total order on
`PathNode` for tie-breaking is the idiomatic way to write this in Rust.

*/

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use itertools::Itertools;

use crate::grid::{Connectivity, Grid};
use crate::port::{connecting_bundle, Bundle, PathNode, Port, TileID};

/// `(tile above, tile left, tile below, tile right)` deltas paired with the
/// bundle label the neighbor tuple is keyed by. The geometric-left neighbor
/// is paired with bundle `East`, not `West`, because `East` is the
/// destination bundle of the inter-record that points at it — these labels
/// follow the inter-record's own direction naming, not compass direction.
const NEIGHBOR_DIRECTIONS: [(i64, i64, Bundle); 4] =
	[(0, -1, Bundle::North), (-1, 0, Bundle::East), (0, 1, Bundle::South), (1, 0, Bundle::West)];

fn build_adjacency(grid: &Grid, node: PathNode) -> Vec<PathNode>
{
	let mut out = Vec::new();

	if let Some(sb) = grid.get(node.sb, node.sb) {
		if let Some(i) = sb.src_index(node.port) {
			for j in 0..sb.dst_ports.len() {
				if *sb.connectivity.get(i, j) == Connectivity::Available {
					out.push(PathNode::new(node.sb, sb.dst_ports[j]));
				}
			}
		}
	}

	for &(dcol, drow, label) in NEIGHBOR_DIRECTIONS.iter() {
		let required = connecting_bundle(label).expect("directional bundles always have a connecting bundle");
		if node.port.bundle != required {
			continue;
		}
		let ncol = node.sb.col as i64 + dcol;
		let nrow = node.sb.row as i64 + drow;
		if ncol < 0 || nrow < 0 {
			continue;
		}
		let neighbor_tile = TileID::new(ncol as u32, nrow as u32);
		if let Some(sb) = grid.get(node.sb, neighbor_tile) {
			let candidate = Port::new(label, node.port.channel);
			if sb.dst_index(candidate).is_some() {
				out.push(PathNode::new(neighbor_tile, candidate));
			}
		}
	}

	// Sorted and deduplicated so that the Dijkstra tie-breaking is driven
	// entirely by `PathNode`'s total order, with no duplicate relaxations.
	out.into_iter().sorted().dedup().collect()
}

#[derive(Clone, Copy, Debug)]
struct HeapEntry
{
	distance: f64,
	node: PathNode,
}

impl PartialEq for HeapEntry
{
	fn eq(&self, other: &Self) -> bool
	{
		self.distance == other.distance && self.node == other.node
	}
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry
{
	fn partial_cmp(&self, other: &Self) -> Option<Ordering>
	{
		Some(self.cmp(other))
	}
}

impl Ord for HeapEntry
{
	// Reversed so that `BinaryHeap` (a max-heap) pops the smallest distance
	// first; ties are broken by `PathNode`'s total order for determinism.
	fn cmp(&self, other: &Self) -> Ordering
	{
		other
			.distance
			.partial_cmp(&self.distance)
			.unwrap_or(Ordering::Equal)
			.then_with(|| other.node.cmp(&self.node))
	}
}

/// Runs single-source Dijkstra from `src`, returning a predecessor map
/// covering every node reachable from `src` (excluding `src` itself).
pub fn dijkstra_shortest_paths(grid: &Grid, src: PathNode) -> BTreeMap<PathNode, PathNode>
{
	let mut distance: BTreeMap<PathNode, f64> = BTreeMap::new();
	let mut preds: BTreeMap<PathNode, PathNode> = BTreeMap::new();
	let mut finalized: BTreeSet<PathNode> = BTreeSet::new();
	let mut adjacency_cache: BTreeMap<PathNode, Vec<PathNode>> = BTreeMap::new();
	let mut heap = BinaryHeap::new();

	distance.insert(src, 0.0);
	heap.push(HeapEntry { distance: 0.0, node: src });

	while let Some(HeapEntry { distance: d, node }) = heap.pop() {
		if finalized.contains(&node) {
			continue;
		}
		finalized.insert(node);

		let neighbors = adjacency_cache.entry(node).or_insert_with(|| build_adjacency(grid, node)).clone();
		for dest in neighbors {
			if finalized.contains(&dest) {
				continue;
			}
			let sb = grid.get(node.sb, dest.sb).expect("adjacency only yields existing arcs");
			let i = sb.src_index(node.port).expect("adjacency only yields ports present in the arc");
			let j = sb.dst_index(dest.port).expect("adjacency only yields ports present in the arc");
			let weight = *sb.demand.get(i, j);
			let candidate = d + weight;

			let improves = match distance.get(&dest) {
				None => true,
				Some(&current) => candidate < current,
			};
			if improves {
				distance.insert(dest, candidate);
				preds.insert(dest, node);
				heap.push(HeapEntry { distance: candidate, node: dest });
			}
		}
	}

	preds
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testutil::UniformMeshModel;

	#[test]
	fn straight_line_path_exists()
	{
		let model = UniformMeshModel::default();
		let grid = Grid::build(1, 0, &model);
		let mut grid = grid;
		for (_, sb) in grid.iter_mut() {
			sb.update_demand(1.0);
		}
		let src = PathNode::new(TileID::new(0, 0), Port::new(Bundle::East, 0));
		let preds = dijkstra_shortest_paths(&grid, src);
		let dst = PathNode::new(TileID::new(1, 0), Port::new(Bundle::West, 0));
		assert_eq!(preds.get(&dst), Some(&src));
	}

	#[test]
	fn unreachable_node_is_absent_from_preds()
	{
		let model = UniformMeshModel::default();
		let grid = Grid::build(0, 0, &model);
		let src = PathNode::new(TileID::new(0, 0), Port::new(Bundle::Core, 0));
		let preds = dijkstra_shortest_paths(&grid, src);
		let never = PathNode::new(TileID::new(0, 0), Port::new(Bundle::Ctrl, 99));
		assert_eq!(preds.get(&never), None);
	}
}
