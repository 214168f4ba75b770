/*!

The routing graph: one `SwitchboxConnect` per intra-switchbox crossbar and
per inter-switchbox link, keyed by the ordered pair of tiles it connects.

See `Grid::build` for the construction rules: one intra record per tile
folding the switchbox's internal crossbar, plus one inter record per
existing orthogonal neighbor pair carrying the link's per-channel
capacity.

*/

use std::collections::BTreeMap;

use crate::matrix::Matrix;
use crate::port::{Bundle, Port, TileID, BUNDLE_ORDER};
use crate::target_model::TargetModel;

/// Legality of a single (srcPort,dstPort) arc inside a `SwitchboxConnect`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity
{
	/// No physical crossing exists, or it has been consumed by a fixed
	/// connection.
	Invalid,
	/// The arc may be used by the router.
	Available,
}

/// The arc-bundle for an ordered pair of tiles.
///
/// When `src_tile == dst_tile` this models the intra-switchbox crossbar;
/// otherwise it models the inter-switchbox link in that direction.
#[derive(Clone, Debug)]
pub struct SwitchboxConnect
{
	pub src_tile: TileID,
	pub dst_tile: TileID,
	pub src_ports: Vec<Port>,
	pub dst_ports: Vec<Port>,
	pub connectivity: Matrix<Connectivity>,
	pub used_capacity: Matrix<u32>,
	pub over_capacity: Matrix<u32>,
	pub packet_flow_count: Matrix<u32>,
	pub demand: Matrix<f64>,
}

impl SwitchboxConnect
{
	fn new(src_tile: TileID, dst_tile: TileID, src_ports: Vec<Port>, dst_ports: Vec<Port>) -> SwitchboxConnect
	{
		let rows = src_ports.len();
		let cols = dst_ports.len();
		SwitchboxConnect {
			src_tile,
			dst_tile,
			src_ports,
			dst_ports,
			connectivity: Matrix::constant(Connectivity::Invalid, rows, cols),
			used_capacity: Matrix::constant(0, rows, cols),
			over_capacity: Matrix::constant(0, rows, cols),
			packet_flow_count: Matrix::constant(0, rows, cols),
			demand: Matrix::constant(0.0, rows, cols),
		}
	}

	/// Index of `port` among `src_ports`, if present.
	pub fn src_index(&self, port: Port) -> Option<usize>
	{
		self.src_ports.iter().position(|&p| p == port)
	}

	/// Index of `port` among `dst_ports`, if present.
	pub fn dst_index(&self, port: Port) -> Option<usize>
	{
		self.dst_ports.iter().position(|&p| p == port)
	}

	/// Re-prices every available arc from its accumulated over-capacity
	/// history. Idempotent: calling this twice with unchanged
	/// `over_capacity` produces the same `demand`.
	pub fn update_demand(&mut self, overcap_coefficient: f64)
	{
		for (i, j) in self.connectivity.cells() {
			if *self.connectivity.get(i, j) == Connectivity::Available {
				let over = *self.over_capacity.get(i, j) as f64;
				*self.demand.get_mut(i, j) = 1.0 + overcap_coefficient * over;
			}
		}
	}

	/// Raises the price of a single arc immediately, so subsequent flows
	/// routed within the same iteration see it as expensive.
	pub fn bump_demand(&mut self, i: usize, j: usize, demand_bump: f64)
	{
		*self.demand.get_mut(i, j) += demand_bump;
	}
}

/// The routing graph: intra records for every in-range tile plus inter
/// records for every existing orthogonal neighbor pair.
#[derive(Clone, Debug)]
pub struct Grid
{
	pub max_col: u32,
	pub max_row: u32,
	connects: BTreeMap<(TileID, TileID), SwitchboxConnect>,
}

impl Grid
{
	/// Build the routing graph for a `(max_col+1) x (max_row+1)` device.
	pub fn build(max_col: u32, max_row: u32, target_model: &dyn TargetModel) -> Grid
	{
		let mut connects = BTreeMap::new();

		for row in 0..=max_row {
			for col in 0..=max_col {
				let mut max_channels: [usize; BUNDLE_ORDER.len()] = [0; BUNDLE_ORDER.len()];
				build_intraconnect(target_model, col, row, &mut max_channels, &mut connects);

				if row > 0 {
					build_interconnect(col, row, col, row - 1, Bundle::South, Bundle::North, &max_channels, &mut connects);
				}
				if row < max_row {
					build_interconnect(col, row, col, row + 1, Bundle::North, Bundle::South, &max_channels, &mut connects);
				}
				if col > 0 {
					build_interconnect(col, row, col - 1, row, Bundle::West, Bundle::East, &max_channels, &mut connects);
				}
				if col < max_col {
					build_interconnect(col, row, col + 1, row, Bundle::East, Bundle::West, &max_channels, &mut connects);
				}
			}
		}

		Grid { max_col, max_row, connects }
	}

	/// Looks up the arc-bundle connecting `src` to `dst`, if it exists.
	pub fn get(&self, src: TileID, dst: TileID) -> Option<&SwitchboxConnect>
	{
		self.connects.get(&(src, dst))
	}

	/// Mutable lookup, used while routing to update usage/demand.
	pub fn get_mut(&mut self, src: TileID, dst: TileID) -> Option<&mut SwitchboxConnect>
	{
		self.connects.get_mut(&(src, dst))
	}

	/// Every arc-bundle in the grid, in ascending `(TileID,TileID)` key
	/// order. Iterating a `BTreeMap` this way is what keeps the sweep over
	/// the whole grid (resetting usage, repricing demand, tallying illegal
	/// edges) producing the same sequence of `over_capacity` updates on
	/// every run against the same inputs.
	pub fn iter(&self) -> impl Iterator<Item = (&(TileID, TileID), &SwitchboxConnect)>
	{
		self.connects.iter()
	}

	/// Mutable variant of [`Grid::iter`].
	pub fn iter_mut(&mut self) -> impl Iterator<Item = (&(TileID, TileID), &mut SwitchboxConnect)>
	{
		self.connects.iter_mut()
	}
}

fn bundle_index(bundle: Bundle) -> usize
{
	BUNDLE_ORDER.iter().position(|&b| b == bundle).expect("BUNDLE_ORDER covers every Bundle variant")
}

fn build_intraconnect(
	target_model: &dyn TargetModel,
	col: u32,
	row: u32,
	max_channels: &mut [usize; BUNDLE_ORDER.len()],
	connects: &mut BTreeMap<(TileID, TileID), SwitchboxConnect>,
)
{
	let coords = TileID::new(col, row);
	let is_shim = target_model.is_shim_noc_or_pl_tile(col, row);

	let mut src_ports = Vec::new();
	let mut dst_ports = Vec::new();

	for &bundle in BUNDLE_ORDER.iter() {
		let mut channels = target_model.source_channels(col, row, bundle);
		if channels == 0 && is_shim {
			channels = target_model.shim_mux_source_channels(col, row, bundle);
		}
		for channel in 0..channels {
			src_ports.push(Port::new(bundle, channel as u32));
		}

		// `max_channels[bundle]` ends up holding the destination-side count,
		// not the source-side one computed just above: it feeds the inter-
		// record builder below, which sizes a link by how many channels the
		// far switchbox can accept on this bundle.
		let mut channels = target_model.dest_channels(col, row, bundle);
		if channels == 0 && is_shim {
			channels = target_model.shim_mux_dest_channels(col, row, bundle);
		}
		for channel in 0..channels {
			dst_ports.push(Port::new(bundle, channel as u32));
		}
		max_channels[bundle_index(bundle)] = channels;
	}

	let mut sb = SwitchboxConnect::new(coords, coords, src_ports, dst_ports);
	let shim_fallback_bundles = [Bundle::Dma, Bundle::Noc, Bundle::Plio];
	for i in 0..sb.src_ports.len() {
		for j in 0..sb.dst_ports.len() {
			let p_in = sb.src_ports[i];
			let p_out = sb.dst_ports[j];
			let legal = target_model.is_legal_tile_connection(col, row, p_in.bundle, p_in.channel, p_out.bundle, p_out.channel);
			let available = legal
				|| (is_shim && (shim_fallback_bundles.contains(&p_in.bundle) || shim_fallback_bundles.contains(&p_out.bundle)));
			*sb.connectivity.get_mut(i, j) = if available { Connectivity::Available } else { Connectivity::Invalid };
		}
	}
	connects.insert((coords, coords), sb);
}

fn build_interconnect(
	col: u32,
	row: u32,
	target_col: u32,
	target_row: u32,
	src_bundle: Bundle,
	dst_bundle: Bundle,
	max_channels: &[usize; BUNDLE_ORDER.len()],
	connects: &mut BTreeMap<(TileID, TileID), SwitchboxConnect>,
)
{
	let src_tile = TileID::new(col, row);
	let dst_tile = TileID::new(target_col, target_row);
	let channels = max_channels[bundle_index(src_bundle)];

	let mut src_ports = Vec::with_capacity(channels);
	let mut dst_ports = Vec::with_capacity(channels);
	for channel in 0..channels {
		src_ports.push(Port::new(src_bundle, channel as u32));
		dst_ports.push(Port::new(dst_bundle, channel as u32));
	}

	let mut sb = SwitchboxConnect::new(src_tile, dst_tile, src_ports, dst_ports);
	for i in 0..channels {
		*sb.connectivity.get_mut(i, i) = Connectivity::Available;
	}
	connects.insert((src_tile, dst_tile), sb);
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testutil::UniformMeshModel;

	#[test]
	fn single_tile_has_only_an_intra_record()
	{
		let model = UniformMeshModel::default();
		let grid = Grid::build(0, 0, &model);
		assert!(grid.get(TileID::new(0, 0), TileID::new(0, 0)).is_some());
		assert_eq!(grid.iter().count(), 1);
	}

	#[test]
	fn two_by_one_grid_has_matching_inter_records_both_ways()
	{
		let model = UniformMeshModel::default();
		let grid = Grid::build(1, 0, &model);
		// Two intra records, plus two inter records (east and west).
		assert_eq!(grid.iter().count(), 4);
		let east = grid.get(TileID::new(0, 0), TileID::new(1, 0)).unwrap();
		let west = grid.get(TileID::new(1, 0), TileID::new(0, 0)).unwrap();
		assert_eq!(east.src_ports[0].bundle, Bundle::East);
		assert_eq!(east.dst_ports[0].bundle, Bundle::West);
		assert_eq!(west.src_ports[0].bundle, Bundle::West);
		assert_eq!(west.dst_ports[0].bundle, Bundle::East);
		for i in 0..east.src_ports.len() {
			assert_eq!(*east.connectivity.get(i, i), Connectivity::Available);
		}
	}

	#[test]
	fn shim_tile_forces_dma_noc_plio_available()
	{
		let model = UniformMeshModel::shim_at(TileID::new(0, 0));
		let grid = Grid::build(0, 0, &model);
		let sb = grid.get(TileID::new(0, 0), TileID::new(0, 0)).unwrap();
		let i = sb.src_index(Port::new(Bundle::Dma, 0)).unwrap();
		let j = sb.dst_index(Port::new(Bundle::Noc, 0)).unwrap();
		assert_eq!(*sb.connectivity.get(i, j), Connectivity::Available);
	}
}
