/*!

A small deterministic [`TargetModel`] used by this crate's own tests and by
the integration suite under `tests/`. It is not a model of any real
device: every tile exposes the same two channels per bundle. Legality
follows one simple rule — a crossing is legal unless both sides are
non-directional endpoint bundles (e.g. `Dma -> Noc`), which mirrors real
switchboxes not offering a direct endpoint-to-endpoint crossbar path.
Shim tiles lift that restriction for `Dma`/`Noc`/`Plio`, same as the real
shim-mux workaround.

This module is public (not `#[cfg(test)]`-gated) so that `tests/*.rs`
integration files can build grids against it too.

*/

use std::collections::BTreeSet;

use crate::port::{Bundle, TileID};
use crate::target_model::TargetModel;

const STANDARD_CHANNELS: usize = 2;

fn is_directional(bundle: Bundle) -> bool
{
	matches!(bundle, Bundle::North | Bundle::South | Bundle::East | Bundle::West)
}

/// A uniform mesh fixture: every tile has the same 2 channels per bundle;
/// only legality (and, on shim tiles, the shim-mux workaround) varies.
#[derive(Clone, Debug, Default)]
pub struct UniformMeshModel
{
	shim_tiles: BTreeSet<TileID>,
}

impl UniformMeshModel
{
	/// A mesh with no shim tiles at all.
	pub fn new() -> UniformMeshModel
	{
		UniformMeshModel { shim_tiles: BTreeSet::new() }
	}

	/// A mesh where `tile` is a Shim NOC/PL tile.
	pub fn shim_at(tile: TileID) -> UniformMeshModel
	{
		let mut shim_tiles = BTreeSet::new();
		shim_tiles.insert(tile);
		UniformMeshModel { shim_tiles }
	}
}

impl TargetModel for UniformMeshModel
{
	fn source_channels(&self, _col: u32, _row: u32, _bundle: Bundle) -> usize
	{
		STANDARD_CHANNELS
	}

	fn dest_channels(&self, _col: u32, _row: u32, _bundle: Bundle) -> usize
	{
		STANDARD_CHANNELS
	}

	fn shim_mux_source_channels(&self, _col: u32, _row: u32, _bundle: Bundle) -> usize
	{
		// Never consulted: `source_channels` never returns 0 on this fixture.
		0
	}

	fn shim_mux_dest_channels(&self, _col: u32, _row: u32, _bundle: Bundle) -> usize
	{
		0
	}

	fn is_legal_tile_connection(
		&self,
		_col: u32,
		_row: u32,
		in_bundle: Bundle,
		_in_channel: u32,
		out_bundle: Bundle,
		_out_channel: u32,
	) -> bool
	{
		if in_bundle == out_bundle {
			return false;
		}
		is_directional(in_bundle) || is_directional(out_bundle)
	}

	fn is_shim_noc_or_pl_tile(&self, col: u32, row: u32) -> bool
	{
		self.shim_tiles.contains(&TileID::new(col, row))
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn endpoint_to_endpoint_is_illegal_off_shim()
	{
		let model = UniformMeshModel::new();
		assert!(!model.is_legal_tile_connection(0, 0, Bundle::Dma, 0, Bundle::Noc, 0));
	}

	#[test]
	fn endpoint_to_directional_is_legal_everywhere()
	{
		let model = UniformMeshModel::new();
		assert!(model.is_legal_tile_connection(0, 0, Bundle::Dma, 0, Bundle::East, 0));
	}

	#[test]
	fn only_the_registered_tile_is_shim()
	{
		let model = UniformMeshModel::shim_at(TileID::new(1, 1));
		assert!(model.is_shim_noc_or_pl_tile(1, 1));
		assert!(!model.is_shim_noc_or_pl_tile(0, 0));
	}
}
