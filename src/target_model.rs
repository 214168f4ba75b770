/*!

The target-model adapter: a read-only oracle describing one device's
switchbox geometry and legality rules. The grid builder is the only
consumer; the `Pathfinder` itself never retains a reference to it past
grid construction.

*/

use crate::port::Bundle;

/// Describes, for a single device, how many ports each switchbox exposes
/// per bundle and which intra-switchbox connections are legal.
///
/// Implementations are typically in-memory tables generated from a device
/// database, but nothing here requires that; the trait only specifies the
/// six queries the grid builder issues.
pub trait TargetModel
{
	/// Number of switchbox source (input) channels for `bundle` at `(col,row)`.
	fn source_channels(&self, col: u32, row: u32, bundle: Bundle) -> usize;
	/// Number of switchbox destination (output) channels for `bundle` at `(col,row)`.
	fn dest_channels(&self, col: u32, row: u32, bundle: Bundle) -> usize;
	/// Shim-mux fallback source channel count, consulted only when
	/// `source_channels` returns 0 on a Shim NOC/PL tile.
	fn shim_mux_source_channels(&self, col: u32, row: u32, bundle: Bundle) -> usize;
	/// Shim-mux fallback destination channel count, consulted only when
	/// `dest_channels` returns 0 on a Shim NOC/PL tile.
	fn shim_mux_dest_channels(&self, col: u32, row: u32, bundle: Bundle) -> usize;
	/// Whether crossing from `(in_bundle,in_channel)` to `(out_bundle,out_channel)`
	/// is legal inside the switchbox at `(col,row)`.
	fn is_legal_tile_connection(
		&self,
		col: u32,
		row: u32,
		in_bundle: Bundle,
		in_channel: u32,
		out_bundle: Bundle,
		out_channel: u32,
	) -> bool;
	/// Whether `(col,row)` is a Shim NOC or Shim PL tile, which unlocks the
	/// shim-mux fallback channel counts and the DMA/NOC/PLIO availability
	/// workaround in the grid builder.
	fn is_shim_noc_or_pl_tile(&self, col: u32, row: u32) -> bool;
}
