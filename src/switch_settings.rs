/*!

The output of a successful routing run: for every flow (keyed by its
source [`PathNode`]), the crossbar settings for every switchbox that flow
touches.

*/

use std::collections::{BTreeMap, BTreeSet};

use crate::port::{PathNode, Port, TileID};

/// The crossbar setting a single flow imposes on a single switchbox: the
/// input port it arrived on (if this switchbox folds an intra-switchbox
/// crossing for this flow) and the set of output ports it must reach.
///
/// `src` is `None` when a switchbox only appears as a destination reached
/// directly via an inter-switchbox link with no further intra-switchbox
/// crossing recorded for this flow (the arriving port is already the
/// flow's attachment point at that tile).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwitchboxSetting
{
	pub src: Option<Port>,
	pub dsts: BTreeSet<Port>,
}

/// One flow's crossbar settings, one entry per switchbox it touches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwitchSettings
{
	entries: BTreeMap<TileID, SwitchboxSetting>,
}

impl SwitchSettings
{
	pub fn new() -> SwitchSettings
	{
		SwitchSettings { entries: BTreeMap::new() }
	}

	/// Records the input port this flow arrives on at `tile`.
	pub fn set_src(&mut self, tile: TileID, port: Port)
	{
		self.entries.entry(tile).or_default().src = Some(port);
	}

	/// Records that this flow must reach `port` out of `tile`.
	pub fn add_dst(&mut self, tile: TileID, port: Port)
	{
		self.entries.entry(tile).or_default().dsts.insert(port);
	}

	/// The crossbar setting recorded for `tile`, if this flow touches it.
	pub fn get(&self, tile: TileID) -> Option<&SwitchboxSetting>
	{
		self.entries.get(&tile)
	}

	pub fn contains_tile(&self, tile: TileID) -> bool
	{
		self.entries.contains_key(&tile)
	}

	/// Every (tile, setting) pair, in ascending tile order.
	pub fn iter(&self) -> impl Iterator<Item = (&TileID, &SwitchboxSetting)>
	{
		self.entries.iter()
	}

	pub fn is_empty(&self) -> bool
	{
		self.entries.is_empty()
	}
}

/// A complete routing solution: one [`SwitchSettings`] per distinct flow
/// source, keyed by that flow's source [`PathNode`]. Keying by source
/// rather than by, say, an opaque flow index lets a caller look up a
/// flow's settings without having to keep its own parallel index around.
pub type RoutingSolution = BTreeMap<PathNode, SwitchSettings>;

/// Diagnostics from a `Pathfinder::find_paths` run: enough for a caller to
/// decide whether to trust the result and, if not, how close it came.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IterationReport
{
	/// Number of negotiated-congestion iterations actually run (<=
	/// the caller-supplied cap).
	pub iterations_used: usize,
	/// Number of (switchbox, input port, output port) crossings in the
	/// final solution that remain over capacity. Zero means the run
	/// converged to a legal solution before exhausting its iteration
	/// budget; non-zero means the cap was hit with illegal edges still
	/// present.
	pub illegal_edges: usize,
}

impl IterationReport
{
	pub fn converged(&self) -> bool
	{
		self.illegal_edges == 0
	}
}
