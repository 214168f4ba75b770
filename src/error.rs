/*!

Error types for the pathfinder crate.

Errors here are small hand-written enums with manual `Display` impls rather
than a derive-macro error type: there are only two failure kinds, neither
carries a source error to chain, and a hand-rolled impl keeps the messages
exactly as specific as callers need.

*/

use std::fmt;

use crate::port::{Port, TileID};

/// Everything that can go wrong while building or using a [`Pathfinder`](crate::pathfinder::Pathfinder).
///
/// Invariant violations inside the algorithm itself (a port index that
/// should always be found but isn't) are not represented here: those
/// indicate corruption of the routing graph rather than a caller mistake,
/// and are reported via `panic!` instead.
#[derive(Clone, Debug, PartialEq)]
pub enum PathfinderError
{
	/// `add_fixed_connection` was given a (src,dst) port pair that does not
	/// correspond to any `AVAILABLE` arc in the named switchbox's intra
	/// record.
	FixedConnectionConflict
	{
		switchbox: TileID,
		src: Port,
		dst: Port,
	},
	/// A second `add_flow` call for an already-registered source disagreed
	/// with the first registration on whether the flow is a packet flow.
	FlowKindMismatch
	{
		switchbox: TileID,
		port: Port,
	},
}

impl fmt::Display for PathfinderError
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		match self {
			PathfinderError::FixedConnectionConflict { switchbox, src, dst } => write!(
				f,
				"switchbox ({},{}): fixed connection {:?} -> {:?} does not match any available arc",
				switchbox.col, switchbox.row, src, dst,
			),
			PathfinderError::FlowKindMismatch { switchbox, port } => write!(
				f,
				"flow source ({},{}) port {:?} was re-registered with a different packet/circuit kind",
				switchbox.col, switchbox.row, port,
			),
		}
	}
}

impl std::error::Error for PathfinderError {}
