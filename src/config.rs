/*!

Tunable constants for the negotiated-congestion router.

The `update_demand`/`bump_demand` pricing formulas read a handful of
coefficients rather than hard-coded literals, so a caller can trade off
convergence speed against detour aggressiveness without forking the
router. This module is a plain struct rather than a parsed configuration
file since there is no experiment-sweep description language in this
crate to parse it from.

*/

/// Default circuit capacity per arc. Circuit flows never share a channel.
pub const MAX_CIRCUIT_STREAM_CAPACITY: u32 = 1;

/// Default packet capacity per arc: this many packet flows may share one channel.
pub const MAX_PACKET_STREAM_CAPACITY: u32 = 4;

/// Tunable knobs driving grid capacity and demand pricing.
///
/// `Default::default()` matches a typical device (circuit capacity 1,
/// packet capacity 4).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathfinderConfig
{
	/// How many units a single arc can carry for circuit flows before it is
	/// considered over capacity.
	pub max_circuit_stream_capacity: u32,
	/// How many packet flows may share a single consumed channel on an arc.
	pub max_packet_stream_capacity: u32,
	/// Coefficient applied to historical `over_capacity` when pricing an arc
	/// at the start of an iteration. Must be a small positive constant;
	/// larger values push congested arcs out of consideration faster at the
	/// cost of more aggressive detours.
	pub overcap_coefficient: f64,
	/// Amount added to an arc's demand the instant it saturates mid-iteration,
	/// so later flows in the same iteration see it as expensive.
	pub demand_bump: f64,
	/// Hard cap on rip-up-and-reroute iterations before `find_paths` gives up.
	pub max_iterations: usize,
}

impl Default for PathfinderConfig
{
	fn default() -> PathfinderConfig
	{
		PathfinderConfig {
			max_circuit_stream_capacity: MAX_CIRCUIT_STREAM_CAPACITY,
			max_packet_stream_capacity: MAX_PACKET_STREAM_CAPACITY,
			overcap_coefficient: 1.0,
			demand_bump: 1000.0,
			max_iterations: 1000,
		}
	}
}
