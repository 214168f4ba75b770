/*!

The negotiated-congestion router itself: owns the grid and the flow
registry, and iterates rip-up-and-reroute passes until every arc is
within capacity or the iteration budget runs out.

*/

use std::collections::{BTreeMap, BTreeSet};

use crate::config::PathfinderConfig;
use crate::dijkstra::dijkstra_shortest_paths;
use crate::error::PathfinderError;
use crate::flow::FlowRegistry;
use crate::grid::{Connectivity, Grid};
use crate::port::{PathNode, Port, TileID};
use crate::switch_settings::{IterationReport, RoutingSolution, SwitchSettings};
use crate::target_model::TargetModel;

/// Congestion-aware router over a fixed tile grid.
///
/// Construct with [`Pathfinder::new`], register fixed connections and
/// flows, then call [`Pathfinder::find_paths`].
#[derive(Clone, Debug)]
pub struct Pathfinder
{
	grid: Grid,
	flows: FlowRegistry,
	config: PathfinderConfig,
}

impl Pathfinder
{
	pub fn new(max_col: u32, max_row: u32, target_model: &dyn TargetModel, config: PathfinderConfig) -> Pathfinder
	{
		Pathfinder { grid: Grid::build(max_col, max_row, target_model), flows: FlowRegistry::new(), config }
	}

	pub fn config(&self) -> PathfinderConfig
	{
		self.config
	}

	pub fn grid(&self) -> &Grid
	{
		&self.grid
	}

	pub fn flows(&self) -> &FlowRegistry
	{
		&self.flows
	}

	/// Registers a flow edge; see [`FlowRegistry::add_flow`] for coalescing
	/// behavior. Registration order is preserved and affects routing (see
	/// [`Pathfinder::find_paths`]).
	pub fn add_flow(&mut self, src: PathNode, dst: PathNode, is_packet: bool) -> Result<(), PathfinderError>
	{
		self.flows.add_flow(src, dst, is_packet)
	}

	/// Marks `src -> dst` inside the switchbox at `switchbox` as already
	/// physically connected, removing it from the pool of arcs the router
	/// may assign. Errors if the arc doesn't exist or has already been
	/// claimed by an earlier fixed connection.
	pub fn add_fixed_connection(&mut self, switchbox: TileID, src: Port, dst: Port) -> Result<(), PathfinderError>
	{
		let conflict = || PathfinderError::FixedConnectionConflict { switchbox, src, dst };
		let sb = self.grid.get_mut(switchbox, switchbox).ok_or_else(conflict)?;
		let i = sb.src_index(src).ok_or_else(conflict)?;
		let j = sb.dst_index(dst).ok_or_else(conflict)?;
		if *sb.connectivity.get(i, j) != Connectivity::Available {
			return Err(conflict());
		}
		*sb.connectivity.get_mut(i, j) = Connectivity::Invalid;
		Ok(())
	}

	/// Runs the negotiated-congestion loop for up to `max_iterations`
	/// passes. Each pass first reprices every arc from its accumulated
	/// over-capacity history, then rips up and reroutes every registered
	/// flow (in registration order, via single-source Dijkstra weighted by
	/// the freshly repriced arc demand), then sweeps the grid once more to
	/// tally this pass's illegal edges. Returns the last attempted solution
	/// alongside a [`IterationReport`]; the solution is only `Some` if the
	/// loop actually converged to a legal assignment within the budget.
	pub fn find_paths(&mut self, max_iterations: usize) -> (Option<RoutingSolution>, IterationReport)
	{
		let mut iterations_used = 0;
		let mut last_illegal_edges = 0;
		let mut last_solution: Option<RoutingSolution> = None;

		for iteration in 0..max_iterations {
			iterations_used = iteration + 1;

			for (_, sb) in self.grid.iter_mut() {
				sb.update_demand(self.config.overcap_coefficient);
			}

			for (_, sb) in self.grid.iter_mut() {
				for (i, j) in sb.used_capacity.cells() {
					*sb.used_capacity.get_mut(i, j) = 0;
					*sb.packet_flow_count.get_mut(i, j) = 0;
				}
			}

			let mut solution: RoutingSolution = BTreeMap::new();

			for flow in self.flows.flows() {
				let preds = dijkstra_shortest_paths(&self.grid, flow.src);

				let mut switch_settings = SwitchSettings::new();
				switch_settings.set_src(flow.src.sb, flow.src.port);
				let mut processed: BTreeSet<PathNode> = BTreeSet::new();
				processed.insert(flow.src);

				for &dst in &flow.dsts {
					switch_settings.add_dst(dst.sb, dst.port);

					// Trace backwards until a vertex already processed (by an
					// earlier destination of this same flow, or the flow's own
					// source) is reached, so a shared prefix is only billed once.
					let mut edges = Vec::new();
					let mut current = dst;
					let mut reached_processed = processed.contains(&current);
					while !reached_processed {
						match preds.get(&current) {
							Some(&prev) => {
								edges.push((prev, current));
								current = prev;
								reached_processed = processed.contains(&current);
							}
							None => break,
						}
					}
					if !reached_processed {
						// No path exists from flow.src to dst in the current
						// demand landscape; nothing to record this pass.
						continue;
					}

					for &(pred, curr) in edges.iter().rev() {
						let sb = self
							.grid
							.get_mut(pred.sb, curr.sb)
							.expect("a traced path edge always corresponds to an existing arc");
						let i = sb.src_index(pred.port).expect("path edge ports are always present in their arc");
						let j = sb.dst_index(curr.port).expect("path edge ports are always present in their arc");

						if flow.is_packet {
							*sb.packet_flow_count.get_mut(i, j) += 1;
							if *sb.packet_flow_count.get(i, j) >= self.config.max_packet_stream_capacity {
								*sb.packet_flow_count.get_mut(i, j) = 0;
								*sb.used_capacity.get_mut(i, j) += 1;
							}
						} else {
							*sb.packet_flow_count.get_mut(i, j) = 0;
							*sb.used_capacity.get_mut(i, j) += 1;
						}
						if *sb.used_capacity.get(i, j) >= self.config.max_circuit_stream_capacity {
							sb.bump_demand(i, j, self.config.demand_bump);
						}

						if pred.sb == curr.sb {
							switch_settings.set_src(pred.sb, pred.port);
							switch_settings.add_dst(pred.sb, curr.port);
						}
					}
					for &(pred, curr) in &edges {
						processed.insert(pred);
						processed.insert(curr);
					}
				}

				solution.insert(flow.src, switch_settings);
			}

			let mut illegal_edges = 0;
			for (_, sb) in self.grid.iter_mut() {
				for (i, j) in sb.used_capacity.cells() {
					// A partial packet group that never reached the sharing
					// limit still occupies one channel.
					if *sb.packet_flow_count.get(i, j) > 0 {
						*sb.packet_flow_count.get_mut(i, j) = 0;
						*sb.used_capacity.get_mut(i, j) += 1;
					}
					if *sb.used_capacity.get(i, j) > self.config.max_circuit_stream_capacity {
						*sb.over_capacity.get_mut(i, j) += 1;
						illegal_edges += 1;
					}
				}
			}

			last_illegal_edges = illegal_edges;
			last_solution = Some(solution);

			if illegal_edges == 0 {
				break;
			}
		}

		let report = IterationReport { iterations_used, illegal_edges: last_illegal_edges };
		let solution = if report.converged() { last_solution } else { None };
		(solution, report)
	}

	/// Convenience wrapper around [`Pathfinder::find_paths`] using the
	/// configured default iteration budget.
	pub fn find_paths_to_convergence(&mut self) -> (Option<RoutingSolution>, IterationReport)
	{
		let max_iterations = self.config.max_iterations;
		self.find_paths(max_iterations)
	}
}
