//! Minimum-time routing over the augmented (node, held clearance) state
//! space.
//!
//! Dijkstra with lazy deletion: the frontier is a min-heap that may hold
//! stale duplicate entries, and a best-known-time map finalizes each state
//! the first time it is popped. Traversal edges keep the held clearance and
//! cost the segment duration; each granting station adds a zero-cost
//! "upgrade" edge that rewrites only the clearance component. All weights
//! are non-negative, so the first pop of any state is optimal — in
//! particular the first pop of *any* state at the target node is the
//! answer, whatever clearance it arrived with.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Clearance, Graph, NodeId};

/// Entry in the frontier min-heap: one candidate arrival at a search state.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    time: f64,
    node: NodeId,
    held: Clearance,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.node == other.node && self.held == other.held
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse the time comparison so BinaryHeap (max-heap) pops the
        // smallest arrival time first. Validation keeps NaN out of the
        // graph, but order it totally anyway (NaN sinks to the bottom).
        // Ties fall back to node index and clearance discriminant for a
        // deterministic pop order; the tie order is incidental and cannot
        // change the optimal time.
        match (self.time.is_nan(), other.time.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => other
                .time
                .partial_cmp(&self.time)
                .unwrap_or(Ordering::Equal)
                .then_with(|| other.node.cmp(&self.node))
                .then_with(|| (other.held as u8).cmp(&(self.held as u8))),
        }
    }
}

/// Minimum travel time from `source` to `target`.
///
/// The traveler starts holding no clearance. A segment is traversable only
/// when it is ungated or its required clearance exactly matches the held
/// one; standing at a granting station, the traveler may set their held
/// clearance to that station's grant at zero cost (repeatable at other
/// stations, overwriting the previous clearance).
///
/// Returns `Ok(None)` when no route exists — that is a normal outcome, not
/// an error. `Err` is reserved for out-of-range endpoints; the graph itself
/// was validated at build time. The frontier and best-time map live and die
/// inside this call, so concurrent searches over one shared `&Graph` are
/// independent.
pub fn shortest_time(graph: &Graph, source: NodeId, target: NodeId) -> GraphResult<Option<f64>> {
    let node_count = graph.node_count();
    for endpoint in [source, target] {
        if endpoint >= node_count {
            return Err(GraphError::NodeOutOfRange { index: endpoint, node_count });
        }
    }

    let mut frontier: BinaryHeap<FrontierEntry> = BinaryHeap::new();
    frontier.push(FrontierEntry { time: 0.0, node: source, held: Clearance::None });

    // Best finalized arrival time per (node, held) state. Only ever written
    // on first pop, so entries are final once present.
    let mut best: HashMap<(NodeId, Clearance), f64> = HashMap::new();

    while let Some(FrontierEntry { time, node, held }) = frontier.pop() {
        if node == target {
            return Ok(Some(time));
        }

        // Stale duplicate left behind by lazy deletion.
        let known = best.get(&(node, held)).copied().unwrap_or(f64::INFINITY);
        if known <= time {
            continue;
        }
        best.insert((node, held), time);

        // Traversal edges: same clearance, segment duration added.
        for seg in graph.outgoing(node) {
            if !seg.passable(held) {
                continue;
            }
            let candidate = time + seg.duration;
            let known = best.get(&(seg.to, held)).copied().unwrap_or(f64::INFINITY);
            if candidate < known {
                frontier.push(FrontierEntry { time: candidate, node: seg.to, held });
            }
        }

        // Upgrade edge: adopt this station's grant at zero cost.
        let granted = graph.grant(node);
        if !granted.is_none() && granted != held {
            let known = best.get(&(node, granted)).copied().unwrap_or(f64::INFINITY);
            if time < known {
                frontier.push(FrontierEntry { time, node, held: granted });
            }
        }
    }

    log::debug!(
        "no route from {source} to {target} ({} states finalized)",
        best.len()
    );
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Clearance::{Blue, Green, Red};

    const NONE: Clearance = Clearance::None;

    fn graph(grants: &[Clearance], segments: &[(usize, usize, f64, Clearance)]) -> Graph {
        Graph::build(grants.to_vec(), segments.iter().copied()).unwrap()
    }

    #[test]
    fn test_upgrade_then_gated_segment() {
        // Adopt Red at station 1 for free, then take the Red-gated segment.
        let g = graph(
            &[NONE, Red, NONE],
            &[(0, 1, 5.0, NONE), (1, 2, 3.0, Red)],
        );
        assert_eq!(shortest_time(&g, 0, 2).unwrap(), Some(8.0));
    }

    #[test]
    fn test_gated_segment_never_enabled() {
        // Station 1 grants nothing, so the Red gate stays closed.
        let g = graph(
            &[NONE, NONE, NONE],
            &[(0, 1, 5.0, NONE), (1, 2, 3.0, Red)],
        );
        assert_eq!(shortest_time(&g, 0, 2).unwrap(), None);
    }

    #[test]
    fn test_ungated_direct() {
        let g = graph(&[NONE, NONE], &[(0, 1, 4.0, NONE)]);
        assert_eq!(shortest_time(&g, 0, 1).unwrap(), Some(4.0));
    }

    #[test]
    fn test_wrong_grant_does_not_satisfy_gate() {
        // Station 1 grants Red; the segment needs exactly Blue.
        let g = graph(
            &[NONE, Red, Blue],
            &[(0, 1, 2.0, NONE), (1, 2, 3.0, Blue)],
        );
        assert_eq!(shortest_time(&g, 0, 2).unwrap(), None);
    }

    #[test]
    fn test_parallel_routes_different_arrival_clearances() {
        // Two routes to station 3: an ungated one costing 10 and a
        // Green-gated one costing 6 after a free upgrade at station 1.
        // The arrival clearance differs per route; the minimum wins.
        let g = graph(
            &[NONE, Green, NONE, NONE],
            &[
                (0, 2, 4.0, NONE),
                (2, 3, 6.0, NONE),
                (0, 1, 2.0, NONE),
                (1, 3, 4.0, Green),
            ],
        );
        assert_eq!(shortest_time(&g, 0, 3).unwrap(), Some(6.0));
    }

    #[test]
    fn test_source_equals_target() {
        let g = graph(&[Red, NONE], &[(0, 1, 3.0, NONE)]);
        assert_eq!(shortest_time(&g, 0, 0).unwrap(), Some(0.0));
        // Holds even for an isolated node with no segments at all.
        let g = graph(&[NONE], &[]);
        assert_eq!(shortest_time(&g, 0, 0).unwrap(), Some(0.0));
    }

    #[test]
    fn test_unreachable_target() {
        let g = graph(&[NONE, NONE, NONE], &[(0, 1, 1.0, NONE)]);
        assert_eq!(shortest_time(&g, 0, 2).unwrap(), None);
    }

    #[test]
    fn test_out_of_range_endpoints() {
        let g = graph(&[NONE, NONE], &[(0, 1, 1.0, NONE)]);
        assert_eq!(
            shortest_time(&g, 2, 0).unwrap_err(),
            GraphError::NodeOutOfRange { index: 2, node_count: 2 }
        );
        assert_eq!(
            shortest_time(&g, 0, 7).unwrap_err(),
            GraphError::NodeOutOfRange { index: 7, node_count: 2 }
        );
        // Empty graph: even index 0 is out of range.
        let g = graph(&[], &[]);
        assert!(shortest_time(&g, 0, 0).is_err());
    }

    #[test]
    fn test_gated_detour_beats_ungated_direct() {
        // Direct ungated route costs 10; detouring through the Red grant
        // costs 1 + 0 + 2 + 3 = 6.
        let g = graph(
            &[NONE, Red, NONE, NONE],
            &[
                (0, 3, 10.0, NONE),
                (0, 1, 1.0, NONE),
                (1, 2, 2.0, Red),
                (2, 3, 3.0, Red),
            ],
        );
        assert_eq!(shortest_time(&g, 0, 3).unwrap(), Some(6.0));
    }

    #[test]
    fn test_clearance_overwritten_at_later_station() {
        // The only route needs Red for the first gate and Blue for the
        // second; the Blue grant overwrites the held Red en route.
        let g = graph(
            &[Red, NONE, Blue, NONE],
            &[
                (0, 1, 1.0, Red),
                (1, 2, 1.0, NONE),
                (2, 3, 1.0, Blue),
            ],
        );
        assert_eq!(shortest_time(&g, 0, 3).unwrap(), Some(3.0));
    }

    #[test]
    fn test_upgrade_not_taken_when_useless() {
        // A grant is available but the optimal route ignores it.
        let g = graph(
            &[Green, NONE],
            &[(0, 1, 2.0, NONE)],
        );
        assert_eq!(shortest_time(&g, 0, 1).unwrap(), Some(2.0));
    }

    #[test]
    fn test_parallel_segments_take_cheaper() {
        let g = graph(
            &[Blue, NONE],
            &[(0, 1, 9.0, NONE), (0, 1, 4.0, Blue), (0, 1, 7.0, NONE)],
        );
        assert_eq!(shortest_time(&g, 0, 1).unwrap(), Some(4.0));
    }

    #[test]
    fn test_self_loop_does_not_affect_result() {
        let g = graph(
            &[NONE, NONE],
            &[(0, 0, 1.0, NONE), (0, 1, 5.0, NONE)],
        );
        assert_eq!(shortest_time(&g, 0, 1).unwrap(), Some(5.0));
    }

    #[test]
    fn test_zero_duration_cycle_terminates() {
        // 0 → 1 → 0 at zero cost plus an exit; must terminate and still
        // find the exit.
        let g = graph(
            &[NONE, NONE, NONE],
            &[
                (0, 1, 0.0, NONE),
                (1, 0, 0.0, NONE),
                (1, 2, 3.0, NONE),
            ],
        );
        assert_eq!(shortest_time(&g, 0, 2).unwrap(), Some(3.0));
    }

    #[test]
    fn test_gate_on_segment_out_of_source() {
        // Source grants Blue; its only outgoing segment needs Blue.
        let g = graph(&[Blue, NONE], &[(0, 1, 2.0, Blue)]);
        assert_eq!(shortest_time(&g, 0, 1).unwrap(), Some(2.0));
    }

    #[test]
    fn test_deterministic_across_runs() {
        let g = graph(
            &[NONE, Red, Blue, NONE],
            &[
                (0, 1, 1.0, NONE),
                (1, 2, 1.0, Red),
                (2, 3, 1.0, Blue),
                (0, 3, 9.0, NONE),
            ],
        );
        let first = shortest_time(&g, 0, 3).unwrap();
        let second = shortest_time(&g, 0, 3).unwrap();
        assert_eq!(first, second);

        let g = graph(&[NONE, NONE], &[]);
        assert_eq!(shortest_time(&g, 0, 1).unwrap(), None);
        assert_eq!(shortest_time(&g, 0, 1).unwrap(), None);
    }

    #[test]
    fn test_frontier_pops_smallest_time_first() {
        let mut heap = BinaryHeap::new();
        for (time, node) in [(5.0, 0), (1.0, 1), (3.0, 2)] {
            heap.push(FrontierEntry { time, node, held: NONE });
        }
        assert_eq!(heap.pop().unwrap().time, 1.0);
        assert_eq!(heap.pop().unwrap().time, 3.0);
        assert_eq!(heap.pop().unwrap().time, 5.0);
    }

    #[test]
    fn test_frontier_nan_sinks() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry { time: f64::NAN, node: 0, held: NONE });
        heap.push(FrontierEntry { time: 2.0, node: 1, held: NONE });
        assert_eq!(heap.pop().unwrap().node, 1);
    }
}
