//! Deterministic A* over one weighted view.
//!
//! # Admissibility
//!
//! The heuristic is the haversine distance to the goal, in metres — the
//! same unit as every view's cost function — multiplied by the graph's
//! `heuristic_scale`.  Because each view's cost is `length · (1 + k·risk)`
//! with `k, risk ≥ 0`, and the scale caps the bound at the worst
//! length-to-distance ratio of any edge, true remaining cost is never below
//! the scaled straight-line distance — even on graphs whose recorded
//! lengths dip below the geometric distance.  The bound is never inflated
//! by risk, so it is admissible on SAFEST and OPTIMIZED exactly as on
//! FASTEST.
//!
//! # Determinism
//!
//! Open-set entries are ordered by `(f, insertion_seq)`: among equal `f`
//! values the first-discovered entry wins, so repeated runs on identical
//! input expand nodes in the same order and return the same route.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use sr_core::{EdgeId, NodeId};
use sr_graph::{CostPolicy, GraphViews, RoadGraph};

use crate::route::Route;
use crate::{RouteError, RouteResult};

// ── Open-set entry ────────────────────────────────────────────────────────────

/// One frontier entry.  Ordered by `(f, seq)` only; `g` rides along for the
/// stale-entry check.
struct OpenEntry {
    f:    OrderedFloat<f64>,
    seq:  u64,
    node: NodeId,
    g:    f64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}
impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.f, self.seq).cmp(&(other.f, other.seq))
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

/// A* from `from` to `to` under `policy`'s cost function.
///
/// Returns a zero-cost single-node route immediately when `from == to`, and
/// [`RouteError::Unreachable`] when the open set exhausts without reaching
/// `to` — never a partial path.
pub fn find_route(
    graph:  &RoadGraph,
    views:  &GraphViews,
    policy: CostPolicy,
    from:   NodeId,
    to:     NodeId,
) -> RouteResult<Route> {
    if !graph.contains_node(from) {
        return Err(RouteError::NodeNotFound(from));
    }
    if !graph.contains_node(to) {
        return Err(RouteError::NodeNotFound(to));
    }

    if from == to {
        return Ok(Route {
            policy,
            nodes:          vec![from],
            edges:          vec![],
            total_cost:     0.0,
            total_length_m: 0.0,
        });
    }

    let goal_pos = graph.node_pos[to.index()];
    let scale = graph.heuristic_scale;
    let h = |n: NodeId| graph.node_pos[n.index()].distance_m(goal_pos) * scale;

    let n = graph.node_count();
    // dist[v] = best known cost to reach v under this view.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Min-heap: Reverse makes BinaryHeap (max) behave as min-heap over (f, seq).
    let mut heap: BinaryHeap<Reverse<OpenEntry>> = BinaryHeap::new();
    let mut seq = 0u64;
    heap.push(Reverse(OpenEntry {
        f:    OrderedFloat(h(from)),
        seq,
        node: from,
        g:    0.0,
    }));

    while let Some(Reverse(entry)) = heap.pop() {
        if entry.node == to {
            return Ok(reconstruct(graph, policy, &prev_edge, from, to, entry.g));
        }

        // Skip stale heap entries.
        if entry.g > dist[entry.node.index()] {
            continue;
        }

        for edge in graph.out_edges(entry.node) {
            let neighbor = graph.edge_to[edge.index()];
            let new_g = entry.g + views.cost(policy, edge);

            if new_g < dist[neighbor.index()] {
                dist[neighbor.index()] = new_g;
                prev_edge[neighbor.index()] = edge;
                seq += 1;
                heap.push(Reverse(OpenEntry {
                    f:    OrderedFloat(new_g + h(neighbor)),
                    seq,
                    node: neighbor,
                    g:    new_g,
                }));
            }
        }
    }

    Err(RouteError::Unreachable { from, to })
}

fn reconstruct(
    graph:      &RoadGraph,
    policy:     CostPolicy,
    prev_edge:  &[EdgeId],
    from:       NodeId,
    to:         NodeId,
    total_cost: f64,
) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = graph.edge_from[e.index()];
    }
    edges.reverse();
    debug_assert_eq!(cur, from);

    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(from);
    let mut total_length_m = 0.0;
    for &e in &edges {
        nodes.push(graph.edge_to[e.index()]);
        total_length_m += graph.edge_length_m[e.index()];
    }

    Route { policy, nodes, edges, total_cost, total_length_m }
}
