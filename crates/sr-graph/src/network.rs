//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length_m`) are sorted by
//! source node and indexed by `EdgeId`.  Iteration over a node's outgoing
//! edges is therefore a contiguous memory scan — ideal for the A* inner loop.
//!
//! The CSR sort is **stable**: parallel edges between the same node pair keep
//! their insertion order, so `EdgeId` assignment is deterministic and the
//! lowest-identifier tie-break rule used elsewhere is reproducible across
//! builds.
//!
//! # Mutability
//!
//! Nodes and edges are immutable once built.  Risk contributions are *not*
//! stored on the graph — they live in a separate per-edge array so that the
//! weighted views can be rebuilt and swapped without touching the topology.

use sr_core::{BoundingBox, EdgeId, GeoPoint, NodeId};

use crate::{GraphError, GraphResult};

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Directed road graph in CSR format.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoadGraphBuilder`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge.  Redundant with CSR but required for
    /// efficient route reconstruction (trace `prev_edge` back to source).
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Physical length of each edge in metres.
    pub edge_length_m: Vec<f64>,

    /// Largest factor in `[0, 1]` such that `factor × straight-line
    /// distance` between an edge's endpoints never exceeds that edge's
    /// length, over all edges.  1.0 for ordinary road data (recorded
    /// lengths at or above the geometric distance); smaller when some
    /// length dips below it.  Informed search multiplies its
    /// distance-to-goal bound by this factor so the bound stays a true
    /// lower bound on any built graph.
    pub heuristic_scale: f64,
}

impl RoadGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// `true` if `node` indexes an existing node.
    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Smallest geographic box containing every node, or `None` if empty.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::around(self.node_pos.iter().copied())
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and directed edges in any order.  `build()`
/// validates every coordinate and length, stably sorts edges by source node,
/// and constructs the CSR arrays.
///
/// # Example
///
/// ```
/// use sr_core::GeoPoint;
/// use sr_graph::RoadGraphBuilder;
///
/// let mut b = RoadGraphBuilder::new();
/// let a = b.add_node(GeoPoint::new(18.5204, 73.8567));
/// let c = b.add_node(GeoPoint::new(18.5310, 73.8446));
/// b.add_road(a, c, 1_200.0); // 1.2 km, both directions
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // bidirectional
/// ```
pub struct RoadGraphBuilder {
    nodes:     Vec<GeoPoint>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and edges to reduce
    /// reallocations when bulk-loading a city-scale network.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge from `from` to `to` with physical length in
    /// metres.  Parallel edges between the same node pair are permitted and
    /// remain independent.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64) {
        self.raw_edges.push(RawEdge { from, to, length_m });
    }

    /// Convenience: add edges in **both directions** for an undirected road
    /// segment (the common case for most road types).
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64) {
        self.add_directed_edge(a, b, length_m);
        self.add_directed_edge(b, a, length_m);
    }

    /// Convenience: add both directions with length derived from the node
    /// positions (haversine).
    pub fn add_road_measured(&mut self, a: NodeId, b: NodeId) {
        let length_m = self.nodes[a.index()].distance_m(self.nodes[b.index()]);
        self.add_road(a, b, length_m);
    }

    /// Look up the position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadGraph`].
    ///
    /// Fails with [`GraphError::InvalidInput`] on a non-finite coordinate,
    /// a negative or non-finite length, or an edge referencing a node that
    /// was never added.
    ///
    /// Time complexity: O(E log E) for the stable edge sort, where E = edges.
    pub fn build(self) -> GraphResult<RoadGraph> {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // ── Validate ──────────────────────────────────────────────────────
        for (i, pos) in self.nodes.iter().enumerate() {
            if !pos.is_valid() {
                return Err(GraphError::InvalidInput(format!(
                    "node {i} has invalid coordinate {pos}"
                )));
            }
        }
        for (i, e) in self.raw_edges.iter().enumerate() {
            if e.from.index() >= node_count || e.to.index() >= node_count {
                return Err(GraphError::InvalidInput(format!(
                    "edge {i} references missing node ({} -> {})",
                    e.from, e.to
                )));
            }
            if !e.length_m.is_finite() || e.length_m < 0.0 {
                return Err(GraphError::InvalidInput(format!(
                    "edge {i} ({} -> {}) has invalid length {}",
                    e.from, e.to, e.length_m
                )));
            }
        }

        // ── Stable sort by source node for CSR construction ───────────────
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        // ── Heuristic scale ───────────────────────────────────────────────
        //
        // An edge whose recorded length is below the straight-line distance
        // between its endpoints would make a raw distance-to-goal bound
        // overestimate the remaining cost.  Track the worst ratio so search
        // stays exact on every graph this builder accepts.
        let mut heuristic_scale = 1.0f64;
        for e in &raw {
            let d = self.nodes[e.from.index()].distance_m(self.nodes[e.to.index()]);
            if d > 0.0 && e.length_m < d {
                heuristic_scale = heuristic_scale.min(e.length_m / d);
            }
        }

        let edge_from:     Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>    = raw.iter().map(|e| e.length_m).collect();

        // ── Build CSR row pointer (node_out_start) ────────────────────────
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        Ok(RoadGraph {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            heuristic_scale,
        })
    }
}

impl Default for RoadGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
