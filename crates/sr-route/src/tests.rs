//! Unit tests for sr-route.
//!
//! Networks are hand-crafted with explicit edge lengths that are never
//! shorter than the straight-line distance between their endpoints, so the
//! haversine heuristic stays admissible exactly as it does on real road
//! data.

#[cfg(test)]
mod helpers {
    use sr_core::{CrimeId, GeoPoint, NodeId};
    use sr_graph::{GraphViews, RoadGraph, RoadGraphBuilder};
    use sr_risk::CrimeRecord;

    pub const K_SAFE: f64 = 2.0;
    pub const K_OPT:  f64 = 0.5;

    /// Grid network (~105 m node spacing, lengths padded above straight-line):
    ///
    ///   0:(18.5200, 73.8500)  1:(18.5200, 73.8510)  2:(18.5200, 73.8520)
    ///   3:(18.5210, 73.8500)                        4:(18.5210, 73.8520)
    ///
    /// Roads: 0-1 (120), 1-2 (120), 2-4 (120), 0-3 (120), 3-4 (400).
    /// Fastest 0→4 is 0→1→2→4 = 360 m; the detour 0→3→4 = 520 m.
    /// Stable CSR order: EdgeId(3) is the 1→2 direction.
    pub fn grid_network() -> (RoadGraph, [NodeId; 5]) {
        let mut b = RoadGraphBuilder::new();
        let n0 = b.add_node(GeoPoint::new(18.5200, 73.8500));
        let n1 = b.add_node(GeoPoint::new(18.5200, 73.8510));
        let n2 = b.add_node(GeoPoint::new(18.5200, 73.8520));
        let n3 = b.add_node(GeoPoint::new(18.5210, 73.8500));
        let n4 = b.add_node(GeoPoint::new(18.5210, 73.8520));
        b.add_road(n0, n1, 120.0);
        b.add_road(n1, n2, 120.0);
        b.add_road(n2, n4, 120.0);
        b.add_road(n0, n3, 120.0);
        b.add_road(n3, n4, 400.0);
        (b.build().unwrap(), [n0, n1, n2, n3, n4])
    }

    pub fn views_with_risk(graph: &RoadGraph, risk: &[f64]) -> GraphViews {
        GraphViews::build(graph, risk, K_SAFE, K_OPT).unwrap()
    }

    pub fn zero_risk_views(graph: &RoadGraph) -> GraphViews {
        views_with_risk(graph, &vec![0.0; graph.edge_count()])
    }

    pub fn rec(id: u32, kind: &str, severity: f64) -> CrimeRecord {
        CrimeRecord {
            id:             CrimeId(id),
            pos:            GeoPoint::new(18.5200, 73.8500),
            kind:           kind.to_string(),
            severity,
            unix_time_secs: 1_700_000_000,
        }
    }
}

// ── A* search ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use sr_core::{GeoPoint, NodeId};
    use sr_graph::{CostPolicy, RoadGraphBuilder};
    use crate::{find_route, RouteError};
    use super::helpers::{grid_network, zero_risk_views};

    #[test]
    fn trivial_same_node() {
        let (g, [n0, ..]) = grid_network();
        let views = zero_risk_views(&g);
        let r = find_route(&g, &views, CostPolicy::Fastest, n0, n0).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.nodes, vec![n0]);
        assert_eq!(r.total_cost, 0.0);
        assert_eq!(r.total_length_m, 0.0);
    }

    #[test]
    fn shortest_path_correct() {
        let (g, [n0, n1, n2, _, n4]) = grid_network();
        let views = zero_risk_views(&g);
        let route = find_route(&g, &views, CostPolicy::Fastest, n0, n4).unwrap();

        assert_eq!(route.nodes, vec![n0, n1, n2, n4]);
        assert_eq!(route.total_cost, 360.0);
        assert_eq!(route.total_length_m, 360.0);
        assert_eq!(route.edges.len(), 3);

        // Edge sequence forms a connected walk.
        for (i, &e) in route.edges.iter().enumerate() {
            assert_eq!(g.edge_from[e.index()], route.nodes[i]);
            assert_eq!(g.edge_to[e.index()], route.nodes[i + 1]);
        }
    }

    #[test]
    fn shortcut_cheaper_than_geometry_is_found() {
        // Recorded lengths far below the straight-line distances: a 2 m
        // detour through a node ~11 km away beats the 1100 m direct edge.
        // The scaled lower bound must not hide it.
        let mut b = RoadGraphBuilder::new();
        let a = b.add_node(GeoPoint::new(18.5200, 73.8500));
        let c = b.add_node(GeoPoint::new(18.5200, 73.8604)); // ~1.1 km east
        let d = b.add_node(GeoPoint::new(18.6200, 73.8500)); // ~11 km north
        b.add_directed_edge(a, c, 1_100.0);
        b.add_directed_edge(a, d, 1.0);
        b.add_directed_edge(d, c, 1.0);
        let g = b.build().unwrap();
        let views = zero_risk_views(&g);

        let route = find_route(&g, &views, CostPolicy::Fastest, a, c).unwrap();
        assert_eq!(route.nodes, vec![a, d, c]);
        assert_eq!(route.total_cost, 2.0);
        assert_eq!(route.total_length_m, 2.0);
    }

    #[test]
    fn unreachable_on_disconnected() {
        let mut b = RoadGraphBuilder::new();
        let a = b.add_node(GeoPoint::new(18.5200, 73.8500));
        let c = b.add_node(GeoPoint::new(18.5300, 73.8500));
        // No edges at all.
        let g = b.build().unwrap();
        let views = zero_risk_views(&g);

        let result = find_route(&g, &views, CostPolicy::Fastest, a, c);
        assert!(matches!(result, Err(RouteError::Unreachable { .. })));
    }

    #[test]
    fn unreachable_consistent_across_variants() {
        let mut b = RoadGraphBuilder::new();
        let a = b.add_node(GeoPoint::new(18.5200, 73.8500));
        let c = b.add_node(GeoPoint::new(18.5200, 73.8510));
        let d = b.add_node(GeoPoint::new(18.5300, 73.8500)); // isolated
        b.add_road(a, c, 120.0);
        let g = b.build().unwrap();
        let views = zero_risk_views(&g);

        // Topology is shared: if one view is unreachable, all are.
        for policy in CostPolicy::ALL {
            assert!(
                matches!(
                    find_route(&g, &views, policy, a, d),
                    Err(RouteError::Unreachable { .. })
                ),
                "{policy} should be unreachable"
            );
        }
    }

    #[test]
    fn one_way_blocks_return() {
        let mut b = RoadGraphBuilder::new();
        let a = b.add_node(GeoPoint::new(18.5200, 73.8500));
        let c = b.add_node(GeoPoint::new(18.5200, 73.8510));
        b.add_directed_edge(a, c, 120.0);
        let g = b.build().unwrap();
        let views = zero_risk_views(&g);

        assert!(find_route(&g, &views, CostPolicy::Fastest, a, c).is_ok());
        assert!(find_route(&g, &views, CostPolicy::Fastest, c, a).is_err());
    }

    #[test]
    fn missing_node_is_node_not_found() {
        let (g, [n0, ..]) = grid_network();
        let views = zero_risk_views(&g);
        assert!(matches!(
            find_route(&g, &views, CostPolicy::Fastest, n0, NodeId(99)),
            Err(RouteError::NodeNotFound(NodeId(99)))
        ));
    }
}

// ── Variant behavior ──────────────────────────────────────────────────────────

#[cfg(test)]
mod variants {
    use sr_core::{EdgeId, GeoPoint};
    use sr_graph::{CostPolicy, GraphViews, RoadGraphBuilder};
    use crate::find_route;
    use super::helpers::{grid_network, views_with_risk, zero_risk_views};

    #[test]
    fn zero_risk_views_agree_exactly() {
        let (g, [n0, _, _, _, n4]) = grid_network();
        let views = zero_risk_views(&g);

        let fast = find_route(&g, &views, CostPolicy::Fastest, n0, n4).unwrap();
        let safe = find_route(&g, &views, CostPolicy::Safest, n0, n4).unwrap();
        let opt  = find_route(&g, &views, CostPolicy::Optimized, n0, n4).unwrap();

        assert_eq!(fast.nodes, safe.nodes);
        assert_eq!(fast.nodes, opt.nodes);
        assert_eq!(fast.total_cost, safe.total_cost);
        assert_eq!(fast.total_cost, opt.total_cost);
    }

    #[test]
    fn safest_detours_around_risky_edge() {
        let (g, [n0, n1, n2, n3, n4]) = grid_network();
        // Risk 0.9 on the 1→2 direction (EdgeId 3 in stable CSR order).
        let mut risk = vec![0.0; g.edge_count()];
        risk[3] = 0.9;
        let views = views_with_risk(&g, &risk);

        // Fastest ignores risk: 0→1→2→4 at 360 m.
        let fast = find_route(&g, &views, CostPolicy::Fastest, n0, n4).unwrap();
        assert_eq!(fast.nodes, vec![n0, n1, n2, n4]);
        assert_eq!(fast.total_cost, 360.0);

        // Safest: top path costs 120 + 120·(1+1.8) + 120 = 576 > 520 detour.
        let safe = find_route(&g, &views, CostPolicy::Safest, n0, n4).unwrap();
        assert_eq!(safe.nodes, vec![n0, n3, n4]);
        assert_eq!(safe.total_cost, 520.0);

        // Optimized trades off mildly: 120 + 120·(1+0.45) + 120 = 414 < 520.
        let opt = find_route(&g, &views, CostPolicy::Optimized, n0, n4).unwrap();
        assert_eq!(opt.nodes, vec![n0, n1, n2, n4]);
        assert_eq!(opt.total_cost, 414.0);

        // Physical length is reported per the traversed edges, not the view.
        assert_eq!(fast.total_length_m, 360.0);
        assert_eq!(safe.total_length_m, 520.0);
    }

    #[test]
    fn parallel_edges_split_by_policy() {
        // Two parallel edges A→B: 100 m (risk 0) and 90 m (risk 0.9),
        // k_safe = 2.0.
        let mut b = RoadGraphBuilder::new();
        let a = b.add_node(GeoPoint::new(18.5200, 73.8500));
        let c = b.add_node(GeoPoint::new(18.5200, 73.8508)); // ~84 m apart
        b.add_directed_edge(a, c, 100.0);
        b.add_directed_edge(a, c, 90.0);
        let g = b.build().unwrap();
        let views = GraphViews::build(&g, &[0.0, 0.9], 2.0, 0.5).unwrap();

        // Fastest: the 90 m edge wins.
        let fast = find_route(&g, &views, CostPolicy::Fastest, a, c).unwrap();
        assert_eq!(fast.edges, vec![EdgeId(1)]);
        assert_eq!(fast.total_cost, 90.0);

        // Safest: 90·(1 + 2·0.9) = 252 > 100, so the clean edge wins.
        let safe = find_route(&g, &views, CostPolicy::Safest, a, c).unwrap();
        assert_eq!(safe.edges, vec![EdgeId(0)]);
        assert_eq!(safe.total_cost, 100.0);
    }

    #[test]
    fn repeated_runs_identical() {
        let (g, [n0, _, _, _, n4]) = grid_network();
        let mut risk = vec![0.0; g.edge_count()];
        risk[3] = 0.4;
        let views = views_with_risk(&g, &risk);

        let first  = find_route(&g, &views, CostPolicy::Optimized, n0, n4).unwrap();
        let second = find_route(&g, &views, CostPolicy::Optimized, n0, n4).unwrap();
        assert_eq!(first, second);
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats {
    use sr_core::CrimeId;
    use sr_graph::CostPolicy;
    use sr_risk::RiskMap;
    use crate::{compose_stats, find_route, RiskLevel};
    use super::helpers::{grid_network, rec, views_with_risk};

    const MEDIUM: f64 = 0.001;
    const HIGH:   f64 = 0.005;

    /// Risk on the fastest path's edges: 0.5 on 0→1 (EdgeId 0, records 0+1)
    /// and 0.3 on 1→2 (EdgeId 3, record 2).
    fn risky_setup() -> (sr_graph::RoadGraph, [sr_core::NodeId; 5], RiskMap, Vec<sr_risk::CrimeRecord>) {
        let (g, nodes) = grid_network();
        let mut edge_risk = vec![0.0; g.edge_count()];
        edge_risk[0] = 0.5;
        edge_risk[3] = 0.3;
        let mut records_by_edge = vec![Vec::new(); g.edge_count()];
        records_by_edge[0] = vec![CrimeId(0), CrimeId(1)];
        records_by_edge[3] = vec![CrimeId(2)];
        let risk = RiskMap { edge_risk, records_by_edge, unassociated: vec![] };
        let records = vec![
            rec(0, "theft", 0.2),
            rec(1, "assault", 0.3),
            rec(2, "theft", 0.3),
        ];
        (g, nodes, risk, records)
    }

    #[test]
    fn totals_and_level() {
        let (g, [n0, _, _, _, n4], risk, records) = risky_setup();
        let views = views_with_risk(&g, &risk.edge_risk);
        let route = find_route(&g, &views, CostPolicy::Fastest, n0, n4).unwrap();

        let stats = compose_stats(&route, &risk, &records, MEDIUM, HIGH);
        assert_eq!(stats.total_length_m, 360.0);
        assert_eq!(stats.total_risk, 0.8);
        // 0.8 / 360 ≈ 0.0022 per metre → Medium.
        assert_eq!(stats.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn breakdown_sorted_count_desc_then_label() {
        let (g, [n0, _, _, _, n4], risk, records) = risky_setup();
        let views = views_with_risk(&g, &risk.edge_risk);
        let route = find_route(&g, &views, CostPolicy::Fastest, n0, n4).unwrap();

        let stats = compose_stats(&route, &risk, &records, MEDIUM, HIGH);
        assert_eq!(
            stats.breakdown,
            vec![("theft".to_string(), 2), ("assault".to_string(), 1)]
        );
    }

    #[test]
    fn breakdown_tie_breaks_alphabetically() {
        let (g, [n0, _, _, _, n4], mut risk, mut records) = risky_setup();
        // Add one more assault on EdgeId 0: theft 2, assault 2.
        risk.records_by_edge[0].push(CrimeId(3));
        records.push(super::helpers::rec(3, "assault", 0.1));
        let views = views_with_risk(&g, &risk.edge_risk);
        let route = find_route(&g, &views, CostPolicy::Fastest, n0, n4).unwrap();

        let stats = compose_stats(&route, &risk, &records, MEDIUM, HIGH);
        assert_eq!(
            stats.breakdown,
            vec![("assault".to_string(), 2), ("theft".to_string(), 2)]
        );
    }

    #[test]
    fn trivial_route_is_low_risk() {
        let (g, [n0, ..], risk, records) = risky_setup();
        let views = views_with_risk(&g, &risk.edge_risk);
        let route = find_route(&g, &views, CostPolicy::Fastest, n0, n0).unwrap();

        let stats = compose_stats(&route, &risk, &records, MEDIUM, HIGH);
        assert_eq!(stats.total_risk, 0.0);
        assert_eq!(stats.risk_per_m, 0.0);
        assert_eq!(stats.risk_level, RiskLevel::Low);
        assert!(stats.breakdown.is_empty());
    }

    #[test]
    fn bucket_thresholds() {
        assert_eq!(RiskLevel::bucket(0.0, MEDIUM, HIGH), RiskLevel::Low);
        assert_eq!(RiskLevel::bucket(0.0009, MEDIUM, HIGH), RiskLevel::Low);
        assert_eq!(RiskLevel::bucket(0.001, MEDIUM, HIGH), RiskLevel::Medium);
        assert_eq!(RiskLevel::bucket(0.0049, MEDIUM, HIGH), RiskLevel::Medium);
        assert_eq!(RiskLevel::bucket(0.005, MEDIUM, HIGH), RiskLevel::High);
        assert!(RiskLevel::Low < RiskLevel::Medium && RiskLevel::Medium < RiskLevel::High);
    }
}
