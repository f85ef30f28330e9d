//! citywalk — small end-to-end demo of the saferoute engine.
//!
//! Builds a Pune-inspired road network, loads a handful of pre-scored crime
//! records, and routes between two landmarks under all three variants.
//! Swap in a real OSM extract and a real incident feed to run at city scale;
//! the pipeline is the same.

mod network;

use std::io::Cursor;
use std::time::Instant;

use anyhow::Result;

use sr_core::{EngineConfig, GeoPoint};
use sr_engine::RouteEngine;
use sr_risk::load_records_reader;

use network::build_network;

// ── Configuration ─────────────────────────────────────────────────────────────

// k_safe = 2.0 makes a fully-risky edge (risk 1.0) three times as expensive
// as its length; k_opt = 0.5 tolerates moderate risk for shorter paths.
const CONFIG: EngineConfig = EngineConfig {
    association_radius_m: 150.0,
    snap_radius_m:        500.0,
    k_safe:               2.0,
    k_opt:                0.5,
    cell_size_m:          250.0,
    risk_medium_per_m:    0.000_05,
    risk_high_per_m:      0.000_30,
};

// ── Crime records ─────────────────────────────────────────────────────────────

// Pre-scored incidents (severity in [0, 1] from the upstream scoring model).
// The two records on the Shivajinagar–Station road push its SAFEST cost past
// the Camp detour.  The last record sits far south-west of the network and
// stays unassociated.
const CRIMES_CSV: &str = "\
lat,lon,kind,severity,unix_time_secs\n\
18.5302,73.8595,robbery,0.35,1714501800\n\
18.5300,73.8600,assault,0.25,1714588200\n\
18.5170,73.8790,theft,0.30,1714674600\n\
18.5020,73.8630,vehicle_theft,0.40,1714761000\n\
18.5160,73.8415,harassment,0.15,1714847400\n\
18.5480,73.9025,burglary,0.20,1714933800\n\
18.4500,73.8000,theft,0.50,1715020200\n\
";

// Request coordinates a few metres off the landmark nodes — the engine
// snaps them to the network.
const START: GeoPoint = GeoPoint { lat: 18.5315, lon: 73.8447 }; // Shivajinagar
const END:   GeoPoint = GeoPoint { lat: 18.5360, lon: 73.8932 }; // Koregaon Park

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== citywalk — crime-weighted routing demo ===");
    println!();

    // 1. Build road network.
    let (graph, _landmarks) = build_network()?;
    println!(
        "Road network: {} nodes, {} directed edges",
        graph.node_count(),
        graph.edge_count()
    );

    // 2. Load pre-scored crime records.
    let records = load_records_reader(Cursor::new(CRIMES_CSV))?;
    println!("Crime records: {}", records.len());

    // 3. Build the engine (spatial index, risk map, views, heatmap).
    let t0 = Instant::now();
    let (engine, report) = RouteEngine::new(graph, records, CONFIG)?;
    println!(
        "Artifacts built in {:.1} ms: {} associated, {} unassociated, {} outside heat grid",
        t0.elapsed().as_secs_f64() * 1e3,
        report.associated_count,
        report.unassociated_count,
        report.out_of_bounds_count,
    );
    println!();

    // 4. Route Shivajinagar → Koregaon Park under all three variants.
    let snapshot = engine.snapshot();
    println!("{:<12} {:>10} {:>10} {:>8} {}", "Variant", "Length m", "Cost", "Risk", "Crime kinds on route");
    println!("{}", "-".repeat(66));
    for result in snapshot.route_all(START, END) {
        let route = result?;
        let stats = snapshot.stats(&route);
        let kinds: Vec<String> = stats
            .breakdown
            .iter()
            .map(|(kind, n)| format!("{kind}×{n}"))
            .collect();
        println!(
            "{:<12} {:>10.0} {:>10.0} {:>8} {}",
            route.policy.to_string(),
            route.total_length_m,
            route.total_cost,
            stats.risk_level.to_string(),
            if kinds.is_empty() { "—".to_string() } else { kinds.join(", ") },
        );
    }
    println!();

    // 5. Hottest heatmap cells.
    let mut cells = snapshot.heat().to_vec();
    cells.sort_by(|a, b| b.intensity.total_cmp(&a.intensity));
    println!("Hottest cells ({} m grid):", CONFIG.cell_size_m);
    for cell in cells.iter().take(3) {
        println!("  {}  intensity {:.2}", cell.center, cell.intensity);
    }

    Ok(())
}
