//! Pune-inspired demo road network.
//!
//! Nine nodes at real Pune landmark coordinates, connected by bidirectional
//! roads.  Road lengths are hand-set above the straight-line distance
//! between endpoints, the way real roads run.

use sr_core::{GeoPoint, NodeId};
use sr_graph::{GraphResult, RoadGraph, RoadGraphBuilder};

/// Named handles into the demo network.
pub struct Landmarks {
    pub shivajinagar:  NodeId,
    pub deccan:        NodeId,
    pub kothrud:       NodeId,
    pub swargate:      NodeId,
    pub camp:          NodeId,
    pub station:       NodeId,
    pub koregaon_park: NodeId,
    pub kalyani_nagar: NodeId,
}

/// Build the demo network.
pub fn build_network() -> GraphResult<(RoadGraph, Landmarks)> {
    let mut b = RoadGraphBuilder::new();

    let shivajinagar  = b.add_node(GeoPoint::new(18.5314, 73.8446));
    let deccan        = b.add_node(GeoPoint::new(18.5158, 73.8410));
    let kothrud       = b.add_node(GeoPoint::new(18.5074, 73.8077));
    let swargate      = b.add_node(GeoPoint::new(18.5018, 73.8636));
    let camp          = b.add_node(GeoPoint::new(18.5167, 73.8795));
    let station       = b.add_node(GeoPoint::new(18.5289, 73.8744));
    let koregaon_park = b.add_node(GeoPoint::new(18.5362, 73.8930));
    let kalyani_nagar = b.add_node(GeoPoint::new(18.5486, 73.9030));

    b.add_road(shivajinagar, deccan, 2_100.0);
    b.add_road(shivajinagar, station, 3_600.0);
    b.add_road(shivajinagar, camp, 4_500.0);
    b.add_road(deccan, kothrud, 4_200.0);
    b.add_road(deccan, swargate, 3_300.0);
    b.add_road(swargate, camp, 2_800.0);
    b.add_road(camp, station, 1_800.0);
    b.add_road(camp, koregaon_park, 3_000.0);
    b.add_road(station, koregaon_park, 2_400.0);
    b.add_road(koregaon_park, kalyani_nagar, 2_000.0);

    let graph = b.build()?;
    let landmarks = Landmarks {
        shivajinagar,
        deccan,
        kothrud,
        swargate,
        camp,
        station,
        koregaon_park,
        kalyani_nagar,
    };
    Ok((graph, landmarks))
}
