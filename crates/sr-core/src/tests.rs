//! Unit tests for sr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CellId, CrimeId, EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = EdgeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(EdgeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(EdgeId(0) < EdgeId(1));
        assert!(NodeId(100) > NodeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(CrimeId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }

    #[test]
    fn cell_id_packing() {
        let id = CellId::from_row_col(3, 17);
        assert_eq!(id.row(), 3);
        assert_eq!(id.col(), 17);
        // Row-major ordering: any cell in row 3 sorts before any cell in row 4.
        assert!(CellId::from_row_col(3, u32::MAX - 1) < CellId::from_row_col(4, 0));
    }
}

#[cfg(test)]
mod geo {
    use crate::{BoundingBox, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(18.5204, 73.8567);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude_approx() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(18.0, 73.0);
        let b = GeoPoint::new(19.0, 73.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn validity() {
        assert!(GeoPoint::new(18.5, 73.8).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 73.8).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
    }

    #[test]
    fn bbox_contains_and_center() {
        let bbox = BoundingBox::new(GeoPoint::new(18.0, 73.0), GeoPoint::new(19.0, 74.0));
        assert!(bbox.contains(GeoPoint::new(18.5, 73.5)));
        assert!(bbox.contains(bbox.min));
        assert!(bbox.contains(bbox.max));
        assert!(!bbox.contains(GeoPoint::new(17.9, 73.5)));
        assert_eq!(bbox.center(), GeoPoint::new(18.5, 73.5));
    }

    #[test]
    fn bbox_around_points() {
        let pts = [
            GeoPoint::new(18.2, 73.9),
            GeoPoint::new(18.9, 73.1),
            GeoPoint::new(18.5, 73.5),
        ];
        let bbox = BoundingBox::around(pts).unwrap();
        assert_eq!(bbox.min, GeoPoint::new(18.2, 73.1));
        assert_eq!(bbox.max, GeoPoint::new(18.9, 73.9));
        assert!(BoundingBox::around(std::iter::empty()).is_none());
    }
}

#[cfg(test)]
mod config {
    use crate::EngineConfig;

    fn valid() -> EngineConfig {
        EngineConfig {
            association_radius_m: 120.0,
            snap_radius_m:        500.0,
            k_safe:               2.0,
            k_opt:                0.5,
            cell_size_m:          250.0,
            risk_medium_per_m:    0.001,
            risk_high_per_m:      0.005,
        }
    }

    #[test]
    fn accepts_valid() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn rejects_negative_radius() {
        let mut cfg = valid();
        cfg.association_radius_m = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_nan_constant() {
        let mut cfg = valid();
        cfg.k_safe = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_k_opt_above_k_safe() {
        let mut cfg = valid();
        cfg.k_opt = 3.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_cell_size() {
        let mut cfg = valid();
        cfg.cell_size_m = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let mut cfg = valid();
        cfg.risk_medium_per_m = 0.01;
        cfg.risk_high_per_m = 0.001;
        assert!(cfg.validate().is_err());
    }
}
