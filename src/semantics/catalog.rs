//! Selectable surface types per declared feature type.
//!
//! The UI enumerates these names before invoking assignment; the lists
//! follow the exchange format's semantic-surface vocabulary.

/// Surface types selectable on construction-like features.
const CONSTRUCTION_SURFACES: &[&str] = &[
    "GroundSurface",
    "WallSurface",
    "RoofSurface",
    "ClosureSurface",
    "OuterCeilingSurface",
    "OuterFloorSurface",
    "Window",
    "Door",
    "InteriorWallSurface",
    "CeilingSurface",
    "FloorSurface",
];

/// Surface types selectable on water bodies.
const WATER_SURFACES: &[&str] = &["WaterSurface", "WaterGroundSurface", "WaterClosureSurface"];

/// Surface types selectable on transportation features.
const TRANSPORT_SURFACES: &[&str] = &["TrafficArea", "AuxiliaryTrafficArea"];

/// Selectable child surface type names for a root feature type.
///
/// Unknown feature types yield an empty slice.
#[must_use]
pub fn surface_types_for(feature_type: &str) -> &'static [&'static str] {
    match feature_type {
        "Building"
        | "BuildingPart"
        | "BuildingRoom"
        | "BuildingStorey"
        | "BuildingUnit"
        | "BuildingInstallation"
        | "BuildingConstructiveElement"
        | "Bridge"
        | "BridgePart"
        | "BridgeInstallation"
        | "BridgeConstructiveElement"
        | "BridgeRoom"
        | "Tunnel"
        | "TunnelPart"
        | "TunnelInstallation"
        | "TunnelConstructiveElement"
        | "OtherConstruction" => CONSTRUCTION_SURFACES,
        "WaterBody" => WATER_SURFACES,
        "Road" | "Railway" | "TransportSquare" | "Waterway" => TRANSPORT_SURFACES,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buildings_offer_walls_and_openings() {
        let types = surface_types_for("Building");

        assert!(types.contains(&"WallSurface"));
        assert!(types.contains(&"Window"));
        assert!(types.contains(&"Door"));
    }

    #[test]
    fn construction_kinds_share_one_list() {
        assert_eq!(surface_types_for("Bridge"), surface_types_for("Tunnel"));
        assert_eq!(
            surface_types_for("OtherConstruction"),
            surface_types_for("BuildingPart")
        );
    }

    #[test]
    fn unknown_feature_types_offer_nothing() {
        assert!(surface_types_for("SolitaryVegetationObject").is_empty());
    }
}
