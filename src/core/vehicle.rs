//! Vehicle profiles and truck routing restrictions
//!
//! Exactly one profile is active per session. Truck profiles carry a gross
//! weight constraint and optionally axle count and dimensions; absent fields
//! are omitted from the provider request rather than sent as zeros.

use serde::Serialize;

/// Routing mode requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoutingMode {
    /// Regular car routing ("auto" on the wire)
    #[serde(rename = "auto")]
    Standard,
    #[serde(rename = "truck")]
    Truck,
}

/// Physical restrictions attached to a truck profile. Only `weight` is
/// mandatory; everything else is skipped during serialization when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckRestrictions {
    /// Gross weight in kilograms
    pub weight: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axle_count: Option<u32>,
    /// Height in metres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

impl TruckRestrictions {
    /// Restrictions carrying only a gross weight constraint.
    pub fn gross_weight(weight: u32) -> Self {
        Self {
            weight,
            axle_count: None,
            height: None,
            width: None,
            length: None,
        }
    }
}

/// The vehicle a route is planned for.
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleProfile {
    Car,
    /// 40-tonne truck
    Truck40(TruckRestrictions),
    /// Heavy truck, 55-tonne gross weight
    TruckHeavy(TruckRestrictions),
}

impl VehicleProfile {
    pub fn truck40() -> Self {
        VehicleProfile::Truck40(TruckRestrictions::gross_weight(40_000))
    }

    pub fn truck_heavy() -> Self {
        VehicleProfile::TruckHeavy(TruckRestrictions::gross_weight(55_000))
    }

    pub fn routing_mode(&self) -> RoutingMode {
        match self {
            VehicleProfile::Car => RoutingMode::Standard,
            VehicleProfile::Truck40(_) | VehicleProfile::TruckHeavy(_) => RoutingMode::Truck,
        }
    }

    /// Restrictions to embed in the provider request, if any.
    pub fn restrictions(&self) -> Option<&TruckRestrictions> {
        match self {
            VehicleProfile::Car => None,
            VehicleProfile::Truck40(r) | VehicleProfile::TruckHeavy(r) => Some(r),
        }
    }

    /// Stable identifier of the UI tab that selects this profile.
    pub fn control_id(&self) -> &'static str {
        match self {
            VehicleProfile::Car => "veh-car",
            VehicleProfile::Truck40(_) => "veh-truck40",
            VehicleProfile::TruckHeavy(_) => "veh-truck-heavy",
        }
    }
}

impl Default for VehicleProfile {
    fn default() -> Self {
        // The 40-tonne truck is the preselected profile in the UI
        VehicleProfile::truck40()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_modes() {
        assert_eq!(VehicleProfile::Car.routing_mode(), RoutingMode::Standard);
        assert_eq!(VehicleProfile::truck40().routing_mode(), RoutingMode::Truck);
        assert_eq!(VehicleProfile::truck_heavy().routing_mode(), RoutingMode::Truck);
    }

    #[test]
    fn test_preset_weights() {
        assert_eq!(VehicleProfile::truck40().restrictions().unwrap().weight, 40_000);
        assert_eq!(VehicleProfile::truck_heavy().restrictions().unwrap().weight, 55_000);
        assert!(VehicleProfile::Car.restrictions().is_none());
    }

    #[test]
    fn test_restrictions_serialization_omits_absent_fields() {
        let json = serde_json::to_value(TruckRestrictions::gross_weight(55_000)).unwrap();
        assert_eq!(json["weight"], 55_000);
        assert!(json.get("axleCount").is_none());
        assert!(json.get("height").is_none());
        assert!(json.get("width").is_none());
        assert!(json.get("length").is_none());
    }

    #[test]
    fn test_restrictions_serialization_keeps_present_fields() {
        let mut r = TruckRestrictions::gross_weight(40_000);
        r.axle_count = Some(5);
        r.height = Some(4.0);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["axleCount"], 5);
        assert_eq!(json["height"], 4.0);
        assert!(json.get("width").is_none());
    }

    #[test]
    fn test_routing_mode_wire_values() {
        assert_eq!(serde_json::to_value(RoutingMode::Standard).unwrap(), "auto");
        assert_eq!(serde_json::to_value(RoutingMode::Truck).unwrap(), "truck");
    }
}
