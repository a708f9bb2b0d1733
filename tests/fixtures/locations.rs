//! Real San Francisco and Las Vegas locations.
//!
//! The Las Vegas points are routable against the OSRM Nevada extract used by
//! the container tests.

use route_overlay::LatLng;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

// ============================================================================
// San Francisco
// ============================================================================

pub const HOME: Location = Location::new("Civic Center", 37.77, -122.42);
pub const WORK: Location = Location::new("Financial District", 37.79, -122.40);
pub const MIDWAY: Location = Location::new("SoMa", 37.78, -122.41);

pub const FERRY_BUILDING: Location = Location::new("Ferry Building", 37.7955, -122.3937);
pub const ORACLE_PARK: Location = Location::new("Oracle Park", 37.7786, -122.3893);
pub const GOLDEN_GATE_PARK: Location = Location::new("Golden Gate Park", 37.7694, -122.4862);
pub const MISSION_DOLORES: Location = Location::new("Mission Dolores", 37.7642, -122.4270);

// ============================================================================
// Las Vegas
// ============================================================================

pub const WYNN: Location = Location::new("Wynn Las Vegas", 36.1263781, -115.1658180);
pub const MGM_GRAND: Location = Location::new("MGM Grand", 36.1023654, -115.1688720);
pub const BELLAGIO: Location = Location::new("Bellagio", 36.1126, -115.1767);
pub const LONGHORN: Location = Location::new("Longhorn Casino", 36.1070664, -115.0591256);
