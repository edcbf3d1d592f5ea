//! Metro station payload.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::graph::{GeoPoint, Heuristic};

/// One station on one line, as listed in the nodes file.
///
/// Identity is the numeric id alone: two records with the same id are the same
/// node, whatever their other fields say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: u32,
    pub line: String,
    /// Station label, shared by the platforms of a transfer hub.
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub commune: String,
    pub commune_code: String,
}

impl Station {
    /// Creates a station with empty commune fields.
    pub fn new(
        id: u32,
        line: impl Into<String>,
        name: impl Into<String>,
        longitude: f64,
        latitude: f64,
    ) -> Self {
        Self {
            id,
            line: line.into(),
            name: name.into(),
            longitude,
            latitude,
            commune: String::new(),
            commune_code: String::new(),
        }
    }

    /// Builder: set the commune name and code.
    pub fn with_commune(mut self, commune: impl Into<String>, code: impl Into<String>) -> Self {
        self.commune = commune.into();
        self.commune_code = code.into();
        self
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Great-circle distance in kilometres.
    pub fn distance_km(&self, other: &Station) -> f64 {
        self.location().distance_km(&other.location())
    }

    /// Checks whether both stations share a label on different lines.
    pub fn is_transfer_with(&self, other: &Station) -> bool {
        self.id != other.id && self.name == other.name && self.line != other.line
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Heuristic for Station {
    /// Straight-line distance in kilometres. Only admissible when link weights
    /// are kilometres too; time-weighted networks should scale it by a speed
    /// bound through `AStar::find_path_with`.
    fn estimate(&self, target: &Self) -> f64 {
        self.distance_km(target)
    }
}

impl std::fmt::Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (line {}, #{})", self.name, self.line, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_is_id_only() {
        let a = Station::new(1, "1", "Bastille", 2.369, 48.853);
        let renamed = Station::new(1, "5", "Bastille (5)", 0.0, 0.0);
        let other = Station::new(2, "1", "Bastille", 2.369, 48.853);

        assert_eq!(a, renamed);
        assert_ne!(a, other);

        let set: HashSet<Station> = [a, renamed, other].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_estimate_is_geo_distance() {
        let bastille = Station::new(1, "1", "Bastille", 2.3690, 48.8532);
        let nation = Station::new(2, "1", "Nation", 2.3958, 48.8483);

        let km = bastille.estimate(&nation);
        assert!(km > 1.8 && km < 2.3, "got {km}");
        assert_eq!(bastille.estimate(&bastille), 0.0);
    }

    #[test]
    fn test_transfer_detection() {
        let a = Station::new(1, "1", "Bastille", 2.369, 48.853);
        let b = Station::new(2, "5", "Bastille", 2.369, 48.853);
        let c = Station::new(3, "1", "Bastille", 2.369, 48.853);

        assert!(a.is_transfer_with(&b));
        assert!(!a.is_transfer_with(&c));
        assert!(!a.is_transfer_with(&a));
    }

    #[test]
    fn test_display() {
        let station = Station::new(7, "14", "Olympiades", 2.366, 48.827).with_commune("Paris", "75113");
        assert_eq!(station.to_string(), "Olympiades (line 14, #7)");
        assert_eq!(station.commune_code, "75113");
    }
}
