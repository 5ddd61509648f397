//! Venue layout catalog: areas and the tables inside each area.

use serde::{Deserialize, Serialize};

use tablebook_core::{DomainError, DomainResult};

/// A named zone of the venue with a fixed, ordered set of tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub name: String,
    pub tables: Vec<String>,
}

impl Area {
    pub fn new(name: impl Into<String>, tables: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            tables: tables.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, table: &str) -> bool {
        self.tables.iter().any(|t| t == table)
    }
}

#[derive(Deserialize)]
struct RawCatalog {
    areas: Vec<Area>,
}

/// Static venue configuration (areas → tables).
///
/// Area and table order is preserved; it drives option population and the
/// order of the occupancy projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct VenueCatalog {
    areas: Vec<Area>,
}

impl TryFrom<RawCatalog> for VenueCatalog {
    type Error = DomainError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        Self::new(raw.areas)
    }
}

impl VenueCatalog {
    /// Build a catalog, rejecting blank or duplicate area names and blank or
    /// repeated table identifiers.
    ///
    /// Table identifiers are unique across the whole venue: bookings are
    /// matched by table alone.
    pub fn new(areas: Vec<Area>) -> DomainResult<Self> {
        if areas.is_empty() {
            return Err(DomainError::validation("catalog must define at least one area"));
        }

        for (idx, area) in areas.iter().enumerate() {
            if area.name.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "area name cannot be empty (index {idx})"
                )));
            }
            if areas[..idx].iter().any(|a| a.name == area.name) {
                return Err(DomainError::validation(format!(
                    "duplicate area name: {}",
                    area.name
                )));
            }
            for (t_idx, table) in area.tables.iter().enumerate() {
                if table.trim().is_empty() {
                    return Err(DomainError::validation(format!(
                        "table identifier cannot be empty (area {}, index {t_idx})",
                        area.name
                    )));
                }
                if area.tables[..t_idx].contains(table) {
                    return Err(DomainError::validation(format!(
                        "duplicate table {table} in area {}",
                        area.name
                    )));
                }
                if let Some(other) = areas[..idx].iter().find(|a| a.contains(table)) {
                    return Err(DomainError::validation(format!(
                        "table {table} listed in both {} and {}",
                        other.name, area.name
                    )));
                }
            }
        }

        Ok(Self { areas })
    }

    /// The built-in layout of the venue.
    pub fn default_venue() -> Self {
        Self {
            areas: vec![
                Area::new(
                    "Ground floor",
                    [
                        "Δ1", "Δ2", "Δ3", "Δ4", "ΛΕΥ", "AC1", "AC2", "ΕΙΚ", "ΚΜ", "ΣΟ1", "ΣΟ2",
                        "PC",
                    ],
                ),
                Area::new(
                    "Outside",
                    [
                        "Α1", "Α2", "Α3", "Α4", "Α5", "Α6", "ΚΔ", "ΔΕ1", "ΔΕ2", "ΔΕ3", "ΔΕ4",
                        "ΑΠ0", "ΑΠ1", "ΑΠ2", "ΑΠ3", "ΑΠ4", "ΑΠ5", "ΑΠ6", "ΑΠ7", "ΚΕ1", "ΚΕ2",
                        "Κ3",
                    ],
                ),
                Area::new(
                    "1st floor",
                    ["Ο1", "Ο2", "Ο3", "Ο4", "Ο5", "Ο6", "Ο7", "Ο8", "Ο9"],
                ),
            ],
        }
    }

    /// Parse a catalog from its JSON form: `{"areas":[{"name":..,"tables":[..]}]}`.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("invalid catalog: {e}")))
    }

    pub fn areas(&self) -> impl Iterator<Item = &Area> {
        self.areas.iter()
    }

    pub fn area_names(&self) -> impl Iterator<Item = &str> {
        self.areas.iter().map(|a| a.name.as_str())
    }

    /// Default area for a fresh form.
    pub fn first_area(&self) -> &Area {
        // `new` and `default_venue` never produce an empty catalog.
        &self.areas[0]
    }

    pub fn area(&self, name: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.name == name)
    }

    pub fn tables(&self, area: &str) -> Option<&[String]> {
        self.area(area).map(|a| a.tables.as_slice())
    }

    pub fn contains(&self, area: &str, table: &str) -> bool {
        self.area(area).is_some_and(|a| a.contains(table))
    }
}

impl Default for VenueCatalog {
    fn default() -> Self {
        Self::default_venue()
    }
}
