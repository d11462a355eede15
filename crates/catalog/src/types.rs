use serde::{Deserialize, Serialize};

// ─── Catalog entries ─────────────────────────────────────────────────

/// A top-level folder of the catalog ("anime"). Display name and id are the
/// folder name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(folder: &str) -> Self {
        Self {
            id: folder.to_string(),
            name: folder.to_string(),
        }
    }
}

/// A single design image inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    /// Full storage key.
    pub id: String,
    /// Last path segment, extension included.
    pub filename: String,
    /// Filename without the extension.
    pub name: String,
}

// ─── Garment colours ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GarmentColor {
    pub name: &'static str,
    /// Folder name of the garment base images, also the URL value.
    pub value: &'static str,
    pub hex: &'static str,
}

pub const GARMENT_COLORS: &[GarmentColor] = &[
    GarmentColor { name: "Negro", value: "negro", hex: "#1a1a1a" },
    GarmentColor { name: "Blanco", value: "blanco", hex: "#f5f5f5" },
    GarmentColor { name: "Azul", value: "azul", hex: "#1e3a8a" },
    GarmentColor { name: "Verde", value: "verde", hex: "#064e3b" },
    GarmentColor { name: "Gris", value: "gris", hex: "#6b7280" },
    GarmentColor { name: "Rosa", value: "rosa", hex: "#ec4899" },
    GarmentColor { name: "Beige", value: "beige", hex: "#d4a574" },
];

impl GarmentColor {
    /// Look a colour up by its value (never by display name).
    pub fn from_value(value: &str) -> Option<GarmentColor> {
        GARMENT_COLORS.iter().copied().find(|c| c.value == value)
    }
}

impl Default for GarmentColor {
    fn default() -> Self {
        GARMENT_COLORS[0]
    }
}

// ─── Slots and views ─────────────────────────────────────────────────

/// Placement position of a design. The preview shows one slot at a time, so
/// the same type doubles as the active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// "pecho"
    Front,
    /// "espalda"
    Back,
}

pub type View = Slot;

impl Slot {
    /// Query parameter carrying the filename held by this slot.
    pub fn query_key(self) -> &'static str {
        match self {
            Slot::Front => "pecho",
            Slot::Back => "espalda",
        }
    }

    /// File stem of the garment base image for this view.
    pub fn asset_name(self) -> &'static str {
        match self {
            Slot::Front => "frente",
            Slot::Back => "posterior",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::Front => "Pecho",
            Slot::Back => "Espalda",
        }
    }

    pub fn opposite(self) -> Slot {
        match self {
            Slot::Front => Slot::Back,
            Slot::Back => Slot::Front,
        }
    }

    /// Caption for the button that flips to the other view.
    pub fn other_view_label(self) -> &'static str {
        match self {
            Slot::Front => "de atrás",
            Slot::Back => "de al frente",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lookup_by_value() {
        let azul = GarmentColor::from_value("azul").unwrap();
        assert_eq!(azul.name, "Azul");
        assert_eq!(azul.hex, "#1e3a8a");
        assert!(GarmentColor::from_value("Azul").is_none());
    }

    #[test]
    fn test_default_color_is_first() {
        assert_eq!(GarmentColor::default().value, "negro");
    }

    #[test]
    fn test_slot_labels() {
        assert_eq!(Slot::Front.query_key(), "pecho");
        assert_eq!(Slot::Back.query_key(), "espalda");
        assert_eq!(Slot::Front.other_view_label(), "de atrás");
        assert_eq!(Slot::Back.opposite(), Slot::Front);
    }
}
