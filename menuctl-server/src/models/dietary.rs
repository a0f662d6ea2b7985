//! Dietary labels - fixed label set with two spellings
//!
//! Each tag has a kebab-case wire name (`gluten-free`) and a PascalCase label
//! (`GlutenFree`). Both directions go through the static table below; there is
//! no case-conversion logic.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DietaryTag {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    NutFree,
    Halal,
    Kosher,
    Spicy,
}

/// Variant <-> (wire name, label)
static DIETARY_TABLE: [(DietaryTag, &str, &str); 8] = [
    (DietaryTag::Vegetarian, "vegetarian", "Vegetarian"),
    (DietaryTag::Vegan, "vegan", "Vegan"),
    (DietaryTag::GlutenFree, "gluten-free", "GlutenFree"),
    (DietaryTag::DairyFree, "dairy-free", "DairyFree"),
    (DietaryTag::NutFree, "nut-free", "NutFree"),
    (DietaryTag::Halal, "halal", "Halal"),
    (DietaryTag::Kosher, "kosher", "Kosher"),
    (DietaryTag::Spicy, "spicy", "Spicy"),
];

/// Accepted wire names, in table order
pub const DIETARY_TAG_NAMES: [&str; 8] = [
    "vegetarian",
    "vegan",
    "gluten-free",
    "dairy-free",
    "nut-free",
    "halal",
    "kosher",
    "spicy",
];

impl DietaryTag {
    pub const ALL: [DietaryTag; 8] = [
        DietaryTag::Vegetarian,
        DietaryTag::Vegan,
        DietaryTag::GlutenFree,
        DietaryTag::DairyFree,
        DietaryTag::NutFree,
        DietaryTag::Halal,
        DietaryTag::Kosher,
        DietaryTag::Spicy,
    ];

    fn entry(self) -> Option<&'static (DietaryTag, &'static str, &'static str)> {
        DIETARY_TABLE.iter().find(|(t, _, _)| *t == self)
    }

    /// Kebab-case wire name.
    pub fn as_str(self) -> &'static str {
        self.entry().map(|(_, wire, _)| *wire).unwrap_or_default()
    }

    /// PascalCase label.
    pub fn label(self) -> &'static str {
        self.entry().map(|(_, _, label)| *label).unwrap_or_default()
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        DIETARY_TABLE
            .iter()
            .find(|(_, wire, _)| *wire == s)
            .map(|(t, _, _)| *t)
    }

    pub fn from_label(s: &str) -> Option<Self> {
        DIETARY_TABLE
            .iter()
            .find(|(_, _, label)| *label == s)
            .map(|(t, _, _)| *t)
    }

    /// Parse request input: trimmed wire name or label.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        Self::from_wire(trimmed)
            .or_else(|| Self::from_label(trimmed))
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "dietaryTags",
                value: raw.to_owned(),
                allowed: &DIETARY_TAG_NAMES,
            })
    }
}

impl fmt::Display for DietaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DietaryTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DietaryTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parse every tag, collecting each failure.
pub fn parse_tags(raw: &[String]) -> Result<Vec<DietaryTag>, Vec<ValidationError>> {
    let mut tags = Vec::with_capacity(raw.len());
    let mut errors = Vec::new();

    for value in raw {
        match DietaryTag::parse(value) {
            Ok(tag) => tags.push(tag),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(tags)
    } else {
        Err(errors)
    }
}

/// Wire names for storage, order preserved.
pub fn wire_names(tags: &[DietaryTag]) -> Vec<String> {
    tags.iter().map(|t| t.as_str().to_owned()).collect()
}
