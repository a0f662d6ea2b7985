//! Menu category - fixed label set
//!
//! Wire form is always lowercase. The lookup table is the single source of
//! truth for both directions of the mapping.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ValidationError;

/// Menu section an item is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Appetizers,
    Mains,
    Desserts,
    Beverages,
}

/// Variant <-> wire name
const CATEGORY_TABLE: [(Category, &str); 4] = [
    (Category::Appetizers, "appetizers"),
    (Category::Mains, "mains"),
    (Category::Desserts, "desserts"),
    (Category::Beverages, "beverages"),
];

/// Accepted wire names, in table order
pub const CATEGORY_NAMES: [&str; 4] = ["appetizers", "mains", "desserts", "beverages"];

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Appetizers,
        Category::Mains,
        Category::Desserts,
        Category::Beverages,
    ];

    /// Wire name for this category.
    pub fn as_str(self) -> &'static str {
        CATEGORY_TABLE
            .iter()
            .find(|(c, _)| *c == self)
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }

    /// Exact lookup by wire name (no normalization).
    pub fn from_wire(s: &str) -> Option<Self> {
        CATEGORY_TABLE
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(c, _)| *c)
    }

    /// Normalize raw input: trim, lowercase, then require membership.
    ///
    /// Unknown values are rejected, never coerced.
    ///
    /// # Example
    /// ```
    /// use menuctl_server::models::Category;
    ///
    /// assert_eq!(Category::normalize("  Mains ").unwrap(), Category::Mains);
    /// assert!(Category::normalize("pizza").is_err());
    /// ```
    pub fn normalize(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(ValidationError::Empty { field: "category" });
        }

        Self::from_wire(&normalized).ok_or_else(|| ValidationError::InvalidVariant {
            field: "category",
            value: raw.to_owned(),
            allowed: &CATEGORY_NAMES,
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::normalize(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn table_is_exhaustive() {
        assert_eq!(CATEGORY_TABLE.len(), Category::ALL.len());
        for category in Category::ALL {
            let name = category.as_str();
            assert!(!name.is_empty(), "{:?} has no wire name", category);
            assert_eq!(Category::from_wire(name), Some(category));
        }
    }

    #[test]
    fn names_match_table_order() {
        let from_table: Vec<&str> = CATEGORY_TABLE.iter().map(|(_, n)| *n).collect();
        assert_eq!(from_table, CATEGORY_NAMES.to_vec());
    }

    #[test]
    fn wire_names_are_lowercase_and_short() {
        for name in CATEGORY_NAMES {
            assert_eq!(name, name.to_lowercase());
            assert!(name.chars().count() <= 50);
        }
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(Category::normalize("Mains").unwrap(), Category::Mains);
        assert_eq!(Category::normalize(" DESSERTS\t").unwrap(), Category::Desserts);
        assert_eq!(Category::normalize("beverages").unwrap(), Category::Beverages);
    }

    #[test]
    fn rejects_unknown() {
        let err = Category::normalize("pizza").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { field: "category", .. }));

        // Singular forms are not coerced
        assert!(Category::normalize("main").is_err());
    }

    #[test]
    fn rejects_blank() {
        assert!(matches!(
            Category::normalize("   ").unwrap_err(),
            ValidationError::Empty { .. }
        ));
    }

    #[test]
    fn serializes_as_wire_name() {
        let json = serde_json::to_string(&Category::Appetizers).unwrap();
        assert_eq!(json, "\"appetizers\"");

        let back: Category = serde_json::from_str("\"Appetizers\"").unwrap();
        assert_eq!(back, Category::Appetizers);
    }

    fn arb_casing(s: &'static str) -> impl Strategy<Value = String> {
        prop::collection::vec(any::<bool>(), s.len()).prop_map(move |upper| {
            s.chars()
                .zip(upper)
                .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c })
                .collect()
        })
    }

    proptest! {
        /// Property: any casing of a wire name, with surrounding whitespace, normalizes back to it
        #[test]
        fn prop_normalize_ignores_case_and_padding(
            idx in 0usize..4,
            casing in prop::collection::vec(any::<bool>(), 16),
            left in "[ \t]{0,3}",
            right in "[ \t]{0,3}",
        ) {
            let name = CATEGORY_NAMES[idx];
            let cased: String = name
                .chars()
                .zip(casing.iter().cycle())
                .map(|(c, u)| if *u { c.to_ascii_uppercase() } else { c })
                .collect();
            let raw = format!("{}{}{}", left, cased, right);

            prop_assert_eq!(Category::normalize(&raw).unwrap().as_str(), name);
        }

        /// Property: strings outside the label set are always rejected
        #[test]
        fn prop_normalize_rejects_non_members(raw in "[a-z]{1,12}") {
            prop_assume!(!CATEGORY_NAMES.contains(&raw.as_str()));
            prop_assert!(Category::normalize(&raw).is_err());
        }

        #[test]
        fn prop_mains_any_casing(cased in arb_casing("mains")) {
            prop_assert_eq!(Category::normalize(&cased).unwrap(), Category::Mains);
        }
    }
}
