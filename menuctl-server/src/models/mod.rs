//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod category;
pub mod dietary;
pub mod menu_item;

pub use validation::{FieldError, ValidationError, ValidationErrors};
pub use category::{Category, CATEGORY_NAMES};
pub use dietary::{DietaryTag, DIETARY_TAG_NAMES};
pub use menu_item::{now_utc, ItemName, MenuItem, MenuItemFields, MenuItemInput};
