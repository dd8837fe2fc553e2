//! recipebox core library
//!
//! Catalog models, recipe input validation and the search criteria builder.
//! Nothing here performs I/O.

pub mod criteria;
pub mod draft;
pub mod filter;
pub mod models;

pub use criteria::{split_list, ExtractedCriteria, SearchParams};
pub use draft::{RecipeDraft, RecipeInput, ValidationError};
pub use filter::{fold_case, Filter};
pub use models::{Cuisine, EntityRef, Ingredient, Recipe, Tag, User};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
