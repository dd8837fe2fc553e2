mod catalog;
mod ingredient;
mod recipe;
mod user;

pub use catalog::{Cuisine, EntityRef, Tag};
pub use ingredient::Ingredient;
pub use recipe::Recipe;
pub use user::User;
