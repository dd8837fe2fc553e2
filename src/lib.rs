//! Recipe catalog service.
//!
//! Recipes reference cuisines and tags from closed vocabularies. The HTTP
//! surface lives in [`server`], persistence in [`db`].

pub mod ai;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod recipes;
pub mod server;

pub use config::Config;
pub use error::{Error, Result};
