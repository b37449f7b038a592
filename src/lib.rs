//! pantry: turn the ingredients you have into a recipe, right in your terminal.
//!
//! The crate is split the same way the UI is: [`ai`] talks to the generation
//! provider, [`widgets`] renders, and [`app`] owns the state that ties the two
//! together.

pub mod ai;
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod recipe;
pub mod widgets;


pub use error::PantryError;
