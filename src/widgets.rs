//! Stateless presentation components
//!
//! Each function turns plain data into ratatui widgets or text; none of them
//! hold or change state.

pub mod chips;
pub mod error_banner;
pub mod recipe_panel;
pub mod spinner;
