//! Generation provider integration
//!
//! [`provider`] defines the provider seam and the Gemini implementation,
//! [`client`] turns raw provider calls into recipes, images and suggestions,
//! and [`worker`] runs those calls off the UI thread.

pub mod client;
pub mod prompt;
pub mod provider;
pub mod suggestion;
pub mod worker;
