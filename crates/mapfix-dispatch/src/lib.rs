//! Dispatcher regeneration for MapFixer.
//!
//! A dispatcher is a script whose switch statement must list every sibling
//! script. Its rewrite rules travel with it as a `///`-prefixed XML header:
//!
//! 1. [`settings`] pulls the header out of the file.
//! 2. [`config`] validates and compiles it.
//! 3. [`region`] blanks comments and locates the region to replace.
//! 4. [`regen`] renders the new region from the sibling listing and writes
//!    the file back in the game's code page.

pub mod config;
pub mod error;
pub mod region;
pub mod regen;
pub mod settings;
pub mod template;

pub use config::{DispatcherConfig, DispatcherSettings};
pub use error::{Error, Result};
pub use regen::{RegenReport, regenerate, regenerate_content, render_switch_body, sibling_scripts};
pub use settings::{SETTINGS_SENTINEL, extract_settings};
pub use template::CaseTemplate;
