//! Aster Alarm Core
//!
//! Platform-agnostic domain logic for the Aster Alarm charm player.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `CharmTrait`, `TrackId`
//! - **Category Registry**: the seven charm categories with their themes
//! - **Dominance Resolver**: trait classification and dominant-category resolution
//! - **Catalog**: the data-fetch seam and the in-memory session list
//! - **Formatting**: `M:SS` clocks and locale-aware timestamps
//! - **Configuration** and the unified `AsterError` / `Result` types
//!
//! # Example
//!
//! ```rust
//! use aster_core::{CategoryId, CategoryRegistry, CharmTrait, DominanceResolver};
//!
//! let registry = CategoryRegistry::standard();
//! let resolver = DominanceResolver::new(&registry);
//!
//! let traits = vec![
//!     CharmTrait::new("침착함", 6),
//!     CharmTrait::new("안정감", 5),
//!     CharmTrait::new("긍정적", 4),
//! ];
//!
//! let dominant = resolver.resolve_dominant_category(&traits);
//! assert_eq!(dominant.id, CategoryId::Stability);
//!
//! // Nothing recognisable falls back to passion
//! assert_eq!(resolver.resolve_dominant_category(&[]).id, CategoryId::Passion);
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod category;
pub mod config;
pub mod error;
pub mod format;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use catalog::{JsonCatalog, MockCatalog, TrackCatalog, TrackList, TrackListEntry};
pub use category::{Category, CategoryId, CategoryRegistry, GradientClasses, Palette, Rgb, Theme};
pub use crate::config::{AsterConfig, DisplaySettings, PlaybackSettings};
pub use error::{AsterError, Result};
pub use format::{format_clock, format_date, format_list_timestamp, DisplayLocale};
pub use resolver::{CategoryCounts, DominanceResolver};
pub use types::{CharmTrait, Track, TrackId};
