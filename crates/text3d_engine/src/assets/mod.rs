//! Asset loading and caching
//!
//! Typeface resources are parsed from JSON files and cached per font id.

pub mod font;
pub mod font_cache;

pub use font::{FontResource, Glyph};
pub use font_cache::{FontCache, FontFetcher, FontLoadError, FontRegistry, TypefaceFileFetcher};
