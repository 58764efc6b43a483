#![doc = include_str!("../README.md")]

mod error;
pub mod pattern;
pub mod placeholder;
pub mod region;
mod target;

pub use error::{PatternError, SubstitutionError, TargetError};
pub use pattern::validate;
pub use placeholder::{Placeholder, PlaceholderValues, substitute};
pub use region::{EffectiveCode, RegionMarker, RegionParams, has_locale_region};
pub use target::{LocaleFile, Params, RemoteLocale, Target};
