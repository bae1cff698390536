/// mapobj-enrich - Placement object enrichment engine
///
/// Core library that classifies spatially-placed map objects (region,
/// named location, korok puzzle archetype, game-mode spawn eligibility)
/// and produces fully-derived records for a persistence sink.

pub mod config;
pub mod core;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
