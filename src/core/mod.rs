pub mod error;
pub mod hash;
pub mod models;

// Static side tables (actor info, polygons, korok ids, locations, tags)
pub mod tables;

// Lookup and resolution components
pub mod catalog;
pub mod naming;
pub mod polygon;
pub mod region;

// Generation-group classification (last-boss eligibility + korok archetypes)
pub mod classify;

// Per-map enrichment orchestration
pub mod pipeline;
