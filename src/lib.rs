//! # Russian Hover — hover-to-translate for Russian text
//!
//! Resolves the Russian word under a pointer, shows an approximate English
//! pronunciation immediately, and fills in a translation fetched from a
//! language model. Lookups are cached for the life of the process and
//! concurrent lookups for the same word share one fetch.
//!
//! ## Architecture
//!
//! - **[`config`]** — Configuration loading, validation, and defaults
//! - **[`phonetics`]** — Rule-based Cyrillic to Latin pronunciation
//! - **[`locator`]** — Word boundaries, Russian detection, recognized-text cleanup
//! - **[`translation`]** — Translation entries, the coalescing cache, and fetchers
//! - **[`recognition`]** — Screen-text recognition collaborator
//! - **[`hover`]** — Debounced per-stream resolvers and presentation states

pub mod config;
pub mod hover;
pub mod locator;
pub mod phonetics;
pub mod recognition;
pub mod translation;
