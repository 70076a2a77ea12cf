// ABOUTME: Provider schema normalizers mapping raw activity dictionaries to canonical records
// ABOUTME: One field-mapping table per provider, dispatched by an exhaustive match
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Loadwise Providers
//!
//! Turns provider-shaped activity dictionaries into [`ActivityRecord`]s.
//!
//! Each [`SourceProvider`] owns a [`FieldMap`] naming the fields that carry
//! its activity code, duration, distance and start time. The owning provider
//! decides which field is authoritative, so a Strava record with a stray
//! `workoutActivityType` key is still classified by its `type`.
//!
//! Per-record problems (no usable timestamp) drop the record and are reported
//! alongside the results. An unknown source tag fails a whole batch, or only
//! the one record when the tag sits on a record of a mixed collection.
//!
//! [`ActivityRecord`]: loadwise_core::models::ActivityRecord
//! [`SourceProvider`]: loadwise_core::models::SourceProvider

/// Apple Health workout export schema
pub mod apple_health;
/// Field-mapping tables and provider dispatch
pub mod fields;
/// Raw-to-canonical normalization
pub mod normalizer;
/// Strava activity export schema
pub mod strava;
/// Timestamp parsing for provider date formats
pub mod timestamps;

pub use fields::{field_map, FieldMap};
pub use normalizer::{
    normalize_activity, normalize_batch, normalize_tagged, NormalizedBatch, RawBatch, RawFields,
    RejectedTag, TaggedActivity, TaggedOutcome,
};
