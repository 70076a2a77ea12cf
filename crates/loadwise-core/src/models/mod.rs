// ABOUTME: Canonical data models shared by normalizers and the analytics engine
// ABOUTME: Re-exports ActivityRecord, ActivityKind and SourceProvider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Provider-agnostic representation of a single workout after normalization.
//! Provider-specific field names never leave the normalizer; everything
//! downstream only sees these types.

mod activity;
mod kind;
mod source;

pub use activity::ActivityRecord;
pub use kind::ActivityKind;
pub use source::SourceProvider;
