// ABOUTME: Common benchmark utilities and fixtures for analysis performance testing
// ABOUTME: Provides deterministic raw provider batches for Criterion benchmarks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Common benchmark utilities and fixtures.

pub mod fixtures;
