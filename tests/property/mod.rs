// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Properties of routing type parsing and topology snapshots that must hold
//! for any management listing.

mod routing;
mod topology;
