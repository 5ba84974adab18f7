// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod profile;
pub mod weight;

pub use profile::{NewProfile, Profile, ProfileRequest};
pub use weight::{LogWeightRequest, NewWeightRecord, WeightPoint, WeightRecord};
