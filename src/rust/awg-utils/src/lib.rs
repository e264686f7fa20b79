// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

pub mod vec_map;

pub use vec_map::{BoundedVecMap, BoundedVecMapError, VecMap};
