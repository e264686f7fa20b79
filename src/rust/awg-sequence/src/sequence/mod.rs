// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Step containers and their wire formats.
//!
//! Every container keys its entries by an integer id and always emits them in
//! ascending id order, independent of insertion order. The wire format has no
//! sort marker, so the hardware relies on this ordering.

mod capture_sequence;
mod digital_output_sequence;
mod wave_sequence;

pub use capture_sequence::{CaptureConfig, CaptureSequence};
pub use digital_output_sequence::DigitalOutputSequence;
pub use wave_sequence::WaveSequence;
