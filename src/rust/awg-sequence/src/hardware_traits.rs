// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Limits of the AWG / capture hardware.
//!
//! NOTE: These values are fixed by the FPGA design. The wire format carries
//! no version field, so changing any of them is a breaking change.

/// Maximum number of steps in a wave, capture or digital output sequence.
pub const MAX_STEPS: usize = 32;

/// Number of capture units addressable from one [`crate::CaptureConfig`].
pub const NUM_CAPTURE_DEVICES: u32 = 8;

/// Maximum number of (pattern, duration) entries in a digital output vector.
pub const MAX_DIGITAL_OUTPUT_ENTRIES: usize = 32;

/// Largest repeat count of a wave. `0xFFFF_FFFF` is reserved by the hardware.
pub const MAX_NUM_CYCLES: u32 = 0xFFFF_FFFE;

/// Largest number of samples in one wave cycle.
///
/// Step words address wave RAM with 32-bit byte offsets, so one cycle of
/// interleaved IQ int16 samples must stay within 4 GiB.
pub const MAX_SAMPLES_PER_CYCLE: usize = (u32::MAX / 4) as usize;

/// Largest capture / digital output start delay in ns.
pub const MAX_DELAY_NS: f64 = 1.4e10;

/// Largest duration of a single digital output entry in ns.
pub const MAX_DIGITAL_OUTPUT_DURATION_NS: f64 = 1e10;

/// Wave kind code written for arbitrary-sample waves.
pub const ANY_WAVE_KIND: u32 = 1000;

pub const WAVE_SEQUENCE_TAG: &[u8; 4] = b"WSEQ";
pub const CAPTURE_CONFIG_TAG: &[u8; 4] = b"CPCF";
pub const DIGITAL_OUTPUT_SEQUENCE_TAG: &[u8; 4] = b"DSEQ";
