// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use awg_log::diagnostic;
use awg_utils::BoundedVecMap;

use crate::capture::CaptureSpec;
use crate::hardware_traits::{CAPTURE_CONFIG_TAG, MAX_STEPS, NUM_CAPTURE_DEVICES};
use crate::wave::validate_sampling_rate;
use crate::wire::{WireFormat, put_bool, put_f64, put_tag, put_u32};
use crate::{Error, Result};

/// An ordered set of capture windows for one capture unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSequence {
    sampling_rate: f64,
    is_iq: bool,
    steps: BoundedVecMap<u32, CaptureSpec>,
}

impl CaptureSequence {
    /// `sampling_rate` in Msps.
    pub fn new(sampling_rate: f64, is_iq: bool) -> Result<Self> {
        validate_sampling_rate(sampling_rate)?;
        Ok(CaptureSequence {
            sampling_rate,
            is_iq,
            steps: BoundedVecMap::new(MAX_STEPS),
        })
    }

    /// Adds `capture` as step `step_id`. Any `u32` is a valid step id.
    pub fn add_step(&mut self, step_id: u32, capture: impl Into<CaptureSpec>) -> Result<&mut Self> {
        self.steps
            .try_insert(step_id, capture.into())
            .map_err(|e| Error::invalid_argument(format!("Capture step {step_id}: {e}")))?;
        Ok(self)
    }

    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    pub fn is_iq(&self) -> bool {
        self.is_iq
    }

    pub fn num_steps(&self) -> usize {
        self.steps.len()
    }

    /// Step ids in ascending order.
    pub fn step_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.steps.keys().copied()
    }

    pub fn capture(&self, step_id: u32) -> Option<&CaptureSpec> {
        self.steps.get(&step_id)
    }

    /// Number of samples per window captured by a step.
    pub fn num_samples(&self, step_id: u32) -> Option<usize> {
        self.steps
            .get(&step_id)
            .map(|capture| capture.num_samples(self.sampling_rate))
    }
}

impl WireFormat for CaptureSequence {
    fn encode(&self, out: &mut Vec<u8>) {
        put_f64(out, self.sampling_rate);
        put_bool(out, self.is_iq);
        put_u32(out, self.steps.len() as u32);
        for (step_id, capture) in self.steps.iter() {
            put_u32(out, *step_id);
            capture.encode(out);
        }
    }
}

/// Capture sequences for several capture units, keyed by device id.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    sequences: BoundedVecMap<u32, CaptureSequence>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureConfig {
    pub fn new() -> Self {
        CaptureConfig {
            sequences: BoundedVecMap::new(NUM_CAPTURE_DEVICES as usize),
        }
    }

    /// Assigns `sequence` to capture unit `device_id` (0..8).
    pub fn add_capture_sequence(
        &mut self,
        device_id: u32,
        sequence: CaptureSequence,
    ) -> Result<&mut Self> {
        if device_id >= NUM_CAPTURE_DEVICES {
            return Err(Error::invalid_argument(format!(
                "Capture device id must be in [0, {}), got {device_id}",
                NUM_CAPTURE_DEVICES
            )));
        }
        self.sequences
            .try_insert(device_id, sequence)
            .map_err(|e| Error::invalid_argument(format!("Capture device {device_id}: {e}")))?;
        Ok(self)
    }

    pub fn num_devices(&self) -> usize {
        self.sequences.len()
    }

    /// Device ids in ascending order.
    pub fn device_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.sequences.keys().copied()
    }

    pub fn capture_sequence(&self, device_id: u32) -> Option<&CaptureSequence> {
        self.sequences.get(&device_id)
    }
}

impl WireFormat for CaptureConfig {
    fn encode(&self, out: &mut Vec<u8>) {
        let start = out.len();
        put_tag(out, CAPTURE_CONFIG_TAG);
        for (device_id, sequence) in self.sequences.iter() {
            let bytes = sequence.to_bytes();
            put_u32(out, *device_id);
            put_u32(out, bytes.len() as u32);
            out.extend_from_slice(&bytes);
        }
        diagnostic!(
            "Serialized capture config for {} devices into {} bytes",
            self.sequences.len(),
            out.len() - start
        );
    }
}
