// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! The descriptor block the hardware returns for a programmed wave sequence.
//!
//! ```text
//! Offset    Size  Field
//! ------    ----  -----
//! 0x00      4B    step_count
//! 0x04      4B    is_iq
//! 0x08      8B    sampling_rate (Msps, f64)
//! 0x10      8B    step record 0: step_id (u32), infinite_cycles (u32)
//! ...
//! ```

use crate::wire::{ByteReader, put_bool, put_f64, put_u32};
use crate::{Error, Result};

const HEADER_SIZE: usize = 16;
const STEP_RECORD_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StepDescriptor {
    pub step_id: u32,
    /// The step repeats its wave until the sequence is stopped.
    pub infinite: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveSequenceParams {
    pub is_iq: bool,
    pub sampling_rate: f64,
    /// In the order the hardware executes them.
    pub steps: Vec<StepDescriptor>,
}

impl WaveSequenceParams {
    /// Parses a descriptor block.
    ///
    /// The buffer must hold at least as many step records as the header
    /// advertises.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let reader = ByteReader::new(data, "wave sequence descriptor");
        let step_count = reader.u32_at(0)? as usize;
        let is_iq = reader.u32_at(4)? != 0;
        let sampling_rate = reader.f64_at(8)?;

        let expected_len = step_count
            .checked_mul(STEP_RECORD_SIZE)
            .and_then(|len| len.checked_add(HEADER_SIZE))
            .ok_or_else(|| Error::malformed_input(format!("Step count {step_count} overflows")))?;
        if reader.len() < expected_len {
            return Err(Error::malformed_input(format!(
                "Wave sequence descriptor advertises {step_count} steps ({expected_len} bytes), got {} bytes",
                reader.len()
            )));
        }

        let steps = (0..step_count)
            .map(|index| {
                let offset = HEADER_SIZE + index * STEP_RECORD_SIZE;
                Ok(StepDescriptor {
                    step_id: reader.u32_at(offset)?,
                    infinite: reader.u32_at(offset + 4)? != 0,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(WaveSequenceParams {
            is_iq,
            sampling_rate,
            steps,
        })
    }

    /// The descriptor block as the hardware lays it out.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE + self.steps.len() * STEP_RECORD_SIZE);
        put_u32(&mut out, self.steps.len() as u32);
        put_bool(&mut out, self.is_iq);
        put_f64(&mut out, self.sampling_rate);
        for step in &self.steps {
            put_u32(&mut out, step.step_id);
            put_bool(&mut out, step.infinite);
        }
        out
    }

    pub fn num_steps(&self) -> usize {
        self.steps.len()
    }
}
