// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use awg_utils::BoundedVecMap;

use crate::Result;
use crate::digital_output::DigitalOutputVector;
use crate::hardware_traits::{DIGITAL_OUTPUT_SEQUENCE_TAG, MAX_STEPS};
use crate::wire::{WireFormat, put_tag, put_u32};

/// Digital output vectors keyed by the wave step they accompany.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitalOutputSequence {
    steps: BoundedVecMap<u32, DigitalOutputVector>,
}

impl Default for DigitalOutputSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitalOutputSequence {
    pub fn new() -> Self {
        DigitalOutputSequence {
            steps: BoundedVecMap::new(MAX_STEPS),
        }
    }

    /// Attaches `vector` to wave step `step_id`. Any `u32` is a valid step id.
    pub fn add_step(&mut self, step_id: u32, vector: DigitalOutputVector) -> Result<&mut Self> {
        self.steps.try_insert(step_id, vector)?;
        Ok(self)
    }

    pub fn num_steps(&self) -> usize {
        self.steps.len()
    }

    /// Step ids in ascending order.
    pub fn step_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.steps.keys().copied()
    }

    pub fn vector(&self, step_id: u32) -> Option<&DigitalOutputVector> {
        self.steps.get(&step_id)
    }
}

impl WireFormat for DigitalOutputSequence {
    fn encode(&self, out: &mut Vec<u8>) {
        put_tag(out, DIGITAL_OUTPUT_SEQUENCE_TAG);
        put_u32(out, self.steps.len() as u32);
        for (step_id, vector) in self.steps.iter() {
            put_u32(out, *step_id);
            vector.encode(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn vector(value: u8) -> DigitalOutputVector {
        let mut vector = DigitalOutputVector::new(0.0).unwrap();
        vector.append(value, 100.0).unwrap();
        vector
    }

    #[test]
    fn test_sequence_layout() {
        let mut seq = DigitalOutputSequence::new();
        seq.add_step(9, vector(2)).unwrap();
        seq.add_step(3, vector(1)).unwrap();

        let mut expected = b"DSEQ".to_vec();
        expected.extend_from_slice(&2u32.to_le_bytes());
        for (id, value) in [(3u32, 1u8), (9, 2)] {
            expected.extend_from_slice(&id.to_le_bytes());
            expected.extend_from_slice(&vector(value).to_bytes());
        }
        assert_eq!(seq.to_bytes(), expected);
    }

    #[test]
    fn test_duplicate_step() {
        let mut seq = DigitalOutputSequence::default();
        seq.add_step(0, vector(1)).unwrap();
        assert_eq!(
            seq.add_step(0, vector(1)).unwrap_err(),
            Error::InvalidArgument("Key 0 is already present".to_string())
        );
    }
}
