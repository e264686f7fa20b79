// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use crate::capture::validate_delay;
use crate::hardware_traits::{MAX_DIGITAL_OUTPUT_DURATION_NS, MAX_DIGITAL_OUTPUT_ENTRIES};
use crate::wire::{WireFormat, put_f64, put_u32};
use crate::{Error, Result};

/// One 8-bit output pattern held for `duration` ns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitalOutputEntry {
    pub value: u8,
    pub duration: f64,
}

/// A timed list of digital output patterns, played after an initial delay.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitalOutputVector {
    delay: f64,
    entries: Vec<DigitalOutputEntry>,
}

impl DigitalOutputVector {
    /// `delay` in ns.
    pub fn new(delay: f64) -> Result<Self> {
        validate_delay(delay)?;
        Ok(DigitalOutputVector {
            delay,
            entries: Vec::new(),
        })
    }

    /// Appends a pattern held for `duration` ns.
    pub fn append(&mut self, value: u8, duration: f64) -> Result<&mut Self> {
        if !(duration > 0.0 && duration <= MAX_DIGITAL_OUTPUT_DURATION_NS) {
            return Err(Error::invalid_argument(format!(
                "Digital output duration must be in (0, {MAX_DIGITAL_OUTPUT_DURATION_NS:e}] ns, got {duration}"
            )));
        }
        if self.entries.len() >= MAX_DIGITAL_OUTPUT_ENTRIES {
            return Err(Error::invalid_argument(format!(
                "A digital output vector holds at most {MAX_DIGITAL_OUTPUT_ENTRIES} entries"
            )));
        }
        self.entries.push(DigitalOutputEntry { value, duration });
        Ok(self)
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn entries(&self) -> &[DigitalOutputEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry durations in ns, excluding the delay.
    pub fn duration(&self) -> f64 {
        self.entries.iter().map(|entry| entry.duration).sum()
    }
}

impl WireFormat for DigitalOutputVector {
    fn encode(&self, out: &mut Vec<u8>) {
        put_f64(out, self.delay);
        put_u32(out, self.entries.len() as u32);
        for entry in &self.entries {
            put_u32(out, u32::from(entry.value));
            put_f64(out, entry.duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_bytes() {
        let mut vector = DigitalOutputVector::new(5.0).unwrap();
        vector.append(0xA5, 10.0).unwrap().append(0, 20.0).unwrap();
        assert_eq!(vector.duration(), 30.0);

        let bytes = vector.to_bytes();
        assert_eq!(bytes.len(), 8 + 4 + 2 * 12);
        assert_eq!(&bytes[0..8], &5.0f64.to_le_bytes());
        assert_eq!(&bytes[8..12], &2u32.to_le_bytes());
        assert_eq!(&bytes[12..16], &0xA5u32.to_le_bytes());
        assert_eq!(&bytes[16..24], &10.0f64.to_le_bytes());
        assert_eq!(&bytes[24..28], &0u32.to_le_bytes());
        assert_eq!(&bytes[28..36], &20.0f64.to_le_bytes());
    }

    #[test]
    fn test_vector_limits() {
        let mut vector = DigitalOutputVector::new(0.0).unwrap();
        assert!(vector.append(1, 0.0).is_err());
        assert!(vector.append(1, 1.1e10).is_err());
        assert!(vector.append(1, f64::NAN).is_err());
        for _ in 0..MAX_DIGITAL_OUTPUT_ENTRIES {
            vector.append(1, 1.0).unwrap();
        }
        assert!(matches!(
            vector.append(1, 1.0),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(vector.len(), MAX_DIGITAL_OUTPUT_ENTRIES);
        assert!(DigitalOutputVector::new(-1.0).is_err());
    }
}
