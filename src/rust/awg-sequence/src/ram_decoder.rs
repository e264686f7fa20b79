// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Reconstruction of sample arrays from hardware wave RAM.
//!
//! For each step the hardware keeps a fixed-size parameter word describing
//! where its samples live in wave RAM. A step plays a primary chunk
//! `num_cycles - 1` times, followed by a separate last-cycle chunk that may
//! live elsewhere and may be shorter.
//!
//! NOTE: The word layout is defined by the FPGA design. [`StepWordLayout`]
//! carries the offsets so that they can be matched to the deployed bitstream.

use awg_units::ticks_to_ns;

use crate::wire::ByteReader;
use crate::{Error, Result};

/// Byte offsets of the fields within one step parameter word.
///
/// All fields are little-endian `u32`, except `interval_ticks` which is a
/// `u64` counted in 300 MHz clock ticks. Addresses are byte offsets into the
/// wave RAM region, sample counts are int16 values (I and Q counted
/// separately for IQ sequences).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepWordLayout {
    pub block_size: usize,
    pub start_addr: usize,
    pub num_samples: usize,
    pub last_cycle_start_addr: usize,
    pub last_cycle_num_samples: usize,
    pub num_cycles: usize,
    pub interval_ticks: usize,
}

impl Default for StepWordLayout {
    fn default() -> Self {
        StepWordLayout {
            block_size: 32,
            start_addr: 0,
            num_samples: 4,
            last_cycle_start_addr: 8,
            last_cycle_num_samples: 12,
            num_cycles: 16,
            interval_ticks: 24,
        }
    }
}

impl StepWordLayout {
    fn fields(&self) -> [(&'static str, usize, usize); 6] {
        [
            ("start_addr", self.start_addr, 4),
            ("num_samples", self.num_samples, 4),
            ("last_cycle_start_addr", self.last_cycle_start_addr, 4),
            ("last_cycle_num_samples", self.last_cycle_num_samples, 4),
            ("num_cycles", self.num_cycles, 4),
            ("interval_ticks", self.interval_ticks, 8),
        ]
    }

    /// Largest supported parameter word, in bytes.
    pub const MAX_BLOCK_SIZE: usize = 1024;

    /// Checks that every field lies within the block and no two fields overlap.
    pub fn validate(&self) -> Result<()> {
        if self.block_size > Self::MAX_BLOCK_SIZE {
            return Err(Error::invalid_argument(format!(
                "Step word block of {} bytes exceeds {} bytes",
                self.block_size,
                Self::MAX_BLOCK_SIZE
            )));
        }
        let fields = self.fields();
        for (name, offset, size) in fields {
            if offset.checked_add(size).is_none_or(|end| end > self.block_size) {
                return Err(Error::invalid_argument(format!(
                    "Step word field `{name}` at offset {offset} exceeds the {} byte block",
                    self.block_size
                )));
            }
        }
        for (i, &(name_a, offset_a, size_a)) in fields.iter().enumerate() {
            for &(name_b, offset_b, size_b) in &fields[i + 1..] {
                if offset_a < offset_b + size_b && offset_b < offset_a + size_a {
                    return Err(Error::invalid_argument(format!(
                        "Step word fields `{name_a}` and `{name_b}` overlap"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The decoded parameter word of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepWord {
    pub start_addr: u32,
    pub num_samples: u32,
    pub last_cycle_start_addr: u32,
    pub last_cycle_num_samples: u32,
    pub num_cycles: u32,
    pub interval_ticks: u64,
}

impl StepWord {
    /// Reads the word of step `step_index` from the parameter region.
    ///
    /// Fails with `InvalidArgument` if `layout` does not validate.
    pub fn read(step_words: &[u8], step_index: usize, layout: &StepWordLayout) -> Result<Self> {
        layout.validate()?;
        let region = ByteReader::new(step_words, "step parameter region");
        let base = step_index.checked_mul(layout.block_size).ok_or_else(|| {
            Error::malformed_input(format!("Step index {step_index} is out of range"))
        })?;
        // The whole block must be present, not just the fields.
        let word = ByteReader::new(
            region.bytes_at(base, layout.block_size)?,
            "step parameter word",
        );
        Ok(StepWord {
            start_addr: word.u32_at(layout.start_addr)?,
            num_samples: word.u32_at(layout.num_samples)?,
            last_cycle_start_addr: word.u32_at(layout.last_cycle_start_addr)?,
            last_cycle_num_samples: word.u32_at(layout.last_cycle_num_samples)?,
            num_cycles: word.u32_at(layout.num_cycles)?,
            interval_ticks: word.u64_at(layout.interval_ticks)?,
        })
    }

    /// One parameter block laid out per `layout`; unused bytes are zero.
    pub fn to_bytes(&self, layout: &StepWordLayout) -> Result<Vec<u8>> {
        layout.validate()?;
        let mut block = vec![0u8; layout.block_size];
        let mut put = |offset: usize, bytes: &[u8]| {
            block[offset..offset + bytes.len()].copy_from_slice(bytes);
        };
        put(layout.start_addr, &self.start_addr.to_le_bytes());
        put(layout.num_samples, &self.num_samples.to_le_bytes());
        put(
            layout.last_cycle_start_addr,
            &self.last_cycle_start_addr.to_le_bytes(),
        );
        put(
            layout.last_cycle_num_samples,
            &self.last_cycle_num_samples.to_le_bytes(),
        );
        put(layout.num_cycles, &self.num_cycles.to_le_bytes());
        put(layout.interval_ticks, &self.interval_ticks.to_le_bytes());
        Ok(block)
    }

    /// Interval from the start of this step to the start of the next, in ns.
    pub fn interval_ns(&self) -> f64 {
        ticks_to_ns(self.interval_ticks)
    }

    fn validate(&self) -> Result<()> {
        if self.num_cycles == 0 {
            return Err(Error::malformed_input("Step word has zero cycles"));
        }
        Ok(())
    }

    /// Total number of values in the reconstructed step, per channel.
    fn total_len(&self, primary_len: usize, last_len: usize) -> Result<usize> {
        primary_len
            .checked_mul(self.num_cycles as usize - 1)
            .and_then(|len| len.checked_add(last_len))
            .ok_or_else(|| {
                Error::malformed_input(format!(
                    "Step of {} cycles x {primary_len} samples is too large",
                    self.num_cycles
                ))
            })
    }
}

/// Reads step sample arrays out of a wave RAM dump.
#[derive(Debug, Clone, Default)]
pub struct RamSampleDecoder {
    layout: StepWordLayout,
}

impl RamSampleDecoder {
    pub fn new(layout: StepWordLayout) -> Result<Self> {
        layout.validate()?;
        Ok(RamSampleDecoder { layout })
    }

    pub fn layout(&self) -> &StepWordLayout {
        &self.layout
    }

    pub fn step_word(&self, step_words: &[u8], step_index: usize) -> Result<StepWord> {
        StepWord::read(step_words, step_index, &self.layout)
    }

    /// Samples of a real-valued step.
    pub fn decode_real(&self, word: &StepWord, wave_ram: &[u8]) -> Result<Vec<i16>> {
        word.validate()?;
        let ram = ByteReader::new(wave_ram, "wave RAM");
        let primary = ram.i16_samples_at(word.start_addr as usize, word.num_samples as usize)?;
        let last = ram.i16_samples_at(
            word.last_cycle_start_addr as usize,
            word.last_cycle_num_samples as usize,
        )?;
        let mut samples = Vec::with_capacity(word.total_len(primary.len(), last.len())?);
        for _ in 1..word.num_cycles {
            samples.extend_from_slice(&primary);
        }
        samples.extend_from_slice(&last);
        Ok(samples)
    }

    /// I and Q samples of an IQ step, stored interleaved in wave RAM.
    pub fn decode_iq(&self, word: &StepWord, wave_ram: &[u8]) -> Result<(Vec<i16>, Vec<i16>)> {
        word.validate()?;
        for (name, count) in [
            ("num_samples", word.num_samples),
            ("last_cycle_num_samples", word.last_cycle_num_samples),
        ] {
            if count % 2 != 0 {
                return Err(Error::malformed_input(format!(
                    "IQ step word has an odd `{name}` of {count}"
                )));
            }
        }
        let ram = ByteReader::new(wave_ram, "wave RAM");
        let (primary_i, primary_q) =
            ram.iq_samples_at(word.start_addr as usize, word.num_samples as usize / 2)?;
        let (last_i, last_q) = ram.iq_samples_at(
            word.last_cycle_start_addr as usize,
            word.last_cycle_num_samples as usize / 2,
        )?;
        let total = word.total_len(primary_i.len(), last_i.len())?;
        let mut i_samples = Vec::with_capacity(total);
        let mut q_samples = Vec::with_capacity(total);
        for _ in 1..word.num_cycles {
            i_samples.extend_from_slice(&primary_i);
            q_samples.extend_from_slice(&primary_q);
        }
        i_samples.extend_from_slice(&last_i);
        q_samples.extend_from_slice(&last_q);
        Ok((i_samples, q_samples))
    }
}
