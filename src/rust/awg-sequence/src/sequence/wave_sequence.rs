// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use awg_log::diagnostic;
use awg_units::START_LATENCY_NS;
use awg_utils::BoundedVecMap;

use crate::hardware_traits::{MAX_STEPS, WAVE_SEQUENCE_TAG};
use crate::synthesizer::step_len;
use crate::wave::{WaveShape, validate_sampling_rate};
use crate::wire::{WireFormat, put_bool, put_f64, put_tag, put_u32};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
struct WaveStep {
    wave: WaveShape,
    interval: f64,
}

/// An ordered set of output waves for one AWG.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSequence {
    sampling_rate: f64,
    is_iq: bool,
    steps: BoundedVecMap<u32, WaveStep>,
}

impl WaveSequence {
    /// `sampling_rate` in Msps. An IQ sequence only accepts IQ waves, a
    /// real-valued sequence only non-IQ waves.
    pub fn new(sampling_rate: f64, is_iq: bool) -> Result<Self> {
        validate_sampling_rate(sampling_rate)?;
        Ok(WaveSequence {
            sampling_rate,
            is_iq,
            steps: BoundedVecMap::new(MAX_STEPS),
        })
    }

    /// Adds `wave` as step `step_id`.
    ///
    /// Any `u32` is a valid step id; ids only fix the order in which steps
    /// are played. `interval` is the requested time in ns from the start of
    /// this step to the start of the next one. It is extended to the wave's
    /// duration if shorter.
    ///
    /// Fails if a cycle of `wave` needs more than
    /// [`MAX_SAMPLES_PER_CYCLE`](crate::hardware_traits::MAX_SAMPLES_PER_CYCLE)
    /// samples at this sequence's sampling rate.
    pub fn add_step(
        &mut self,
        step_id: u32,
        wave: impl Into<WaveShape>,
        interval: f64,
    ) -> Result<&mut Self> {
        let wave = wave.into();
        if !(interval.is_finite() && interval >= 0.0) {
            return Err(Error::invalid_argument(format!(
                "Interval must be a non-negative number of ns, got {interval}"
            )));
        }
        if wave.is_iq() != self.is_iq {
            let expected = if self.is_iq { "an IQ" } else { "a non-IQ" };
            return Err(Error::invalid_argument(format!(
                "Step {step_id}: this sequence accepts only {expected} wave"
            )));
        }
        let wave = wave.with_sampling_rate(self.sampling_rate)?;
        if step_len(&wave, self.sampling_rate).is_none() {
            return Err(Error::invalid_argument(format!(
                "Step {step_id}: wave has too many samples at {} Msps",
                self.sampling_rate
            )));
        }
        self.steps
            .try_insert(step_id, WaveStep { wave, interval })
            .map_err(|e| Error::invalid_argument(format!("Step {step_id}: {e}")))?;
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

    /// The wave of a step, with this sequence's sampling rate attached.
    pub fn wave(&self, step_id: u32) -> Option<&WaveShape> {
        self.steps.get(&step_id).map(|step| &step.wave)
    }

    /// The interval requested for a step, in ns.
    pub fn interval(&self, step_id: u32) -> Option<f64> {
        self.steps.get(&step_id).map(|step| step.interval)
    }

    /// Output time of a step's wave, in ns.
    pub fn duration(&self, step_id: u32) -> Option<f64> {
        self.steps
            .get(&step_id)
            .map(|step| step.wave.duration_at(self.sampling_rate))
    }

    /// The interval sent to the hardware for a step, in ns.
    ///
    /// Never shorter than the wave, and shortened by one clock period to
    /// compensate the hardware's start latency.
    pub fn effective_interval(&self, step_id: u32) -> Option<f64> {
        self.steps
            .get(&step_id)
            .map(|step| self.effective_interval_of(step))
    }

    fn effective_interval_of(&self, step: &WaveStep) -> f64 {
        let duration = step.wave.duration_at(self.sampling_rate);
        (step.interval - START_LATENCY_NS)
            .max(duration - START_LATENCY_NS)
            .max(0.0)
    }
}

impl WireFormat for WaveSequence {
    fn encode(&self, out: &mut Vec<u8>) {
        let start = out.len();
        put_tag(out, WAVE_SEQUENCE_TAG);
        put_f64(out, self.sampling_rate);
        put_bool(out, self.is_iq);
        put_u32(out, self.steps.len() as u32);
        for (step_id, step) in self.steps.iter() {
            put_u32(out, *step_id);
            put_f64(out, self.effective_interval_of(step));
            step.wave.encode_at(out, self.sampling_rate);
        }
        diagnostic!(
            "Serialized wave sequence with {} steps into {} bytes",
            self.steps.len(),
            out.len() - start
        );
    }
}
