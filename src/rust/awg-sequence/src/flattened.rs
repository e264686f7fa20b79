// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Concrete per-step sample arrays with their timing.
//!
//! A flattened sequence is built either from a [`WaveSequence`] by sampling
//! its waves, or from hardware memory dumps with [`decode_wave_sequence`].
//! Either way the result is what renderers and verification code consume.

use awg_log::{diagnostic, info};
use awg_units::samples_to_ns;
use awg_utils::VecMap;
use num_complex::Complex;

use crate::hw_params::WaveSequenceParams;
use crate::ram_decoder::RamSampleDecoder;
use crate::sequence::WaveSequence;
use crate::wave::WaveShape;
use crate::{Error, Result};

/// Samples of one real-valued step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlattenedWaveform {
    samples: Vec<i16>,
    duration: f64,
    interval: f64,
}

impl FlattenedWaveform {
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Output time of the samples in ns; infinite for endlessly repeating steps.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Time from the start of this step to the start of the next, in ns.
    pub fn interval(&self) -> f64 {
        self.interval
    }
}

/// Samples of one IQ step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlattenedIqWaveform {
    i_samples: Vec<i16>,
    q_samples: Vec<i16>,
    duration: f64,
    interval: f64,
}

impl FlattenedIqWaveform {
    pub fn i_samples(&self) -> &[i16] {
        &self.i_samples
    }

    pub fn q_samples(&self) -> &[i16] {
        &self.q_samples
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// The samples as complex baseband values `I + jQ`.
    pub fn to_complex(&self) -> Vec<Complex<f64>> {
        self.i_samples
            .iter()
            .zip(&self.q_samples)
            .map(|(&i, &q)| Complex::new(f64::from(i), f64::from(q)))
            .collect()
    }
}

macro_rules! impl_flattened_sequence {
    ($name:ident, $step:ident) => {
        impl $name {
            pub fn sampling_rate(&self) -> f64 {
                self.sampling_rate
            }

            pub fn num_steps(&self) -> usize {
                self.steps.len()
            }

            /// Step ids in ascending order.
            pub fn step_ids(&self) -> impl Iterator<Item = u32> + '_ {
                self.steps.keys().copied()
            }

            pub fn step(&self, step_id: u32) -> Option<&$step> {
                self.steps.get(&step_id)
            }

            pub fn iter(&self) -> impl Iterator<Item = (u32, &$step)> {
                self.steps.iter().map(|(id, step)| (*id, step))
            }

            pub fn durations(&self) -> VecMap<u32, f64> {
                self.iter().map(|(id, step)| (id, step.duration)).collect()
            }

            pub fn intervals(&self) -> VecMap<u32, f64> {
                self.iter().map(|(id, step)| (id, step.interval)).collect()
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlattenedWaveformSequence {
    sampling_rate: f64,
    steps: VecMap<u32, FlattenedWaveform>,
}

impl_flattened_sequence!(FlattenedWaveformSequence, FlattenedWaveform);

impl FlattenedWaveformSequence {
    /// Samples every step of a real-valued sequence.
    pub fn from_wave_sequence(sequence: &WaveSequence) -> Result<Self> {
        if sequence.is_iq() {
            return Err(Error::invalid_argument(
                "Expected a real-valued wave sequence, got an IQ sequence",
            ));
        }
        let sampling_rate = sequence.sampling_rate();
        let mut steps = VecMap::with_capacity(sequence.num_steps());
        for step_id in sequence.step_ids() {
            let (Some(wave), Some(duration), Some(interval)) = (
                sequence.wave(step_id),
                sequence.duration(step_id),
                sequence.interval(step_id),
            ) else {
                return Err(Error::invalid_argument(format!(
                    "Step {step_id} is missing from the sequence"
                )));
            };
            let samples = match wave {
                WaveShape::Parametric(wave) => wave.synthesize(sampling_rate),
                WaveShape::AnyWave(wave) => wave.synthesize(),
                WaveShape::Iq(_) => {
                    return Err(Error::invalid_argument(format!(
                        "Step {step_id} holds an IQ wave"
                    )));
                }
            };
            steps.insert(
                step_id,
                FlattenedWaveform {
                    samples,
                    duration,
                    interval: interval.max(duration),
                },
            );
        }
        Ok(FlattenedWaveformSequence {
            sampling_rate,
            steps,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlattenedIqWaveformSequence {
    sampling_rate: f64,
    steps: VecMap<u32, FlattenedIqWaveform>,
}

impl_flattened_sequence!(FlattenedIqWaveformSequence, FlattenedIqWaveform);

impl FlattenedIqWaveformSequence {
    /// Samples every step of an IQ sequence.
    pub fn from_wave_sequence(sequence: &WaveSequence) -> Result<Self> {
        if !sequence.is_iq() {
            return Err(Error::invalid_argument(
                "Expected an IQ wave sequence, got a real-valued sequence",
            ));
        }
        let sampling_rate = sequence.sampling_rate();
        let mut steps = VecMap::with_capacity(sequence.num_steps());
        for step_id in sequence.step_ids() {
            let (Some(WaveShape::Iq(wave)), Some(duration), Some(interval)) = (
                sequence.wave(step_id),
                sequence.duration(step_id),
                sequence.interval(step_id),
            ) else {
                return Err(Error::invalid_argument(format!(
                    "Step {step_id} does not hold an IQ wave"
                )));
            };
            let (i_samples, q_samples) = wave.synthesize(sampling_rate);
            steps.insert(
                step_id,
                FlattenedIqWaveform {
                    i_samples,
                    q_samples,
                    duration,
                    interval: interval.max(duration),
                },
            );
        }
        Ok(FlattenedIqWaveformSequence {
            sampling_rate,
            steps,
        })
    }
}

/// A flattened sequence whose kind is only known at runtime.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FlattenedSequence {
    Real(FlattenedWaveformSequence),
    Iq(FlattenedIqWaveformSequence),
}

impl FlattenedSequence {
    pub fn from_wave_sequence(sequence: &WaveSequence) -> Result<Self> {
        if sequence.is_iq() {
            FlattenedIqWaveformSequence::from_wave_sequence(sequence).map(FlattenedSequence::Iq)
        } else {
            FlattenedWaveformSequence::from_wave_sequence(sequence).map(FlattenedSequence::Real)
        }
    }

    pub fn is_iq(&self) -> bool {
        matches!(self, FlattenedSequence::Iq(_))
    }

    pub fn sampling_rate(&self) -> f64 {
        match self {
            FlattenedSequence::Real(seq) => seq.sampling_rate(),
            FlattenedSequence::Iq(seq) => seq.sampling_rate(),
        }
    }

    pub fn step_ids(&self) -> Vec<u32> {
        match self {
            FlattenedSequence::Real(seq) => seq.step_ids().collect(),
            FlattenedSequence::Iq(seq) => seq.step_ids().collect(),
        }
    }
}

/// Rebuilds the sample arrays of a programmed wave sequence from hardware dumps.
///
/// - `descriptor`: the sequence descriptor block (see [`WaveSequenceParams`])
/// - `step_words`: the step parameter region, one word per executed step
/// - `wave_ram`: the wave RAM region the step words point into
pub fn decode_wave_sequence(
    descriptor: &[u8],
    step_words: &[u8],
    wave_ram: &[u8],
    decoder: &RamSampleDecoder,
) -> Result<FlattenedSequence> {
    let params = WaveSequenceParams::parse(descriptor)?;
    let sampling_rate = params.sampling_rate;
    if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
        return Err(Error::malformed_input(format!(
            "Descriptor holds an invalid sampling rate of {sampling_rate} Msps"
        )));
    }

    let mut real_steps = VecMap::new();
    let mut iq_steps = VecMap::new();
    for (index, step) in params.steps.iter().enumerate() {
        if real_steps.contains_key(&step.step_id) || iq_steps.contains_key(&step.step_id) {
            return Err(Error::malformed_input(format!(
                "Descriptor lists step {} twice",
                step.step_id
            )));
        }
        let word = decoder.step_word(step_words, index)?;
        // Stored IQ samples cover twice the output time due to the DAC's 2x interpolation.
        let time_factor = if params.is_iq { 2.0 } else { 1.0 };
        let duration_of = |num_samples: usize| {
            if step.infinite {
                f64::INFINITY
            } else {
                time_factor * samples_to_ns(num_samples, sampling_rate)
            }
        };
        if params.is_iq {
            let (i_samples, q_samples) = decoder.decode_iq(&word, wave_ram)?;
            let duration = duration_of(i_samples.len());
            diagnostic!(
                "Decoded IQ step {} with {} samples per channel",
                step.step_id,
                i_samples.len()
            );
            iq_steps.insert(
                step.step_id,
                FlattenedIqWaveform {
                    i_samples,
                    q_samples,
                    duration,
                    interval: word.interval_ns().max(duration),
                },
            );
        } else {
            let samples = decoder.decode_real(&word, wave_ram)?;
            let duration = duration_of(samples.len());
            diagnostic!(
                "Decoded step {} with {} samples",
                step.step_id,
                samples.len()
            );
            real_steps.insert(
                step.step_id,
                FlattenedWaveform {
                    samples,
                    duration,
                    interval: word.interval_ns().max(duration),
                },
            );
        }
    }

    info!(
        "Decoded {} wave sequence with {} steps at {} Msps",
        if params.is_iq { "IQ" } else { "real-valued" },
        params.num_steps(),
        sampling_rate
    );
    Ok(if params.is_iq {
        FlattenedSequence::Iq(FlattenedIqWaveformSequence {
            sampling_rate,
            steps: iq_steps,
        })
    } else {
        FlattenedSequence::Real(FlattenedWaveformSequence {
            sampling_rate,
            steps: real_steps,
        })
    })
}
