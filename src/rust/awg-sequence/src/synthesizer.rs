// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Sampling of wave descriptions into int16 sample arrays.
//!
//! The hardware synthesizes parametric waves itself, and these functions must
//! reproduce its output bit for bit. Note in particular:
//! - samples per cycle and phase shifts are rounded half away from zero
//! - values are clipped to the int16 range before being truncated
//! - one base cycle is computed and then tiled `num_cycles` times

use std::f64::consts::{PI, TAU};

use awg_log::{diagnostic, warn};
use awg_units::{clip_to_i16, fcycle, round_half_up, samples_per_cycle};

use crate::hardware_traits::MAX_SAMPLES_PER_CYCLE;
use crate::wave::{AwgAnyWave, AwgIqWave, AwgWave, IqComponent, WaveKind, WaveShape};

/// Largest sample array a single step may synthesize to.
pub const MAX_STEP_SAMPLES: usize = isize::MAX as usize / size_of::<i16>();

/// Samples in one cycle of a parametric wave, `None` above [`MAX_SAMPLES_PER_CYCLE`].
pub fn cycle_len(wave: &AwgWave, sampling_rate: f64) -> Option<usize> {
    samples_per_cycle(sampling_rate, wave.frequency()).filter(|&n| n <= MAX_SAMPLES_PER_CYCLE)
}

/// Length of the sample array synthesized for `wave`, per channel for IQ waves.
///
/// `None` if a cycle exceeds [`MAX_SAMPLES_PER_CYCLE`] or all cycles together
/// exceed [`MAX_STEP_SAMPLES`].
pub fn step_len(wave: &WaveShape, sampling_rate: f64) -> Option<usize> {
    let component_len = |component: &IqComponent| match component {
        IqComponent::Parametric(wave) => cycle_len(wave, sampling_rate),
        IqComponent::AnyWave(wave) => Some(wave.samples().len()),
    };
    let cycle = match wave {
        WaveShape::Parametric(wave) => cycle_len(wave, sampling_rate)?,
        WaveShape::AnyWave(wave) => wave.samples().len(),
        WaveShape::Iq(wave) => component_len(wave.i_wave())?.max(component_len(wave.q_wave())?),
    };
    cycle
        .checked_mul(wave.num_cycles() as usize)
        .filter(|&len| len <= MAX_STEP_SAMPLES)
}

/// Samples of all cycles of a parametric wave at `sampling_rate` (Msps).
pub fn synthesize_parametric(wave: &AwgWave, sampling_rate: f64) -> Vec<i16> {
    tile(&base_cycle(wave, sampling_rate), wave.num_cycles())
}

/// Samples of all cycles of an arbitrary-sample wave.
pub fn synthesize_any_wave(wave: &AwgAnyWave) -> Vec<i16> {
    tile(wave.samples(), wave.num_cycles())
}

/// Samples of both channels of an IQ wave.
///
/// If the base cycles of I and Q differ in length, the shorter one is padded
/// with zeros at its tail before tiling.
pub fn synthesize_iq(wave: &AwgIqWave, sampling_rate: f64) -> (Vec<i16>, Vec<i16>) {
    let mut i_cycle = component_cycle(wave.i_wave(), sampling_rate);
    let mut q_cycle = component_cycle(wave.q_wave(), sampling_rate);
    if i_cycle.len() != q_cycle.len() {
        warn!(
            "I and Q cycles differ in length ({} vs {} samples), zero-padding the shorter one",
            i_cycle.len(),
            q_cycle.len()
        );
        let len = i_cycle.len().max(q_cycle.len());
        i_cycle.resize(len, 0);
        q_cycle.resize(len, 0);
    }
    (
        tile(&i_cycle, wave.i_wave().num_cycles()),
        tile(&q_cycle, wave.q_wave().num_cycles()),
    )
}

fn component_cycle(component: &IqComponent, sampling_rate: f64) -> Vec<i16> {
    match component {
        IqComponent::Parametric(wave) => base_cycle(wave, sampling_rate),
        IqComponent::AnyWave(wave) => wave.samples().to_vec(),
    }
}

/// One cycle of a parametric wave.
pub fn base_cycle(wave: &AwgWave, sampling_rate: f64) -> Vec<i16> {
    let Some(n) = cycle_len(wave, sampling_rate) else {
        warn!(
            "Frequency {} MHz at {} Msps needs more than {} samples per cycle, the wave has no samples",
            wave.frequency(),
            sampling_rate,
            MAX_SAMPLES_PER_CYCLE
        );
        return Vec::new();
    };
    if n == 0 {
        warn!(
            "Frequency {} MHz exceeds the sampling rate {} Msps, the wave has no samples",
            wave.frequency(),
            sampling_rate
        );
        return Vec::new();
    }
    diagnostic!("Sampling {} wave with {} samples per cycle", wave.kind(), n);
    match wave.kind() {
        WaveKind::Sine => sine_cycle(wave, n),
        WaveKind::Square => rotate_by_phase(square_cycle(wave, n), wave.phase()),
        WaveKind::Sawtooth => rotate_by_phase(sawtooth_cycle(wave, n), wave.phase()),
        WaveKind::Gaussian => gaussian_cycle(wave, n),
    }
}

fn sine_cycle(wave: &AwgWave, n: usize) -> Vec<i16> {
    let phase = wave.phase().to_radians();
    (0..n)
        .map(|i| {
            let x = TAU * i as f64 / n as f64 + phase;
            clip_to_i16(wave.amplitude() * x.sin() + wave.offset())
        })
        .collect()
}

fn square_cycle(wave: &AwgWave, n: usize) -> Vec<i16> {
    let low = clip_to_i16(-wave.amplitude() + wave.offset());
    let high = clip_to_i16(wave.amplitude() + wave.offset());
    let mut cycle = vec![low; n];
    if wave.duty_cycle() > 0.0 {
        let last_high = ((n - 1) as f64 * wave.duty_cycle() / 100.0).floor() as usize;
        cycle[..=last_high.min(n - 1)].fill(high);
    }
    cycle
}

fn sawtooth_cycle(wave: &AwgWave, n: usize) -> Vec<i16> {
    let amplitude = wave.amplitude();
    let offset = wave.offset();
    let crest = (wave.crest_pos().clamp(0.0, 1.0) * 0.5 * (n - 1) as f64).floor() as usize;
    let mut valley = (n - 1) - crest;
    if valley == crest && n > 1 {
        valley = crest + 1;
    }

    let mut cycle = Vec::with_capacity(n);
    let segments = [
        (crest, offset, amplitude),
        (valley - crest, offset + amplitude, -2.0 * amplitude),
        (n - valley, offset - amplitude, amplitude),
    ];
    for (len, start, rise) in segments {
        let slope = rise / len.max(1) as f64;
        cycle.extend((0..len).map(|j| clip_to_i16(start + slope * j as f64)));
    }
    cycle
}

fn gaussian_cycle(wave: &AwgWave, n: usize) -> Vec<i16> {
    let begin = wave.domain_begin();
    let end = wave.domain_end();
    let span = end - begin;
    let step = span / n as f64;
    let phase_shift = wave.phase() * span / 360.0;
    let variance = wave.variance();
    let scale = wave.amplitude() / (2.0 * PI * variance).sqrt();
    (0..n)
        .map(|i| {
            let t = fcycle(begin + i as f64 * step + phase_shift, begin, end);
            clip_to_i16(scale * (-t * t / (2.0 * variance)).exp() + wave.offset())
        })
        .collect()
}

/// Rotates one cycle so that `output[i] = cycle[(i - shift) mod n]` with
/// `shift = n - round_half_up(n * phase / 360)`.
fn rotate_by_phase(mut cycle: Vec<i16>, phase: f64) -> Vec<i16> {
    let n = cycle.len();
    if n == 0 {
        return cycle;
    }
    let advance = round_half_up(n as f64 * phase / 360.0) as usize;
    let shift = n - advance.min(n);
    cycle.rotate_right(shift % n);
    cycle
}

fn tile(cycle: &[i16], num_cycles: u32) -> Vec<i16> {
    let fits = cycle
        .len()
        .checked_mul(num_cycles as usize)
        .is_some_and(|len| len <= MAX_STEP_SAMPLES);
    if !fits {
        warn!(
            "{} cycles of {} samples exceed {} samples, the wave has no samples",
            num_cycles,
            cycle.len(),
            MAX_STEP_SAMPLES
        );
        return Vec::new();
    }
    cycle.repeat(num_cycles as usize)
}
