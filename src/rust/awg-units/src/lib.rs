// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Unit conversions and numeric primitives shared by the sequence compiler.
//!
//! Conventions used throughout the workspace:
//! - frequencies are given in MHz, sampling rates in Msps
//! - times and durations are given in ns
//! - hardware intervals are counted in ticks of the 300 MHz sequencer clock

use num_traits::{AsPrimitive, Float, FromPrimitive, ToPrimitive};

/// Frequency of the sequencer clock in MHz.
pub const CLOCK_FREQUENCY_MHZ: f64 = 300.0;

/// Conversion factor from 1 / MHz (i.e. µs) to ns.
pub const NS_PER_US: f64 = 1000.0;

/// One period of the sequencer clock in ns.
///
/// The hardware starts every step one clock cycle late, so intervals sent to
/// it are shortened by this amount.
pub const START_LATENCY_NS: f64 = NS_PER_US / CLOCK_FREQUENCY_MHZ;

/// Rounds to the nearest integer, ties away from zero.
///
/// Sample counts and phase shifts must never use round-half-to-even:
/// `round_half_up(2.5) == 3.0`, `round_half_up(-2.5) == -3.0`.
pub fn round_half_up<F: Float>(value: F) -> F {
    // `floor(x + 0.5)` misrounds 0.49999999999999994 to 1.0.
    value.round()
}

/// Clips `value` to the `i16` range and truncates it toward zero.
///
/// NaN maps to 0.
pub fn clip_to_i16<F: Float + AsPrimitive<i16> + FromPrimitive>(value: F) -> i16 {
    if value.is_nan() {
        return 0;
    }
    let min = F::from_i16(i16::MIN).unwrap_or_else(F::min_value);
    let max = F::from_i16(i16::MAX).unwrap_or_else(F::max_value);
    value.max(min).min(max).as_()
}

/// Wraps `value` circularly into `[begin, end)` using a floored modulo.
pub fn fcycle(value: f64, begin: f64, end: f64) -> f64 {
    let span = end - begin;
    let mut remainder = (value - begin) % span;
    if remainder < 0.0 {
        remainder += span;
    }
    begin + remainder
}

/// Number of samples in one cycle of a wave with the given frequency.
///
/// Zero if the wave is faster than the sampling rate, `None` if the count
/// does not fit into a `usize`.
pub fn samples_per_cycle(sampling_rate_msps: f64, frequency_mhz: f64) -> Option<usize> {
    if sampling_rate_msps < frequency_mhz {
        return Some(0);
    }
    round_half_up(sampling_rate_msps / frequency_mhz).to_usize()
}

/// Duration in ns of `num_cycles` periods of a wave with the given frequency.
pub fn cycles_to_ns(num_cycles: u32, frequency_mhz: f64) -> f64 {
    NS_PER_US * f64::from(num_cycles) / frequency_mhz
}

/// Duration in ns of `num_samples` samples at the given sampling rate.
pub fn samples_to_ns(num_samples: usize, sampling_rate_msps: f64) -> f64 {
    NS_PER_US * num_samples as f64 / sampling_rate_msps
}

/// Converts sequencer clock ticks to ns.
pub fn ticks_to_ns(ticks: u64) -> f64 {
    NS_PER_US * ticks as f64 / CLOCK_FREQUENCY_MHZ
}

/// Converts ns to sequencer clock ticks, rounding half away from zero.
pub fn ns_to_ticks(ns: f64) -> u64 {
    round_half_up(ns * CLOCK_FREQUENCY_MHZ / NS_PER_US).max(0.0) as u64
}
