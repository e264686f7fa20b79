// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Capture window descriptions.

use awg_units::round_half_up;

use crate::hardware_traits::MAX_DELAY_NS;
use crate::wire::{WireFormat, put_bool, put_f64, put_u32};
use crate::{Error, Result};

fn validate_time(time: f64) -> Result<()> {
    if !(time.is_finite() && time > 0.0) {
        return Err(Error::invalid_argument(format!(
            "Capture time must be a positive number of ns, got {time}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_delay(delay: f64) -> Result<()> {
    if !(0.0..=MAX_DELAY_NS).contains(&delay) {
        return Err(Error::invalid_argument(format!(
            "Delay must be in [0, {MAX_DELAY_NS:e}] ns, got {delay}"
        )));
    }
    Ok(())
}

/// A single capture window.
#[derive(Debug, Clone, PartialEq)]
pub struct AwgCapture {
    time: f64,
    delay: f64,
    do_accumulation: bool,
}

impl AwgCapture {
    /// `time` and `delay` in ns.
    pub fn new(time: f64, delay: f64, do_accumulation: bool) -> Result<Self> {
        validate_time(time)?;
        validate_delay(delay)?;
        Ok(AwgCapture {
            time,
            delay,
            do_accumulation,
        })
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn do_accumulation(&self) -> bool {
        self.do_accumulation
    }
}

impl WireFormat for AwgCapture {
    fn encode(&self, out: &mut Vec<u8>) {
        put_f64(out, self.time);
        put_f64(out, self.delay);
        put_bool(out, self.do_accumulation);
        put_u32(out, 1);
        put_bool(out, false);
    }
}

/// A capture window repeated `num_windows` times, accumulating into the same
/// sample window.
#[derive(Debug, Clone, PartialEq)]
pub struct AwgWindowedCapture {
    time: f64,
    delay: f64,
    // zero when `infinite`
    num_windows: u32,
    infinite: bool,
}

impl AwgWindowedCapture {
    /// `time` (per window) and `delay` in ns.
    ///
    /// A negative `num_windows` repeats the window until the capture is stopped.
    pub fn new(time: f64, num_windows: i64, delay: f64) -> Result<Self> {
        validate_time(time)?;
        validate_delay(delay)?;
        if num_windows == 0 {
            return Err(Error::invalid_argument("num_windows must be nonzero"));
        }
        let (num_windows, infinite) = if num_windows < 0 {
            (0, true)
        } else {
            let count = u32::try_from(num_windows).map_err(|_| {
                Error::invalid_argument(format!(
                    "num_windows must fit into 32 bits, got {num_windows}"
                ))
            })?;
            (count, false)
        };
        Ok(AwgWindowedCapture {
            time,
            delay,
            num_windows,
            infinite,
        })
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Number of windows, `None` if the capture repeats forever.
    pub fn num_windows(&self) -> Option<u32> {
        (!self.infinite).then_some(self.num_windows)
    }

    pub fn is_infinite(&self) -> bool {
        self.infinite
    }
}

impl WireFormat for AwgWindowedCapture {
    fn encode(&self, out: &mut Vec<u8>) {
        put_f64(out, self.time);
        put_f64(out, self.delay);
        put_bool(out, true);
        put_u32(out, self.num_windows);
        put_bool(out, self.infinite);
    }
}

/// Any capture that can be placed in a [`crate::CaptureSequence`] step.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureSpec {
    Simple(AwgCapture),
    Windowed(AwgWindowedCapture),
}

impl CaptureSpec {
    pub const WIRE_SIZE: usize = 28;

    /// Capture time of one window in ns.
    pub fn time(&self) -> f64 {
        match self {
            CaptureSpec::Simple(capture) => capture.time(),
            CaptureSpec::Windowed(capture) => capture.time(),
        }
    }

    pub fn delay(&self) -> f64 {
        match self {
            CaptureSpec::Simple(capture) => capture.delay(),
            CaptureSpec::Windowed(capture) => capture.delay(),
        }
    }

    /// Repeat count as written to the hardware; zero for endless captures.
    pub fn repeat_count(&self) -> u32 {
        match self {
            CaptureSpec::Simple(_) => 1,
            CaptureSpec::Windowed(capture) => capture.num_windows,
        }
    }

    pub fn is_infinite(&self) -> bool {
        match self {
            CaptureSpec::Simple(_) => false,
            CaptureSpec::Windowed(capture) => capture.is_infinite(),
        }
    }

    /// Total capture time in ns, excluding the delay. Infinite for endless captures.
    pub fn duration(&self) -> f64 {
        if self.is_infinite() {
            return f64::INFINITY;
        }
        self.time() * f64::from(self.repeat_count())
    }

    /// Number of samples captured per window at `sampling_rate` (Msps).
    pub fn num_samples(&self, sampling_rate: f64) -> usize {
        round_half_up(self.time() * sampling_rate / 1000.0) as usize
    }
}

impl WireFormat for CaptureSpec {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            CaptureSpec::Simple(capture) => capture.encode(out),
            CaptureSpec::Windowed(capture) => capture.encode(out),
        }
    }
}

impl From<AwgCapture> for CaptureSpec {
    fn from(capture: AwgCapture) -> Self {
        CaptureSpec::Simple(capture)
    }
}

impl From<AwgWindowedCapture> for CaptureSpec {
    fn from(capture: AwgWindowedCapture) -> Self {
        CaptureSpec::Windowed(capture)
    }
}
