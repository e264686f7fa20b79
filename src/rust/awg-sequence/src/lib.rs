// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Waveform and capture sequence compiler for the AWG / capture instrument.
//!
//! Sequences of output waves, capture windows and digital output patterns are
//! described with the value objects of this crate, and serialized with
//! [`WireFormat`] into the binary layout the hardware consumes. Memory dumps
//! read back from the hardware are decoded into [`FlattenedSequence`]s.

pub mod capture;
pub mod digital_output;
pub mod flattened;
pub mod hardware_traits;
pub mod hw_params;
pub mod ram_decoder;
pub mod sequence;
pub mod synthesizer;
pub mod wave;
pub mod wire;

pub use capture::{AwgCapture, AwgWindowedCapture, CaptureSpec};
pub use digital_output::{DigitalOutputEntry, DigitalOutputVector};
pub use flattened::{
    FlattenedIqWaveform, FlattenedIqWaveformSequence, FlattenedSequence, FlattenedWaveform,
    FlattenedWaveformSequence, decode_wave_sequence,
};
pub use hw_params::{StepDescriptor, WaveSequenceParams};
pub use ram_decoder::{RamSampleDecoder, StepWord, StepWordLayout};
pub use sequence::{CaptureConfig, CaptureSequence, DigitalOutputSequence, WaveSequence};
pub use wave::{AwgAnyWave, AwgIqWave, AwgWave, AwgWaveBuilder, IqComponent, WaveKind, WaveShape};
pub use wire::WireFormat;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Out-of-range or inconsistent constructor / `add` argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Derived state was read before its prerequisite was set.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    /// A hardware buffer is shorter than its own header fields imply.
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Error::InvalidOperation(msg.into())
    }

    pub fn malformed_input(msg: impl Into<String>) -> Self {
        Error::MalformedInput(msg.into())
    }
}

impl From<awg_utils::BoundedVecMapError> for Error {
    fn from(error: awg_utils::BoundedVecMapError) -> Self {
        Error::InvalidArgument(error.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
