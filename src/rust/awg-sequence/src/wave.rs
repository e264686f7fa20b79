// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Value objects describing a single output waveform.
//!
//! Waves are validated on construction and immutable afterwards. A sequence
//! that takes ownership of a wave only ever stores a copy with its own
//! sampling rate attached.

use std::fmt;

use awg_units::{clip_to_i16, cycles_to_ns};

use crate::hardware_traits::{ANY_WAVE_KIND, MAX_NUM_CYCLES};
use crate::synthesizer;
use crate::wire::{WireFormat, put_f64, put_i16_samples, put_u32};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaveKind {
    Sine,
    Square,
    Sawtooth,
    Gaussian,
}

impl WaveKind {
    /// Code of the wave kind in the wire format.
    pub fn code(&self) -> u32 {
        match self {
            WaveKind::Sine => 0,
            WaveKind::Square => 1,
            WaveKind::Sawtooth => 2,
            WaveKind::Gaussian => 3,
        }
    }
}

impl fmt::Display for WaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WaveKind::Sine => "SINE",
            WaveKind::Square => "SQUARE",
            WaveKind::Sawtooth => "SAWTOOTH",
            WaveKind::Gaussian => "GAUSSIAN",
        };
        f.write_str(name)
    }
}

/// The 84-byte wave header shared by parametric and arbitrary-sample waves.
#[derive(Debug, Clone, Default)]
pub(crate) struct WaveHeader {
    pub kind: u32,
    pub frequency: f64,
    pub phase: f64,
    pub amplitude: f64,
    pub offset: f64,
    pub num_cycles: u32,
    pub duty_cycle: f64,
    pub crest_pos: f64,
    pub variance: f64,
    pub domain_begin: f64,
    pub domain_end: f64,
    pub any_wave_sample_count: u32,
}

impl WaveHeader {
    pub(crate) const SIZE: usize = 84;

    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        put_u32(out, self.kind);
        put_f64(out, self.frequency);
        put_f64(out, self.phase);
        put_f64(out, self.amplitude);
        put_f64(out, self.offset);
        put_u32(out, self.num_cycles);
        put_f64(out, self.duty_cycle);
        put_f64(out, self.crest_pos);
        put_f64(out, self.variance);
        put_f64(out, self.domain_begin);
        put_f64(out, self.domain_end);
        put_u32(out, self.any_wave_sample_count);
    }
}

fn validate_num_cycles(num_cycles: u32) -> Result<()> {
    if !(1..=MAX_NUM_CYCLES).contains(&num_cycles) {
        return Err(Error::invalid_argument(format!(
            "num_cycles must be in [1, {MAX_NUM_CYCLES:#X}], got {num_cycles}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_sampling_rate(sampling_rate: f64) -> Result<()> {
    if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
        return Err(Error::invalid_argument(format!(
            "Sampling rate must be a positive number, got {sampling_rate}"
        )));
    }
    Ok(())
}

/// Wraps a phase in degrees into `[0, 360)`.
fn wrap_phase(phase: f64) -> f64 {
    let wrapped = phase.rem_euclid(360.0);
    // `rem_euclid` yields 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// A parametric wave: sine, square, sawtooth or gaussian.
#[derive(Debug, Clone, PartialEq)]
pub struct AwgWave {
    kind: WaveKind,
    frequency: f64,
    phase: f64,
    amplitude: f64,
    offset: f64,
    num_cycles: u32,
    duty_cycle: f64,
    crest_pos: f64,
    variance: f64,
    domain_begin: f64,
    domain_end: f64,
}

impl AwgWave {
    /// Starts building a wave of the given kind and frequency (MHz).
    pub fn builder(kind: WaveKind, frequency: f64) -> AwgWaveBuilder {
        AwgWaveBuilder::new(kind, frequency)
    }

    pub fn kind(&self) -> WaveKind {
        self.kind
    }

    /// Frequency in MHz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Phase in degrees, within `[0, 360)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn num_cycles(&self) -> u32 {
        self.num_cycles
    }

    pub fn duty_cycle(&self) -> f64 {
        self.duty_cycle
    }

    pub fn crest_pos(&self) -> f64 {
        self.crest_pos
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn domain_begin(&self) -> f64 {
        self.domain_begin
    }

    pub fn domain_end(&self) -> f64 {
        self.domain_end
    }

    /// Output time of all cycles in ns.
    pub fn duration(&self) -> f64 {
        cycles_to_ns(self.num_cycles, self.frequency)
    }

    /// Samples of all `num_cycles` cycles at `sampling_rate` (Msps).
    pub fn synthesize(&self, sampling_rate: f64) -> Vec<i16> {
        synthesizer::synthesize_parametric(self, sampling_rate)
    }

    fn header(&self) -> WaveHeader {
        WaveHeader {
            kind: self.kind.code(),
            frequency: self.frequency,
            phase: self.phase,
            amplitude: self.amplitude,
            offset: self.offset,
            num_cycles: self.num_cycles,
            duty_cycle: self.duty_cycle,
            crest_pos: self.crest_pos,
            variance: self.variance,
            domain_begin: self.domain_begin,
            domain_end: self.domain_end,
            any_wave_sample_count: 0,
        }
    }
}

impl WireFormat for AwgWave {
    fn encode(&self, out: &mut Vec<u8>) {
        self.header().encode(out);
    }
}

pub struct AwgWaveBuilder {
    wave: AwgWave,
}

impl AwgWaveBuilder {
    pub fn new(kind: WaveKind, frequency: f64) -> Self {
        Self {
            wave: AwgWave {
                kind,
                frequency,
                phase: 0.0,
                amplitude: 0.0,
                offset: 0.0,
                num_cycles: 1,
                duty_cycle: 50.0,
                crest_pos: 1.0,
                variance: 1.0,
                domain_begin: -2.0,
                domain_end: 2.0,
            },
        }
    }

    /// Phase in degrees. Any finite value is accepted and wrapped into `[0, 360)`.
    pub fn phase(mut self, phase: f64) -> Self {
        self.wave.phase = phase;
        self
    }

    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.wave.amplitude = amplitude;
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.wave.offset = offset;
        self
    }

    pub fn num_cycles(mut self, num_cycles: u32) -> Self {
        self.wave.num_cycles = num_cycles;
        self
    }

    /// Percentage of the cycle spent high. Square waves only.
    pub fn duty_cycle(mut self, duty_cycle: f64) -> Self {
        self.wave.duty_cycle = duty_cycle;
        self
    }

    /// Relative position of the crest within the cycle. Sawtooth waves only.
    pub fn crest_pos(mut self, crest_pos: f64) -> Self {
        self.wave.crest_pos = crest_pos;
        self
    }

    /// Gaussian waves only.
    pub fn variance(mut self, variance: f64) -> Self {
        self.wave.variance = variance;
        self
    }

    /// Range of the gaussian's argument covered by one cycle. Gaussian waves only.
    pub fn domain(mut self, begin: f64, end: f64) -> Self {
        self.wave.domain_begin = begin;
        self.wave.domain_end = end;
        self
    }

    pub fn build(self) -> Result<AwgWave> {
        let mut wave = self.wave;
        if !(wave.frequency.is_finite() && wave.frequency > 0.0) {
            return Err(Error::invalid_argument(format!(
                "Frequency must be a positive number, got {}",
                wave.frequency
            )));
        }
        if !wave.phase.is_finite() {
            return Err(Error::invalid_argument(format!(
                "Phase must be finite, got {}",
                wave.phase
            )));
        }
        if !(wave.amplitude.is_finite() && wave.amplitude >= 0.0) {
            return Err(Error::invalid_argument(format!(
                "Amplitude must be a non-negative number, got {}",
                wave.amplitude
            )));
        }
        if !wave.offset.is_finite() {
            return Err(Error::invalid_argument(format!(
                "Offset must be finite, got {}",
                wave.offset
            )));
        }
        validate_num_cycles(wave.num_cycles)?;
        if !(0.0..=100.0).contains(&wave.duty_cycle) {
            return Err(Error::invalid_argument(format!(
                "Duty cycle must be in [0, 100], got {}",
                wave.duty_cycle
            )));
        }
        if !(0.0..=1.0).contains(&wave.crest_pos) {
            return Err(Error::invalid_argument(format!(
                "Crest position must be in [0.0, 1.0], got {}",
                wave.crest_pos
            )));
        }
        if !(wave.variance.is_finite() && wave.variance > 0.0) {
            return Err(Error::invalid_argument(format!(
                "Variance must be a positive number, got {}",
                wave.variance
            )));
        }
        if !(wave.domain_begin.is_finite()
            && wave.domain_end.is_finite()
            && wave.domain_begin < wave.domain_end)
        {
            return Err(Error::invalid_argument(format!(
                "Domain must satisfy begin < end, got [{}, {}]",
                wave.domain_begin, wave.domain_end
            )));
        }
        wave.phase = wrap_phase(wave.phase);
        Ok(wave)
    }
}

/// A wave given by an explicit int16 sample buffer.
///
/// The frequency is derived from the sampling rate of the owning sequence,
/// so it is unknown until the wave has been added to one.
#[derive(Debug, Clone, PartialEq)]
pub struct AwgAnyWave {
    samples: Vec<i16>,
    num_cycles: u32,
    sampling_rate: Option<f64>,
}

impl AwgAnyWave {
    /// Creates a wave from one cycle of samples.
    ///
    /// Values outside the int16 range are clipped.
    pub fn new<T: Into<f64> + Copy>(samples: &[T], num_cycles: u32) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::invalid_argument(
                "Arbitrary wave needs at least one sample",
            ));
        }
        validate_num_cycles(num_cycles)?;
        Ok(AwgAnyWave {
            samples: samples.iter().map(|&s| clip_to_i16(s.into())).collect(),
            num_cycles,
            sampling_rate: None,
        })
    }

    /// One cycle of samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn num_cycles(&self) -> u32 {
        self.num_cycles
    }

    /// The sampling rate attached by the owning sequence, if any.
    pub fn sampling_rate(&self) -> Option<f64> {
        self.sampling_rate
    }

    /// Returns a copy of this wave bound to `sampling_rate` (Msps).
    pub fn with_sampling_rate(&self, sampling_rate: f64) -> Result<Self> {
        validate_sampling_rate(sampling_rate)?;
        Ok(AwgAnyWave {
            sampling_rate: Some(sampling_rate),
            ..self.clone()
        })
    }

    fn attached_sampling_rate(&self) -> Result<f64> {
        self.sampling_rate.ok_or_else(|| {
            Error::invalid_operation(
                "Frequency of an arbitrary wave is undefined until a sampling rate is attached",
            )
        })
    }

    /// Frequency in MHz: `sampling_rate / number_of_samples`.
    pub fn frequency(&self) -> Result<f64> {
        Ok(self.frequency_at(self.attached_sampling_rate()?))
    }

    /// Output time of all cycles in ns.
    pub fn duration(&self) -> Result<f64> {
        Ok(self.duration_at(self.attached_sampling_rate()?))
    }

    pub(crate) fn duration_at(&self, sampling_rate: f64) -> f64 {
        cycles_to_ns(self.num_cycles, self.frequency_at(sampling_rate))
    }

    /// Samples of all `num_cycles` cycles.
    pub fn synthesize(&self) -> Vec<i16> {
        synthesizer::synthesize_any_wave(self)
    }

    /// Wire representation; requires an attached sampling rate.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let sampling_rate = self.attached_sampling_rate()?;
        let mut out = Vec::with_capacity(WaveHeader::SIZE + 2 * self.samples.len());
        self.encode_at(&mut out, sampling_rate);
        Ok(out)
    }

    fn frequency_at(&self, sampling_rate: f64) -> f64 {
        sampling_rate / self.samples.len() as f64
    }

    pub(crate) fn encode_at(&self, out: &mut Vec<u8>, sampling_rate: f64) {
        WaveHeader {
            kind: ANY_WAVE_KIND,
            frequency: self.frequency_at(sampling_rate),
            num_cycles: self.num_cycles,
            any_wave_sample_count: self.samples.len() as u32,
            ..Default::default()
        }
        .encode(out);
        put_i16_samples(out, &self.samples);
    }
}

/// One channel of an IQ wave.
#[derive(Debug, Clone, PartialEq)]
pub enum IqComponent {
    Parametric(AwgWave),
    AnyWave(AwgAnyWave),
}

impl IqComponent {
    pub fn num_cycles(&self) -> u32 {
        match self {
            IqComponent::Parametric(wave) => wave.num_cycles(),
            IqComponent::AnyWave(wave) => wave.num_cycles(),
        }
    }

    pub fn frequency(&self) -> Result<f64> {
        match self {
            IqComponent::Parametric(wave) => Ok(wave.frequency()),
            IqComponent::AnyWave(wave) => wave.frequency(),
        }
    }

    pub fn duration(&self) -> Result<f64> {
        match self {
            IqComponent::Parametric(wave) => Ok(wave.duration()),
            IqComponent::AnyWave(wave) => wave.duration(),
        }
    }

    fn duration_at(&self, sampling_rate: f64) -> f64 {
        match self {
            IqComponent::Parametric(wave) => wave.duration(),
            IqComponent::AnyWave(wave) => wave.duration_at(sampling_rate),
        }
    }

    fn with_sampling_rate(&self, sampling_rate: f64) -> Result<Self> {
        Ok(match self {
            IqComponent::Parametric(wave) => IqComponent::Parametric(wave.clone()),
            IqComponent::AnyWave(wave) => {
                IqComponent::AnyWave(wave.with_sampling_rate(sampling_rate)?)
            }
        })
    }

    fn encode_at(&self, out: &mut Vec<u8>, sampling_rate: f64) {
        match self {
            IqComponent::Parametric(wave) => wave.encode(out),
            IqComponent::AnyWave(wave) => wave.encode_at(out, sampling_rate),
        }
    }
}

impl From<AwgWave> for IqComponent {
    fn from(wave: AwgWave) -> Self {
        IqComponent::Parametric(wave)
    }
}

impl From<AwgAnyWave> for IqComponent {
    fn from(wave: AwgAnyWave) -> Self {
        IqComponent::AnyWave(wave)
    }
}

/// A pair of in-phase and quadrature waves output together.
#[derive(Debug, Clone, PartialEq)]
pub struct AwgIqWave {
    i_wave: IqComponent,
    q_wave: IqComponent,
}

impl AwgIqWave {
    /// Both channels must repeat the same number of times.
    pub fn new(i_wave: impl Into<IqComponent>, q_wave: impl Into<IqComponent>) -> Result<Self> {
        let i_wave = i_wave.into();
        let q_wave = q_wave.into();
        if i_wave.num_cycles() != q_wave.num_cycles() {
            return Err(Error::invalid_argument(format!(
                "I and Q waves must have the same number of cycles, got {} and {}",
                i_wave.num_cycles(),
                q_wave.num_cycles()
            )));
        }
        Ok(AwgIqWave { i_wave, q_wave })
    }

    pub fn i_wave(&self) -> &IqComponent {
        &self.i_wave
    }

    pub fn q_wave(&self) -> &IqComponent {
        &self.q_wave
    }

    pub fn num_cycles(&self) -> u32 {
        self.i_wave.num_cycles()
    }

    /// The longer of the I and Q durations, in ns.
    pub fn duration(&self) -> Result<f64> {
        Ok(self.i_wave.duration()?.max(self.q_wave.duration()?))
    }

    /// I and Q samples of all cycles, zero-padded to a common length.
    pub fn synthesize(&self, sampling_rate: f64) -> (Vec<i16>, Vec<i16>) {
        synthesizer::synthesize_iq(self, sampling_rate)
    }

    pub(crate) fn duration_at(&self, sampling_rate: f64) -> f64 {
        self.i_wave
            .duration_at(sampling_rate)
            .max(self.q_wave.duration_at(sampling_rate))
    }

    pub fn with_sampling_rate(&self, sampling_rate: f64) -> Result<Self> {
        Ok(AwgIqWave {
            i_wave: self.i_wave.with_sampling_rate(sampling_rate)?,
            q_wave: self.q_wave.with_sampling_rate(sampling_rate)?,
        })
    }

    pub(crate) fn encode_at(&self, out: &mut Vec<u8>, sampling_rate: f64) {
        self.i_wave.encode_at(out, sampling_rate);
        self.q_wave.encode_at(out, sampling_rate);
    }
}

/// Any wave that can be placed in a [`crate::WaveSequence`] step.
#[derive(Debug, Clone, PartialEq)]
pub enum WaveShape {
    Parametric(AwgWave),
    AnyWave(AwgAnyWave),
    Iq(AwgIqWave),
}

impl WaveShape {
    pub fn is_iq(&self) -> bool {
        matches!(self, WaveShape::Iq(_))
    }

    pub fn num_cycles(&self) -> u32 {
        match self {
            WaveShape::Parametric(wave) => wave.num_cycles(),
            WaveShape::AnyWave(wave) => wave.num_cycles(),
            WaveShape::Iq(wave) => wave.num_cycles(),
        }
    }

    /// Output time in ns.
    ///
    /// Fails for arbitrary-sample waves without an attached sampling rate.
    pub fn duration(&self) -> Result<f64> {
        match self {
            WaveShape::Parametric(wave) => Ok(wave.duration()),
            WaveShape::AnyWave(wave) => wave.duration(),
            WaveShape::Iq(wave) => wave.duration(),
        }
    }

    /// Output time in ns, using `sampling_rate` for arbitrary-sample waves.
    pub(crate) fn duration_at(&self, sampling_rate: f64) -> f64 {
        match self {
            WaveShape::Parametric(wave) => wave.duration(),
            WaveShape::AnyWave(wave) => wave.duration_at(sampling_rate),
            WaveShape::Iq(wave) => wave.duration_at(sampling_rate),
        }
    }

    pub fn with_sampling_rate(&self, sampling_rate: f64) -> Result<Self> {
        validate_sampling_rate(sampling_rate)?;
        Ok(match self {
            WaveShape::Parametric(wave) => WaveShape::Parametric(wave.clone()),
            WaveShape::AnyWave(wave) => WaveShape::AnyWave(wave.with_sampling_rate(sampling_rate)?),
            WaveShape::Iq(wave) => WaveShape::Iq(wave.with_sampling_rate(sampling_rate)?),
        })
    }

    pub(crate) fn encode_at(&self, out: &mut Vec<u8>, sampling_rate: f64) {
        match self {
            WaveShape::Parametric(wave) => wave.encode(out),
            WaveShape::AnyWave(wave) => wave.encode_at(out, sampling_rate),
            WaveShape::Iq(wave) => wave.encode_at(out, sampling_rate),
        }
    }
}

impl From<AwgWave> for WaveShape {
    fn from(wave: AwgWave) -> Self {
        WaveShape::Parametric(wave)
    }
}

impl From<AwgAnyWave> for WaveShape {
    fn from(wave: AwgAnyWave) -> Self {
        WaveShape::AnyWave(wave)
    }
}

impl From<AwgIqWave> for WaveShape {
    fn from(wave: AwgIqWave) -> Self {
        WaveShape::Iq(wave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency: f64) -> AwgWave {
        AwgWave::builder(WaveKind::Sine, frequency)
            .amplitude(1000.0)
            .num_cycles(2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_phase_is_wrapped() {
        let wave = AwgWave::builder(WaveKind::Sine, 10.0)
            .phase(-90.0)
            .build()
            .unwrap();
        assert_eq!(wave.phase(), 270.0);
        let wave = AwgWave::builder(WaveKind::Sine, 10.0)
            .phase(720.0)
            .build()
            .unwrap();
        assert_eq!(wave.phase(), 0.0);
        assert_eq!(wrap_phase(-1e-20), 0.0);
    }

    #[test]
    fn test_invalid_arguments() {
        let cases = [
            AwgWave::builder(WaveKind::Sine, 0.0).build(),
            AwgWave::builder(WaveKind::Sine, -1.0).build(),
            AwgWave::builder(WaveKind::Sine, f64::NAN).build(),
            AwgWave::builder(WaveKind::Square, 1.0).duty_cycle(100.5).build(),
            AwgWave::builder(WaveKind::Square, 1.0).duty_cycle(-1.0).build(),
            AwgWave::builder(WaveKind::Sawtooth, 1.0).crest_pos(1.5).build(),
            AwgWave::builder(WaveKind::Gaussian, 1.0).variance(0.0).build(),
            AwgWave::builder(WaveKind::Gaussian, 1.0).domain(1.0, 1.0).build(),
            AwgWave::builder(WaveKind::Sine, 1.0).amplitude(-1.0).build(),
            AwgWave::builder(WaveKind::Sine, 1.0).num_cycles(0).build(),
            AwgWave::builder(WaveKind::Sine, 1.0).num_cycles(u32::MAX).build(),
        ];
        for case in cases {
            assert!(matches!(case, Err(Error::InvalidArgument(_))), "{case:?}");
        }
        assert!(
            AwgWave::builder(WaveKind::Sine, 1.0)
                .num_cycles(MAX_NUM_CYCLES)
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_parametric_header() {
        let bytes = sine(250.0).to_bytes();
        assert_eq!(bytes.len(), WaveHeader::SIZE);
        assert_eq!(&bytes[0..4], &0u32.to_le_bytes());
        assert_eq!(&bytes[4..12], &250.0f64.to_le_bytes());
        assert_eq!(&bytes[28..36], &0.0f64.to_le_bytes()); // offset
        assert_eq!(&bytes[36..40], &2u32.to_le_bytes());
        assert_eq!(&bytes[40..48], &50.0f64.to_le_bytes()); // duty cycle
        assert_eq!(&bytes[80..84], &0u32.to_le_bytes());
    }

    #[test]
    fn test_any_wave_frequency_requires_sampling_rate() {
        let wave = AwgAnyWave::new(&[0i16, 1, 2, 3], 3).unwrap();
        assert!(matches!(wave.frequency(), Err(Error::InvalidOperation(_))));
        assert!(matches!(wave.duration(), Err(Error::InvalidOperation(_))));
        assert!(matches!(wave.serialize(), Err(Error::InvalidOperation(_))));

        let attached = wave.with_sampling_rate(500.0).unwrap();
        assert_eq!(attached.frequency().unwrap(), 125.0);
        assert_eq!(attached.duration().unwrap(), 24.0);
        // The original is untouched.
        assert_eq!(wave.sampling_rate(), None);
    }

    #[test]
    fn test_any_wave_clips_and_serializes() {
        let wave = AwgAnyWave::new(&[40000.0, -40000.0, 12.7], 1)
            .unwrap()
            .with_sampling_rate(300.0)
            .unwrap();
        assert_eq!(wave.samples(), &[i16::MAX, i16::MIN, 12]);
        let bytes = wave.serialize().unwrap();
        assert_eq!(bytes.len(), WaveHeader::SIZE + 6);
        assert_eq!(&bytes[0..4], &ANY_WAVE_KIND.to_le_bytes());
        assert_eq!(&bytes[4..12], &100.0f64.to_le_bytes());
        assert_eq!(&bytes[12..36], &[0u8; 24]);
        assert_eq!(&bytes[36..40], &1u32.to_le_bytes());
        assert_eq!(&bytes[40..80], &[0u8; 40]);
        assert_eq!(&bytes[80..84], &3u32.to_le_bytes());
        assert_eq!(&bytes[84..86], &i16::MAX.to_le_bytes());
    }

    #[test]
    fn test_any_wave_rejects_empty_buffer() {
        let empty: [i16; 0] = [];
        assert!(matches!(
            AwgAnyWave::new(&empty, 1),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_iq_cycle_mismatch() {
        let i_wave = sine(10.0);
        let q_wave = AwgWave::builder(WaveKind::Sine, 10.0)
            .num_cycles(3)
            .build()
            .unwrap();
        assert!(matches!(
            AwgIqWave::new(i_wave, q_wave),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_iq_duration_is_max() {
        let i_wave = sine(10.0);
        let q_wave = AwgAnyWave::new(&[0i16; 100], 2).unwrap();
        let iq = AwgIqWave::new(i_wave, q_wave).unwrap();
        assert!(iq.duration().is_err());
        let iq = iq.with_sampling_rate(500.0).unwrap();
        // I: 2 cycles at 10 MHz = 200 ns; Q: 2 x 100 samples at 500 Msps = 400 ns
        assert_eq!(iq.duration().unwrap(), 400.0);
    }
}
