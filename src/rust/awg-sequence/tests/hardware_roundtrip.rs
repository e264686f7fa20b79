// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Decodes synthetic hardware memory images built from sampled sequences and
//! checks that the result matches what the synthesizer produces.

use awg_sequence::synthesizer::base_cycle;
use awg_sequence::{
    AwgAnyWave, AwgIqWave, AwgWave, FlattenedSequence, RamSampleDecoder, StepDescriptor, StepWord,
    StepWordLayout, WaveKind, WaveSequence, WaveSequenceParams, WaveShape, decode_wave_sequence,
};
use awg_units::ns_to_ticks;
use proptest::prelude::*;

/// A wave RAM region and step parameter region as the hardware would fill them.
#[derive(Default)]
struct MemoryImage {
    layout: StepWordLayout,
    wave_ram: Vec<u8>,
    step_words: Vec<u8>,
    steps: Vec<StepDescriptor>,
}

impl MemoryImage {
    fn write_chunk(&mut self, samples: &[i16]) -> u32 {
        let addr = self.wave_ram.len() as u32;
        for sample in samples {
            self.wave_ram.extend_from_slice(&sample.to_le_bytes());
        }
        addr
    }

    fn add_step(
        &mut self,
        step_id: u32,
        cycle: &[i16],
        last_cycle: Option<&[i16]>,
        num_cycles: u32,
        interval_ticks: u64,
    ) {
        let start_addr = self.write_chunk(cycle);
        let (last_cycle_start_addr, last_cycle_num_samples) = match last_cycle {
            Some(last) => (self.write_chunk(last), last.len() as u32),
            None => (start_addr, cycle.len() as u32),
        };
        let word = StepWord {
            start_addr,
            num_samples: cycle.len() as u32,
            last_cycle_start_addr,
            last_cycle_num_samples,
            num_cycles,
            interval_ticks,
        };
        self.step_words.extend(word.to_bytes(&self.layout).unwrap());
        self.steps.push(StepDescriptor {
            step_id,
            infinite: false,
        });
    }

    fn decode(&self, is_iq: bool, sampling_rate: f64) -> FlattenedSequence {
        let params = WaveSequenceParams {
            is_iq,
            sampling_rate,
            steps: self.steps.clone(),
        };
        decode_wave_sequence(
            &params.to_bytes(),
            &self.step_words,
            &self.wave_ram,
            &RamSampleDecoder::new(self.layout).unwrap(),
        )
        .unwrap()
    }
}

fn interleave(i_samples: &[i16], q_samples: &[i16]) -> Vec<i16> {
    i_samples
        .iter()
        .zip(q_samples)
        .flat_map(|(&i, &q)| [i, q])
        .collect()
}

fn wave(kind: WaveKind, frequency: f64, num_cycles: u32) -> AwgWave {
    AwgWave::builder(kind, frequency)
        .amplitude(20000.0)
        .phase(45.0)
        .num_cycles(num_cycles)
        .build()
        .unwrap()
}

/// Lays out a real-valued sequence the way the hardware stores it: one cycle
/// per step, with the last cycle stored separately when `distinct_last`.
fn memory_image_of(sequence: &WaveSequence, distinct_last: bool) -> MemoryImage {
    let mut image = MemoryImage::default();
    let rate = sequence.sampling_rate();
    for step_id in sequence.step_ids() {
        let (cycle, num_cycles) = match sequence.wave(step_id).unwrap() {
            WaveShape::Parametric(wave) => (base_cycle(wave, rate), wave.num_cycles()),
            WaveShape::AnyWave(wave) => (wave.samples().to_vec(), wave.num_cycles()),
            WaveShape::Iq(_) => unreachable!("real-valued sequence"),
        };
        let interval_ticks = ns_to_ticks(sequence.interval(step_id).unwrap());
        let last = distinct_last.then_some(cycle.as_slice());
        image.add_step(step_id, &cycle, last, num_cycles, interval_ticks);
    }
    image
}

#[test]
fn decoded_real_sequence_matches_synthesis() {
    let mut sequence = WaveSequence::new(1000.0, false).unwrap();
    sequence
        .add_step(0, wave(WaveKind::Sine, 250.0, 1), 1000.0)
        .unwrap()
        .add_step(4, wave(WaveKind::Square, 100.0, 2), 0.0)
        .unwrap()
        .add_step(9, wave(WaveKind::Sawtooth, 125.0, 5), 2000.0)
        .unwrap()
        .add_step(12, AwgAnyWave::new(&[3i16, -3, 7, -7], 2).unwrap(), 0.0)
        .unwrap();
    let FlattenedSequence::Real(expected) = FlattenedSequence::from_wave_sequence(&sequence).unwrap()
    else {
        panic!("expected a real-valued sequence");
    };

    for distinct_last in [false, true] {
        let FlattenedSequence::Real(decoded) =
            memory_image_of(&sequence, distinct_last).decode(false, 1000.0)
        else {
            panic!("expected a real-valued sequence");
        };
        assert_eq!(decoded, expected, "distinct last chunk: {distinct_last}");
    }
    assert_eq!(expected.intervals().get(&0), Some(&1000.0));
    assert_eq!(expected.intervals().get(&4), Some(&20.0));
}

#[test]
fn shortened_last_cycle() {
    let mut image = MemoryImage::default();
    image.add_step(2, &[1, 2, 3, 4], Some(&[5, 6][..]), 3, 0);
    let FlattenedSequence::Real(decoded) = image.decode(false, 2000.0) else {
        panic!("expected a real-valued sequence");
    };
    let step = decoded.step(2).unwrap();
    assert_eq!(step.samples(), &[1, 2, 3, 4, 1, 2, 3, 4, 5, 6]);
    assert_eq!(step.duration(), 5.0);
    assert_eq!(step.interval(), 5.0);
}

#[test]
fn decoded_iq_sequence_matches_synthesis() {
    let rate = 1000.0;
    let mut sequence = WaveSequence::new(rate, true).unwrap();
    let iq = AwgIqWave::new(
        wave(WaveKind::Sine, 250.0, 2),
        wave(WaveKind::Gaussian, 250.0, 2),
    )
    .unwrap();
    sequence.add_step(1, iq.clone(), 0.0).unwrap();
    let (i_samples, q_samples) = iq.synthesize(rate);

    let mut image = MemoryImage::default();
    let cycle_len = i_samples.len() / 2;
    let cycle = interleave(&i_samples[..cycle_len], &q_samples[..cycle_len]);
    image.add_step(1, &cycle, None, 2, 0);

    let FlattenedSequence::Iq(decoded) = image.decode(true, rate) else {
        panic!("expected an IQ sequence");
    };
    let step = decoded.step(1).unwrap();
    assert_eq!(step.i_samples(), i_samples.as_slice());
    assert_eq!(step.q_samples(), q_samples.as_slice());
    // Stored IQ samples cover twice the synthesized output time.
    assert_eq!(step.duration(), 2.0 * sequence.duration(1).unwrap());
}

proptest! {
    #[test]
    fn decoded_any_wave_repeats_primary_chunk(
        samples in proptest::collection::vec(any::<i16>(), 1..32),
        num_cycles in 1u32..6,
        distinct_last in any::<bool>(),
    ) {
        let wave = AwgAnyWave::new(&samples, num_cycles).unwrap();
        let mut image = MemoryImage::default();
        let last = distinct_last.then_some(samples.as_slice());
        image.add_step(0, &samples, last, num_cycles, 0);
        let FlattenedSequence::Real(decoded) = image.decode(false, 500.0) else {
            panic!("expected a real-valued sequence");
        };
        let step = decoded.step(0).unwrap();
        let synthesized = wave.synthesize();
        prop_assert_eq!(step.samples(), synthesized.as_slice());
        prop_assert_eq!(step.samples().len(), samples.len() * num_cycles as usize);
    }
}
