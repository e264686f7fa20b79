// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Primitive encoders and decoders of the hardware wire format.
//!
//! All integers are little-endian, all reals are 8-byte IEEE-754 doubles and
//! magic tags are 4 raw ASCII bytes.

use crate::{Error, Result};

/// An entity with a binary representation understood by the hardware.
pub trait WireFormat {
    /// Appends the binary representation of `self` to `out`.
    fn encode(&self, out: &mut Vec<u8>);

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode(&mut out);
        out
    }
}

pub(crate) fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_f64(out: &mut Vec<u8>, value: f64) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_bool(out: &mut Vec<u8>, value: bool) {
    put_u32(out, u32::from(value));
}

pub(crate) fn put_tag(out: &mut Vec<u8>, tag: &[u8; 4]) {
    out.extend_from_slice(tag);
}

pub(crate) fn put_i16_samples(out: &mut Vec<u8>, samples: &[i16]) {
    out.reserve(samples.len() * 2);
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
}

/// Bounds-checked little-endian reads from a hardware buffer.
///
/// `what` names the buffer in error messages.
#[derive(Clone, Copy)]
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    what: &'static str,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8], what: &'static str) -> Self {
        ByteReader { data, what }
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn bytes_at(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| {
                Error::malformed_input(format!(
                    "{} is truncated: needs {} bytes at offset {}, has {} bytes",
                    self.what,
                    len,
                    offset,
                    self.data.len()
                ))
            })
    }

    fn array_at<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.bytes_at(offset, N)?);
        Ok(buf)
    }

    pub(crate) fn u32_at(&self, offset: usize) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array_at(offset)?))
    }

    pub(crate) fn u64_at(&self, offset: usize) -> Result<u64> {
        Ok(u64::from_le_bytes(self.array_at(offset)?))
    }

    pub(crate) fn f64_at(&self, offset: usize) -> Result<f64> {
        Ok(f64::from_le_bytes(self.array_at(offset)?))
    }

    /// Reads `count` consecutive int16 samples starting at `offset`.
    pub(crate) fn i16_samples_at(&self, offset: usize, count: usize) -> Result<Vec<i16>> {
        let byte_len = count.checked_mul(2).ok_or_else(|| {
            Error::malformed_input(format!("{}: sample count {count} overflows", self.what))
        })?;
        Ok(self
            .bytes_at(offset, byte_len)?
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }

    /// Reads `count` interleaved (I, Q) int16 pairs starting at `offset`.
    pub(crate) fn iq_samples_at(&self, offset: usize, count: usize) -> Result<(Vec<i16>, Vec<i16>)> {
        let byte_len = count.checked_mul(4).ok_or_else(|| {
            Error::malformed_input(format!("{}: sample count {count} overflows", self.what))
        })?;
        let bytes = self.bytes_at(offset, byte_len)?;
        let mut i_samples = Vec::with_capacity(count);
        let mut q_samples = Vec::with_capacity(count);
        for quad in bytes.chunks_exact(4) {
            i_samples.push(i16::from_le_bytes([quad[0], quad[1]]));
            q_samples.push(i16::from_le_bytes([quad[2], quad[3]]));
        }
        Ok((i_samples, q_samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_primitives() {
        let mut out = Vec::new();
        put_tag(&mut out, b"WSEQ");
        put_u32(&mut out, 0x0403_0201);
        put_bool(&mut out, true);
        put_f64(&mut out, 1.0);
        put_i16_samples(&mut out, &[-2, 0x0102]);
        assert_eq!(&out[..4], b"WSEQ");
        assert_eq!(&out[4..8], &[1, 2, 3, 4]);
        assert_eq!(&out[8..12], &[1, 0, 0, 0]);
        assert_eq!(&out[12..20], &1.0f64.to_le_bytes());
        assert_eq!(&out[20..24], &[0xFE, 0xFF, 0x02, 0x01]);
    }

    #[test]
    fn test_reader_bounds() {
        let data = [1u8, 0, 0, 0, 2, 0];
        let reader = ByteReader::new(&data, "descriptor");
        assert_eq!(reader.u32_at(0).unwrap(), 1);
        assert_eq!(reader.i16_samples_at(4, 1).unwrap(), vec![2]);
        let err = reader.u32_at(4).unwrap_err();
        assert_eq!(
            err,
            Error::MalformedInput(
                "descriptor is truncated: needs 4 bytes at offset 4, has 6 bytes".to_string()
            )
        );
        assert!(reader.bytes_at(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_iq_deinterleave() {
        let mut data = Vec::new();
        put_i16_samples(&mut data, &[1, -1, 2, -2, 3, -3]);
        let reader = ByteReader::new(&data, "wave RAM");
        let (i, q) = reader.iq_samples_at(4, 2).unwrap();
        assert_eq!(i, vec![2, 3]);
        assert_eq!(q, vec![-2, -3]);
    }
}
