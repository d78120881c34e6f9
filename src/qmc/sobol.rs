//! Scrambled Sobol' sequence.
//!
//! Base-2 digital sequence with 32-bit resolution in Gray-code order.
//! Direction integers come from [`primitive_polynomials`] with initial values
//! hashed from the dimension index. Scrambling is a random linear matrix
//! scramble followed by a random digital shift; both keep every
//! power-of-two prefix a (t, m, s)-net.
use rand::Rng;

use super::polynomial::degree;
use super::polynomial::primitive_polynomials;
use crate::traits::LowDiscrepancySequence;

/// Bits of resolution per coordinate.
pub const BITS: usize = 32;
/// Number of points before the sequence is exhausted.
pub const MAX_POINTS: u64 = 1 << BITS;

const SCALE: f64 = 1.0 / MAX_POINTS as f64;

type Directions = [u32; BITS];

fn splitmix64(mut z: u64) -> u64 {
  z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
  z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
  z ^ (z >> 31)
}

/// Direction integers `v_k = m_k * 2^(32 - k)` for one dimension.
///
/// `poly == None` is the van der Corput dimension (`m_k = 1`).
fn direction_numbers(dim: usize, poly: Option<u64>) -> Directions {
  let mut m = [0u64; BITS];
  match poly {
    None => m.fill(1),
    Some(p) => {
      let s = degree(p) as usize;
      for k in 0..s.min(BITS) {
        m[k] = if k == 0 {
          1
        } else {
          // odd and below 2^(k+1)
          (splitmix64(((dim as u64) << 32) | k as u64) & ((1u64 << (k + 1)) - 1)) | 1
        };
      }
      for k in s..BITS {
        let mut mk = m[k - s] ^ (m[k - s] << s);
        for i in 1..s {
          if (p >> (s - i)) & 1 == 1 {
            mk ^= m[k - i] << i;
          }
        }
        m[k] = mk;
      }
    }
  }

  let mut v = [0u32; BITS];
  for (k, vk) in v.iter_mut().enumerate() {
    *vk = (m[k] << (BITS - 1 - k)) as u32;
  }
  v
}

/// Random lower-triangular, unit-diagonal bit matrix applied to a 32-bit digit vector.
///
/// Digit `i` (weight `2^-(i+1)`) lives in bit `31 - i`.
fn linear_scramble<R: Rng + ?Sized>(v: &mut Directions, rng: &mut R) {
  let mut rows = [0u32; BITS];
  for (i, row) in rows.iter_mut().enumerate() {
    let diagonal = 1u32 << (BITS - 1 - i);
    let above = if i == 0 { 0 } else { u32::MAX << (BITS - i) };
    *row = diagonal | (rng.gen::<u32>() & above);
  }

  for vk in v.iter_mut() {
    let mut out = 0u32;
    for (i, row) in rows.iter().enumerate() {
      if (row & *vk).count_ones() & 1 == 1 {
        out |= 1 << (BITS - 1 - i);
      }
    }
    *vk = out;
  }
}

pub struct Sobol {
  directions: Vec<Directions>,
  shift: Vec<u32>,
  state: Vec<u32>,
  index: u64,
}

impl Sobol {
  /// Unscrambled sequence; its first point is the origin.
  pub fn new(dim: usize) -> Self {
    let polys = primitive_polynomials(dim.saturating_sub(1));
    let directions = (0..dim)
      .map(|j| direction_numbers(j, if j == 0 { None } else { Some(polys[j - 1]) }))
      .collect();

    Self {
      directions,
      shift: vec![0; dim],
      state: vec![0; dim],
      index: 0,
    }
  }

  /// Linear matrix scramble plus digital shift, drawn from `rng`.
  pub fn scrambled<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Self {
    let mut sobol = Self::new(dim);
    for v in sobol.directions.iter_mut() {
      linear_scramble(v, rng);
    }
    for s in sobol.shift.iter_mut() {
      *s = rng.gen();
    }
    sobol
  }

  /// Index of the next point to be emitted.
  pub fn index(&self) -> u64 {
    self.index
  }

  fn seek(&mut self, index: u64) {
    self.index = index.min(MAX_POINTS);
    if self.index == MAX_POINTS {
      return;
    }
    let gray = self.index ^ (self.index >> 1);
    for (x, v) in self.state.iter_mut().zip(&self.directions) {
      *x = 0;
      for (k, vk) in v.iter().enumerate() {
        if (gray >> k) & 1 == 1 {
          *x ^= vk;
        }
      }
    }
  }
}

impl LowDiscrepancySequence for Sobol {
  fn dimension(&self) -> usize {
    self.directions.len()
  }

  fn next_into(&mut self, out: &mut [f64]) -> bool {
    debug_assert_eq!(out.len(), self.dimension());
    if self.index >= MAX_POINTS {
      return false;
    }

    for ((u, x), s) in out.iter_mut().zip(&self.state).zip(&self.shift) {
      // cell midpoint keeps every coordinate strictly inside (0, 1)
      *u = ((x ^ s) as f64 + 0.5) * SCALE;
    }

    self.index += 1;
    if self.index < MAX_POINTS {
      let c = self.index.trailing_zeros() as usize;
      for (x, v) in self.state.iter_mut().zip(&self.directions) {
        *x ^= v[c];
      }
    }
    true
  }

  fn reset(&mut self) {
    self.index = 0;
    self.state.fill(0);
  }

  fn skip(&mut self, n: usize) {
    self.seek(self.index.saturating_add(n as u64));
  }
}
