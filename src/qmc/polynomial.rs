//! Primitive polynomials over GF(2).
//!
//! A polynomial is encoded as an integer whose bit `i` is the coefficient of
//! `x^i`, so `x^3 + x + 1` is `0b1011`.

/// Degree of an encoded polynomial. `p` must be non-zero.
pub fn degree(p: u64) -> u32 {
  63 - p.leading_zeros()
}

fn reduce(a: u64, p: u64, deg: u32) -> u64 {
  if (a >> deg) & 1 == 1 {
    a ^ p
  } else {
    a
  }
}

/// `a * b mod p` for `a, b` of degree below `deg(p)`.
fn mul_mod(mut a: u64, mut b: u64, p: u64, deg: u32) -> u64 {
  let mut acc = 0;
  while b != 0 {
    if b & 1 == 1 {
      acc ^= a;
    }
    b >>= 1;
    a = reduce(a << 1, p, deg);
  }
  acc
}

/// `x^e mod p`.
fn pow_x_mod(mut e: u64, p: u64, deg: u32) -> u64 {
  let mut base = reduce(0b10, p, deg);
  let mut acc = 1;
  while e != 0 {
    if e & 1 == 1 {
      acc = mul_mod(acc, base, p, deg);
    }
    base = mul_mod(base, base, p, deg);
    e >>= 1;
  }
  acc
}

fn prime_factors(mut n: u64) -> Vec<u64> {
  let mut factors = Vec::new();
  let mut q = 2;
  while q * q <= n {
    if n % q == 0 {
      factors.push(q);
      while n % q == 0 {
        n /= q;
      }
    }
    q += 1;
  }
  if n > 1 {
    factors.push(n);
  }
  factors
}

/// `p` is primitive iff `x` has multiplicative order exactly `2^deg - 1` modulo `p`.
pub fn is_primitive(p: u64) -> bool {
  if p & 1 == 0 || p < 0b11 {
    return false;
  }
  let deg = degree(p);
  let order = (1u64 << deg) - 1;
  if pow_x_mod(order, p, deg) != 1 {
    return false;
  }
  prime_factors(order)
    .into_iter()
    .all(|q| pow_x_mod(order / q, p, deg) != 1)
}

/// The first `count` primitive polynomials, by increasing degree then encoding.
pub fn primitive_polynomials(count: usize) -> Vec<u64> {
  let mut polys = Vec::with_capacity(count);
  let mut deg = 1;
  while polys.len() < count {
    let lo = (1u64 << deg) | 1;
    let hi = 1u64 << (deg + 1);
    for p in (lo..hi).step_by(2) {
      if polys.len() == count {
        break;
      }
      if is_primitive(p) {
        polys.push(p);
      }
    }
    deg += 1;
  }
  polys
}
