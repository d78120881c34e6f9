//! # Bonds
//!
//! $$
//! P(t,T)=\mathbb E_t^{\mathbb Q}\!\left[e^{-\int_t^T r_s ds}\right]
//! $$
//!
pub mod vasicek;
