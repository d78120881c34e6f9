//! # Interest
//!
//! $$
//! dr_t=\kappa(\theta-r_t)dt+\sigma dW_t
//! $$
//!
pub mod vasicek;
