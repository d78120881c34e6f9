//! # Stochastic Process Simulation
//!
//! $$
//! r_{t+1}=r_t+\kappa(\theta-r_t)\Delta t+\sigma\sqrt{\Delta t}\,Z_{t+1}
//! $$
//!
//! | Module       | Description                                              |
//! |--------------|----------------------------------------------------------|
//! | [`grid`]     | Equally spaced simulation grid on `[0, T]`.              |
//! | [`interest`] | Short-rate path simulation from a supplied shock matrix. |
//!
pub mod grid;
pub mod interest;
