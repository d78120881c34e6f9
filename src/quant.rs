//! # Quant
//!
//! | Module              | Description                                                |
//! |---------------------|------------------------------------------------------------|
//! | [`bonds`]           | Closed-form zero-coupon bond prices.                       |
//! | [`discount`]        | Pathwise integrated rates and discount factors.            |
//! | [`control_variate`] | Literal and regression control-variate estimators.         |
//! | [`monte_carlo`]     | End-to-end Monte Carlo bond pricer.                        |
//!
pub mod bonds;
pub mod control_variate;
pub mod discount;
pub mod monte_carlo;
