//! # Discounting
//!
//! $$
//! D_{i,k}=\exp\Big(-\sum_{t<k} r_{i,t}\,(t_{t+1}-t_t)\Big)
//! $$
//!
use ndarray::Array1;
use ndarray::Array2;
use ndarray::Zip;

use crate::stochastic::grid::TimeGrid;

/// Left-Riemann running integral of each rate path, shape `(paths, num_steps)`.
///
/// Column `k` integrates over `[0, t_{k+1}]` using the rate at the left end of each interval.
pub fn integrated_rates(paths: &Array2<f64>, grid: &TimeGrid) -> Array2<f64> {
  assert_eq!(
    paths.ncols(),
    grid.num_steps + 1,
    "paths must have one column per grid point"
  );

  let dt = grid.increments();
  let mut integral = Array2::<f64>::zeros((paths.nrows(), grid.num_steps));
  Zip::from(integral.rows_mut())
    .and(paths.rows())
    .for_each(|mut out, path| {
      let mut acc = 0.0;
      for ((o, &r), &h) in out.iter_mut().zip(path.iter()).zip(dt.iter()) {
        acc += r * h;
        *o = acc;
      }
    });

  integral
}

/// Discount-factor paths `exp(-integral)`, shape `(paths, num_steps)`.
pub fn discount_factors(paths: &Array2<f64>, grid: &TimeGrid) -> Array2<f64> {
  integrated_rates(paths, grid).mapv_into(|x| (-x).exp())
}

/// Last column of a `(paths, num_steps)` matrix.
pub fn terminal(values: &Array2<f64>) -> Array1<f64> {
  assert!(values.ncols() > 0, "grid has no steps");
  values.column(values.ncols() - 1).to_owned()
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use ndarray::array;

  use super::*;

  #[test]
  fn flat_rate_discounts_exponentially() {
    let grid = TimeGrid::with_steps(2.0, 4);
    let paths = Array2::from_elem((3, 5), 0.05);
    let df = discount_factors(&paths, &grid);

    assert_eq!(df.dim(), (3, 4));
    for (k, &d) in df.row(0).iter().enumerate() {
      assert_relative_eq!(d, (-0.05 * 0.5 * (k + 1) as f64).exp(), epsilon = 1e-15);
    }
    assert_relative_eq!(terminal(&df)[2], (-0.1_f64).exp(), epsilon = 1e-15);
  }

  #[test]
  fn integral_ignores_last_grid_point() {
    let grid = TimeGrid::with_steps(1.0, 2);
    let paths = array![[0.02, 0.04, 100.0]];
    let integral = integrated_rates(&paths, &grid);

    assert_relative_eq!(integral[[0, 0]], 0.01);
    assert_relative_eq!(integral[[0, 1]], 0.03);
  }

  #[test]
  fn non_negative_rates_give_non_increasing_factors() {
    let grid = TimeGrid::with_steps(1.0, 10);
    let paths = Array2::from_shape_fn((4, 11), |(i, t)| 0.01 * (i + t) as f64);
    let df = discount_factors(&paths, &grid);

    for row in df.rows() {
      assert!(row.iter().all(|&d| d > 0.0 && d <= 1.0));
      assert!(row.windows(2).into_iter().all(|w| w[1] <= w[0]));
    }
  }

  #[test]
  fn negative_rates_can_push_factors_above_one() {
    let grid = TimeGrid::with_steps(1.0, 1);
    let df = discount_factors(&array![[-0.01, 0.0]], &grid);
    assert!(df[[0, 0]] > 1.0);
  }
}
