mod rolling_sum;
pub use rolling_sum::{RollingMean, RollingSum};

mod rolling_extremum;
pub use rolling_extremum::{RollingMax, RollingMin};

mod rolling_delta;
pub use rolling_delta::{RollingDelta, RollingPctChange};

mod rolling_quantile;
pub use rolling_quantile::RollingQuantile;

mod rolling_std_dev;
pub use rolling_std_dev::RollingStdDev;

mod rolling_moments;
pub use rolling_moments::{RollingKurt, RollingSkew};
