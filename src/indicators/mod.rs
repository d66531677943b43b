mod wma;
pub use wma::Wma;
