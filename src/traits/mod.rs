mod windowed;
pub use windowed::Windowed;
