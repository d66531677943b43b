pub mod helper;

mod window;
pub use window::Window;

mod deque;
pub(crate) use deque::Deque;

mod monotonic_queue;
pub(crate) use monotonic_queue::{Max, Min, MonotonicQueue, OrderPolicy};

mod rb_tree;
pub(crate) use rb_tree::RbTree;
