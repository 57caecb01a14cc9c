use thiserror::Error;

pub mod fibonacci_heap;

pub use fibonacci_heap::FibonacciHeap;

/// Errors surfaced by the priority queue. The queue never corrupts its
/// internal state when one of these is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The key given to `insert` is not totally ordered with itself
    /// (a float NaN, for example).
    #[error("heap keys must be orderable")]
    InvalidKey,
    /// `decrease_key` was called for a value the queue does not hold.
    /// Expected during speculative relaxation, a logic error everywhere
    /// else.
    #[error("value not present in heap")]
    NotFound,
}
