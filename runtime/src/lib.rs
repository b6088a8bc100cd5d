//! Runtime for decoding native handle vectors
//!
//! A native library hands a vector of element handles over to a managed runtime. The managed side
//! measures it, takes ownership of some elements ([release](NativeVector::release)) and finally
//! disposes the rest ([dispose](NativeVector::dispose)). Target-specific bridges (e.g. JNI) call
//! the functions in [decoder].

pub mod config;
pub mod decoder;
pub mod handle;
pub mod pool;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod vector;

pub use handle::Destructor;
pub use handle::Element;
pub use handle::ElementRef;
pub use handle::Handle;
pub use handle::RawHandle;
pub use vector::NativeVector;

use thiserror::Error;

/// Errors reported to the target side instead of corrupting memory.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("No live vector behind handle {0}")]
    InvalidHandle(Handle),

    #[error("Index {index} out of bounds for a vector of {len} elements")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("Vector of {0} elements is too large for the target")]
    SizeOverflow(usize),

    #[error("Vector has no destructor slot")]
    MissingDestructor,
}

pub type Result<T> = std::result::Result<T, Error>;
