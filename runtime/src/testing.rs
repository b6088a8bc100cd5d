//! Helpers for tests of crates building on this runtime.
//!
//! Available with the `testing` feature.

use crate::handle::Element;
use crate::handle::RawHandle;
use std::cell::RefCell;
use std::ffi::c_void;

thread_local! {
    static DESTROYED: RefCell<Vec<i64>> = RefCell::new(Vec::new());
}

/// Destructor recording the address instead of freeing anything.
///
/// # Safety
///
/// Always safe to call, `unsafe` only to match [DestructorFn](crate::handle::DestructorFn).
pub unsafe extern "C" fn record(ptr: *mut c_void) {
    DESTROYED.with(|log| log.borrow_mut().push(ptr as usize as i64));
}

/// Returns and clears what [record] saw on the current thread.
pub fn destroyed() -> Vec<i64> {
    DESTROYED.with(|log| log.borrow_mut().drain(..).collect())
}

/// Element with a made-up address, for vectors destroyed by [record].
pub fn element(raw: i64) -> Element {
    unsafe { Element::from_raw(RawHandle(raw)) }.expect("Test element must not be null")
}
