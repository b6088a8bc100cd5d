//! C functions for native libraries handing vectors over to the JVM.
//!
//! They report failures by returning `0` or `false` and logging the reason, never by unwinding.

use stdvec_runtime::decoder;
use stdvec_runtime::handle::DestructorFn;
use stdvec_runtime::pool::VECTORS;
use stdvec_runtime::Destructor;
use stdvec_runtime::Handle;
use stdvec_runtime::NativeVector;
use stdvec_runtime::RawHandle;

/// Creates an empty vector whose elements are destroyed by `destructor`.
///
/// Returns `0` if `destructor` is null.
#[no_mangle]
pub extern "C" fn stdvec_new(destructor: Option<DestructorFn>) -> Handle {
    crate::init_logger();
    log::trace!("Creating a vector");
    match destructor {
        Some(function) => decoder::shelve(NativeVector::new(Destructor::new(function))),
        None => {
            log::error!("Refusing to create a vector without a destructor");
            0
        }
    }
}

/// Appends an element, or an empty slot if `element` is `0`.
///
/// # Safety
///
/// The vector takes ownership of `element`, which must be destroyable by the destructor the
/// vector was created with.
#[no_mangle]
pub unsafe extern "C" fn stdvec_push(handle: Handle, element: i64) -> bool {
    log::trace!("Pushing element {} to vector {}", element, handle);
    match VECTORS.peek(handle, |vector| vector.push_raw(RawHandle(element))) {
        Ok(()) => true,
        Err(err) => {
            log::error!("Failed to push to a vector: {}", err);
            false
        }
    }
}

/// Takes over a vector in the legacy layout: `len` slots of element addresses, the last of which
/// is the address of the destructor.
///
/// The slots are copied, the caller still owns the memory at `slots`.
///
/// # Safety
///
/// `slots` must be valid for reading `len` integers and satisfy
/// [NativeVector::from_legacy](stdvec_runtime::NativeVector::from_legacy).
#[no_mangle]
pub unsafe extern "C" fn stdvec_from_legacy(slots: *const i64, len: usize) -> Handle {
    crate::init_logger();
    log::trace!("Decoding a vector of {} slots", len);
    if slots.is_null() {
        log::error!("Refusing to decode a null vector");
        return 0;
    }
    let slots = std::slice::from_raw_parts(slots, len);
    match NativeVector::from_legacy(slots) {
        Ok(vector) => decoder::shelve(vector),
        Err(err) => {
            log::error!("Failed to decode a vector: {}", err);
            0
        }
    }
}

/// Reads the element at `index` without taking it from the vector.
///
/// Returns `0` for a released slot, an out-of-range index or an invalid handle.
#[no_mangle]
pub extern "C" fn stdvec_get(handle: Handle, index: i32) -> i64 {
    log::trace!("Reading element {} of vector {}", index, handle);
    match decoder::peek_element(handle, index) {
        Ok(element) => element.into(),
        Err(err) => {
            log::error!("Failed to read a vector: {}", err);
            0
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use stdvec_runtime::testing::destroyed;
    use stdvec_runtime::testing::record;

    #[test]
    fn build_and_dispose() {
        destroyed();
        let handle = stdvec_new(Some(record));
        assert_ne!(0, handle);
        unsafe {
            assert!(stdvec_push(handle, 0x10));
            assert!(stdvec_push(handle, 0x20));
            assert!(stdvec_push(handle, 0));
        }

        assert_eq!(Ok(3), decoder::array_size(handle));
        assert_eq!(Ok(2), decoder::dispose_array(handle));
        assert_eq!(vec![0x20, 0x10], destroyed());
        assert!(!unsafe { stdvec_push(handle, 0x30) });
    }

    #[test]
    fn null_destructor() {
        assert_eq!(0, stdvec_new(None));
    }

    #[test]
    fn legacy_layout() {
        destroyed();
        let slots = [0x10, 0x20, 0, record as DestructorFn as usize as i64];
        let handle = unsafe { stdvec_from_legacy(slots.as_ptr(), slots.len()) };
        assert_ne!(0, handle);

        assert_eq!(Ok(3), decoder::array_size(handle));
        assert_eq!(Ok(RawHandle(0x10)), decoder::release_element(handle, 0));
        assert_eq!(Ok(1), decoder::dispose_array(handle));
        assert_eq!(vec![0x20], destroyed());
    }

    #[test]
    fn legacy_without_destructor() {
        let slots = [0x10, 0];
        assert_eq!(0, unsafe { stdvec_from_legacy(slots.as_ptr(), slots.len()) });
        assert_eq!(0, unsafe { stdvec_from_legacy(std::ptr::null(), 0) });
    }

    #[test]
    fn get_keeps_ownership() {
        destroyed();
        let handle = stdvec_new(Some(record));
        unsafe {
            stdvec_push(handle, 0x10);
            stdvec_push(handle, 0x20);
        }

        assert_eq!(0x20, stdvec_get(handle, 1));
        assert_eq!(0, stdvec_get(handle, 2));
        assert_eq!(0x20, stdvec_get(handle, 1));
        assert_eq!(Ok(2), decoder::dispose_array(handle));
        assert_eq!(0, stdvec_get(handle, 0));
        assert_eq!(vec![0x20, 0x10], destroyed());
    }
}
