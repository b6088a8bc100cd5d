//! Operations behind the bridge functions of every target.
//!
//! They work on vectors in [VECTORS] and never touch memory the [Handle] does not lead to.

use crate::handle::ElementRef;
use crate::handle::Handle;
use crate::handle::RawHandle;
use crate::pool::VECTORS;
use crate::Error;
use crate::NativeVector;
use crate::Result;
use std::convert::TryFrom;

/// Stores a vector so the target side can reach it.
pub fn shelve(vector: NativeVector) -> Handle {
    let handle = VECTORS.store(vector);
    log::debug!("Shelved a vector as handle {}", handle);
    log::trace!("{} vectors shelved", VECTORS.len());
    handle
}

/// Number of elements in a vector, released ones included.
pub fn array_size(handle: Handle) -> Result<i32> {
    VECTORS.peek(handle, |vector| vector.size())?
}

/// Transfers ownership of one element to the target side.
pub fn release_element(handle: Handle, index: i32) -> Result<RawHandle> {
    VECTORS.peek(handle, |vector| {
        let index = checked_index(index, vector)?;
        vector.release(index)
    })?
}

fn checked_index(index: i32, vector: &NativeVector) -> Result<usize> {
    usize::try_from(index).map_err(|_| Error::IndexOutOfBounds {
        index: index.into(),
        len: vector.len(),
    })
}

/// Reads one element without transferring ownership.
///
/// Returns [RawHandle::NULL] for a released slot.
pub fn peek_element(handle: Handle, index: i32) -> Result<RawHandle> {
    VECTORS.peek(handle, |vector| {
        let element = vector.get(checked_index(index, vector)?)?;
        Ok(element.map(ElementRef::as_raw).unwrap_or_default())
    })?
}

/// Destroys every element not released yet and frees the vector.
///
/// Returns how many elements were destroyed.
pub fn dispose_array(handle: Handle) -> Result<usize> {
    let vector = VECTORS.take(handle)?;
    log::trace!(
        "Vector {} still owns {} of {} elements",
        handle,
        vector.owned(),
        vector.len()
    );
    let destroyed = vector.dispose();
    log::debug!(
        "Disposed vector {}, destroyed {} elements",
        handle,
        destroyed
    );
    Ok(destroyed)
}
