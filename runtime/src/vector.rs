//! Vectors of native elements sharing one destructor.

use crate::handle::Destructor;
use crate::handle::Element;
use crate::handle::ElementRef;
use crate::handle::RawHandle;
use crate::Error;
use crate::Result;
use std::convert::TryFrom;

/// Vector of native elements handed over by a native library.
///
/// Each slot either owns an [Element] or is empty because the element was
/// [released](NativeVector::release). Owned elements are destroyed by [dispose](NativeVector::dispose)
/// or when the vector is dropped.
#[derive(Debug)]
pub struct NativeVector {
    slots: Vec<Option<Element>>,
    destructor: Destructor,
}

impl NativeVector {
    pub fn new(destructor: Destructor) -> Self {
        Self::with_capacity(destructor, 0)
    }

    pub fn with_capacity(destructor: Destructor, capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            destructor,
        }
    }

    /// Decodes the layout native libraries use: element addresses followed by the address of the
    /// destructor in the last slot.
    ///
    /// Zeros before the last slot become empty slots.
    ///
    /// # Safety
    ///
    /// The last slot must be the address of a [DestructorFn](crate::handle::DestructorFn) and every
    /// other non-zero slot must satisfy [Element::from_raw] for that destructor.
    pub unsafe fn from_legacy(slots: &[i64]) -> Result<Self> {
        let (last, elements) = slots.split_last().ok_or(Error::MissingDestructor)?;
        let destructor = Destructor::from_raw(*last).ok_or(Error::MissingDestructor)?;
        let mut result = Self::with_capacity(destructor, elements.len());
        for raw in elements {
            result.slots.push(Element::from_raw(RawHandle(*raw)));
        }
        Ok(result)
    }

    pub fn push(&mut self, element: Element) {
        self.slots.push(Some(element));
    }

    /// Appends an element by its address, or an empty slot for a null handle.
    ///
    /// # Safety
    ///
    /// See [Element::from_raw].
    pub unsafe fn push_raw(&mut self, raw: RawHandle) {
        self.slots.push(Element::from_raw(raw));
    }

    /// Number of slots, released ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// [len](NativeVector::len) as the 32-bit count the target side expects.
    pub fn size(&self) -> Result<i32> {
        i32::try_from(self.len()).map_err(|_| Error::SizeOverflow(self.len()))
    }

    /// Number of slots still owning an element.
    pub fn owned(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Borrows the element at `index` without taking it from the vector.
    pub fn get(&self, index: usize) -> Result<Option<ElementRef<'_>>> {
        self.slots
            .get(index)
            .map(|slot| slot.as_ref().map(Element::borrow))
            .ok_or(Error::IndexOutOfBounds {
                index: index as i64,
                len: self.len(),
            })
    }

    /// Transfers ownership of the element at `index` to the caller.
    ///
    /// The slot stays in place but is empty afterwards. Releasing an empty slot returns
    /// [RawHandle::NULL].
    pub fn release(&mut self, index: usize) -> Result<RawHandle> {
        let len = self.len();
        let slot = self.slots.get_mut(index).ok_or(Error::IndexOutOfBounds {
            index: index as i64,
            len,
        })?;
        Ok(slot.take().map(Element::into_raw).unwrap_or_default())
    }

    /// Destroys every element still owned, last slot first, and frees the vector.
    ///
    /// Returns how many elements were destroyed.
    pub fn dispose(mut self) -> usize {
        self.destroy_all()
    }

    fn destroy_all(&mut self) -> usize {
        let mut destroyed = 0;
        while let Some(slot) = self.slots.pop() {
            if let Some(element) = slot {
                self.destructor.destroy(element);
                destroyed += 1;
            }
        }
        destroyed
    }
}

impl Drop for NativeVector {
    fn drop(&mut self) {
        let destroyed = self.destroy_all();
        if destroyed > 0 {
            log::trace!("Dropping a vector destroyed {} elements", destroyed);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::handle::DestructorFn;
    use crate::testing::destroyed;
    use crate::testing::element;
    use crate::testing::record;

    fn legacy(elements: &[i64]) -> NativeVector {
        let mut slots = elements.to_vec();
        slots.push(record as DestructorFn as usize as i64);
        unsafe { NativeVector::from_legacy(&slots) }.expect("Failed to decode a vector")
    }

    #[test]
    fn size_excludes_destructor() {
        let vector = legacy(&[0x10, 0x20, 0, 0x40]);
        assert_eq!(Ok(4), vector.size());
        assert_eq!(3, vector.owned());
        vector.dispose();
        destroyed();
    }

    #[test]
    fn missing_destructor() {
        let actual = unsafe { NativeVector::from_legacy(&[]) }.unwrap_err();
        assert_eq!(Error::MissingDestructor, actual);

        let actual = unsafe { NativeVector::from_legacy(&[0x10, 0]) }.unwrap_err();
        assert_eq!(Error::MissingDestructor, actual);
    }

    #[test]
    fn release() {
        destroyed();
        let mut vector = legacy(&[0x10, 0x20, 0x30]);

        assert_eq!(Ok(RawHandle(0x20)), vector.release(1));
        assert_eq!(Ok(RawHandle::NULL), vector.release(1));
        assert_eq!(Ok(3), vector.size());
        assert_eq!(Ok(None), vector.get(1));

        assert_eq!(2, vector.dispose());
        assert_eq!(vec![0x30, 0x10], destroyed());
    }

    #[test]
    fn release_out_of_bounds() {
        let mut vector = NativeVector::new(Destructor::new(record));
        vector.push(element(0x10));

        let expected = Error::IndexOutOfBounds { index: 1, len: 1 };
        assert_eq!(Err(expected.clone()), vector.release(1));
        assert_eq!(Err(expected), vector.get(1).map(|_| ()));

        vector.dispose();
        destroyed();
    }

    #[test]
    fn dispose_last_to_first() {
        destroyed();
        let vector = legacy(&[0x10, 0x20, 0]);
        assert_eq!(Ok(3), vector.size());
        assert_eq!(2, vector.dispose());
        assert_eq!(vec![0x20, 0x10], destroyed());
    }

    #[test]
    fn dispose_all_released() {
        destroyed();
        let mut vector = legacy(&[0x10, 0x20]);
        vector.release(0).unwrap();
        vector.release(1).unwrap();
        assert_eq!(0, vector.dispose());
        assert!(destroyed().is_empty());
    }

    #[test]
    fn drop_destroys_remaining() {
        destroyed();
        let mut vector = NativeVector::new(Destructor::new(record));
        vector.push(element(0x10));
        unsafe { vector.push_raw(RawHandle::NULL) };
        unsafe { vector.push_raw(RawHandle(0x30)) };
        assert_eq!(3, vector.len());

        drop(vector);
        assert_eq!(vec![0x30, 0x10], destroyed());
    }
}
