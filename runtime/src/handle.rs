//! Handles crossing the language boundary.
//!
//! Native objects travel as bare integers. The types here attach ownership to them: an [Element]
//! owns the object it points to and must either be destroyed or given away, an [ElementRef] only
//! borrows it, and a [RawHandle] is what's left once nobody on the Rust side is responsible.

use std::convert::TryFrom;
use std::ffi::c_void;
use std::marker::PhantomData;
use std::num::NonZeroI64;

/// Opaque key of a [NativeVector](crate::NativeVector) stored in a [Pool](crate::pool::Pool).
///
/// This is the value the target side holds on to. `0` never refers to a vector.
pub type Handle = i64;

/// Signature of the function the native library uses to destroy an element.
pub type DestructorFn = unsafe extern "C" fn(*mut c_void);

/// Native address carried by a 64-bit integer.
///
/// The bits are taken as they are, so tagged pointers survive on 64-bit targets. On narrower
/// targets an integer with bits beyond the pointer width is not an address.
pub fn address(raw: i64) -> Option<usize> {
    usize::try_from(raw as u64).ok()
}

/// Untyped address of a native object, `0` meaning "nothing".
///
/// Holding a [RawHandle] grants nothing: whoever received it from [Element::into_raw] is
/// responsible for the object.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawHandle(pub i64);

impl RawHandle {
    pub const NULL: Self = Self(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl From<RawHandle> for i64 {
    fn from(src: RawHandle) -> Self {
        src.0
    }
}

/// Owning handle of a native object.
#[derive(Debug, PartialEq, Eq)]
pub struct Element(NonZeroI64);

impl Element {
    /// Takes ownership of the object at `raw`.
    ///
    /// Returns [None] for a null handle or one that is not an [address] on this target.
    ///
    /// # Safety
    ///
    /// `raw` must point to a live object nobody else will destroy, and it must be destroyable by
    /// the [Destructor] of whichever vector the [Element] ends up in.
    pub unsafe fn from_raw(raw: RawHandle) -> Option<Self> {
        address(raw.0)?;
        NonZeroI64::new(raw.0).map(Self)
    }

    /// Gives up ownership.
    pub fn into_raw(self) -> RawHandle {
        RawHandle(self.0.get())
    }

    pub fn borrow(&self) -> ElementRef<'_> {
        ElementRef {
            raw: self.0,
            _owner: PhantomData,
        }
    }

    fn as_ptr(&self) -> Option<*mut c_void> {
        address(self.0.get()).map(|address| address as *mut c_void)
    }
}

/// Borrowed view of an [Element] owned by someone else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementRef<'a> {
    raw: NonZeroI64,
    _owner: PhantomData<&'a Element>,
}

impl ElementRef<'_> {
    pub fn as_raw(self) -> RawHandle {
        RawHandle(self.raw.get())
    }
}

/// Capability to destroy the elements of one vector.
#[derive(Clone, Copy, Debug)]
pub struct Destructor(DestructorFn);

impl Destructor {
    pub fn new(function: DestructorFn) -> Self {
        Self(function)
    }

    /// Decodes a function address stored as an integer.
    ///
    /// Returns [None] for a null address or one that does not fit this target.
    ///
    /// # Safety
    ///
    /// A non-zero `raw` must be the address of a function with the signature of [DestructorFn].
    pub unsafe fn from_raw(raw: i64) -> Option<Self> {
        match address(raw)? {
            0 => None,
            function => Some(Self(std::mem::transmute::<usize, DestructorFn>(function))),
        }
    }

    pub(crate) fn destroy(&self, element: Element) {
        match element.as_ptr() {
            // SAFETY: `Element::from_raw` guarantees ownership and that this destructor fits.
            Some(ptr) => unsafe { (self.0)(ptr) },
            None => log::error!("Leaking element {:?}, not an address", element),
        }
    }
}
