//! JNI bridge for native handle vectors.
//!
//! The JVM side only sees [Handle](stdvec_runtime::Handle)s. Native libraries create vectors
//! through the C functions in [native], the JVM measures, releases and disposes them through the
//! functions in [decoder].

pub mod decoder;
pub mod native;

use jni::sys::jint;
use jni::sys::JNI_VERSION_1_6;
use jni::JNIEnv;
use std::ffi::c_void;
use std::sync::Once;
use stdvec_runtime::config::Config;
use stdvec_runtime::Error;

static LOGGER: Once = Once::new();

/// Installs the logger configured by the environment, at most once per process.
pub fn init_logger() {
    LOGGER.call_once(|| Config::from_env().init_logger());
}

#[no_mangle]
pub extern "system" fn JNI_OnLoad(_: *mut jni::sys::JavaVM, _: *mut c_void) -> jint {
    init_logger();
    log::trace!("Bridge library loaded");
    JNI_VERSION_1_6
}

/// Java exception class reporting an [Error].
fn exception_class(err: &Error) -> &'static str {
    match err {
        Error::InvalidHandle(_) => "java/lang/IllegalStateException",
        Error::IndexOutOfBounds { .. } => "java/lang/IndexOutOfBoundsException",
        Error::SizeOverflow(_) | Error::MissingDestructor => "java/lang/IllegalArgumentException",
    }
}

/// Unwraps a result for the JVM.
///
/// An error becomes a pending Java exception and the JVM receives a default value it must ignore.
fn bridge<T: Default>(env: &JNIEnv, src: stdvec_runtime::Result<T>) -> T {
    match src {
        Ok(value) => value,
        Err(err) => {
            let class = exception_class(&err);
            log::warn!("Throwing `{}`: {}", class, &err);
            if let Err(jni_err) = env.throw_new(class, err.to_string()) {
                log::error!("Failed to throw `{}`: {}", class, jni_err);
            }
            T::default()
        }
    }
}
