//! JNI bridge functions of `org.jetbrains.skia.StdVectorDecoder`.

use crate::bridge;
use jni::objects::JClass;
use jni::sys::jint;
use jni::sys::jlong;
use jni::JNIEnv;
use stdvec_runtime::decoder;

#[no_mangle]
pub extern "system" fn Java_org_jetbrains_skia_StdVectorDecoderKt_StdVectorDecoder_1nGetArraySize(
    env: JNIEnv,
    _: JClass,
    ptr: jlong,
) -> jint {
    log::trace!("Measuring vector {}", ptr);
    bridge(&env, decoder::array_size(ptr))
}

#[no_mangle]
pub extern "system" fn Java_org_jetbrains_skia_StdVectorDecoderKt_StdVectorDecoder_1nDisposeArray(
    env: JNIEnv,
    _: JClass,
    ptr: jlong,
) {
    log::trace!("Disposing vector {}", ptr);
    bridge(&env, decoder::dispose_array(ptr).map(drop))
}

#[no_mangle]
pub extern "system" fn Java_org_jetbrains_skia_StdVectorDecoderKt_StdVectorDecoder_1nReleaseElement(
    env: JNIEnv,
    _: JClass,
    ptr: jlong,
    index: jint,
) -> jlong {
    log::trace!("Releasing element {} of vector {}", index, ptr);
    bridge(&env, decoder::release_element(ptr, index).map(jlong::from))
}
