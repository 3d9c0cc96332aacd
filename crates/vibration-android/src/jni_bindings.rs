//! JNI entry points called from `io.haptics.vibration.VibrationBridge`.

use jni::JNIEnv;
use jni::objects::{JClass, JObject, JString};
use jni::sys::{jlong, jstring};
use vibration_core::{Dispatcher, Vibrator};

use crate::bridge::handle_json;
use crate::error::BridgeError;
use crate::service::{api_level, AndroidVibrator};

/// Build a dispatcher for the device vibrator.
/// Returns an opaque handle, or 0 after throwing on failure.
#[unsafe(no_mangle)]
pub extern "system" fn Java_io_haptics_vibration_VibrationBridge_nativeInit(
    mut env: JNIEnv,
    _class: JClass,
    context: JObject,
) -> jlong {
    let result = || -> Result<jlong, BridgeError> {
        let level = api_level(&mut env)?;
        let service = AndroidVibrator::from_context(&mut env, &context)?;
        log::info!("vibration bridge ready on API level {}", level.0);
        let dispatcher = Dispatcher::new(Vibrator::for_api_level(level, Box::new(service)));
        Ok(Box::into_raw(Box::new(dispatcher)) as jlong)
    }();

    match result {
        Ok(handle) => handle,
        Err(e) => {
            let _ = env.throw_new("java/lang/RuntimeException", e.to_string());
            0
        }
    }
}

/// Handle one method call. `arguments` is a JSON string or null.
/// Returns the JSON-encoded reply.
#[unsafe(no_mangle)]
pub extern "system" fn Java_io_haptics_vibration_VibrationBridge_nativeHandle(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
    method: JString,
    arguments: JString,
) -> jstring {
    let result = || -> Result<jstring, BridgeError> {
        if handle == 0 {
            return Err(BridgeError::InvalidHandle);
        }

        let dispatcher = unsafe { &*(handle as *const Dispatcher) };
        let method: String = env.get_string(&method)?.into();
        let arguments: Option<String> = if arguments.is_null() {
            None
        } else {
            Some(env.get_string(&arguments)?.into())
        };

        let reply = handle_json(dispatcher, &method, arguments.as_deref())?;
        Ok(env.new_string(reply)?.into_raw())
    }();

    match result {
        Ok(reply) => reply,
        Err(e) => {
            let _ = env.throw_new("java/lang/IllegalArgumentException", e.to_string());
            std::ptr::null_mut()
        }
    }
}

/// Release the dispatcher behind `handle`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_io_haptics_vibration_VibrationBridge_nativeDestroy(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    if handle != 0 {
        unsafe {
            let _ = Box::from_raw(handle as *mut Dispatcher);
        }
    }
}
