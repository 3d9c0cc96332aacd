//! `android.os.Vibrator` behind the core's service trait.

use jni::objects::{GlobalRef, JIntArray, JLongArray, JObject, JValue};
use jni::sys::{jint, jlong, jsize};
use jni::{JNIEnv, JavaVM};
use vibration_core::{ApiLevel, AudioAttributes, VibrationEffect, VibrationError, VibratorService};

use crate::error::BridgeError;

const EFFECT_CLASS: &str = "android/os/VibrationEffect";
const ATTRIBUTES_BUILDER_CLASS: &str = "android/media/AudioAttributes$Builder";
const BUILDER_SIG: &str = "(I)Landroid/media/AudioAttributes$Builder;";
const EFFECT_SIG: &str = "Landroid/os/VibrationEffect;";

// Local references created per call stay well under this.
const LOCAL_FRAME_CAPACITY: i32 = 16;

/// Read `Build.VERSION.SDK_INT`.
pub fn api_level(env: &mut JNIEnv) -> Result<ApiLevel, BridgeError> {
    let level = env
        .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
        .i()?;
    Ok(ApiLevel(level.max(0) as u32))
}

pub struct AndroidVibrator {
    vm: JavaVM,
    vibrator: GlobalRef,
}

impl AndroidVibrator {
    /// Look up the system vibrator through `context.getSystemService("vibrator")`.
    pub fn from_context(env: &mut JNIEnv, context: &JObject) -> Result<Self, BridgeError> {
        let name = env.new_string("vibrator")?;
        let service = env
            .call_method(
                context,
                "getSystemService",
                "(Ljava/lang/String;)Ljava/lang/Object;",
                &[JValue::Object(&name)],
            )?
            .l()?;
        if service.is_null() {
            return Err(BridgeError::NoVibratorService);
        }

        Ok(Self {
            vm: env.get_java_vm()?,
            vibrator: env.new_global_ref(service)?,
        })
    }

    /// Run `f` on an attached thread inside its own local reference frame.
    ///
    /// A pending Java exception is logged and cleared before the error is
    /// handed back, so the next call starts from a clean state.
    fn with_env<T, F>(&self, f: F) -> Result<T, VibrationError>
    where
        F: FnOnce(&mut JNIEnv, &JObject) -> Result<T, BridgeError>,
    {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(BridgeError::from)?;
        let result = env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| f(env, self.vibrator.as_obj()));

        if let Err(BridgeError::Jni(jni::errors::Error::JavaException)) = &result {
            let _ = env.exception_describe();
            let _ = env.exception_clear();
        }
        result.map_err(|e| {
            log::error!("vibrator call failed: {}", e);
            VibrationError::from(e)
        })
    }
}

fn long_array<'local>(
    env: &mut JNIEnv<'local>,
    values: &[u64],
) -> Result<JLongArray<'local>, BridgeError> {
    let values: Vec<jlong> = values.iter().map(|v| *v as jlong).collect();
    let array = env.new_long_array(values.len() as jsize)?;
    env.set_long_array_region(&array, 0, &values)?;
    Ok(array)
}

fn int_array<'local>(env: &mut JNIEnv<'local>, values: &[u8]) -> Result<JIntArray<'local>, BridgeError> {
    let values: Vec<jint> = values.iter().map(|v| *v as jint).collect();
    let array = env.new_int_array(values.len() as jsize)?;
    env.set_int_array_region(&array, 0, &values)?;
    Ok(array)
}

fn create_effect<'local>(
    env: &mut JNIEnv<'local>,
    effect: &VibrationEffect,
) -> Result<JObject<'local>, BridgeError> {
    let value = match effect {
        VibrationEffect::OneShot {
            duration_ms,
            amplitude,
        } => env.call_static_method(
            EFFECT_CLASS,
            "createOneShot",
            format!("(JI){EFFECT_SIG}"),
            &[
                JValue::Long(*duration_ms as jlong),
                JValue::Int(amplitude.as_raw()),
            ],
        )?,
        VibrationEffect::Waveform { timings, repeat } => {
            let timings = long_array(env, timings)?;
            env.call_static_method(
                EFFECT_CLASS,
                "createWaveform",
                format!("([JI){EFFECT_SIG}"),
                &[JValue::Object(&timings), JValue::Int(*repeat)],
            )?
        }
        VibrationEffect::WaveformWithAmplitudes {
            timings,
            amplitudes,
            repeat,
        } => {
            let timings = long_array(env, timings)?;
            let amplitudes = int_array(env, amplitudes)?;
            env.call_static_method(
                EFFECT_CLASS,
                "createWaveform",
                format!("([J[II){EFFECT_SIG}"),
                &[
                    JValue::Object(&timings),
                    JValue::Object(&amplitudes),
                    JValue::Int(*repeat),
                ],
            )?
        }
    };
    Ok(value.l()?)
}

fn create_attributes<'local>(
    env: &mut JNIEnv<'local>,
    attributes: AudioAttributes,
) -> Result<JObject<'local>, BridgeError> {
    let builder = env.new_object(ATTRIBUTES_BUILDER_CLASS, "()V", &[])?;
    let builder = env
        .call_method(
            &builder,
            "setContentType",
            BUILDER_SIG,
            &[JValue::Int(attributes.content_type as jint)],
        )?
        .l()?;
    let builder = env
        .call_method(
            &builder,
            "setUsage",
            BUILDER_SIG,
            &[JValue::Int(attributes.usage as jint)],
        )?
        .l()?;
    Ok(env
        .call_method(&builder, "build", "()Landroid/media/AudioAttributes;", &[])?
        .l()?)
}

impl VibratorService for AndroidVibrator {
    fn has_vibrator(&self) -> Result<bool, VibrationError> {
        self.with_env(|env, vibrator| Ok(env.call_method(vibrator, "hasVibrator", "()Z", &[])?.z()?))
    }

    fn has_amplitude_control(&self) -> Result<bool, VibrationError> {
        self.with_env(|env, vibrator| {
            Ok(env
                .call_method(vibrator, "hasAmplitudeControl", "()Z", &[])?
                .z()?)
        })
    }

    fn vibrate(
        &self,
        effect: &VibrationEffect,
        attributes: AudioAttributes,
    ) -> Result<(), VibrationError> {
        self.with_env(|env, vibrator| {
            let effect = create_effect(env, effect)?;
            let attributes = create_attributes(env, attributes)?;
            env.call_method(
                vibrator,
                "vibrate",
                "(Landroid/os/VibrationEffect;Landroid/media/AudioAttributes;)V",
                &[JValue::Object(&effect), JValue::Object(&attributes)],
            )?;
            Ok(())
        })
    }

    fn vibrate_legacy(&self, duration_ms: u64) -> Result<(), VibrationError> {
        self.with_env(|env, vibrator| {
            env.call_method(
                vibrator,
                "vibrate",
                "(J)V",
                &[JValue::Long(duration_ms as jlong)],
            )?;
            Ok(())
        })
    }

    fn vibrate_legacy_pattern(&self, timings: &[u64], repeat: i32) -> Result<(), VibrationError> {
        self.with_env(|env, vibrator| {
            let timings = long_array(env, timings)?;
            env.call_method(
                vibrator,
                "vibrate",
                "([JI)V",
                &[JValue::Object(&timings), JValue::Int(repeat)],
            )?;
            Ok(())
        })
    }

    fn cancel(&self) -> Result<(), VibrationError> {
        self.with_env(|env, vibrator| {
            env.call_method(vibrator, "cancel", "()V", &[])?;
            Ok(())
        })
    }
}
