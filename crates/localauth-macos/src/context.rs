use std::ptr;
use std::sync::Mutex;

use block2::RcBlock;
use objc2::rc::{autoreleasepool, Retained};
use objc2::runtime::{AnyClass, AnyObject, Bool};
use objc2::{msg_send, msg_send_id};
use objc2_foundation::NSString;

use crate::util::{nserror_code, nserror_description};

#[link(name = "LocalAuthentication", kind = "framework")]
extern "C" {}

/// `LATouchIDAuthenticationMaximumAllowableReuseDuration`.
pub const MAX_REUSE_DURATION_SECS: f64 = 300.0;

/// What the `evaluatePolicy:localizedReason:reply:` block received.
#[derive(Debug, Clone)]
pub struct Reply {
    pub success: bool,
    pub error_code: Option<isize>,
    pub message: Option<String>,
}

/// Owned `LAContext`. Released when dropped.
pub struct Context {
    inner: Retained<AnyObject>,
}

// Safety: LAContext is not bound to the thread that created it. Evaluation
// replies already arrive on a private framework queue, and `invalidate` is
// meant to be sent while an evaluation is in flight elsewhere.
unsafe impl Send for Context {}
unsafe impl Sync for Context {}

impl Context {
    pub fn new() -> Result<Self, String> {
        let class = AnyClass::get("LAContext")
            .ok_or_else(|| "LAContext class is not available".to_string())?;
        let inner: Option<Retained<AnyObject>> = unsafe { msg_send_id![class, new] };
        inner
            .map(|inner| Self { inner })
            .ok_or_else(|| "failed to create LAContext".to_string())
    }

    /// `canEvaluatePolicy:error:`. The error side carries the `LAError` code
    /// when the framework provided one.
    pub fn can_evaluate_policy(&self, policy: isize) -> Result<(), Option<isize>> {
        autoreleasepool(|_| {
            let mut error: *mut AnyObject = ptr::null_mut();
            let ok: Bool =
                unsafe { msg_send![&*self.inner, canEvaluatePolicy: policy, error: &mut error] };
            if ok.as_bool() {
                Ok(())
            } else {
                Err(nserror_code(error))
            }
        })
    }

    /// `evaluatePolicy:localizedReason:reply:`. Returns immediately; `reply`
    /// runs at most once on a framework-owned queue.
    pub fn evaluate_policy<F>(&self, policy: isize, reason: &str, reply: F)
    where
        F: FnOnce(Reply) + Send + 'static,
    {
        let pending = Mutex::new(Some(reply));
        let block = RcBlock::new(move |success: Bool, error: *mut AnyObject| {
            let handler = pending.lock().ok().and_then(|mut slot| slot.take());
            if let Some(handler) = handler {
                handler(Reply {
                    success: success.as_bool(),
                    error_code: nserror_code(error),
                    message: nserror_description(error),
                });
            }
        });

        autoreleasepool(|_| {
            let reason = NSString::from_str(reason);
            let _: () = unsafe {
                msg_send![
                    &*self.inner,
                    evaluatePolicy: policy,
                    localizedReason: &*reason,
                    reply: &*block
                ]
            };
        });
    }

    /// Raw `LABiometryType`. Only meaningful after a capability query.
    pub fn biometry_type(&self) -> isize {
        unsafe { msg_send![&*self.inner, biometryType] }
    }

    pub fn set_localized_cancel_title(&self, title: &str) {
        let title = NSString::from_str(title);
        let _: () = unsafe { msg_send![&*self.inner, setLocalizedCancelTitle: &*title] };
    }

    /// An empty title hides the fallback button.
    pub fn set_localized_fallback_title(&self, title: &str) {
        let title = NSString::from_str(title);
        let _: () = unsafe { msg_send![&*self.inner, setLocalizedFallbackTitle: &*title] };
    }

    pub fn set_reuse_duration(&self, seconds: f64) {
        let seconds = seconds.clamp(0.0, MAX_REUSE_DURATION_SECS);
        let _: () = unsafe {
            msg_send![&*self.inner, setTouchIDAuthenticationAllowableReuseDuration: seconds]
        };
    }

    /// Cancels any pending evaluation. The pending reply fires with
    /// `LAErrorAppCancel` and the context cannot be used again.
    pub fn invalidate(&self) {
        let _: () = unsafe { msg_send![&*self.inner, invalidate] };
    }
}
