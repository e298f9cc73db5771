use std::ffi::CStr;
use std::os::raw::c_char;

use objc2::msg_send;
use objc2::runtime::AnyObject;

pub fn nsstring_to_string(value: *mut AnyObject) -> Option<String> {
    if value.is_null() {
        return None;
    }
    let cstr: *const c_char = unsafe { msg_send![value, UTF8String] };
    if cstr.is_null() {
        return None;
    }
    let value = unsafe { CStr::from_ptr(cstr) };
    Some(value.to_string_lossy().to_string())
}

/// Reads `-[NSError code]`, or `None` for a nil error.
pub fn nserror_code(error: *mut AnyObject) -> Option<isize> {
    if error.is_null() {
        return None;
    }
    let code: isize = unsafe { msg_send![error, code] };
    Some(code)
}

pub fn nserror_description(error: *mut AnyObject) -> Option<String> {
    if error.is_null() {
        return None;
    }
    nsstring_to_string(unsafe { msg_send![error, localizedDescription] })
}
