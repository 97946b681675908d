//! Default hostname for option 12

use crate::interface::HostInfo;

/// Longest DNS label, which is also the option 12 length the codec keeps
const MAX_LABEL_LEN: usize = 63;

/// Read the machine's hostname from the OS
#[cfg(unix)]
pub(crate) fn system_hostname() -> Option<String> {
    use std::ffi::CStr;

    let mut buf = [0u8; 256];
    // SAFETY: the buffer is valid for `buf.len()` bytes and gethostname
    // writes at most that many.
    let result = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
    if result != 0 {
        return None;
    }

    // POSIX does not guarantee termination when the name is truncated
    let name = match CStr::from_bytes_until_nul(&buf) {
        Ok(cstr) => cstr.to_string_lossy().into_owned(),
        Err(_) => String::from_utf8_lossy(&buf).into_owned(),
    };
    Some(name)
}

#[cfg(not(unix))]
pub(crate) fn system_hostname() -> Option<String> {
    std::env::var("COMPUTERNAME").ok()
}

/// Hostname to prefill a query with
///
/// The host's name reduced to its first label and to ASCII, capped at 63
/// bytes. `None` if the host has no usable name.
pub fn default_hostname<H: HostInfo>(host: &H) -> Option<String> {
    let name = host.hostname()?;
    let label = name.trim().split('.').next().unwrap_or_default();

    let ascii: String = label
        .chars()
        .filter(char::is_ascii)
        .take(MAX_LABEL_LEN)
        .collect();

    if ascii.is_empty() {
        None
    } else {
        Some(ascii)
    }
}
