pub mod types;

pub use types::{ActiveWindow, ActiveWindowProbe};

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "macos")]
pub use macos::MacOSProbe as NativeProbe;

#[cfg(target_os = "linux")]
pub use linux::LinuxProbe as NativeProbe;

/// Fallback for platforms without a native probe: never reports a window.
#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub struct NativeProbe;

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
impl NativeProbe {
    pub fn new() -> Result<Self, crate::error::AppError> {
        log::warn!("No active window probe for this platform; nothing will be tracked");
        Ok(Self)
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
impl ActiveWindowProbe for NativeProbe {
    fn poll(&self) -> Option<ActiveWindow> {
        None
    }
}
