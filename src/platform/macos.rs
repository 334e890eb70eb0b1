#![allow(unsafe_code, reason = "AppKit accessors are exposed as unsafe by objc2-app-kit")]

use super::{ActiveWindow, ActiveWindowProbe};
use crate::constants::UNKNOWN_LABEL;
use crate::error::AppError;
use objc2_app_kit::NSWorkspace;

/// Reads the frontmost application from `NSWorkspace`.
///
/// Window titles need the Accessibility permission, which is not requested;
/// samples are attributed to the app with an unknown title.
pub struct MacOSProbe;

impl MacOSProbe {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self)
    }
}

impl ActiveWindowProbe for MacOSProbe {
    fn poll(&self) -> Option<ActiveWindow> {
        // SAFETY: sharedWorkspace returns a retained singleton, and the
        // accessors below only read properties of retained objects.
        let app_name = unsafe {
            let workspace = NSWorkspace::sharedWorkspace();
            let app = workspace.frontmostApplication()?;
            app.localizedName()?.to_string()
        };

        Some(ActiveWindow {
            app_name,
            window_title: UNKNOWN_LABEL.to_string(),
        })
    }
}
