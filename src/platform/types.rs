#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveWindow {
    pub app_name: String,
    pub window_title: String,
}

/// Reports which application and window currently have focus.
///
/// `None` means nothing could be determined (lock screen, bare desktop,
/// transient API failure). It is an expected outcome, not an error.
pub trait ActiveWindowProbe: Send {
    fn poll(&self) -> Option<ActiveWindow>;
}
