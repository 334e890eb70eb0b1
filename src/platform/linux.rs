use super::{ActiveWindow, ActiveWindowProbe};
use crate::constants::UNKNOWN_LABEL;
use crate::error::AppError;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{Atom, AtomEnum, ConnectionExt, Window};
use x11rb::rust_connection::RustConnection;

/// Reads the focused window through EWMH properties on the X server.
pub struct LinuxProbe {
    conn: RustConnection,
    root: Window,
    net_active_window: Atom,
    net_wm_name: Option<Atom>,
}

impl LinuxProbe {
    pub fn new() -> Result<Self, AppError> {
        let (conn, screen_num) = x11rb::connect(None)
            .map_err(|e| AppError::Probe(format!("failed to connect to X server: {e}")))?;
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| AppError::Probe(format!("X screen {screen_num} not found")))?;

        let net_active_window = intern_atom(&conn, "_NET_ACTIVE_WINDOW")
            .ok_or_else(|| AppError::Probe("_NET_ACTIVE_WINDOW unsupported".into()))?;
        let net_wm_name = intern_atom(&conn, "_NET_WM_NAME");

        Ok(Self {
            conn,
            root,
            net_active_window,
            net_wm_name,
        })
    }

    fn get_window_property(&self, window: Window, atom: Atom) -> Option<Vec<u8>> {
        let reply = self
            .conn
            .get_property(false, window, atom, AtomEnum::ANY, 0, 1024)
            .ok()?
            .reply()
            .ok()?;

        if reply.value.is_empty() {
            return None;
        }

        Some(reply.value)
    }

    fn get_active_window_id(&self) -> Option<Window> {
        let reply = self
            .conn
            .get_property(false, self.root, self.net_active_window, AtomEnum::WINDOW, 0, 1)
            .ok()?
            .reply()
            .ok()?;

        // 0 means no window has focus (e.g. bare desktop)
        let id = reply.value32()?.next().filter(|&id| id != 0);
        id
    }

    fn window_title(&self, window: Window) -> String {
        self.net_wm_name
            .and_then(|atom| self.get_window_property(window, atom))
            .or_else(|| self.get_window_property(window, AtomEnum::WM_NAME.into()))
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
    }

    fn app_name(&self, window: Window) -> Option<String> {
        let bytes = self.get_window_property(window, AtomEnum::WM_CLASS.into())?;
        Some(parse_wm_class(&bytes))
    }
}

impl ActiveWindowProbe for LinuxProbe {
    fn poll(&self) -> Option<ActiveWindow> {
        let window_id = self.get_active_window_id()?;
        let app_name = self.app_name(window_id)?;
        let window_title = self.window_title(window_id);

        Some(ActiveWindow {
            app_name,
            window_title,
        })
    }
}

fn intern_atom(conn: &RustConnection, name: &str) -> Option<Atom> {
    conn.intern_atom(false, name.as_bytes())
        .ok()?
        .reply()
        .ok()
        .map(|r| r.atom)
}

/// WM_CLASS holds "instance\0class\0"; the class is the human-facing app name.
fn parse_wm_class(bytes: &[u8]) -> String {
    let value = String::from_utf8_lossy(bytes);
    let mut parts = value.split('\0').filter(|part| !part.is_empty());
    let instance = parts.next();
    parts
        .next()
        .or(instance)
        .unwrap_or(UNKNOWN_LABEL)
        .to_string()
}
