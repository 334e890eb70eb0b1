//! Request/response bridge between this process and the display process.
//!
//! Each message is a 4-byte little-endian length followed by that many bytes
//! of UTF-8 JSON. Focus-mode signals are pushed on the same stream.

use crate::commands::{
    clear_history, get_category_rules, get_focus_state, get_report, get_settings, set_category,
    set_focus_mode, update_settings, AppState, CategoryRuleResponse, FocusStateResponse,
    SettingsResponse,
};
use crate::constants::MAX_MESSAGE_SIZE;
use crate::db::safe_lock;
use crate::error::AppError;
use crate::focus::{AttentionSignal, AttentionSink};
use crate::report::Report;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IncomingMessage {
    GetReport,
    SetCategory { app_name: String, category: String },
    GetCategoryRules,
    SetFocusMode { enabled: bool },
    GetFocusState,
    ClearHistory,
    GetSettings,
    UpdateSettings { focus_duration_minutes: i32 },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutgoingMessage {
    Report { report: Report },
    Rules { rules: Vec<CategoryRuleResponse> },
    FocusState { state: FocusStateResponse },
    Settings { settings: SettingsResponse },
    Ok,
    Error { message: String },
    Attention { signal: AttentionSignal },
}

/// Output stream shared by responses and pushed signals.
pub type SharedWriter<W> = Arc<Mutex<W>>;

/// Write one framed message. The lock keeps frames from interleaving.
pub fn write_message<W: Write>(writer: &Mutex<W>, message: &OutgoingMessage) -> io::Result<()> {
    let json = serde_json::to_vec(message)?;
    let len = u32::try_from(json.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "message too large"))?;

    let mut writer = safe_lock(writer, "Bridge writer");
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&json)?;
    writer.flush()
}

/// Read one frame. `Ok(None)` means the peer closed the stream between frames;
/// EOF anywhere inside a frame is an error.
fn read_frame<R: Read>(reader: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut len_bytes = [0u8; 4];
    let (first, rest) = len_bytes.split_at_mut(1);
    match reader.read_exact(first) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }
    reader.read_exact(rest)?;

    let len = usize::try_from(u32::from_le_bytes(len_bytes)).unwrap_or(usize::MAX);
    if len > MAX_MESSAGE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Message too large: {len} bytes (max: {MAX_MESSAGE_SIZE} bytes)"),
        ));
    }

    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer)?;
    Ok(Some(buffer))
}

/// Forwards focus-mode signals to the display process.
pub struct BridgeSink<W> {
    writer: SharedWriter<W>,
}

impl<W> BridgeSink<W> {
    pub fn new(writer: SharedWriter<W>) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> AttentionSink for BridgeSink<W> {
    fn on_signal(&self, signal: AttentionSignal) {
        if let Err(e) = write_message(&self.writer, &OutgoingMessage::Attention { signal }) {
            warn!("Failed to push attention signal: {e}");
        }
    }
}

pub struct BridgeHost<W> {
    state: AppState,
    writer: SharedWriter<W>,
}

impl<W: Write> BridgeHost<W> {
    pub fn new(state: AppState, writer: SharedWriter<W>) -> Self {
        Self { state, writer }
    }

    /// Serve requests until the peer closes `reader`.
    pub fn serve<R: Read>(&self, mut reader: R) -> io::Result<()> {
        while let Some(frame) = read_frame(&mut reader)? {
            let response = match serde_json::from_slice::<IncomingMessage>(&frame) {
                Ok(message) => {
                    debug!("Bridge request: {message:?}");
                    self.handle_message(message)
                }
                Err(e) => {
                    warn!("Rejected malformed bridge message: {e}");
                    error_message(&AppError::from(e))
                }
            };
            write_message(&self.writer, &response)?;
        }
        debug!("Bridge peer closed the connection");
        Ok(())
    }

    fn handle_message(&self, message: IncomingMessage) -> OutgoingMessage {
        let state = &self.state;
        let result = match message {
            IncomingMessage::GetReport => get_report(state).map(|report| OutgoingMessage::Report { report }),
            IncomingMessage::SetCategory { app_name, category } => {
                set_category(state, &app_name, &category).map(|()| OutgoingMessage::Ok)
            }
            IncomingMessage::GetCategoryRules => {
                get_category_rules(state).map(|rules| OutgoingMessage::Rules { rules })
            }
            IncomingMessage::SetFocusMode { enabled } => {
                set_focus_mode(state, enabled);
                Ok(OutgoingMessage::Ok)
            }
            IncomingMessage::GetFocusState => Ok(OutgoingMessage::FocusState {
                state: get_focus_state(state),
            }),
            IncomingMessage::ClearHistory => clear_history(state).map(|()| OutgoingMessage::Ok),
            IncomingMessage::GetSettings => {
                get_settings(state).map(|settings| OutgoingMessage::Settings { settings })
            }
            IncomingMessage::UpdateSettings { focus_duration_minutes } => {
                update_settings(state, focus_duration_minutes)
                    .map(|settings| OutgoingMessage::Settings { settings })
            }
        };

        result.unwrap_or_else(|e| error_message(&e))
    }
}

fn error_message(error: &AppError) -> OutgoingMessage {
    OutgoingMessage::Error {
        message: error.to_string(),
    }
}
