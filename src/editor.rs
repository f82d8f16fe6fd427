// src/editor.rs - Editor facade: buffer, mode state machine, host glue

use crate::bridge::{self, CaretType, SelectionEvent};
use crate::buffer::{Buffer, BufferError};
use crate::command::Command;
use crate::config::VimshimConfig;
use crate::mode::{Mode, ModeHint};
use crate::sort::{CommandError, SortCommand};

/// One open document: the buffer, the active mode, and the injected
/// configuration. Commands and mode transitions run synchronously on the
/// caller's thread; the host serializes all edit entry points.
pub struct Editor {
    pub buffer: Buffer,
    pub mode: Mode,
    pub config: VimshimConfig,
    pub caret: CaretType,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(VimshimConfig::default())
    }
}

impl Editor {
    pub fn new(config: VimshimConfig) -> Self {
        Self {
            buffer: Buffer::new(),
            mode: Mode::Normal,
            config,
            caret: CaretType::Rectangular,
        }
    }

    /// Execute a resolved command against the current buffer.
    pub fn execute_command(&mut self, cmd: Command) -> Result<(), CommandError> {
        match cmd {
            Command::EnterInsert => self.change_mode_safely(Mode::Insert, &[]),
            Command::EnterNormal => self.change_mode_safely(Mode::Normal, &[]),
            Command::EnterVisual => self.change_mode_safely(Mode::Visual, &[]),
            Command::Sort(tokens) => {
                let command = SortCommand::from_tokens(&tokens)?;
                command.execute(&mut self.buffer, &self.config)?;
            }
        }
        Ok(())
    }

    /// Request a mode change. An unreachable target is refused with a log
    /// line and leaves editor state untouched; it is never an error.
    pub fn change_mode_safely(&mut self, target: Mode, hints: &[ModeHint]) {
        if !can_enter(self.mode, target) {
            log::debug!("mode change {:?} -> {:?} refused", self.mode, target);
            return;
        }
        log::trace!("mode change {:?} -> {:?} {:?}", self.mode, target, hints);
        self.mode = target;
    }

    /// Host entry point for selection-change notifications. Applied
    /// synchronously within the callback that observed the event.
    pub fn handle_selection_change(&mut self, event: SelectionEvent) {
        let response = bridge::respond(event, &self.config, self.mode);
        if let Some(caret) = response.caret {
            self.caret = caret;
        }
        if let Some(request) = response.transition {
            self.change_mode_safely(request.target, &request.hints);
        }
    }

    pub fn open_file(&mut self, path: &str) -> Result<(), BufferError> {
        self.buffer.load_from_file(path)
    }

    pub fn save_file(&mut self) -> Result<(), BufferError> {
        let path = self
            .buffer
            .file_path
            .clone()
            .ok_or_else(|| BufferError::Io(std::io::Error::other("no file path")))?;
        self.buffer.save_to_file(&path)
    }
}

/// Temporary visual only makes sense on top of an insert session; every
/// other target is reachable from anywhere.
fn can_enter(from: Mode, to: Mode) -> bool {
    match to {
        Mode::TempVisual => from == Mode::Insert || from == Mode::TempVisual,
        _ => true,
    }
}
