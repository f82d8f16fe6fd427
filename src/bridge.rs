// src/bridge.rs - Maps host selection-change events onto mode transitions

use crate::config::VimshimConfig;
use crate::mode::{Mode, ModeHint};

/// Caret shapes the host's cursor service can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretType {
    Vertical,
    Rectangular,
    LeftShiftedRectangular,
}

/// A host selection-change notification, reduced to what the bridge needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionEvent {
    /// Selection length in chars; 0 means the selection collapsed.
    pub length: usize,
    /// The anchor sits after the caret (selection made backwards).
    pub reversed: bool,
    /// The change came from a pointer drag, not a programmatic update.
    pub from_pointer_drag: bool,
}

/// A transition request, to be applied through `change_mode_safely`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeRequest {
    pub target: Mode,
    pub hints: Vec<ModeHint>,
}

/// What the host should do in response to a selection change. The caret
/// shape is cosmetic and delegated to the host's cursor service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeResponse {
    pub caret: Option<CaretType>,
    pub transition: Option<ModeRequest>,
}

/// Decide how a selection change maps onto the mode state machine.
///
/// No-ops unless emulation is globally enabled, the change originated from a
/// pointer drag, and mouse-driven visual selection is switched on.
pub fn respond(event: SelectionEvent, config: &VimshimConfig, current: Mode) -> BridgeResponse {
    if !config.enabled || !event.from_pointer_drag || !config.visual_mouse {
        return BridgeResponse::default();
    }

    let mut response = BridgeResponse::default();
    if event.length == 0 {
        // Selection cleared or caret moved with the mouse
        if current.is_temporary() {
            response.transition = Some(ModeRequest {
                target: Mode::Insert,
                hints: Vec::new(),
            });
        } else if current.is_visual_family() {
            response.transition = Some(ModeRequest {
                target: Mode::Normal,
                hints: Vec::new(),
            });
        }
    } else {
        if config.selection_inclusive() {
            response.caret = Some(if event.reversed {
                CaretType::Rectangular
            } else {
                CaretType::LeftShiftedRectangular
            });
        }
        match current {
            Mode::Normal => {
                response.transition = Some(ModeRequest {
                    target: Mode::Visual,
                    hints: vec![ModeHint::KeepSelection],
                });
            }
            Mode::Insert => {
                response.transition = Some(ModeRequest {
                    target: Mode::TempVisual,
                    hints: vec![ModeHint::KeepSelection, ModeHint::DontMoveCursor],
                });
            }
            _ => {}
        }
    }
    response
}
