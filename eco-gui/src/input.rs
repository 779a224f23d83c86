//! Keyboard → command translation.
//!
//! Translates [`WindowEvent`]s from the Win32 message loop into
//! mirror [`Command`]s. Bindings require an exact modifier match, so
//! Ctrl+S does not select the source.

use bitflags::bitflags;

use eco_core::Command;

use crate::window::WindowEvent;

bitflags! {
    /// Modifier keys held when a key event was generated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CTRL = 1 << 0;
        const SHIFT = 1 << 1;
        const ALT = 1 << 2;
    }
}

/// Win32 virtual-key codes used by the bindings.
pub mod vk {
    pub const ESCAPE: u16 = 0x1B;
    pub const D: u16 = 0x44;
    pub const F: u16 = 0x46;
    pub const S: u16 = 0x53;
    /// Numpad `+`.
    pub const ADD: u16 = 0x6B;
    /// Numpad `-`.
    pub const SUBTRACT: u16 = 0x6D;
    /// The `=`/`+` key on the main block.
    pub const OEM_PLUS: u16 = 0xBB;
    /// The `-`/`_` key on the main block.
    pub const OEM_MINUS: u16 = 0xBD;
}

/// Map a pressed key to a command.
pub fn translate_key(virtual_key: u16, modifiers: Modifiers) -> Option<Command> {
    let plain = modifiers.is_empty();
    let ctrl = modifiers == Modifiers::CTRL;

    match virtual_key {
        vk::S if plain => Some(Command::SelectSource),
        vk::D if plain => Some(Command::SelectDestination),
        vk::F if plain => Some(Command::ToggleFpsDisplay),
        vk::ESCAPE if plain => Some(Command::Exit),
        vk::OEM_PLUS | vk::ADD if ctrl => Some(Command::ZoomIn),
        vk::OEM_MINUS | vk::SUBTRACT if ctrl => Some(Command::ZoomOut),
        _ => None,
    }
}

/// Convert a window event to a command (if applicable).
///
/// Closing the window exits, like Escape. Key releases, paints and
/// geometry changes map to nothing.
pub fn translate_event(event: &WindowEvent) -> Option<Command> {
    match event {
        WindowEvent::Close => Some(Command::Exit),
        WindowEvent::Key {
            virtual_key,
            modifiers,
            pressed: true,
        } => translate_key(*virtual_key, *modifiers),
        WindowEvent::Key { pressed: false, .. }
        | WindowEvent::Paint
        | WindowEvent::Resize(..)
        | WindowEvent::Moved(..) => None,
    }
}

// ── Tests ────────────────────────────────────────────────────────
