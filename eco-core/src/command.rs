//! Logical commands the mirror reacts to.
//!
//! How a command is produced (key binding, tray menu, test) is not the
//! core's concern; the input layer maps its events onto these.

use std::str::FromStr;

use crate::error::EcoError;

/// A user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Show the source rectangle so it can be moved/resized.
    SelectSource,
    /// Accept the source and start mirroring into the destination.
    SelectDestination,
    ZoomIn,
    ZoomOut,
    ToggleFpsDisplay,
    /// Terminate immediately.
    Exit,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::SelectSource,
        Command::SelectDestination,
        Command::ZoomIn,
        Command::ZoomOut,
        Command::ToggleFpsDisplay,
        Command::Exit,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Command::SelectSource => "select-source",
            Command::SelectDestination => "select-destination",
            Command::ZoomIn => "zoom-in",
            Command::ZoomOut => "zoom-out",
            Command::ToggleFpsDisplay => "toggle-fps-display",
            Command::Exit => "exit",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = EcoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| EcoError::Other(format!("unknown command: {s}")))
    }
}
