//! Display commands sent to the UI
//!
//! The core never renders anything itself. It pushes [`DisplayCommand`]s
//! into a [`DisplaySurface`], which is either collected and shipped to the
//! browser or printed to a terminal.

use serde::Serialize;

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One instruction for the rendering side
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayCommand {
    /// A line of status text
    Status { level: StatusLevel, text: String },
    /// Re-center the map and move the marker
    MapView { center: Coordinate, marker: Coordinate },
    /// Show an image by URL
    Image { url: String, caption: String },
}

/// Receiver of display commands
pub trait DisplaySurface: Send {
    fn show(&mut self, command: DisplayCommand);
}

impl DisplaySurface for Vec<DisplayCommand> {
    fn show(&mut self, command: DisplayCommand) {
        self.push(command);
    }
}

/// Prints commands as plain lines on stdout
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl DisplaySurface for TerminalDisplay {
    fn show(&mut self, command: DisplayCommand) {
        match command {
            DisplayCommand::Status { level, text } => match level {
                StatusLevel::Info => println!("{}", text),
                StatusLevel::Success => println!("[ok] {}", text),
                StatusLevel::Warning => println!("[warning] {}", text),
                StatusLevel::Error => println!("[error] {}", text),
            },
            DisplayCommand::MapView { marker, .. } => println!("Location: {}", marker),
            DisplayCommand::Image { url, caption } => println!("{}: {}", caption, url),
        }
    }
}

/// Pushes one status line
pub fn status(display: &mut dyn DisplaySurface, level: StatusLevel, text: impl Into<String>) {
    display.show(DisplayCommand::Status { level, text: text.into() });
}
