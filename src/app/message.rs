// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::lightbox::{Event, Key};
use crate::page::ElementId;
use crate::ui::page;
use iced::Size;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// The page scrollable moved.
    PageScrolled { offset_y: f32, height: f32 },
    WindowResized(Size),
    /// A gallery trigger element was clicked.
    GalleryItemPressed(ElementId),
    /// Input from the lightbox overlay.
    Lightbox(Event),
    /// A lightbox key was pressed anywhere in the window.
    KeyPressed(Key),
}

impl From<page::Message> for Message {
    fn from(message: page::Message) -> Self {
        match message {
            page::Message::Scrolled { offset_y, height } => {
                Message::PageScrolled { offset_y, height }
            }
            page::Message::TriggerPressed(id) => Message::GalleryItemPressed(id),
        }
    }
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// HTML page to display.
    pub page_path: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_FOLIO_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
