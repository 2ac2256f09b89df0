// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native keyboard and window events are routed to the top-level update.
//! Only the keys the lightbox reacts to are forwarded; whether they do
//! anything is up to the lightbox phase.

use super::Message;
use crate::lightbox::Key;
use iced::keyboard::{self, key::Named};
use iced::{event, window, Subscription};

/// Keyboard and resize events for the whole window.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| match event {
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
            lightbox_key(&key).map(Message::KeyPressed)
        }
        event::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        _ => None,
    })
}

/// Maps a keyboard key to the lightbox key it stands for.
#[must_use]
pub fn lightbox_key(key: &keyboard::Key) -> Option<Key> {
    match key {
        keyboard::Key::Named(Named::Escape) => Some(Key::Escape),
        keyboard::Key::Named(Named::ArrowLeft) => Some(Key::ArrowLeft),
        keyboard::Key::Named(Named::ArrowRight) => Some(Key::ArrowRight),
        _ => None,
    }
}
