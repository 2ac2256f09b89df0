// SPDX-License-Identifier: MPL-2.0
//! Iced views for the page and the lightbox overlay, plus the shared design
//! tokens, styles and widgets they are built from.

pub mod design_tokens;
pub mod lightbox;
pub mod page;
pub mod styles;
pub mod widgets;
