// SPDX-License-Identifier: MPL-2.0
//! `iced_folio` displays a static HTML page in a native Iced window, revealing
//! tagged sections as they scroll into view and opening gallery images in a
//! lightbox with navigation, a fold-out caption note and wheel zoom.
//!
//! The page is parsed into a small [`page::Document`] model. The
//! [`reveal`] and [`lightbox`] controllers mutate that model (classes, inline
//! styles, attributes) and the [`ui`] views render whatever it says.

#![doc(html_root_url = "https://docs.rs/iced_folio/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod lightbox;
pub mod page;
pub mod reveal;
pub mod ui;
