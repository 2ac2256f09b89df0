// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the page and the lightbox.
//!
//! The `App` struct owns the hosted [`Document`] together with the reveal and
//! lightbox controllers that mutate it, and translates window input into
//! controller calls. Startup runs in a fixed order: load settings, resolve the
//! locale, load and parse the page, build the gallery, mount the overlay, lay
//! out the page and run a first reveal pass.

mod message;
pub mod paths;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::lightbox::{Event, Gallery, LightboxController, LightboxOptions};
use crate::page::layout::LayoutMetrics;
use crate::page::{layout, load_page, Document};
use crate::reveal::{RevealController, RevealMargin, Viewport};
use crate::ui;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const WINDOW_DEFAULT_HEIGHT: u32 = 768;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const MIN_WINDOW_HEIGHT: u32 = 360;
pub const MIN_WINDOW_WIDTH: u32 = 480;

/// Where the displayed page came from.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    /// No page was requested on the command line.
    Empty,
    Loaded(PathBuf),
    /// The page could not be read; the lightbox stays inert.
    Failed(Error),
}

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    document: Document,
    page_state: PageState,
    metrics: LayoutMetrics,
    page_height: f32,
    viewport: Viewport,
    reveal: RevealController,
    lightbox: LightboxController,
    /// Settings file that was rejected at startup, shown as a banner.
    config_error: Option<Error>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("page_state", &self.page_state)
            .field("elements", &self.document.len())
            .field("lightbox_open", &self.lightbox.state().is_open())
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    paths::init_cli_overrides(flags.config_dir.clone());

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::with_document(
            Document::new(),
            PageState::Empty,
            &Config::default(),
            I18n::default(),
        )
    }
}

impl App {
    /// Loads settings and the requested page, then prepares the controllers.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);

        let (document, page_state) = match flags.page_path.map(PathBuf::from) {
            None => (Document::new(), PageState::Empty),
            Some(path) => match load_page(&path) {
                Ok(document) => {
                    info!(path = %path.display(), elements = document.len(), "page loaded");
                    (document, PageState::Loaded(path))
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "page could not be loaded");
                    (Document::new(), PageState::Failed(err))
                }
            },
        };

        (
            Self::with_document(document, page_state, &config, i18n)
                .with_config_warning(config_warning),
            Task::none(),
        )
    }

    /// Prepares an already parsed page for display.
    pub fn with_document(
        mut document: Document,
        page_state: PageState,
        config: &Config,
        i18n: I18n,
    ) -> Self {
        let gallery = Gallery::from_document(&document, &i18n.tr("caption-placeholder"));
        let lightbox = LightboxController::new(
            &mut document,
            gallery,
            LightboxOptions {
                image_alt: i18n.tr("lightbox-image-alt"),
                zoom_sensitivity: config.zoom_sensitivity(),
            },
        );
        let reveal = RevealController::new(&document, RevealMargin::new(config.reveal_margin()));

        let metrics = LayoutMetrics {
            width: ui::page::content_width(WINDOW_DEFAULT_WIDTH as f32),
            gallery_columns: config.gallery_columns(),
            ..LayoutMetrics::default()
        };
        let page_height = layout(&mut document, &metrics);
        let viewport = Viewport {
            scroll_top: 0.0,
            height: WINDOW_DEFAULT_HEIGHT as f32,
        };
        reveal.check_reveal(&mut document, viewport);

        info!(
            gallery = lightbox.gallery().len(),
            reveal_targets = reveal.targets().len(),
            page_height,
            "page ready"
        );

        Self {
            i18n,
            document,
            page_state,
            metrics,
            page_height,
            viewport,
            reveal,
            lightbox,
            config_error: None,
        }
    }

    /// Records the warning returned by [`config::load`] so it is shown to the user.
    #[must_use]
    pub fn with_config_warning(mut self, warning: Option<String>) -> Self {
        self.config_error = warning.map(Error::Config);
        self
    }

    /// Localized banner text for a rejected settings file.
    #[must_use]
    pub fn config_notice(&self) -> Option<String> {
        self.config_error
            .as_ref()
            .map(|err| self.i18n.tr(err.i18n_key()))
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn page_state(&self) -> &PageState {
        &self.page_state
    }

    #[must_use]
    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    #[must_use]
    pub fn lightbox(&self) -> &LightboxController {
        &self.lightbox
    }

    pub fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.document.title() {
            Some(title) if !title.is_empty() => format!("{title} - {app_name}"),
            _ => app_name,
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Light
    }

    pub fn subscription(&self) -> Subscription<Message> {
        subscription::create_event_subscription()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PageScrolled { offset_y, height } => {
                self.viewport = Viewport {
                    scroll_top: offset_y,
                    height,
                };
                self.reveal.check_reveal(&mut self.document, self.viewport);
            }
            Message::WindowResized(size) => {
                self.viewport.height = size.height;
                self.metrics.width = ui::page::content_width(size.width);
                self.page_height = layout(&mut self.document, &self.metrics);
                debug!(width = size.width, page_height = self.page_height, "page re-laid out");
            }
            Message::GalleryItemPressed(element) => {
                if let Some(index) = self.lightbox.item_for_trigger(element) {
                    self.lightbox
                        .handle(&mut self.document, Event::ItemClicked(index));
                }
            }
            Message::Lightbox(event) => {
                self.lightbox.handle(&mut self.document, event);
            }
            Message::KeyPressed(key) => {
                self.lightbox.handle(&mut self.document, Event::Key(key));
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            page_state: &self.page_state,
            document: &self.document,
            metrics: &self.metrics,
            reveal: &self.reveal,
            lightbox: &self.lightbox,
            config_notice: self.config_notice(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lightbox::Key;
    use crate::page::{parse_html, ScrollLock};
    use crate::reveal::ACTIVE_CLASS;

    fn page() -> String {
        let long_text = "Lorem ipsum dolor sit amet. ".repeat(300);
        format!(
            r#"<html><head><title>Summer</title></head><body>
              <h1>Summer notebook</h1>
              <section class="reveal" id="intro"><p>First lines.</p></section>
              <div class="gallery">
                <div class="scatter-item"><div class="frame"><img src="a.jpg" data-caption="Cap A"></div></div>
                <div class="scatter-item"><div class="frame"><img src="b.jpg" data-caption="Cap B"></div></div>
              </div>
              <p>{long_text}</p>
              <section class="reveal" id="outro"><p>Last lines.</p></section>
            </body></html>"#
        )
    }

    fn app() -> App {
        App::with_document(
            parse_html(&page(), None),
            PageState::Loaded(PathBuf::from("page.html")),
            &Config::default(),
            I18n::new(Some("en-US".to_string()), &Config::default()),
        )
    }

    fn reveal_target(app: &App, id: &str) -> crate::page::ElementId {
        let document = app.document();
        app.reveal()
            .targets()
            .iter()
            .copied()
            .find(|&target| document.attribute(target, "id") == Some(id))
            .expect("reveal target exists")
    }

    fn first_trigger(app: &App) -> crate::page::ElementId {
        app.lightbox().gallery().get(0).expect("gallery entry").trigger
    }

    #[test]
    fn startup_reveals_sections_in_the_first_viewport() {
        let app = app();
        let intro = reveal_target(&app, "intro");
        let outro = reveal_target(&app, "outro");

        assert!(app.document().has_class(intro, ACTIVE_CLASS));
        assert!(!app.document().has_class(outro, ACTIVE_CLASS));
    }

    #[test]
    fn scrolling_far_enough_reveals_later_sections() {
        let mut app = app();
        let outro = reveal_target(&app, "outro");
        let outro_top = app.document().rect(outro).top;

        let _ = app.update(Message::PageScrolled {
            offset_y: outro_top,
            height: 400.0,
        });

        assert!(app.document().has_class(outro, ACTIVE_CLASS));
        assert_eq!(app.viewport().scroll_top, outro_top);
    }

    #[test]
    fn scrolling_back_up_keeps_sections_revealed() {
        let mut app = app();
        let outro = reveal_target(&app, "outro");
        let outro_top = app.document().rect(outro).top;

        let _ = app.update(Message::PageScrolled {
            offset_y: outro_top,
            height: 400.0,
        });
        let _ = app.update(Message::PageScrolled {
            offset_y: 0.0,
            height: 400.0,
        });

        assert!(app.document().has_class(outro, ACTIVE_CLASS));
    }

    #[test]
    fn gallery_press_opens_lightbox_and_locks_page() {
        let mut app = app();
        let trigger = first_trigger(&app);

        let _ = app.update(Message::GalleryItemPressed(trigger));

        let lightbox = app.lightbox();
        assert!(lightbox.state().is_open());
        assert_eq!(lightbox.overlay().image_source(app.document()), "a.jpg");
        assert_eq!(lightbox.overlay().caption(app.document()), "Cap A");
        assert!(app.document().is_scroll_locked());
    }

    #[test]
    fn pressing_a_non_trigger_does_nothing() {
        let mut app = app();
        let body = app.document().body();

        let _ = app.update(Message::GalleryItemPressed(body));

        assert!(!app.lightbox().state().is_open());
    }

    #[test]
    fn arrow_keys_navigate_and_escape_closes() {
        let mut app = app();
        let trigger = first_trigger(&app);
        let _ = app.update(Message::GalleryItemPressed(trigger));

        let _ = app.update(Message::KeyPressed(Key::ArrowRight));
        assert_eq!(app.lightbox().state().current_index(), 1);
        let _ = app.update(Message::KeyPressed(Key::ArrowRight));
        assert_eq!(app.lightbox().state().current_index(), 0);
        let _ = app.update(Message::KeyPressed(Key::ArrowLeft));
        assert_eq!(app.lightbox().state().current_index(), 1);

        let _ = app.update(Message::KeyPressed(Key::Escape));
        assert!(!app.lightbox().state().is_open());
        assert!(!app.document().is_scroll_locked());
    }

    #[test]
    fn keys_are_ignored_while_closed() {
        let mut app = app();

        let _ = app.update(Message::KeyPressed(Key::ArrowRight));

        assert!(!app.lightbox().state().is_open());
        assert_eq!(app.lightbox().state().current_index(), 0);
    }

    #[test]
    fn overlay_messages_drive_the_lightbox() {
        let mut app = app();
        let trigger = first_trigger(&app);
        let _ = app.update(Message::GalleryItemPressed(trigger));

        let _ = app.update(Message::Lightbox(Event::Wheel { delta_y: -200.0 }));
        assert!(app.lightbox().state().zoom().value() > 1.0);

        let _ = app.update(Message::Lightbox(Event::NoteClicked));
        assert!(app.lightbox().state().note_expanded());

        let _ = app.update(Message::Lightbox(Event::ImageClicked));
        assert!(app.lightbox().state().is_open());

        let _ = app.update(Message::Lightbox(Event::BackgroundClicked));
        assert!(!app.lightbox().state().is_open());
        assert!(!app.lightbox().state().note_expanded());
    }

    #[test]
    fn resize_relays_out_the_page() {
        let mut app = app();
        let before = app.page_height();

        let _ = app.update(Message::WindowResized(iced::Size::new(500.0, 600.0)));

        assert!(app.page_height() > before);
        assert_eq!(app.viewport().height, 600.0);
    }

    #[test]
    fn overlay_is_excluded_from_page_height() {
        let app = app();
        let overlay = app.lightbox().overlay();

        assert_eq!(app.document().rect(overlay.root).height, 0.0);
    }

    #[test]
    fn title_includes_page_title() {
        assert_eq!(app().title(), "Summer - IcedFolio");
        assert_eq!(App::default().title(), "IcedFolio");
    }

    #[test]
    fn failed_page_keeps_lightbox_inert() {
        let mut app = App::with_document(
            Document::new(),
            PageState::Failed(Error::Io("boom".into())),
            &Config::default(),
            I18n::default(),
        );
        let body = app.document().body();

        let _ = app.update(Message::GalleryItemPressed(body));
        let _ = app.update(Message::Lightbox(Event::ItemClicked(0)));

        assert!(!app.lightbox().is_attached());
        assert!(!app.lightbox().state().is_open());
        assert!(matches!(app.page_state(), PageState::Failed(_)));
    }

    #[test]
    fn configured_margin_is_used() {
        let config: Config = toml::from_str("[reveal]\nmargin = 250.0\n").expect("valid toml");
        let app = App::with_document(
            parse_html(&page(), None),
            PageState::Empty,
            &config,
            I18n::default(),
        );

        assert_eq!(app.reveal().margin().value(), 250.0);
    }

    #[test]
    fn rejected_settings_show_a_localized_banner() {
        let app = app().with_config_warning(Some("expected `=`".to_string()));

        assert_eq!(
            app.config_notice().as_deref(),
            Some("The settings file is invalid; defaults are in use.")
        );
    }

    #[test]
    fn valid_settings_show_no_banner() {
        let app = app().with_config_warning(None);

        assert_eq!(app.config_notice(), None);
    }
}
