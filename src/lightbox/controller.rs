// SPDX-License-Identifier: MPL-2.0
//! Lightbox state machine.
//!
//! The controller is either `Closed` or `Open`. Incoming [`Event`]s are looked
//! up in a static route table keyed by (phase, event kind); pairs without a
//! route are ignored. Being `Open` means holding the page [`ScrollLease`], so
//! every path back to `Closed` has to return it.

use super::gallery::Gallery;
use super::overlay::Overlay;
use super::zoom::{ZoomLevel, DEFAULT_ZOOM_SENSITIVITY};
use crate::page::{Document, ElementId, ScrollLease, ScrollLock};
use tracing::{debug, trace};

/// Keys the lightbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// User input addressed to the lightbox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A gallery trigger was clicked; carries the gallery index.
    ItemClicked(usize),
    Next,
    Previous,
    Close,
    /// Click on the backdrop, outside the image and the note.
    BackgroundClicked,
    /// Click on the displayed image; contained, never closes.
    ImageClicked,
    NoteClicked,
    Key(Key),
    /// DOM-style wheel delta: positive values scroll down.
    Wheel { delta_y: f32 },
}

/// Discriminant of [`Event`] used as route key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ItemClicked,
    Next,
    Previous,
    Close,
    BackgroundClicked,
    ImageClicked,
    NoteClicked,
    Key,
    Wheel,
}

impl Event {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ItemClicked(_) => EventKind::ItemClicked,
            Event::Next => EventKind::Next,
            Event::Previous => EventKind::Previous,
            Event::Close => EventKind::Close,
            Event::BackgroundClicked => EventKind::BackgroundClicked,
            Event::ImageClicked => EventKind::ImageClicked,
            Event::NoteClicked => EventKind::NoteClicked,
            Event::Key(_) => EventKind::Key,
            Event::Wheel { .. } => EventKind::Wheel,
        }
    }
}

/// Whether an event changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Handled,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Closed,
    Open,
}

#[derive(Debug)]
enum Phase {
    Closed,
    Open(ScrollLease),
}

/// Mutable lightbox state, one instance per controller.
#[derive(Debug)]
pub struct LightboxState {
    phase: Phase,
    current_index: usize,
    zoom: ZoomLevel,
    note_expanded: bool,
}

impl Default for LightboxState {
    fn default() -> Self {
        Self {
            phase: Phase::Closed,
            current_index: 0,
            zoom: ZoomLevel::default(),
            note_expanded: false,
        }
    }
}

impl LightboxState {
    #[must_use]
    pub fn phase(&self) -> PhaseKind {
        match self.phase {
            Phase::Closed => PhaseKind::Closed,
            Phase::Open(_) => PhaseKind::Open,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase() == PhaseKind::Open
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    #[must_use]
    pub fn note_expanded(&self) -> bool {
        self.note_expanded
    }
}

/// Construction parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LightboxOptions {
    /// Alternative text of the overlay image.
    pub image_alt: String,
    pub zoom_sensitivity: f32,
}

impl Default for LightboxOptions {
    fn default() -> Self {
        Self {
            image_alt: "Lightbox Image".to_string(),
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
        }
    }
}

type Handler = fn(&mut LightboxController, &mut Document, Event) -> Status;

struct Route {
    phase: PhaseKind,
    kind: EventKind,
    handler: Handler,
}

/// Everything the lightbox reacts to. Anything missing here is ignored,
/// e.g. arrow keys while closed or image clicks, which are contained.
static ROUTES: &[Route] = &[
    Route {
        phase: PhaseKind::Closed,
        kind: EventKind::ItemClicked,
        handler: LightboxController::on_item_clicked,
    },
    Route {
        phase: PhaseKind::Open,
        kind: EventKind::Next,
        handler: LightboxController::on_next,
    },
    Route {
        phase: PhaseKind::Open,
        kind: EventKind::Previous,
        handler: LightboxController::on_previous,
    },
    Route {
        phase: PhaseKind::Open,
        kind: EventKind::Close,
        handler: LightboxController::on_close,
    },
    Route {
        phase: PhaseKind::Open,
        kind: EventKind::BackgroundClicked,
        handler: LightboxController::on_close,
    },
    Route {
        phase: PhaseKind::Open,
        kind: EventKind::NoteClicked,
        handler: LightboxController::on_note_clicked,
    },
    Route {
        phase: PhaseKind::Open,
        kind: EventKind::Key,
        handler: LightboxController::on_key,
    },
    Route {
        phase: PhaseKind::Open,
        kind: EventKind::Wheel,
        handler: LightboxController::on_wheel,
    },
];

fn route(phase: PhaseKind, kind: EventKind) -> Option<Handler> {
    ROUTES
        .iter()
        .find(|route| route.phase == phase && route.kind == kind)
        .map(|route| route.handler)
}

/// Owns the gallery, the overlay handles and the lightbox state.
#[derive(Debug)]
pub struct LightboxController {
    gallery: Gallery,
    overlay: Overlay,
    state: LightboxState,
    zoom_sensitivity: f32,
}

impl LightboxController {
    /// Mounts the overlay into `document` and takes ownership of `gallery`.
    ///
    /// The overlay is always mounted; with an empty gallery the controller
    /// stays detached and ignores every event.
    pub fn new(document: &mut Document, gallery: Gallery, options: LightboxOptions) -> Self {
        let overlay = Overlay::mount(document, &options.image_alt);
        if gallery.is_empty() {
            debug!("no gallery items, lightbox stays inert");
        } else {
            debug!(items = gallery.len(), "lightbox attached");
        }
        Self {
            gallery,
            overlay,
            state: LightboxState::default(),
            zoom_sensitivity: options.zoom_sensitivity,
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.gallery.is_empty()
    }

    #[must_use]
    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    #[must_use]
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Gallery index opened by clicking `element`, if it is a trigger.
    #[must_use]
    pub fn item_for_trigger(&self, element: ElementId) -> Option<usize> {
        if !self.is_attached() {
            return None;
        }
        self.gallery.position_of_trigger(element)
    }

    /// Routes `event` according to the current phase.
    pub fn handle(&mut self, document: &mut Document, event: Event) -> Status {
        if !self.is_attached() {
            trace!(?event, "lightbox detached, event ignored");
            return Status::Ignored;
        }
        match route(self.state.phase(), event.kind()) {
            Some(handler) => handler(self, document, event),
            None => {
                trace!(?event, phase = ?self.state.phase(), "no route");
                Status::Ignored
            }
        }
    }

    pub fn open(&mut self, document: &mut Document, index: usize) -> Status {
        self.handle(document, Event::ItemClicked(index))
    }

    pub fn next(&mut self, document: &mut Document) -> Status {
        self.handle(document, Event::Next)
    }

    pub fn previous(&mut self, document: &mut Document) -> Status {
        self.handle(document, Event::Previous)
    }

    pub fn close(&mut self, document: &mut Document) -> Status {
        self.handle(document, Event::Close)
    }

    fn on_item_clicked(&mut self, document: &mut Document, event: Event) -> Status {
        let Event::ItemClicked(index) = event else {
            return Status::Ignored;
        };
        if index >= self.gallery.len() {
            return Status::Ignored;
        }

        self.show(document, index);
        self.overlay.set_visible(document, true);
        if let Phase::Closed = self.state.phase {
            self.state.phase = Phase::Open(document.acquire());
        }
        debug!(index, "lightbox opened");
        Status::Handled
    }

    fn on_next(&mut self, document: &mut Document, _event: Event) -> Status {
        let index = self.gallery.next_index(self.state.current_index);
        self.show(document, index);
        Status::Handled
    }

    fn on_previous(&mut self, document: &mut Document, _event: Event) -> Status {
        let index = self.gallery.previous_index(self.state.current_index);
        self.show(document, index);
        Status::Handled
    }

    fn on_close(&mut self, document: &mut Document, _event: Event) -> Status {
        let Phase::Open(lease) = std::mem::replace(&mut self.state.phase, Phase::Closed) else {
            return Status::Ignored;
        };
        self.overlay.set_visible(document, false);
        self.overlay.set_note_expanded(document, false);
        self.state.note_expanded = false;
        document.release(lease);
        self.reset_zoom(document);
        debug!("lightbox closed");
        Status::Handled
    }

    fn on_note_clicked(&mut self, document: &mut Document, _event: Event) -> Status {
        self.state.note_expanded = self.overlay.toggle_note(document);
        Status::Handled
    }

    fn on_key(&mut self, document: &mut Document, event: Event) -> Status {
        match event {
            Event::Key(Key::Escape) => self.on_close(document, event),
            Event::Key(Key::ArrowRight) => self.on_next(document, event),
            Event::Key(Key::ArrowLeft) => self.on_previous(document, event),
            _ => Status::Ignored,
        }
    }

    fn on_wheel(&mut self, document: &mut Document, event: Event) -> Status {
        let Event::Wheel { delta_y } = event else {
            return Status::Ignored;
        };
        self.state.zoom = self.state.zoom.apply_wheel(delta_y, self.zoom_sensitivity);
        self.overlay.apply_zoom(document, self.state.zoom);
        Status::Handled
    }

    /// Displays entry `index` with a folded note and no zoom.
    fn show(&mut self, document: &mut Document, index: usize) {
        let Some(entry) = self.gallery.get(index) else {
            return;
        };
        self.state.current_index = index;
        self.overlay.render(document, entry);
        self.state.note_expanded = false;
        self.reset_zoom(document);
    }

    fn reset_zoom(&mut self, document: &mut Document) {
        self.state.zoom = ZoomLevel::default();
        self.overlay.apply_zoom(document, self.state.zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lightbox::gallery::GalleryEntry;

    fn setup(sources: &[(&str, &str)]) -> (Document, LightboxController) {
        let mut doc = Document::new();
        let entries = sources
            .iter()
            .map(|(source, caption)| {
                let trigger = doc.create_element("div");
                doc.append_child(doc.body(), trigger);
                GalleryEntry {
                    source: (*source).to_string(),
                    caption: (*caption).to_string(),
                    trigger,
                }
            })
            .collect();
        let controller =
            LightboxController::new(&mut doc, Gallery::from_entries(entries), LightboxOptions::default());
        (doc, controller)
    }

    fn displayed(doc: &Document, controller: &LightboxController) -> (String, String) {
        let overlay = controller.overlay();
        (
            overlay.image_source(doc).to_string(),
            overlay.caption(doc).to_string(),
        )
    }

    fn pair(source: &str, caption: &str) -> (String, String) {
        (source.to_string(), caption.to_string())
    }

    #[test]
    fn open_shows_entry_and_locks_scroll() {
        let (mut doc, mut lightbox) = setup(&[("a.jpg", "Cap A"), ("b.jpg", "Cap B")]);

        assert_eq!(lightbox.open(&mut doc, 1), Status::Handled);

        assert!(lightbox.state().is_open());
        assert_eq!(lightbox.state().current_index(), 1);
        assert_eq!(displayed(&doc, &lightbox), pair("b.jpg", "Cap B"));
        assert!(lightbox.overlay().is_visible(&doc));
        assert!(doc.is_scroll_locked());
    }

    #[test]
    fn next_wraps_around() {
        let (mut doc, mut lightbox) = setup(&[("a.jpg", "Cap A"), ("b.jpg", "Cap B")]);

        lightbox.open(&mut doc, 0);
        assert_eq!(displayed(&doc, &lightbox), pair("a.jpg", "Cap A"));
        lightbox.next(&mut doc);
        assert_eq!(displayed(&doc, &lightbox), pair("b.jpg", "Cap B"));
        lightbox.next(&mut doc);
        assert_eq!(displayed(&doc, &lightbox), pair("a.jpg", "Cap A"));
    }

    #[test]
    fn navigation_round_trips() {
        let (mut doc, mut lightbox) = setup(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);
        let len = lightbox.gallery().len();

        for start in 0..len {
            lightbox.close(&mut doc);
            lightbox.open(&mut doc, start);
            for _ in 0..len {
                lightbox.next(&mut doc);
            }
            assert_eq!(lightbox.state().current_index(), start);
            for _ in 0..len {
                lightbox.previous(&mut doc);
            }
            assert_eq!(lightbox.state().current_index(), start);
            lightbox.next(&mut doc);
            lightbox.previous(&mut doc);
            assert_eq!(lightbox.state().current_index(), start);
        }
    }

    #[test]
    fn previous_from_first_goes_to_last() {
        let (mut doc, mut lightbox) = setup(&[("a", "1"), ("b", "2"), ("c", "3")]);

        lightbox.open(&mut doc, 0);
        lightbox.previous(&mut doc);

        assert_eq!(lightbox.state().current_index(), 2);
    }

    #[test]
    fn close_paths_release_scroll_lock() {
        let closers = [
            Event::Close,
            Event::Key(Key::Escape),
            Event::BackgroundClicked,
        ];
        for closer in closers {
            let (mut doc, mut lightbox) = setup(&[("a", "1")]);
            lightbox.open(&mut doc, 0);
            lightbox.handle(&mut doc, Event::NoteClicked);

            assert_eq!(lightbox.handle(&mut doc, closer), Status::Handled);

            assert!(!lightbox.state().is_open(), "{closer:?} should close");
            assert!(!doc.is_scroll_locked(), "{closer:?} leaked the lock");
            assert!(!lightbox.overlay().is_visible(&doc));
            assert!(!lightbox.overlay().is_note_expanded(&doc));
            assert_eq!(lightbox.state().zoom(), ZoomLevel::default());
        }
    }

    #[test]
    fn note_click_toggles_without_closing() {
        let (mut doc, mut lightbox) = setup(&[("a", "1")]);
        lightbox.open(&mut doc, 0);

        lightbox.handle(&mut doc, Event::NoteClicked);
        assert!(lightbox.state().note_expanded());
        assert!(lightbox.overlay().is_note_expanded(&doc));
        assert!(lightbox.state().is_open());

        lightbox.handle(&mut doc, Event::NoteClicked);
        assert!(!lightbox.state().note_expanded());
        assert!(lightbox.state().is_open());
    }

    #[test]
    fn image_click_is_contained() {
        let (mut doc, mut lightbox) = setup(&[("a", "1")]);
        lightbox.open(&mut doc, 0);

        assert_eq!(lightbox.handle(&mut doc, Event::ImageClicked), Status::Ignored);
        assert!(lightbox.state().is_open());
    }

    #[test]
    fn navigation_folds_note_and_resets_zoom() {
        let (mut doc, mut lightbox) = setup(&[("a", "1"), ("b", "2")]);
        lightbox.open(&mut doc, 0);
        lightbox.handle(&mut doc, Event::NoteClicked);
        lightbox.handle(&mut doc, Event::Wheel { delta_y: -1000.0 });
        assert_eq!(lightbox.state().zoom().value(), 2.0);

        lightbox.handle(&mut doc, Event::Key(Key::ArrowRight));

        assert_eq!(lightbox.state().current_index(), 1);
        assert!(!lightbox.state().note_expanded());
        assert_eq!(lightbox.state().zoom(), ZoomLevel::default());
        assert_eq!(
            doc.style(lightbox.overlay().image, "transform"),
            Some("scale(1)")
        );
    }

    #[test]
    fn wheel_zoom_is_clamped_and_written_to_image() {
        let (mut doc, mut lightbox) = setup(&[("a", "1")]);
        lightbox.open(&mut doc, 0);

        lightbox.handle(&mut doc, Event::Wheel { delta_y: -1_000_000.0 });
        assert_eq!(lightbox.state().zoom().value(), 5.0);
        assert_eq!(
            doc.style(lightbox.overlay().image, "transform"),
            Some("scale(5)")
        );

        lightbox.handle(&mut doc, Event::Wheel { delta_y: 1_000_000.0 });
        assert_eq!(lightbox.state().zoom().value(), 1.0);
    }

    #[test]
    fn reopening_resets_zoom() {
        let (mut doc, mut lightbox) = setup(&[("a", "1")]);
        lightbox.open(&mut doc, 0);
        lightbox.handle(&mut doc, Event::Wheel { delta_y: -500.0 });
        lightbox.close(&mut doc);

        lightbox.open(&mut doc, 0);

        assert_eq!(lightbox.state().zoom(), ZoomLevel::default());
    }

    #[test]
    fn closed_lightbox_ignores_keys_wheel_and_controls() {
        let (mut doc, mut lightbox) = setup(&[("a", "1"), ("b", "2")]);

        for event in [
            Event::Key(Key::ArrowRight),
            Event::Key(Key::Escape),
            Event::Wheel { delta_y: -400.0 },
            Event::Next,
            Event::NoteClicked,
            Event::BackgroundClicked,
        ] {
            assert_eq!(lightbox.handle(&mut doc, event), Status::Ignored);
        }
        assert_eq!(lightbox.state().current_index(), 0);
        assert_eq!(lightbox.state().zoom(), ZoomLevel::default());
        assert!(!doc.is_scroll_locked());
    }

    #[test]
    fn out_of_range_item_is_ignored() {
        let (mut doc, mut lightbox) = setup(&[("a", "1")]);

        assert_eq!(lightbox.open(&mut doc, 3), Status::Ignored);
        assert!(!lightbox.state().is_open());
    }

    #[test]
    fn empty_gallery_never_opens() {
        let (mut doc, mut lightbox) = setup(&[]);

        assert!(!lightbox.is_attached());
        assert_eq!(lightbox.item_for_trigger(doc.body()), None);
        assert_eq!(lightbox.open(&mut doc, 0), Status::Ignored);
        assert!(!lightbox.state().is_open());
        assert!(!lightbox.overlay().is_visible(&doc));
        assert!(!doc.is_scroll_locked());
    }

    #[test]
    fn item_for_trigger_maps_page_elements() {
        let (doc, lightbox) = setup(&[("a", "1"), ("b", "2")]);
        let triggers: Vec<_> = lightbox.gallery().iter().map(|e| e.trigger).collect();

        assert_eq!(lightbox.item_for_trigger(triggers[1]), Some(1));
        assert_eq!(lightbox.item_for_trigger(doc.body()), None);
    }

    #[test]
    fn every_route_is_unique() {
        for (i, a) in ROUTES.iter().enumerate() {
            for b in &ROUTES[i + 1..] {
                assert!(
                    !(a.phase == b.phase && a.kind == b.kind),
                    "duplicate route {:?}/{:?}",
                    a.phase,
                    a.kind
                );
            }
        }
    }
}
