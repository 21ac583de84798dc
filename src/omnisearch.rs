//! The search host: global chords, the overlay input and the open flag.
//!
//! Shortcut actions run synchronously inside the dispatcher and cannot borrow
//! the host, so they post [`HostRequest`]s on a channel that the host drains
//! right after dispatch.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use tokio::sync::mpsc;

use crate::config::ShortcutsConfig;
use crate::overlay::{self, OverlayList, OverlayView};
use crate::search::SearchController;
use crate::shortcuts::{Chord, FocusTarget, Propagation, Shortcut, ShortcutDispatcher};
use crate::trigger::Trigger;

/// Work requested by a global chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    Toggle,
    /// Open with the query pre-filled with `/`
    OpenCommandCenter,
}

pub struct OmniSearch {
    controller: SearchController,
    dispatcher: ShortcutDispatcher,
    list: OverlayList,
    trigger: Trigger,
    extra_shortcuts: Vec<Shortcut>,
    open_chord: Chord,
    command_center_chord: Chord,
    request_tx: mpsc::UnboundedSender<HostRequest>,
    request_rx: mpsc::UnboundedReceiver<HostRequest>,
}

impl OmniSearch {
    /// Host the controller with the chords from the config
    pub fn new(controller: SearchController, shortcuts: &ShortcutsConfig) -> Result<Self> {
        let open_chord = shortcuts.open_chord()?;
        let command_center_chord = shortcuts.command_center_chord()?;
        let (request_tx, request_rx) = mpsc::unbounded_channel();

        let mut host = Self {
            controller,
            dispatcher: ShortcutDispatcher::new(),
            list: OverlayList::new(),
            trigger: Trigger::default(),
            extra_shortcuts: Vec::new(),
            open_chord,
            command_center_chord,
            request_tx,
            request_rx,
        };
        host.rebind();
        Ok(host)
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Add host chords that fire alongside the built-in ones
    pub fn bind_shortcuts(&mut self, shortcuts: Vec<Shortcut>) {
        self.extra_shortcuts = shortcuts;
        self.rebind();
    }

    fn rebind(&mut self) {
        let mut shortcuts = vec![self.request_shortcut(self.open_chord.clone(), HostRequest::Toggle)];
        for chord in command_center_variants(&self.command_center_chord) {
            shortcuts.push(self.request_shortcut(chord, HostRequest::OpenCommandCenter));
        }
        shortcuts.extend(self.extra_shortcuts.iter().cloned());
        self.dispatcher.bind_shortcuts(shortcuts);
    }

    fn request_shortcut(&self, chord: Chord, request: HostRequest) -> Shortcut {
        let tx = self.request_tx.clone();
        Shortcut {
            chord,
            action: std::sync::Arc::new(move || {
                let _ = tx.send(request);
            }),
        }
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SearchController {
        &mut self.controller
    }

    pub fn dispatcher(&self) -> &ShortcutDispatcher {
        &self.dispatcher
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn list(&self) -> &OverlayList {
        &self.list
    }

    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    pub fn view(&self) -> OverlayView {
        OverlayView::build(&self.controller)
    }

    pub fn open(&mut self) {
        self.controller.open();
        self.refresh_highlight(true);
    }

    pub fn close(&mut self) {
        self.controller.close();
        self.list.reset();
    }

    /// Trigger activation: flip the overlay
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn open_command_center(&mut self) {
        self.controller.open();
        self.controller.set_query("/");
        self.refresh_highlight(true);
    }

    /// Apply queued timer and fetch completions; call from the render loop
    pub fn poll(&mut self) -> usize {
        let applied = self.controller.poll_events();
        if applied > 0 {
            self.refresh_highlight(false);
        }
        applied
    }

    /// Wait for the next controller event and apply it
    pub async fn process_next(&mut self) {
        self.controller.process_next().await;
        self.refresh_highlight(false);
    }

    /// Route one key event: global chords first, then the overlay input.
    ///
    /// Returns true if the event was consumed.
    pub fn handle_key(&mut self, event: &KeyEvent, focus: FocusTarget) -> bool {
        if event.kind != KeyEventKind::Press {
            return false;
        }

        // The overlay input holds focus while open
        let focus = if self.is_open() { FocusTarget::TextInput } else { focus };
        if self.dispatcher.dispatch(event, focus) == Propagation::Stopped {
            self.apply_requests();
            return true;
        }

        if !self.is_open() {
            return false;
        }
        self.handle_overlay_key(event)
    }

    fn apply_requests(&mut self) {
        while let Ok(request) = self.request_rx.try_recv() {
            debug!("OmniSearch request: {:?}", request);
            match request {
                HostRequest::Toggle => self.toggle(),
                HostRequest::OpenCommandCenter => self.open_command_center(),
            }
        }
    }

    fn handle_overlay_key(&mut self, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::Esc => {
                self.close();
            }
            KeyCode::Enter => {
                let view = self.view();
                if let Some(row) = self.list.highlighted_row(&view) {
                    let target = row.target.clone();
                    overlay::activate(&mut self.controller, &target);
                    self.list.reset();
                }
            }
            KeyCode::Tab => {
                if self.controller.complete() {
                    self.refresh_highlight(true);
                }
            }
            KeyCode::Down => {
                let view = self.view();
                self.list.move_down(&view);
                self.list.sync_active_value(&view, &mut self.controller);
            }
            KeyCode::Up => {
                let view = self.view();
                self.list.move_up(&view);
                self.list.sync_active_value(&view, &mut self.controller);
            }
            KeyCode::Right | KeyCode::Left => {
                let view = self.view();
                if view.chips_enabled {
                    let filter = if event.code == KeyCode::Right {
                        overlay::next_chip(&view)
                    } else {
                        overlay::previous_chip(&view)
                    };
                    if let Some(filter) = filter {
                        overlay::select_chip(&mut self.controller, filter);
                        self.refresh_highlight(true);
                    }
                }
            }
            KeyCode::Backspace => {
                let mut query = self.controller.query().to_string();
                if query.pop().is_some() {
                    self.controller.set_query(query);
                    self.refresh_highlight(true);
                }
            }
            KeyCode::Char(c) if !event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                let mut query = self.controller.query().to_string();
                query.push(c);
                self.controller.set_query(query);
                self.refresh_highlight(true);
            }
            _ => return false,
        }
        true
    }

    fn refresh_highlight(&mut self, reset: bool) {
        let view = self.view();
        if reset {
            self.list.reset();
        } else {
            self.list.clamp(&view);
        }
        self.list.sync_active_value(&view, &mut self.controller);
    }
}

/// The command-center chord also answers to its ctrl/meta twin
fn command_center_variants(chord: &Chord) -> Vec<Chord> {
    let mut variants = vec![chord.clone()];
    let modifiers = chord.modifiers;
    if modifiers.ctrl != modifiers.meta {
        let mut twin = chord.clone();
        twin.modifiers.ctrl = modifiers.meta;
        twin.modifiers.meta = modifiers.ctrl;
        variants.push(twin);
    }
    variants
}
