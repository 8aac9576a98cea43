use egui::{Context, Event, LayerId, Modifiers, PointerButton, Pos2, Rect, TouchId, TouchPhase};

use super::{CanvasPoint, InputEvent, Key, PointerSource};

/// Handles converting raw egui input into canvas `InputEvent`s
#[derive(Debug, Default)]
pub struct InputHandler {
    canvas_rect: Option<Rect>,
    /// Part of the canvas not clipped away by the surrounding scroll area
    visible_rect: Option<Rect>,
    /// Layer the canvas is painted on; positions covered by other layers are ignored
    layer: Option<LayerId>,
    /// Whether the mouse was over the canvas at the last pointer event
    pointer_inside: bool,
    /// The touch that drives the current gesture; mouse input is ignored while set
    active_touch: Option<TouchId>,
    shift: bool,
    combo: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the screen rectangle the canvas is painted into, all of it visible
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.set_canvas_area(rect, rect, None);
    }

    /// Update the canvas rectangle, the clip it is shown through and its layer.
    /// Only positions inside the clip and on `layer` reach the canvas.
    pub fn set_canvas_area(&mut self, rect: Rect, clip: Rect, layer: Option<LayerId>) {
        self.canvas_rect = Some(rect);
        self.visible_rect = Some(rect.intersect(clip));
        self.layer = layer;
    }

    /// Process this frame's egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let (events, modifiers) = ctx.input(|input| (input.events.clone(), input.modifiers));
        let layer = self.layer;
        // Panels are not areas, so the background reports no layer
        self.translate_where(&events, modifiers, |pos| match ctx.layer_id_at(pos) {
            None => true,
            Some(top) => layer.map_or(true, |own| own == top),
        })
    }

    /// Translates raw events; `modifiers` is the state at the end of the frame
    pub fn translate(&mut self, events: &[Event], modifiers: Modifiers) -> Vec<InputEvent> {
        self.translate_where(events, modifiers, |_| true)
    }

    /// Like `translate`, but `reachable` decides whether a screen position
    /// shows the canvas rather than something painted above it
    pub fn translate_where(
        &mut self,
        events: &[Event],
        modifiers: Modifiers,
        reachable: impl Fn(Pos2) -> bool,
    ) -> Vec<InputEvent> {
        let mut out = Vec::new();

        for event in events {
            match event {
                Event::Key {
                    key,
                    pressed,
                    modifiers,
                    ..
                } => {
                    self.sync_modifiers(*modifiers, &mut out);
                    if let Some(key) = map_key(*key) {
                        out.push(if *pressed {
                            InputEvent::KeyDown(key)
                        } else {
                            InputEvent::KeyUp(key)
                        });
                    }
                }
                Event::PointerMoved(pos) if self.active_touch.is_none() => {
                    self.pointer_moved(*pos, &reachable, &mut out);
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    modifiers,
                } if self.active_touch.is_none() => {
                    self.sync_modifiers(*modifiers, &mut out);
                    if let Some(origin) = self.canvas_origin_containing(*pos, &reachable) {
                        out.push(if *pressed {
                            InputEvent::PointerDown {
                                location: CanvasPoint::from_mouse(*pos, origin),
                                source: PointerSource::Mouse,
                            }
                        } else {
                            InputEvent::PointerUp {
                                source: PointerSource::Mouse,
                            }
                        });
                    }
                }
                Event::PointerGone => {
                    if self.pointer_inside {
                        self.pointer_inside = false;
                        out.push(InputEvent::PointerLeave);
                    }
                }
                Event::Touch { id, phase, pos, .. } => {
                    self.touch(*id, *phase, *pos, &reachable, &mut out);
                }
                _ => {}
            }
        }

        self.sync_modifiers(modifiers, &mut out);
        out
    }

    fn pointer_moved(
        &mut self,
        pos: Pos2,
        reachable: &dyn Fn(Pos2) -> bool,
        out: &mut Vec<InputEvent>,
    ) {
        match self.canvas_origin_containing(pos, reachable) {
            Some(origin) => {
                self.pointer_inside = true;
                out.push(InputEvent::PointerMove {
                    location: CanvasPoint::from_mouse(pos, origin),
                    source: PointerSource::Mouse,
                });
            }
            None if self.pointer_inside => {
                self.pointer_inside = false;
                out.push(InputEvent::PointerLeave);
            }
            None => {}
        }
    }

    fn touch(
        &mut self,
        id: TouchId,
        phase: TouchPhase,
        pos: Pos2,
        reachable: &dyn Fn(Pos2) -> bool,
        out: &mut Vec<InputEvent>,
    ) {
        let Some(rect) = self.canvas_rect else {
            return;
        };
        let tracked = self.active_touch == Some(id);

        match phase {
            TouchPhase::Start if self.active_touch.is_none() => {
                if let Some(origin) = self.canvas_origin_containing(pos, reachable) {
                    self.active_touch = Some(id);
                    out.push(InputEvent::PointerDown {
                        location: CanvasPoint::from_touch(pos, origin),
                        source: PointerSource::Touch,
                    });
                }
            }
            TouchPhase::Move if tracked => {
                out.push(InputEvent::PointerMove {
                    location: CanvasPoint::from_touch(pos, rect.min),
                    source: PointerSource::Touch,
                });
            }
            TouchPhase::End if tracked => {
                self.active_touch = None;
                out.push(InputEvent::PointerUp {
                    source: PointerSource::Touch,
                });
            }
            TouchPhase::Cancel if tracked => {
                self.active_touch = None;
                out.push(InputEvent::TouchCancel);
            }
            _ => {}
        }
    }

    /// Canvas origin if `pos` lands on the visible, uncovered part of the canvas
    fn canvas_origin_containing(
        &self,
        pos: Pos2,
        reachable: &dyn Fn(Pos2) -> bool,
    ) -> Option<Pos2> {
        let rect = self.canvas_rect?;
        let visible = self.visible_rect.unwrap_or(rect);
        (visible.contains(pos) && reachable(pos)).then_some(rect.min)
    }

    fn sync_modifiers(&mut self, modifiers: Modifiers, out: &mut Vec<InputEvent>) {
        if modifiers.shift != self.shift {
            self.shift = modifiers.shift;
            out.push(modifier_event(Key::Shift, self.shift));
        }
        let combo = modifiers.ctrl || modifiers.command || modifiers.mac_cmd;
        if combo != self.combo {
            self.combo = combo;
            out.push(modifier_event(Key::Combo, self.combo));
        }
    }
}

fn modifier_event(key: Key, pressed: bool) -> InputEvent {
    if pressed {
        InputEvent::KeyDown(key)
    } else {
        InputEvent::KeyUp(key)
    }
}

fn map_key(key: egui::Key) -> Option<Key> {
    match key {
        egui::Key::Z => Some(Key::Z),
        egui::Key::Y => Some(Key::Y),
        egui::Key::Escape => Some(Key::Escape),
        _ => None,
    }
}
