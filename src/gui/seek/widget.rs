use super::model::ArcSeek;
use super::view::{self, Thumb};
use crate::config::ArcConfig;
use crate::events::PointerEvent;
use crate::geometry::Point;
use crate::gui::theme::{self, SeekColors};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// relm4 wrapper that puts an [`ArcSeek`] on a `gtk::DrawingArea`.
pub struct ArcSeekWidget {
    state: Rc<RefCell<ArcSeek>>,
    drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum SeekMsg {
    Pointer(PointerEvent),
    Resize(i32, i32),
    SetProgress(u32),
    SetMax(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekOutput {
    ProgressChanged(f32),
}

#[relm4::component(pub)]
impl SimpleComponent for ArcSeekWidget {
    type Init = ArcConfig;
    type Input = SeekMsg;
    type Output = SeekOutput;

    view! {
        #[root]
        gtk::DrawingArea {
            set_hexpand: true,
            set_vexpand: true,
            set_content_width: 240,
            set_content_height: 240,
            add_css_class: theme::AREA_CSS_CLASS,

            connect_resize[sender] => move |_, width, height| {
                sender.input(SeekMsg::Resize(width, height));
            },

            add_controller = gtk::GestureDrag {
                connect_drag_begin[sender] => move |_, x, y| {
                    sender.input(SeekMsg::Pointer(PointerEvent::Down(Point::new(x, y))));
                },
                connect_drag_update[sender] => move |gesture, dx, dy| {
                    if let Some((x, y)) = gesture.start_point() {
                        sender.input(SeekMsg::Pointer(PointerEvent::Move(Point::new(x + dx, y + dy))));
                    }
                },
                // also emitted when the gesture is cancelled
                connect_drag_end[sender] => move |_, _, _| {
                    sender.input(SeekMsg::Pointer(PointerEvent::Up));
                },
            },
        }
    }

    fn init(
        config: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        theme::install_area_css(&root);
        let thumb = Thumb::load(&config);
        let continuous_redraw = config.continuous_redraw;

        let mut seek = ArcSeek::new(config, thumb.radius());
        let output = sender.output_sender().clone();
        seek.add_listener(move |progress| {
            if output.send(SeekOutput::ProgressChanged(progress)).is_err() {
                log::debug!("Progress listener has no receiver");
            }
        });

        let model = ArcSeekWidget {
            state: Rc::new(RefCell::new(seek)),
            drawing_area: root.clone(),
        };

        let widgets = view_output!();

        let state_draw = model.state.clone();
        model
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let state = state_draw.borrow();
                let colors = SeekColors::from_context(&drawing_area.style_context(), state.config());
                if let Err(e) = view::draw(cr, &state, &thumb, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        if continuous_redraw {
            model.drawing_area.add_tick_callback(|area, _| {
                area.queue_draw();
                glib::ControlFlow::Continue
            });
        }

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let redraw = match msg {
            SeekMsg::Pointer(event) => self.state.borrow_mut().handle_pointer(event).should_redraw,
            SeekMsg::Resize(width, height) => self.state.borrow_mut().resize(width, height),
            SeekMsg::SetProgress(progress) => {
                self.state.borrow_mut().set_progress(progress);
                true
            }
            SeekMsg::SetMax(max) => {
                self.state.borrow_mut().set_max(max);
                true
            }
        };

        if redraw {
            self.drawing_area.queue_draw();
        }
    }
}
