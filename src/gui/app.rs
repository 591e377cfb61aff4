use crate::config::ArcConfig;
use crate::gui::seek::{ArcSeekWidget, SeekMsg, SeekOutput};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::RelmWidgetExt;
use relm4::prelude::*;

/// Demo window: the arc control kept in sync with a plain `gtk::Scale`.
pub struct AppModel {
    seek: Controller<ArcSeekWidget>,
    progress: f32,
    max: u32,
}

#[derive(Debug)]
pub enum AppMsg {
    ProgressChanged(f32),
    ScaleMoved(f64),
}

impl From<SeekOutput> for AppMsg {
    fn from(output: SeekOutput) -> Self {
        match output {
            SeekOutput::ProgressChanged(p) => AppMsg::ProgressChanged(p),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = ArcConfig;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Arc Seek"),
            set_default_size: (420, 540),

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_margin_all: 12,

                #[local_ref]
                seek_area -> gtk::DrawingArea {},

                gtk::Label {
                    #[watch]
                    set_label: &format!("Progress: {:.0} / {}", model.progress, model.max),
                },

                gtk::Scale {
                    set_range: (0.0, model.max as f64),
                    set_increments: (1.0, 10.0),
                    set_digits: 0,
                    set_draw_value: true,
                    #[watch]
                    #[block_signal(scale_handler)]
                    set_value: model.progress as f64,
                    connect_value_changed[sender] => move |scale| {
                        sender.input(AppMsg::ScaleMoved(scale.value()));
                    } @scale_handler,
                },
            }
        }
    }

    fn init(
        config: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let progress = config.progress as f32;
        let max = config.max;
        let seek = ArcSeekWidget::builder()
            .launch(config)
            .forward(sender.input_sender(), AppMsg::from);

        let model = AppModel {
            seek,
            progress,
            max,
        };

        let seek_area = model.seek.widget();
        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::ProgressChanged(p) => {
                self.progress = p;
            }
            AppMsg::ScaleMoved(value) => {
                let p = value.round().clamp(0.0, self.max as f64) as u32;
                self.progress = p as f32;
                self.seek.emit(SeekMsg::SetProgress(p));
            }
        }
    }
}
