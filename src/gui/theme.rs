use crate::config::ArcConfig;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use std::sync::Once;

pub fn accent_fallback() -> Srgba<f64> {
    Srgba::new(0.21, 0.52, 0.89, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekColors {
    pub base: Srgba<f64>,
    pub fill_start: Srgba<f64>,
    pub fill_end: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl SeekColors {
    /// Colors from the configuration alone; `accent` stands in for an unset gradient end.
    pub fn from_config(config: &ArcConfig, accent: Srgba<f64>) -> Self {
        Self {
            base: config.base_color.to_srgba(),
            fill_start: config.fill_color.to_srgba(),
            fill_end: config
                .fill_end_color
                .map(|c| c.to_srgba())
                .unwrap_or(accent),
            text: config.text_color.to_srgba(),
        }
    }

    pub fn from_context(context: &gtk::StyleContext, config: &ArcConfig) -> Self {
        let accent = Self::lookup_color(context, "theme_selected_bg_color", accent_fallback());
        Self::from_config(config, accent)
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub const AREA_CSS_CLASS: &str = "arcseek-area";

const AREA_CSS: &str = ".arcseek-area { background: none; }";

static AREA_CSS_INSTALLED: Once = Once::new();

/// Clears the theme background behind arc areas on the widget's display.
/// Only the first call installs the provider.
pub fn install_area_css(widget: &impl IsA<gtk::Widget>) {
    let display = widget.as_ref().display();
    AREA_CSS_INSTALLED.call_once(|| {
        let provider = gtk::CssProvider::new();
        provider.load_from_data(AREA_CSS);
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
        log::debug!("Installed {} stylesheet", AREA_CSS_CLASS);
    });
}
