//! Styles for the terminal client.
//!
//! Output code asks for styles by meaning (`folder`, `url`, `id`, ...), never
//! by color. Each meaning maps to a [`console::Style`] in a light and a dark
//! palette; the persisted theme picks the palette. When stdout is not a
//! terminal `console` drops the escape codes on its own.

use bookmarkapp::prefs::Theme;
use console::Style;
use once_cell::sync::Lazy;

#[derive(Debug, Clone)]
pub struct Palette {
    pub folder: Style,
    pub bookmark: Style,
    pub url: Style,
    pub id: Style,
    pub muted: Style,
    pub highlight: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
}

static LIGHT: Lazy<Palette> = Lazy::new(|| Palette {
    folder: Style::new().blue().bold(),
    bookmark: Style::new().black(),
    url: Style::new().color256(30),
    id: Style::new().color256(245),
    muted: Style::new().color256(243),
    highlight: Style::new().black().on_color256(227),
    success: Style::new().green(),
    warning: Style::new().yellow().bold(),
    error: Style::new().red().bold(),
});

static DARK: Lazy<Palette> = Lazy::new(|| Palette {
    folder: Style::new().color256(117).bold(),
    bookmark: Style::new().white(),
    url: Style::new().color256(80),
    id: Style::new().color256(242),
    muted: Style::new().color256(248),
    highlight: Style::new().black().on_color256(220),
    success: Style::new().green(),
    warning: Style::new().yellow().bold(),
    error: Style::new().red().bold(),
});

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}
