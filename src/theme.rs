use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colours shared by every widget and chart element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: &'static str,
    pub fg: &'static str,
}

// series accents stay the same in both themes
pub const SOLVES_COLOR: &str = "#1f77b4";
pub const MEAN_COLOR: &str = "#2ca02c";
pub const AO5_COLOR: &str = "#d62728";
pub const ERROR_COLOR: &str = "#ca4754";

const LIGHT: Palette = Palette { bg: "#ffffff", fg: "#000000" };
const DARK: Palette = Palette { bg: "#333333", fg: "#ffffff" };

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}
