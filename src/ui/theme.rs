use colored::{Color, ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_THEME: &str = "default";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: HashMap<String, ColorConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorConfig {
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub style: Vec<String>,
}

impl ColorConfig {
    fn new(foreground: &str, style: &[&str]) -> Self {
        Self {
            foreground: Some(foreground.to_string()),
            background: None,
            style: style.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Theme {
    /// Builds a theme from `(style key, foreground, modifiers)` rows.
    fn from_palette(name: &str, palette: &[PaletteRow]) -> Self {
        let colors = palette
            .iter()
            .map(|(key, fg, style)| (key.to_string(), ColorConfig::new(fg, style)))
            .collect();

        Self {
            name: name.to_string(),
            colors,
        }
    }
}

/// Maps line styles to terminal colors. Styling never changes the text itself.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    current_theme: String,
    enabled: bool,
}

impl ThemeManager {
    pub fn new() -> Self {
        let mut manager = Self {
            themes: HashMap::new(),
            current_theme: DEFAULT_THEME.to_string(),
            enabled: true,
        };

        manager.load_builtin_themes();
        manager
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        if self.themes.contains_key(theme_name) {
            self.current_theme = theme_name.to_string();
            true
        } else {
            false
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme
    }

    pub fn get_current_theme(&self) -> Option<&Theme> {
        self.themes
            .get(&self.current_theme)
            .or_else(|| self.themes.get(DEFAULT_THEME))
    }

    pub fn apply_style(&self, text: &str, style_name: &str) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }

        let Some(color_config) = self.get_current_theme().and_then(|t| t.colors.get(style_name)) else {
            return text.to_string();
        };

        let mut styled: ColoredString = text.normal();

        if let Some(color) = color_config.foreground.as_deref().and_then(parse_color) {
            styled = styled.color(color);
        }
        if let Some(color) = color_config.background.as_deref().and_then(parse_color) {
            styled = styled.on_color(color);
        }

        for style in &color_config.style {
            styled = match style.as_str() {
                "bold" => styled.bold(),
                "italic" => styled.italic(),
                "underline" => styled.underline(),
                "dimmed" => styled.dimmed(),
                _ => styled,
            };
        }

        styled.to_string()
    }

    pub fn list_themes(&self) -> Vec<String> {
        let mut names: Vec<String> = self.themes.keys().cloned().collect();
        names.sort();
        names
    }

    fn load_builtin_themes(&mut self) {
        let themes = [
            Theme::from_palette(DEFAULT_THEME, DEFAULT_PALETTE),
            Theme::from_palette("dark", DARK_PALETTE),
            Theme::from_palette("light", LIGHT_PALETTE),
            Theme::from_palette("plain", &[]),
        ];

        for theme in themes {
            self.themes.insert(theme.name.clone(), theme);
        }
    }
}

type PaletteRow = (&'static str, &'static str, &'static [&'static str]);

const DEFAULT_PALETTE: &[PaletteRow] = &[
    ("banner", "cyan", &["bold"]),
    ("status", "yellow", &[]),
    ("scene_text", "white", &[]),
    ("choice", "green", &[]),
    ("prompt", "cyan", &["bold"]),
    ("notice", "yellow", &["bold"]),
    ("diagnostic", "red", &["bold"]),
    ("ending_title", "magenta", &["bold"]),
    ("ending_text", "white", &["italic"]),
];

const DARK_PALETTE: &[PaletteRow] = &[
    ("banner", "bright_cyan", &["bold"]),
    ("status", "bright_yellow", &[]),
    ("scene_text", "bright_white", &[]),
    ("choice", "bright_green", &[]),
    ("prompt", "bright_cyan", &["bold"]),
    ("notice", "bright_yellow", &["bold"]),
    ("diagnostic", "bright_red", &["bold"]),
    ("ending_title", "bright_magenta", &["bold"]),
    ("ending_text", "bright_white", &["italic"]),
];

const LIGHT_PALETTE: &[PaletteRow] = &[
    ("banner", "blue", &["bold"]),
    ("status", "magenta", &[]),
    ("scene_text", "black", &[]),
    ("choice", "blue", &[]),
    ("prompt", "blue", &["bold"]),
    ("notice", "red", &[]),
    ("diagnostic", "red", &["bold"]),
    ("ending_title", "magenta", &["bold", "underline"]),
    ("ending_text", "black", &["italic"]),
];

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_color(color_name: &str) -> Option<Color> {
    match color_name.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "bright_black" => Some(Color::BrightBlack),
        "bright_red" => Some(Color::BrightRed),
        "bright_green" => Some(Color::BrightGreen),
        "bright_yellow" => Some(Color::BrightYellow),
        "bright_blue" => Some(Color::BrightBlue),
        "bright_magenta" => Some(Color::BrightMagenta),
        "bright_cyan" => Some(Color::BrightCyan),
        "bright_white" => Some(Color::BrightWhite),
        _ => None,
    }
}
