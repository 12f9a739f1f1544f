//! Color palettes and the styles derived from them.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
}

pub const PALETTES: [Palette; 7] = [
    Palette {
        name: "ghost",
        primary: Color::White,
        secondary: Color::Cyan,
        accent: Color::White,
    },
    Palette {
        name: "mint",
        primary: Color::Green,
        secondary: Color::White,
        accent: Color::Cyan,
    },
    Palette {
        name: "lavender",
        primary: Color::Magenta,
        secondary: Color::White,
        accent: Color::White,
    },
    Palette {
        name: "ocean",
        primary: Color::Blue,
        secondary: Color::White,
        accent: Color::Cyan,
    },
    Palette {
        name: "sunset",
        primary: Color::Yellow,
        secondary: Color::Red,
        accent: Color::Magenta,
    },
    Palette {
        name: "nord",
        primary: Color::Cyan,
        secondary: Color::Blue,
        accent: Color::White,
    },
    Palette {
        name: "mono",
        primary: Color::White,
        secondary: Color::White,
        accent: Color::White,
    },
];

/// Named text styles for one palette.
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    /// Primary color, bold. Box borders and healthy values.
    pub primary: Style,
    /// Secondary color, bold. Labels that should stand out.
    pub secondary: Style,
    pub alert: Style,
    pub warn: Style,
    /// Accent color, bold. Focused borders and body text.
    pub accent: Style,
    /// Black on primary. Status bar.
    pub inverse: Style,
    /// Black on white. Browser selection.
    pub selection: Style,
    pub dim: Style,
    pub background: Style,
}

impl Styles {
    pub fn from_palette(palette: &Palette) -> Self {
        let bold = Modifier::BOLD;
        let on_black = |fg: Color| Style::default().fg(fg).bg(Color::Black);
        Self {
            primary: on_black(palette.primary).add_modifier(bold),
            secondary: on_black(palette.secondary).add_modifier(bold),
            alert: on_black(Color::Red).add_modifier(bold),
            warn: on_black(Color::Yellow).add_modifier(bold),
            accent: on_black(palette.accent).add_modifier(bold),
            inverse: Style::default()
                .fg(Color::Black)
                .bg(palette.primary)
                .add_modifier(bold),
            selection: Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(bold),
            dim: on_black(palette.primary),
            background: on_black(palette.primary),
        }
    }
}

/// Index into `PALETTES`. Only `cycle` changes it after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    index: usize,
}

impl ThemeState {
    pub fn new(index: usize) -> Self {
        Self {
            index: if index < PALETTES.len() { index } else { 0 },
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn palette(&self) -> &'static Palette {
        &PALETTES[self.index]
    }

    pub fn name(&self) -> &'static str {
        self.palette().name
    }

    pub fn styles(&self) -> Styles {
        Styles::from_palette(self.palette())
    }

    pub fn cycle(&mut self) {
        self.index = (self.index + 1) % PALETTES.len();
    }
}

#[cfg(test)]
mod tests {
    use super::{ThemeState, PALETTES};

    #[test]
    fn cycle_wraps_around() {
        let mut theme = ThemeState::new(PALETTES.len() - 1);
        assert_eq!(theme.name(), "mono");
        theme.cycle();
        assert_eq!(theme.index(), 0);
        assert_eq!(theme.name(), "ghost");
    }

    #[test]
    fn out_of_range_index_falls_back() {
        assert_eq!(ThemeState::new(99).index(), 0);
    }
}
