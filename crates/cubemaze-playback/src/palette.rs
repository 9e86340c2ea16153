//! Visual classification of cells and how to draw it.
//!
//! [`Shade`] is what a renderer needs to know about a cell at a given
//! playback frame; [`Palette`] turns a shade into a colour and opacity.
//! Nothing in the solver depends on this module.

use cubemaze_core::Role;

/// Visual state of one cell during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shade {
    Wall,
    Open,
    Start,
    End,
    /// Expanded by the search.
    Visited,
    /// Discovered or relaxed, not yet expanded.
    Frontier,
    /// On the final shortest path.
    Path,
}

impl Shade {
    /// The shade a cell has before any step is played.
    pub const fn from_role(role: Role) -> Self {
        match role {
            Role::Start => Shade::Start,
            Role::End => Shade::End,
            Role::Wall => Shade::Wall,
            Role::Open => Shade::Open,
        }
    }

    /// Start and end keep their shade for the whole playback.
    #[inline]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Shade::Start | Shade::End)
    }

    /// One-character form for text output.
    pub const fn glyph(self) -> char {
        match self {
            Shade::Wall => '#',
            Shade::Open => '.',
            Shade::Start => 'S',
            Shade::End => 'E',
            Shade::Visited => 'o',
            Shade::Frontier => '+',
            Shade::Path => '*',
        }
    }
}

/// Colour (`0xRRGGBB`) and opacity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub color: u32,
    pub opacity: f32,
}

impl Style {
    pub const fn new(color: u32, opacity: f32) -> Self {
        Self { color, opacity }
    }
}

/// One [`Style`] per [`Shade`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Palette {
    pub wall: Style,
    pub open: Style,
    pub start: Style,
    pub end: Style,
    pub visited: Style,
    pub frontier: Style,
    pub path: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: Style::new(0x333333, 0.05),
            open: Style::new(0x00FF00, 0.25),
            start: Style::new(0x0000FF, 1.0),
            end: Style::new(0xFF0000, 1.0),
            visited: Style::new(0xFFFF00, 0.5),
            frontier: Style::new(0xFFA500, 0.5),
            path: Style::new(0xFF00FF, 0.9),
        }
    }
}

impl Palette {
    pub fn style(&self, shade: Shade) -> Style {
        match shade {
            Shade::Wall => self.wall,
            Shade::Open => self.open,
            Shade::Start => self.start,
            Shade::End => self.end,
            Shade::Visited => self.visited,
            Shade::Frontier => self.frontier,
            Shade::Path => self.path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_map_to_shades() {
        assert_eq!(Shade::from_role(Role::Start), Shade::Start);
        assert_eq!(Shade::from_role(Role::Wall), Shade::Wall);
        assert!(Shade::from_role(Role::End).is_fixed());
        assert!(!Shade::Path.is_fixed());
    }

    #[test]
    fn default_palette_lookups() {
        let p = Palette::default();
        assert_eq!(p.style(Shade::Open), Style::new(0x00FF00, 0.25));
        assert_eq!(p.style(Shade::Path).color, 0xFF00FF);
        assert!(p.style(Shade::Wall).opacity < p.style(Shade::Visited).opacity);
    }
}
