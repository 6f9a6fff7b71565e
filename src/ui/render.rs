//! Text rendering of idea cards and galleries.

use owo_colors::OwoColorize;

use crate::types::{Generation, Idea, Theme};
use crate::ui::card::CardRef;

pub const HYPE_BAR_WIDTH: usize = 20;
pub const COPIED_LABEL: &str = "Copied!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Title,
    Accent,
    Muted,
    Good,
    Bad,
}

/// Theme-aware colouring. With colour off every method is the identity.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    theme: Theme,
    color: bool,
}

impl Palette {
    pub fn new(theme: Theme, color: bool) -> Self {
        Self { theme, color }
    }

    pub fn plain() -> Self {
        Self::new(Theme::default(), false)
    }

    fn paint(&self, text: &str, role: Role) -> String {
        if !self.color {
            return text.to_string();
        }
        match (self.theme, role) {
            (Theme::Dark, Role::Title) => text.bright_magenta().bold().to_string(),
            (Theme::Light, Role::Title) => text.magenta().bold().to_string(),
            (Theme::Dark, Role::Accent) => text.bright_cyan().to_string(),
            (Theme::Light, Role::Accent) => text.blue().to_string(),
            (Theme::Dark, Role::Muted) => text.bright_black().to_string(),
            (Theme::Light, Role::Muted) => text.dimmed().to_string(),
            (_, Role::Good) => text.green().bold().to_string(),
            (_, Role::Bad) => text.red().bold().to_string(),
        }
    }

    pub fn title(&self, text: &str) -> String {
        self.paint(text, Role::Title)
    }

    pub fn accent(&self, text: &str) -> String {
        self.paint(text, Role::Accent)
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(text, Role::Muted)
    }

    pub fn good(&self, text: &str) -> String {
        self.paint(text, Role::Good)
    }

    pub fn bad(&self, text: &str) -> String {
        self.paint(text, Role::Bad)
    }
}

/// Plain-text block placed on the clipboard for one idea.
pub fn clipboard_text(idea: &Idea) -> String {
    format!(
        "Coin Name: {}\nTicker: ${}\nSlogan: {}\nConcept: {}\nMascot: {}\nCommunity Vibe: {}",
        idea.coin_name, idea.ticker, idea.slogan, idea.concept, idea.mascot, idea.community_vibe
    )
}

/// Bar whose filled share of `width` equals `score` percent (clamped to 100).
pub fn hype_bar(score: u8, width: usize) -> String {
    let percent = usize::from(score.min(100));
    let filled = (percent * width + 50) / 100;
    format!("{}{} {}%", "█".repeat(filled), "░".repeat(width - filled), percent)
}

/// Per-card decorations supplied by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardFlags {
    pub pinned: bool,
    pub copied: bool,
}

pub fn render_card(idea: &Idea, card: CardRef, flags: CardFlags, palette: &Palette) -> String {
    let mut header = format!(
        "[{}] {} {} {}",
        card,
        idea.emoji,
        palette.title(&idea.coin_name),
        palette.accent(&format!("(${})", idea.ticker))
    );
    if flags.pinned {
        header.push_str(" 📌");
    }
    if flags.copied {
        header.push_str(&format!("  {}", palette.good(COPIED_LABEL)));
    }

    let indent = "      ";
    let mut lines = vec![header];
    lines.push(format!("{indent}\"{}\"", idea.slogan));
    lines.push(format!("{indent}{} {}", palette.muted("Concept:"), idea.concept));
    lines.push(format!("{indent}{} {}", palette.muted("Mascot:"), idea.mascot));
    lines.push(format!("{indent}{} {}", palette.muted("Vibe:"), idea.community_vibe));
    lines.push(format!(
        "{indent}{} {}",
        palette.muted("Hype:"),
        palette.accent(&hype_bar(idea.hype_score, HYPE_BAR_WIDTH))
    ));
    lines.join("\n")
}

pub fn render_generation_header(
    index: usize,
    generation: &Generation,
    palette: &Palette,
) -> String {
    let style = generation
        .style
        .as_deref()
        .map(|s| format!(" / {s}"))
        .unwrap_or_default();
    let when = generation.created_at.format("%Y-%m-%d %H:%M UTC");
    format!(
        "#{} {}{} {}",
        index + 1,
        palette.title(&generation.topic),
        style,
        palette.muted(&format!("({when})"))
    )
}

pub fn render_error(message: &str, palette: &Palette) -> String {
    format!("{} {}", palette.bad("Error:"), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdeaDraft;

    fn sloth(score: u8) -> Idea {
        IdeaDraft {
            coin_name: "SlothCoin".to_string(),
            ticker: "ZZZ".to_string(),
            concept: "Sleep to earn".to_string(),
            mascot: "A drowsy sloth".to_string(),
            emoji: "🦥".to_string(),
            slogan: "HODL and nap".to_string(),
            community_vibe: "Very relaxed".to_string(),
        }
        .with_hype_score(score)
    }

    #[test]
    fn test_clipboard_template() {
        assert_eq!(
            clipboard_text(&sloth(80)),
            "Coin Name: SlothCoin\n\
             Ticker: $ZZZ\n\
             Slogan: HODL and nap\n\
             Concept: Sleep to earn\n\
             Mascot: A drowsy sloth\n\
             Community Vibe: Very relaxed"
        );
    }

    #[test]
    fn test_hype_bar_fill_is_percentage_of_width() {
        assert_eq!(hype_bar(50, 20), format!("{}{} 50%", "█".repeat(10), "░".repeat(10)));
        assert_eq!(hype_bar(100, 20), format!("{} 100%", "█".repeat(20)));
        assert_eq!(hype_bar(73, 10), format!("{}{} 73%", "█".repeat(7), "░".repeat(3)));
        assert_eq!(hype_bar(255, 4), format!("{} 100%", "█".repeat(4)));
    }

    #[test]
    fn test_card_shows_every_field() {
        let flags = CardFlags::default();
        let text = render_card(&sloth(66), CardRef::Pinned(0), flags, &Palette::plain());
        for needle in ["[p1]", "🦥", "SlothCoin", "($ZZZ)", "HODL and nap", "Sleep to earn",
                       "A drowsy sloth", "Very relaxed", "66%"] {
            assert!(text.contains(needle), "missing {needle} in\n{text}");
        }
        assert!(!text.contains(COPIED_LABEL));
        assert!(!text.contains('📌'));
    }

    #[test]
    fn test_card_flags() {
        let flags = CardFlags { pinned: true, copied: true };
        let card = CardRef::History { generation: 1, idea: 0 };
        let text = render_card(&sloth(66), card, flags, &Palette::plain());
        assert!(text.starts_with("[2.1]"));
        assert!(text.contains('📌'));
        assert!(text.contains(COPIED_LABEL));
    }

    #[test]
    fn test_plain_palette_adds_no_escapes() {
        let palette = Palette::plain();
        assert_eq!(palette.title("x"), "x");
        assert!(Palette::new(Theme::Light, true).title("x").contains('\u{1b}'));
    }
}
