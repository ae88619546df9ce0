//! Icon (emoji) tokens used on navigation controls.

use std::fmt;

const CUSTOM_NAME_MIN: usize = 2;
const CUSTOM_NAME_MAX: usize = 32;
const UNICODE_MAX_CHARS: usize = 10;
const KEYCAP: char = '\u{20E3}';

/// An emoji that can decorate a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// Plain unicode emoji sequence such as `◀` or `1️⃣`.
    Unicode(String),
    /// Guild emoji written as `<:name:id>` or `<a:name:id>`.
    Custom { name: String, id: u64, animated: bool },
}

impl Icon {
    /// Parse a token against the icon grammar. Returns `None` for anything that
    /// should be treated as label text instead.
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.trim();
        if token.is_empty() {
            return None;
        }

        if token.starts_with('<') {
            return parse_custom(token);
        }

        is_unicode_emoji(token).then(|| Icon::Unicode(token.to_owned()))
    }

    /// Whether a raw string matches the icon grammar.
    pub fn is_icon(raw: &str) -> bool {
        Self::parse(raw).is_some()
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Icon::Unicode(value) => f.write_str(value),
            Icon::Custom { name, id, animated } => {
                let marker = if *animated { "a" } else { "" };
                write!(f, "<{marker}:{name}:{id}>")
            }
        }
    }
}

fn parse_custom(token: &str) -> Option<Icon> {
    let inner = token.strip_prefix('<')?.strip_suffix('>')?;
    let (animated, rest) = match inner.strip_prefix("a:") {
        Some(rest) => (true, rest),
        None => (false, inner.strip_prefix(':')?),
    };

    let mut parts = rest.split(':');
    let name = parts.next()?;
    let id = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let name_ok = (CUSTOM_NAME_MIN..=CUSTOM_NAME_MAX).contains(&name.len())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !name_ok || id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(Icon::Custom {
        name: name.to_owned(),
        id: id.parse().ok()?,
        animated,
    })
}

/// Extended_Pictographic ranges that Discord renders as emoji.
const PICTOGRAPHIC: &[(u32, u32)] = &[
    (0x00A9, 0x00A9),
    (0x00AE, 0x00AE),
    (0x203C, 0x203C),
    (0x2049, 0x2049),
    (0x2122, 0x2122),
    (0x2139, 0x2139),
    (0x2194, 0x2199),
    (0x21A9, 0x21AA),
    (0x231A, 0x231B),
    (0x2328, 0x2328),
    (0x2388, 0x2388),
    (0x23CF, 0x23CF),
    (0x23E9, 0x23F3),
    (0x23F8, 0x23FA),
    (0x24C2, 0x24C2),
    (0x25AA, 0x25AB),
    (0x25B6, 0x25B6),
    (0x25C0, 0x25C0),
    (0x25FB, 0x25FE),
    (0x2600, 0x2605),
    (0x2607, 0x2612),
    (0x2614, 0x2685),
    (0x2690, 0x2705),
    (0x2708, 0x2712),
    (0x2714, 0x2714),
    (0x2716, 0x2716),
    (0x271D, 0x271D),
    (0x2721, 0x2721),
    (0x2728, 0x2728),
    (0x2733, 0x2734),
    (0x2744, 0x2744),
    (0x2747, 0x2747),
    (0x274C, 0x274C),
    (0x274E, 0x274E),
    (0x2753, 0x2755),
    (0x2757, 0x2757),
    (0x2763, 0x2767),
    (0x2795, 0x2797),
    (0x27A1, 0x27A1),
    (0x27B0, 0x27B0),
    (0x27BF, 0x27BF),
    (0x2934, 0x2935),
    (0x2B05, 0x2B07),
    (0x2B1B, 0x2B1C),
    (0x2B50, 0x2B50),
    (0x2B55, 0x2B55),
    (0x3030, 0x3030),
    (0x303D, 0x303D),
    (0x3297, 0x3297),
    (0x3299, 0x3299),
    (0x1F000, 0x1F0FF),
    (0x1F10D, 0x1F10F),
    (0x1F12F, 0x1F12F),
    (0x1F16C, 0x1F171),
    (0x1F17E, 0x1F17F),
    (0x1F18E, 0x1F18E),
    (0x1F191, 0x1F19A),
    (0x1F1AD, 0x1F1E5),
    (0x1F201, 0x1F20F),
    (0x1F21A, 0x1F21A),
    (0x1F22F, 0x1F22F),
    (0x1F232, 0x1F23A),
    (0x1F23C, 0x1F23F),
    (0x1F249, 0x1F3FA),
    (0x1F400, 0x1F53D),
    (0x1F546, 0x1F64F),
    (0x1F680, 0x1F6FF),
    (0x1F774, 0x1F77F),
    (0x1F7D5, 0x1F7FF),
    (0x1F80C, 0x1F80F),
    (0x1F848, 0x1F84F),
    (0x1F85A, 0x1F85F),
    (0x1F888, 0x1F88F),
    (0x1F8AE, 0x1F8FF),
    (0x1F90C, 0x1F93A),
    (0x1F93C, 0x1F945),
    (0x1F947, 0x1FAFF),
    (0x1FC00, 0x1FFFD),
];

/// Pictographs that default to text presentation and only count as an icon
/// when followed by VS16.
const TEXT_DEFAULT: &[char] = &['\u{00A9}', '\u{00AE}', '\u{203C}', '\u{2049}', '\u{2122}', '\u{2139}'];

const VS16: char = '\u{FE0F}';
const ZWJ: char = '\u{200D}';

fn is_pictographic(c: char) -> bool {
    let code = c as u32;
    PICTOGRAPHIC
        .binary_search_by(|&(start, end)| {
            if end < code {
                std::cmp::Ordering::Less
            } else if start > code {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

/// Joiners, selectors, skin tones and tags that only extend a base pictograph.
fn is_modifier(c: char) -> bool {
    matches!(c, VS16 | ZWJ | KEYCAP)
        || ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
        || ('\u{E0020}'..='\u{E007F}').contains(&c)
}

fn is_unicode_emoji(token: &str) -> bool {
    if token.chars().count() > UNICODE_MAX_CHARS {
        return false;
    }

    let keycap = token.contains(KEYCAP);
    let emoji_presentation = token.contains(VS16);
    let mut has_base = false;

    for c in token.chars() {
        if is_modifier(c) {
            continue;
        }

        let base = if c.is_ascii() {
            keycap && (c.is_ascii_digit() || c == '#' || c == '*')
        } else if TEXT_DEFAULT.contains(&c) {
            emoji_presentation
        } else {
            is_pictographic(c) || is_regional_indicator(c)
        };
        if !base {
            return false;
        }
        has_base = true;
    }

    has_base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_keycaps_are_icons() {
        assert!(Icon::is_icon("◀"));
        assert!(Icon::is_icon("⏭️"));
        assert!(Icon::is_icon("1\u{FE0F}\u{20E3}"));
        assert!(Icon::is_icon("👍🏽"));
    }

    #[test]
    fn words_are_not_icons() {
        assert!(!Icon::is_icon("Next"));
        assert!(!Icon::is_icon("Next ▶"));
        assert!(!Icon::is_icon("1"));
        assert!(!Icon::is_icon("Página"));
        assert!(!Icon::is_icon(""));
    }

    #[test]
    fn punctuation_and_symbols_are_not_icons() {
        for raw in ["¡", "§", "—", "™", "·", "→→x"] {
            assert!(!Icon::is_icon(raw), "{raw:?}");
        }
        assert!(Icon::is_icon("™\u{FE0F}"));
        assert!(Icon::is_icon("🇺🇦"));
    }

    #[test]
    fn modifiers_alone_are_not_icons() {
        for raw in ["\u{FE0F}", "\u{200D}", "\u{20E3}", "\u{1F3FD}", "\u{FE0F}\u{200D}"] {
            assert!(!Icon::is_icon(raw), "{raw:?}");
        }
        assert!(Icon::is_icon("👩\u{200D}💻"));
    }

    #[test]
    fn custom_emoji_round_trips_through_display() {
        let icon = Icon::parse("<a:party_blob:123456789>").expect("custom emoji");
        assert_eq!(
            icon,
            Icon::Custom {
                name: "party_blob".to_owned(),
                id: 123_456_789,
                animated: true,
            }
        );
        assert_eq!(icon.to_string(), "<a:party_blob:123456789>");
    }

    #[test]
    fn malformed_custom_emoji_is_rejected() {
        assert!(Icon::parse("<:x:1>").is_none());
        assert!(Icon::parse("<:name:abc>").is_none());
        assert!(Icon::parse("<:name:1:2>").is_none());
        assert!(Icon::parse("<name:1>").is_none());
    }
}
