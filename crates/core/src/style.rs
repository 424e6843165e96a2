//! Style mapping tables between ASCII letters/digits and the Mathematical
//! Alphanumeric Symbols block.
//!
//! Each alphabet is described as a base code point for `A`, `a` and
//! optionally `0`, plus an override list. Most entries follow the base
//! offset, but a few letters were encoded in the Letterlike Symbols block
//! before the mathematical block existed, and the block keeps reserved holes
//! where those letters would be. Overrides always win over the offset.

use crate::codepoint::{alnum_slot, slot_char};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The closed set of styles the renderer can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleVariant {
    /// Unstyled passthrough.
    #[default]
    Plain,
    /// Mathematical Bold.
    Bold,
    /// Mathematical Italic.
    Italic,
    /// Mathematical Bold Italic.
    BoldItalic,
    /// Mathematical Monospace.
    Monospace,
}

impl StyleVariant {
    /// Styled variants in decode priority order.
    pub const STYLED: [StyleVariant; 4] = [
        StyleVariant::Bold,
        StyleVariant::Italic,
        StyleVariant::BoldItalic,
        StyleVariant::Monospace,
    ];

    fn table_index(self) -> Option<usize> {
        match self {
            StyleVariant::Plain => None,
            StyleVariant::Bold => Some(0),
            StyleVariant::Italic => Some(1),
            StyleVariant::BoldItalic => Some(2),
            StyleVariant::Monospace => Some(3),
        }
    }
}

/// One styled alphabet: offsets plus letters that alias elsewhere.
struct Alphabet {
    upper: u32,
    lower: u32,
    digits: Option<u32>,
    overrides: &'static [(char, u32)],
}

impl Alphabet {
    fn code_point(&self, c: char) -> Option<char> {
        if let Some(&(_, cp)) = self.overrides.iter().find(|(ascii, _)| *ascii == c) {
            return char::from_u32(cp);
        }
        let cp = match c {
            'A'..='Z' => self.upper + (c as u32 - 'A' as u32),
            'a'..='z' => self.lower + (c as u32 - 'a' as u32),
            '0'..='9' => self.digits? + (c as u32 - '0' as u32),
            _ => return None,
        };
        char::from_u32(cp)
    }
}

const BOLD: Alphabet = Alphabet {
    upper: 0x1D400,
    lower: 0x1D41A,
    digits: Some(0x1D7CE),
    overrides: &[],
};

// U+1D455 is reserved; italic h is the Planck constant.
const ITALIC: Alphabet = Alphabet {
    upper: 0x1D434,
    lower: 0x1D44E,
    digits: None,
    overrides: &[('h', 0x210E)],
};

const BOLD_ITALIC: Alphabet = Alphabet {
    upper: 0x1D468,
    lower: 0x1D482,
    digits: None,
    overrides: &[],
};

const MONOSPACE: Alphabet = Alphabet {
    upper: 0x1D670,
    lower: 0x1D68A,
    digits: Some(0x1D7F6),
    overrides: &[],
};

/// Indexed like [`StyleVariant::table_index`].
const PRIMARY: [&Alphabet; 4] = [&BOLD, &ITALIC, &BOLD_ITALIC, &MONOSPACE];

/// Alphabets other tools produce. Decoded, never emitted.
const DECODE_ONLY: &[Alphabet] = &[
    // Script
    Alphabet {
        upper: 0x1D49C,
        lower: 0x1D4B6,
        digits: None,
        overrides: &[
            ('B', 0x212C),
            ('E', 0x2130),
            ('F', 0x2131),
            ('H', 0x210B),
            ('I', 0x2110),
            ('L', 0x2112),
            ('M', 0x2133),
            ('R', 0x211B),
            ('e', 0x212F),
            ('g', 0x210A),
            ('o', 0x2134),
        ],
    },
    // Bold script
    Alphabet {
        upper: 0x1D4D0,
        lower: 0x1D4EA,
        digits: None,
        overrides: &[],
    },
    // Fraktur
    Alphabet {
        upper: 0x1D504,
        lower: 0x1D51E,
        digits: None,
        overrides: &[
            ('C', 0x212D),
            ('H', 0x210C),
            ('I', 0x2111),
            ('R', 0x211C),
            ('Z', 0x2128),
        ],
    },
    // Double-struck
    Alphabet {
        upper: 0x1D538,
        lower: 0x1D552,
        digits: Some(0x1D7D8),
        overrides: &[
            ('C', 0x2102),
            ('H', 0x210D),
            ('N', 0x2115),
            ('P', 0x2119),
            ('Q', 0x211A),
            ('R', 0x211D),
            ('Z', 0x2124),
        ],
    },
    // Bold fraktur
    Alphabet {
        upper: 0x1D56C,
        lower: 0x1D586,
        digits: None,
        overrides: &[],
    },
    // Sans-serif
    Alphabet {
        upper: 0x1D5A0,
        lower: 0x1D5BA,
        digits: Some(0x1D7E2),
        overrides: &[],
    },
    // Sans-serif bold
    Alphabet {
        upper: 0x1D5D4,
        lower: 0x1D5EE,
        digits: Some(0x1D7EC),
        overrides: &[],
    },
    // Sans-serif italic
    Alphabet {
        upper: 0x1D608,
        lower: 0x1D622,
        digits: None,
        overrides: &[],
    },
    // Sans-serif bold italic
    Alphabet {
        upper: 0x1D63C,
        lower: 0x1D656,
        digits: None,
        overrides: &[],
    },
];

const SLOTS: usize = 62;

/// Immutable lookup tables for every styled variant.
#[derive(Debug)]
pub struct MappingTable {
    forward: [[Option<char>; SLOTS]; 4],
    inverse: [HashMap<char, char>; 4],
    decode: HashMap<char, (char, Option<StyleVariant>)>,
}

static TABLE: Lazy<MappingTable> = Lazy::new(MappingTable::build);

/// Process-wide mapping table, built on first use.
pub fn mapping_table() -> &'static MappingTable {
    &TABLE
}

impl MappingTable {
    fn build() -> Self {
        let mut forward = [[None; SLOTS]; 4];
        let mut inverse: [HashMap<char, char>; 4] = Default::default();

        for (index, alphabet) in PRIMARY.iter().enumerate() {
            for slot in 0..SLOTS {
                let Some(ascii) = slot_char(slot) else {
                    continue;
                };
                if let Some(styled) = alphabet.code_point(ascii) {
                    forward[index][slot] = Some(styled);
                    inverse[index].insert(styled, ascii);
                }
            }
        }

        // First insertion wins, so iteration order is the priority order.
        let mut decode = HashMap::new();
        for variant in StyleVariant::STYLED {
            let Some(index) = variant.table_index() else {
                continue;
            };
            for (&styled, &ascii) in &inverse[index] {
                decode.entry(styled).or_insert((ascii, Some(variant)));
            }
        }
        for alphabet in DECODE_ONLY {
            for slot in 0..SLOTS {
                let Some(ascii) = slot_char(slot) else {
                    continue;
                };
                if let Some(styled) = alphabet.code_point(ascii) {
                    decode.entry(styled).or_insert((ascii, None));
                }
            }
        }

        log::trace!("built style mapping table with {} decodable code points", decode.len());

        MappingTable {
            forward,
            inverse,
            decode,
        }
    }

    /// Styled form of `c` under `variant`, if the standard defines one.
    pub fn styled(&self, variant: StyleVariant, c: char) -> Option<char> {
        let index = variant.table_index()?;
        self.forward[index][alnum_slot(c)?]
    }

    /// ASCII original of `styled` within a single variant's table.
    pub fn ascii(&self, variant: StyleVariant, styled: char) -> Option<char> {
        let index = variant.table_index()?;
        self.inverse[index].get(&styled).copied()
    }

    /// Styles `c`, passing it through unchanged when no mapping exists.
    pub fn apply(&self, variant: StyleVariant, c: char) -> char {
        self.styled(variant, c).unwrap_or(c)
    }

    /// ASCII original of any styled code point, across all known alphabets.
    pub fn to_ascii(&self, c: char) -> Option<char> {
        self.decode.get(&c).map(|(ascii, _)| *ascii)
    }

    /// Variant `c` decodes through, resolved by priority. `None` for plain
    /// characters and for alphabets the renderer never emits.
    pub fn variant_of(&self, c: char) -> Option<StyleVariant> {
        self.decode.get(&c).and_then(|(_, variant)| *variant)
    }

    /// Returns true if `c` belongs to any styled alphabet.
    pub fn is_styled(&self, c: char) -> bool {
        self.decode.contains_key(&c)
    }
}

/// Styles a single character with the shared table.
pub fn style_char(c: char, variant: StyleVariant) -> char {
    mapping_table().apply(variant, c)
}

/// Styles every ASCII letter/digit in `text`; everything else passes through.
pub fn style_text(text: &str, variant: StyleVariant) -> String {
    if variant == StyleVariant::Plain {
        return text.to_string();
    }
    let table = mapping_table();
    text.chars().map(|c| table.apply(variant, c)).collect()
}
