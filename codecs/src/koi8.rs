//! KOI-8 text encoding and decoding.
//!
//! Cyrillic letters map through the KOI-8 table below; other characters
//! fall back to their ASCII codes. Everything travels as 8-bit groups.

use std::collections::HashMap;
use std::sync::LazyLock;

use codon_types::BitString;

/// Cyrillic rows of the KOI-8 code page. The lowercase block sits at
/// 192..=223 and the uppercase block at 224..=255.
const CYRILLIC: [(char, u8); 64] = [
    ('ю', 192),
    ('а', 193),
    ('б', 194),
    ('ц', 195),
    ('д', 196),
    ('е', 197),
    ('ф', 198),
    ('г', 199),
    ('х', 200),
    ('и', 201),
    ('й', 202),
    ('к', 203),
    ('л', 204),
    ('м', 205),
    ('н', 206),
    ('о', 207),
    ('п', 208),
    ('я', 209),
    ('р', 210),
    ('с', 211),
    ('т', 212),
    ('у', 213),
    ('ж', 214),
    ('в', 215),
    ('ь', 216),
    ('ы', 217),
    ('з', 218),
    ('ш', 219),
    ('э', 220),
    ('щ', 221),
    ('ч', 222),
    ('ё', 223),
    ('Ю', 224),
    ('А', 225),
    ('Б', 226),
    ('Ц', 227),
    ('Д', 228),
    ('Е', 229),
    ('Ф', 230),
    ('Г', 231),
    ('Х', 232),
    ('И', 233),
    ('Й', 234),
    ('К', 235),
    ('Л', 236),
    ('М', 237),
    ('Н', 238),
    ('О', 239),
    ('П', 240),
    ('Я', 241),
    ('Р', 242),
    ('С', 243),
    ('Т', 244),
    ('У', 245),
    ('Ж', 246),
    ('В', 247),
    ('Ь', 248),
    ('Ы', 249),
    ('З', 250),
    ('Ш', 251),
    ('Э', 252),
    ('Щ', 253),
    ('Ч', 254),
    ('Ъ', 255),
];

struct Koi8Table {
    forward: HashMap<char, u8>,
    reverse: HashMap<u8, char>,
}

static TABLE: LazyLock<Koi8Table> = LazyLock::new(|| {
    let mut forward = HashMap::with_capacity(CYRILLIC.len());
    let mut reverse = HashMap::with_capacity(CYRILLIC.len());
    for (letter, code) in CYRILLIC {
        forward.insert(letter, code);
        reverse.insert(code, letter);
    }
    Koi8Table { forward, reverse }
});

/// Result of encoding text into KOI-8 bit groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Concatenated 8-bit groups. Empty when no character was encodable.
    pub bits: String,
    /// One line per input character.
    pub trace: Vec<String>,
}

/// Encode `text` into 8-bit KOI-8 groups.
///
/// Characters outside both the KOI-8 table and ASCII are skipped and noted
/// in the trace.
#[must_use]
pub fn encode(text: &str) -> Encoded {
    let mut bits = String::with_capacity(text.len() * 8);
    let mut trace = Vec::new();

    for c in text.chars() {
        if let Some(&code) = TABLE.forward.get(&c) {
            bits.push_str(&format!("{code:08b}"));
            trace.push(format!("'{c}' → {code} (KOI-8) → {code:08b}"));
        } else if c.is_ascii() {
            let code = c as u8;
            bits.push_str(&format!("{code:08b}"));
            trace.push(format!("'{c}' → {code} (ASCII) → {code:08b}"));
        } else {
            trace.push(format!("'{c}' → not in the KOI-8 table"));
        }
    }

    Encoded { bits, trace }
}

/// Result of decoding KOI-8 bit groups back into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Recovered text. Unknown codes decode as '?'.
    pub text: String,
    /// One line per 8-bit group.
    pub trace: Vec<String>,
}

/// Decode a bit sequence as 8-bit KOI-8 groups.
///
/// A trailing group shorter than 8 bits is dropped.
#[must_use]
pub fn decode(data: &BitString) -> Decoded {
    let mut text = String::new();
    let mut trace = Vec::new();

    for chunk in data.as_bytes().chunks(8) {
        if chunk.len() < 8 {
            break;
        }
        let byte_str = String::from_utf8_lossy(chunk);
        let byte = chunk
            .iter()
            .fold(0u8, |acc, &b| (acc << 1) | u8::from(b == b'1'));

        if let Some(&letter) = TABLE.reverse.get(&byte) {
            text.push(letter);
            trace.push(format!("{byte_str} → {byte} (KOI-8) → '{letter}'"));
        } else if (32..=126).contains(&byte) {
            let letter = byte as char;
            text.push(letter);
            trace.push(format!("{byte_str} → {byte} (ASCII) → '{letter}'"));
        } else {
            text.push('?');
            trace.push(format!("{byte_str} → unknown code"));
        }
    }

    Decoded { text, trace }
}
