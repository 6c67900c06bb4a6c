//! Hamming single-error-correcting code.
//!
//! Parity bits sit at the power-of-two positions (1-based). Parity is even:
//! the bit at position `2^i` covers every position whose index has bit `i`
//! set. Decoding sums the failing parity positions into the 1-based error
//! position and flips that bit. Two or more flipped bits are beyond what
//! this code can see and will be miscorrected silently.

use codon_types::BitString;

/// Result of Hamming encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Code word with parity bits interleaved.
    pub code: String,
    /// Number of parity bits inserted.
    pub parity_bits: usize,
    /// Total length of the code word.
    pub total_len: usize,
}

/// Encode `data` by inserting even-parity bits at power-of-two positions.
#[must_use]
pub fn encode(data: &BitString) -> Encoded {
    let m = data.len();

    // Smallest r with 2^r >= m + r + 1.
    let mut r = 1;
    while (1usize << r) < m + r + 1 {
        r += 1;
    }
    let n = m + r;

    let mut code = vec![false; n];
    let mut bits = data.bits();
    for position in 1..=n {
        if !position.is_power_of_two() {
            if let Some(bit) = bits.next() {
                code[position - 1] = bit;
            }
        }
    }

    for i in 0..r {
        let parity_pos = 1usize << i;
        code[parity_pos - 1] = coverage_parity(&code, parity_pos);
    }

    Encoded {
        code: to_bit_chars(&code),
        parity_bits: r,
        total_len: n,
    }
}

/// Result of Hamming decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Information bits extracted from the corrected word.
    pub data: String,
    /// 1-based position of the corrected bit, or 0 when no error was found.
    pub error_position: usize,
    /// Code word after correction.
    pub corrected: String,
}

/// Decode `received`, correcting at most one flipped bit.
#[must_use]
pub fn decode(received: &BitString) -> Decoded {
    let n = received.len();

    let mut r = 0;
    while (1usize << r) < n {
        r += 1;
    }

    let mut code: Vec<bool> = received.bits().collect();

    let mut error_position = 0;
    for i in 0..r {
        let parity_pos = 1usize << i;
        if coverage_parity(&code, parity_pos) {
            error_position += parity_pos;
        }
    }

    if error_position > 0 && error_position <= n {
        code[error_position - 1] = !code[error_position - 1];
    }

    let data: String = (1..=n)
        .filter(|position| !position.is_power_of_two())
        .map(|position| bit_char(code[position - 1]))
        .collect();

    Decoded {
        data,
        error_position,
        corrected: to_bit_chars(&code),
    }
}

/// Even parity over every position covered by `parity_pos`.
fn coverage_parity(code: &[bool], parity_pos: usize) -> bool {
    let mut parity = false;
    for (index, &bit) in code.iter().enumerate() {
        if (index + 1) & parity_pos != 0 {
            parity ^= bit;
        }
    }
    parity
}

fn bit_char(bit: bool) -> char {
    if bit { '1' } else { '0' }
}

fn to_bit_chars(code: &[bool]) -> String {
    code.iter().map(|&bit| bit_char(bit)).collect()
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use codon_types::BitString;

    fn bits(raw: &str) -> BitString {
        BitString::parse(raw).unwrap()
    }

    #[test]
    fn encode_four_data_bits() {
        let result = encode(&bits("1011"));
        assert_eq!(result.code, "0110011");
        assert_eq!(result.parity_bits, 3);
        assert_eq!(result.total_len, 7);
    }

    #[test]
    fn single_data_bit_takes_two_parity_bits() {
        let result = encode(&bits("1"));
        assert_eq!(result.code, "111");
        assert_eq!(result.parity_bits, 2);
        assert_eq!(result.total_len, 3);
    }

    #[test]
    fn decode_clean_word_reports_no_error() {
        let result = decode(&bits("0110011"));
        assert_eq!(result.error_position, 0);
        assert_eq!(result.data, "1011");
        assert_eq!(result.corrected, "0110011");
    }

    #[test]
    fn decode_corrects_any_single_flip() {
        let clean = "0110011";
        for position in 1..=clean.len() {
            let mut flipped: Vec<char> = clean.chars().collect();
            flipped[position - 1] = if flipped[position - 1] == '0' { '1' } else { '0' };
            let word: String = flipped.into_iter().collect();

            let result = decode(&bits(&word));
            assert_eq!(result.error_position, position, "flip at {position}");
            assert_eq!(result.corrected, clean, "flip at {position}");
            assert_eq!(result.data, "1011", "flip at {position}");
        }
    }

    #[test]
    fn parity_bit_flip_leaves_data_intact() {
        // Position 2 is a parity bit; the data bits never move.
        let result = decode(&bits("0010011"));
        assert_eq!(result.error_position, 2);
        assert_eq!(result.data, "1011");
    }

    #[test]
    fn double_flip_is_miscorrected() {
        // Flipping positions 1 and 2 yields the syndrome for position 3.
        let result = decode(&bits("1010011"));
        assert_eq!(result.error_position, 3);
        assert_ne!(result.data, "1011");
    }

    #[test]
    fn round_trip_random_shapes() {
        for data in ["0", "10", "110100", "1111111111", "010101010101010"] {
            let encoded = encode(&bits(data));
            let decoded = decode(&bits(&encoded.code));
            assert_eq!(decoded.error_position, 0, "data {data}");
            assert_eq!(decoded.data, data, "data {data}");
        }
    }
}
