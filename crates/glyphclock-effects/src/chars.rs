//! Glyph sets used by the effects.

/// Digits and latin letters, the default particle alphabet.
pub const ALPHANUMERIC: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b',
    'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u',
    'v', 'w', 'x', 'y', 'z',
];

/// Characters that fall in the matrix rain.
pub const MATRIX_CHARS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', '.', '-', '+', '*', '=',
];

/// Clock characters used for raindrops.
pub const CLOCK_CHARS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':'];

/// Star glyphs for the space flight.
pub const STAR_CHARS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', '.', '-', '+', '*', '=', 'A', 'E', 'K',
    'M', 'R', 'X', 'Z', 'a', 'e', 'k', 'm', 'r', 'x', 'z',
];

/// Fill character for translucent glitch blocks.
pub const BLOCK_FILL: char = '░';
