/*
 *  font.rs
 *
 *  phatline - now playing, six characters at a time
 *  (c) 2025
 *
 *  Column-major font data for the two pHAT backends. The pipeline
 *  uppercases all text, so both tables cover ASCII 0x20..=0x5F; anything
 *  outside that range renders as a blank cell.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

const FIRST_GLYPH: usize = 0x20;
const GLYPH_COUNT: usize = 64;

/// 5x7 font for the Micro Dot pHAT character cells. Each glyph is five
/// column bytes, bit 0 = top row.
pub const FONT_5X7: [[u8; 5]; GLYPH_COUNT] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5f, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7f, 0x14, 0x7f, 0x14], // '#'
    [0x24, 0x2a, 0x7f, 0x2a, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x55, 0x22, 0x50], // '&'
    [0x00, 0x05, 0x03, 0x00, 0x00], // '\''
    [0x00, 0x1c, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1c, 0x00], // ')'
    [0x14, 0x08, 0x3e, 0x08, 0x14], // '*'
    [0x08, 0x08, 0x3e, 0x08, 0x08], // '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3e, 0x51, 0x49, 0x45, 0x3e], // '0'
    [0x00, 0x42, 0x7f, 0x40, 0x00], // '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x45, 0x4b, 0x31], // '3'
    [0x18, 0x14, 0x12, 0x7f, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3c, 0x4a, 0x49, 0x49, 0x30], // '6'
    [0x01, 0x71, 0x09, 0x05, 0x03], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x06, 0x49, 0x49, 0x29, 0x1e], // '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], // ':'
    [0x00, 0x56, 0x36, 0x00, 0x00], // ';'
    [0x08, 0x14, 0x22, 0x41, 0x00], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x00, 0x41, 0x22, 0x14, 0x08], // '>'
    [0x02, 0x01, 0x51, 0x09, 0x06], // '?'
    [0x32, 0x49, 0x79, 0x41, 0x3e], // '@'
    [0x7e, 0x11, 0x11, 0x11, 0x7e], // 'A'
    [0x7f, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3e, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7f, 0x41, 0x41, 0x22, 0x1c], // 'D'
    [0x7f, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7f, 0x09, 0x09, 0x09, 0x01], // 'F'
    [0x3e, 0x41, 0x49, 0x49, 0x7a], // 'G'
    [0x7f, 0x08, 0x08, 0x08, 0x7f], // 'H'
    [0x00, 0x41, 0x7f, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3f, 0x01], // 'J'
    [0x7f, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7f, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7f, 0x02, 0x0c, 0x02, 0x7f], // 'M'
    [0x7f, 0x04, 0x08, 0x10, 0x7f], // 'N'
    [0x3e, 0x41, 0x41, 0x41, 0x3e], // 'O'
    [0x7f, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3e, 0x41, 0x51, 0x21, 0x5e], // 'Q'
    [0x7f, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x46, 0x49, 0x49, 0x49, 0x31], // 'S'
    [0x01, 0x01, 0x7f, 0x01, 0x01], // 'T'
    [0x3f, 0x40, 0x40, 0x40, 0x3f], // 'U'
    [0x1f, 0x20, 0x40, 0x20, 0x1f], // 'V'
    [0x3f, 0x40, 0x38, 0x40, 0x3f], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x07, 0x08, 0x70, 0x08, 0x07], // 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], // 'Z'
    [0x00, 0x7f, 0x41, 0x41, 0x00], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\\'
    [0x00, 0x41, 0x41, 0x7f, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
];

/// 3x5 font for the Scroll pHAT HD. Each glyph is three column bytes,
/// bit 0 = top row; rendering adds one blank spacing column per glyph.
pub const FONT_3X5: [[u8; 3]; GLYPH_COUNT] = [
    [0x00, 0x00, 0x00], // ' '
    [0x00, 0x17, 0x00], // '!'
    [0x03, 0x00, 0x03], // '"'
    [0x1f, 0x0a, 0x1f], // '#'
    [0x16, 0x1f, 0x0d], // '$'
    [0x19, 0x04, 0x13], // '%'
    [0x0a, 0x15, 0x1a], // '&'
    [0x00, 0x03, 0x00], // '\''
    [0x0e, 0x11, 0x00], // '('
    [0x00, 0x11, 0x0e], // ')'
    [0x0a, 0x04, 0x0a], // '*'
    [0x04, 0x0e, 0x04], // '+'
    [0x10, 0x08, 0x00], // ','
    [0x04, 0x04, 0x04], // '-'
    [0x00, 0x10, 0x00], // '.'
    [0x18, 0x04, 0x03], // '/'
    [0x1f, 0x11, 0x1f], // '0'
    [0x12, 0x1f, 0x10], // '1'
    [0x1d, 0x15, 0x17], // '2'
    [0x11, 0x15, 0x1f], // '3'
    [0x07, 0x04, 0x1f], // '4'
    [0x17, 0x15, 0x1d], // '5'
    [0x1f, 0x15, 0x1d], // '6'
    [0x01, 0x01, 0x1f], // '7'
    [0x1f, 0x15, 0x1f], // '8'
    [0x17, 0x15, 0x1f], // '9'
    [0x00, 0x0a, 0x00], // ':'
    [0x10, 0x0a, 0x00], // ';'
    [0x04, 0x0a, 0x11], // '<'
    [0x0a, 0x0a, 0x0a], // '='
    [0x11, 0x0a, 0x04], // '>'
    [0x01, 0x15, 0x02], // '?'
    [0x1f, 0x11, 0x17], // '@'
    [0x1e, 0x05, 0x1e], // 'A'
    [0x1f, 0x15, 0x0a], // 'B'
    [0x0e, 0x11, 0x11], // 'C'
    [0x1f, 0x11, 0x0e], // 'D'
    [0x1f, 0x15, 0x15], // 'E'
    [0x1f, 0x05, 0x05], // 'F'
    [0x0e, 0x11, 0x1d], // 'G'
    [0x1f, 0x04, 0x1f], // 'H'
    [0x11, 0x1f, 0x11], // 'I'
    [0x08, 0x10, 0x0f], // 'J'
    [0x1f, 0x04, 0x1b], // 'K'
    [0x1f, 0x10, 0x10], // 'L'
    [0x1f, 0x06, 0x1f], // 'M'
    [0x1f, 0x02, 0x1f], // 'N'
    [0x0e, 0x11, 0x0e], // 'O'
    [0x1f, 0x05, 0x02], // 'P'
    [0x0e, 0x11, 0x1e], // 'Q'
    [0x1f, 0x05, 0x1a], // 'R'
    [0x12, 0x15, 0x09], // 'S'
    [0x01, 0x1f, 0x01], // 'T'
    [0x0f, 0x10, 0x0f], // 'U'
    [0x07, 0x18, 0x07], // 'V'
    [0x1f, 0x08, 0x1f], // 'W'
    [0x1b, 0x04, 0x1b], // 'X'
    [0x03, 0x1c, 0x03], // 'Y'
    [0x19, 0x15, 0x13], // 'Z'
    [0x1f, 0x11, 0x00], // '['
    [0x03, 0x04, 0x18], // '\\'
    [0x00, 0x11, 0x1f], // ']'
    [0x02, 0x01, 0x02], // '^'
    [0x10, 0x10, 0x10], // '_'
];

fn glyph_index(c: char) -> Option<usize> {
    let c = c.to_ascii_uppercase() as usize;
    c.checked_sub(FIRST_GLYPH).filter(|i| *i < GLYPH_COUNT)
}

/// 5x7 glyph columns for `c`, blank for unsupported characters.
pub fn glyph_5x7(c: char) -> [u8; 5] {
    glyph_index(c).map(|i| FONT_5X7[i]).unwrap_or([0; 5])
}

/// 3x5 glyph columns for `c`, blank for unsupported characters.
pub fn glyph_3x5(c: char) -> [u8; 3] {
    glyph_index(c).map(|i| FONT_3X5[i]).unwrap_or([0; 3])
}
