// SPDX-License-Identifier: GPL-3.0-only

//! Decoding of raw registry names and paths

/// Mac OS Roman code points for bytes 0x80..=0xFF
const MAC_ROMAN_HIGH: [char; 128] = [
    'Ä', 'Å', 'Ç', 'É', 'Ñ', 'Ö', 'Ü', 'á', 'à', 'â', 'ä', 'ã', 'å', 'ç', 'é', 'è', //
    'ê', 'ë', 'í', 'ì', 'î', 'ï', 'ñ', 'ó', 'ò', 'ô', 'ö', 'õ', 'ú', 'ù', 'û', 'ü', //
    '†', '°', '¢', '£', '§', '•', '¶', 'ß', '®', '©', '™', '´', '¨', '≠', 'Æ', 'Ø', //
    '∞', '±', '≤', '≥', '¥', 'µ', '∂', '∑', '∏', 'π', '∫', 'ª', 'º', 'Ω', 'æ', 'ø', //
    '¿', '¡', '¬', '√', 'ƒ', '≈', '∆', '«', '»', '…', '\u{a0}', 'À', 'Ã', 'Õ', 'Œ', 'œ', //
    '–', '—', '“', '”', '‘', '’', '÷', '◊', 'ÿ', 'Ÿ', '⁄', '€', '‹', '›', 'ﬁ', 'ﬂ', //
    '‡', '·', '‚', '„', '‰', 'Â', 'Ê', 'Á', 'Ë', 'È', 'Í', 'Î', 'Ï', 'Ì', 'Ó', 'Ô', //
    '\u{f8ff}', 'Ò', 'Ú', 'Û', 'Ù', 'ı', 'ˆ', '˜', '¯', '˘', '˙', '˚', '¸', '˝', '˛', 'ˇ', //
];

/// Cut a C string buffer at its first NUL
fn until_nul(raw: &[u8]) -> &[u8] {
    raw.split(|b| *b == 0).next().unwrap_or(raw)
}

/// Strict UTF-8 decoding
pub fn decode_utf8(raw: &[u8]) -> Option<String> {
    std::str::from_utf8(until_nul(raw)).ok().map(str::to_owned)
}

/// Every byte sequence is valid Mac OS Roman
pub fn decode_mac_roman(raw: &[u8]) -> String {
    until_nul(raw)
        .iter()
        .map(|&b| {
            if b < 0x80 {
                b as char
            } else {
                MAC_ROMAN_HIGH[usize::from(b - 0x80)]
            }
        })
        .collect()
}

/// UTF-8 first, Mac OS Roman when that fails
pub fn decode_name(raw: &[u8]) -> String {
    decode_utf8(raw).unwrap_or_else(|| decode_mac_roman(raw))
}
