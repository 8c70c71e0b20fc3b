//! Contextual shaping for Arabic-script (Persian) text.
//!
//! Raster backends draw glyphs left-to-right in logical order, which breaks
//! connected scripts: each letter must first be replaced by its contextual
//! presentation form (isolated/initial/medial/final) and each RTL word
//! reversed into visual order before rasterization.

use crate::normalize::ZWNJ;

/// Presentation forms for one letter: [isolated, final, initial, medial].
/// `'\0'` marks a missing form (right-joining letters have no initial or
/// medial shape).
fn forms(ch: char) -> Option<[char; 4]> {
    let table = match ch {
        'ء' => ['\u{FE80}', '\0', '\0', '\0'],
        'آ' => ['\u{FE81}', '\u{FE82}', '\0', '\0'],
        'أ' => ['\u{FE83}', '\u{FE84}', '\0', '\0'],
        'ؤ' => ['\u{FE85}', '\u{FE86}', '\0', '\0'],
        'إ' => ['\u{FE87}', '\u{FE88}', '\0', '\0'],
        'ئ' => ['\u{FE89}', '\u{FE8A}', '\u{FE8B}', '\u{FE8C}'],
        'ا' => ['\u{FE8D}', '\u{FE8E}', '\0', '\0'],
        'ب' => ['\u{FE8F}', '\u{FE90}', '\u{FE91}', '\u{FE92}'],
        'ة' => ['\u{FE93}', '\u{FE94}', '\0', '\0'],
        'ت' => ['\u{FE95}', '\u{FE96}', '\u{FE97}', '\u{FE98}'],
        'ث' => ['\u{FE99}', '\u{FE9A}', '\u{FE9B}', '\u{FE9C}'],
        'ج' => ['\u{FE9D}', '\u{FE9E}', '\u{FE9F}', '\u{FEA0}'],
        'ح' => ['\u{FEA1}', '\u{FEA2}', '\u{FEA3}', '\u{FEA4}'],
        'خ' => ['\u{FEA5}', '\u{FEA6}', '\u{FEA7}', '\u{FEA8}'],
        'د' => ['\u{FEA9}', '\u{FEAA}', '\0', '\0'],
        'ذ' => ['\u{FEAB}', '\u{FEAC}', '\0', '\0'],
        'ر' => ['\u{FEAD}', '\u{FEAE}', '\0', '\0'],
        'ز' => ['\u{FEAF}', '\u{FEB0}', '\0', '\0'],
        'س' => ['\u{FEB1}', '\u{FEB2}', '\u{FEB3}', '\u{FEB4}'],
        'ش' => ['\u{FEB5}', '\u{FEB6}', '\u{FEB7}', '\u{FEB8}'],
        'ص' => ['\u{FEB9}', '\u{FEBA}', '\u{FEBB}', '\u{FEBC}'],
        'ض' => ['\u{FEBD}', '\u{FEBE}', '\u{FEBF}', '\u{FEC0}'],
        'ط' => ['\u{FEC1}', '\u{FEC2}', '\u{FEC3}', '\u{FEC4}'],
        'ظ' => ['\u{FEC5}', '\u{FEC6}', '\u{FEC7}', '\u{FEC8}'],
        'ع' => ['\u{FEC9}', '\u{FECA}', '\u{FECB}', '\u{FECC}'],
        'غ' => ['\u{FECD}', '\u{FECE}', '\u{FECF}', '\u{FED0}'],
        'ف' => ['\u{FED1}', '\u{FED2}', '\u{FED3}', '\u{FED4}'],
        'ق' => ['\u{FED5}', '\u{FED6}', '\u{FED7}', '\u{FED8}'],
        'ك' => ['\u{FED9}', '\u{FEDA}', '\u{FEDB}', '\u{FEDC}'],
        'ل' => ['\u{FEDD}', '\u{FEDE}', '\u{FEDF}', '\u{FEE0}'],
        'م' => ['\u{FEE1}', '\u{FEE2}', '\u{FEE3}', '\u{FEE4}'],
        'ن' => ['\u{FEE5}', '\u{FEE6}', '\u{FEE7}', '\u{FEE8}'],
        'ه' => ['\u{FEE9}', '\u{FEEA}', '\u{FEEB}', '\u{FEEC}'],
        'و' => ['\u{FEED}', '\u{FEEE}', '\0', '\0'],
        'ى' => ['\u{FEEF}', '\u{FEF0}', '\0', '\0'],
        'ي' => ['\u{FEF1}', '\u{FEF2}', '\u{FEF3}', '\u{FEF4}'],
        'پ' => ['\u{FB56}', '\u{FB57}', '\u{FB58}', '\u{FB59}'],
        'چ' => ['\u{FB7A}', '\u{FB7B}', '\u{FB7C}', '\u{FB7D}'],
        'ژ' => ['\u{FB8A}', '\u{FB8B}', '\0', '\0'],
        'ک' => ['\u{FB8E}', '\u{FB8F}', '\u{FB90}', '\u{FB91}'],
        'گ' => ['\u{FB92}', '\u{FB93}', '\u{FB94}', '\u{FB95}'],
        'ۀ' => ['\u{FBA4}', '\u{FBA5}', '\0', '\0'],
        'ی' => ['\u{FBFC}', '\u{FBFD}', '\u{FBFE}', '\u{FBFF}'],
        _ => return None,
    };
    Some(table)
}

/// Lam-alef ligatures: [isolated, final] per alef variant following lam.
fn lam_alef(alef: char) -> Option<[char; 2]> {
    let pair = match alef {
        'آ' => ['\u{FEF5}', '\u{FEF6}'],
        'أ' => ['\u{FEF7}', '\u{FEF8}'],
        'إ' => ['\u{FEF9}', '\u{FEFA}'],
        'ا' => ['\u{FEFB}', '\u{FEFC}'],
        _ => return None,
    };
    Some(pair)
}

/// Whether a letter joins the following letter (has initial/medial forms).
fn joins_forward(table: &[char; 4]) -> bool {
    table[2] != '\0'
}

/// Whether a letter joins the preceding letter (has a final form).
fn joins_backward(table: &[char; 4]) -> bool {
    table[1] != '\0'
}

/// Replaces Arabic-script letters with their contextual presentation forms.
/// Non-Arabic characters pass through untouched and break joining, as does
/// ZWNJ, which is consumed in the process. Lam followed by an alef variant
/// collapses into the ligature.
pub fn reshape(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    // whether the previously emitted letter extends a connection to us
    let mut prev_joins = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch == ZWNJ {
            prev_joins = false;
            i += 1;
            continue;
        }

        let Some(table) = forms(ch) else {
            out.push(ch);
            prev_joins = false;
            i += 1;
            continue;
        };

        if ch == 'ل' {
            if let Some(ligature) = chars.get(i + 1).copied().and_then(lam_alef) {
                out.push(if prev_joins { ligature[1] } else { ligature[0] });
                prev_joins = false;
                i += 2;
                continue;
            }
        }

        let next_joins = chars
            .get(i + 1)
            .copied()
            .and_then(forms)
            .is_some_and(|next| joins_backward(&next));

        let connects_prev = prev_joins && joins_backward(&table);
        let connects_next = joins_forward(&table) && next_joins;
        let form = match (connects_prev, connects_next) {
            (false, false) => table[0],
            (true, false) => table[1],
            (false, true) => table[2],
            (true, true) => table[3],
        };
        out.push(form);

        prev_joins = joins_forward(&table);
        i += 1;
    }

    out
}

fn is_arabic_script(ch: char) -> bool {
    matches!(ch as u32,
        0x0600..=0x06FF | 0x0750..=0x077F | 0xFB50..=0xFDFF | 0xFE70..=0xFEFF)
}

/// Reverses each RTL token into visual order for a left-to-right canvas.
/// Tokens without Arabic-script characters are left alone, so mixed
/// Persian/Latin corpora render both correctly.
pub fn display_order(text: &str) -> String {
    text.split(' ')
        .map(|token| {
            if token.chars().any(is_arabic_script) {
                token.chars().rev().collect()
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
