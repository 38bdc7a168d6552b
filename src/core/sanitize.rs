// src/core/sanitize.rs

/// Decode the entities that show up in team names and number cells.
/// Unknown named entities are left untouched.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s!(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        // Entities are short; don't scan the whole document for a ';'
        let semi = tail.char_indices().take(12).find(|&(_, c)| c == ';').map(|(i, _)| i);
        match semi.and_then(|i| decode_entity(&tail[1..i]).map(|c| (i, c))) {
            Some((i, c)) => {
                out.push(c);
                rest = &tail[i + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    let c = match name {
        "nbsp" => ' ',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "minus" => '-',
        "ndash" => '–',
        "aring" => 'å',
        "Aring" => 'Å',
        "auml" => 'ä',
        "Auml" => 'Ä',
        "ouml" => 'ö',
        "Ouml" => 'Ö',
        "eacute" => 'é',
        "Eacute" => 'É',
        "uuml" => 'ü',
        "Uuml" => 'Ü',
        _ => return None,
    };
    Some(c)
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Map the typographic minus (U+2212) and dashes some tables use for
/// negative numbers onto ASCII '-'.
pub fn ascii_minus(s: &str) -> String {
    s.chars()
        .map(|c| match c { '\u{2212}' | '\u{2013}' => '-', _ => c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(normalize_entities("F&auml;rjestad&nbsp;BK"), "Färjestad BK");
        assert_eq!(normalize_entities("Lule&#229;"), "Luleå");
        assert_eq!(normalize_entities("Lule&#xE5;"), "Luleå");
        assert_eq!(normalize_entities("AT&amp;T"), "AT&T");
    }

    #[test]
    fn leaves_bare_ampersands_alone() {
        assert_eq!(normalize_entities("A & B"), "A & B");
        assert_eq!(normalize_entities("&bogus; x"), "&bogus; x");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
    }

    #[test]
    fn normalizes_minus_signs() {
        assert_eq!(ascii_minus("\u{2212}7"), "-7");
    }
}
