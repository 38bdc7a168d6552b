// src/core/html.rs
// Tag-block scanning over raw markup. Deliberately naive: no tree, no nesting
// awareness, ASCII case-insensitive on tag names.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Position of the next `<tag` opener at or after `from` in an already
/// lowercased haystack. `<tr` must not match `<track`, so the byte after the
/// name has to end the name.
fn find_opener(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = join!("<", tag);
    let mut at = from;
    loop {
        let start = lc.get(at..)?.find(&pat)? + at;
        let after = start + pat.len();
        match lc.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(start),
            None => return None,
            _ => at = after,
        }
    }
}

/// Position of the next `<tag` opener at or after `from` in `s`.
pub fn find_tag_ci(s: &str, tag: &str, from: usize) -> Option<usize> {
    find_opener(&to_lower(s), &to_lower(tag), from)
}

/// Find the next complete `<tag …>…</tag>` block from `from` onwards.
/// Returns byte offsets `(start_of_opener, end_of_closer)` into `s`.
pub fn next_tag_block_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    next_block_in(s, &to_lower(s), &to_lower(tag), from)
}

/// Block search against a lowercased copy of `s`. `to_lower` keeps byte
/// offsets, so positions found in `lc` index `s` directly.
fn next_block_in(s: &str, lc: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let close = join!("</", tag, ">");

    let start = find_opener(lc, tag, from)?;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&close)?;
    Some((start, open_end + end_rel + close.len()))
}

/// All `<tag>` blocks inside `s`, in document order.
pub fn tag_blocks_ci<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = to_lower(s);
    let tag = to_lower(tag);

    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b_s, b_e)) = next_block_in(s, &lc, &tag, pos) {
        out.push(&s[b_s..b_e]);
        pos = b_e;
    }
    out
}

/// Given a complete tag block like `<td ...>INNER</td>`,
/// return INNER (may still contain nested tags).
pub fn inner_after_open_tag(block: &str) -> &str {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return &block[oe + 1..cs];
            }
        }
    }
    ""
}

/// Drop every `<...>` run, then collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// Visible text of a cell block: tags stripped, entities decoded, trimmed.
pub fn cell_text(block: &str) -> String {
    let inner = inner_after_open_tag(block);
    super::sanitize::normalize_ws(&super::sanitize::normalize_entities(&strip_tags(inner)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_blocks_case_insensitively() {
        let doc = "<div><TABLE class=x><tr><td>1</td></tr></TABLE></div>";
        let (s, e) = next_tag_block_ci(doc, "table", 0).unwrap();
        assert_eq!(&doc[s..e], "<TABLE class=x><tr><td>1</td></tr></TABLE>");
    }

    #[test]
    fn opener_needs_a_name_boundary() {
        let doc = "<track src=a></track><tr><td>x</td></tr>";
        let rows = tag_blocks_ci(doc, "tr");
        assert_eq!(rows, vec!["<tr><td>x</td></tr>"]);
    }

    #[test]
    fn collects_all_blocks_in_order() {
        let row = "<tr><td>A</td><td class=\"num\"> 2 </td><th>h</th></tr>";
        let cells = tag_blocks_ci(row, "td");
        assert_eq!(cells.len(), 2);
        assert_eq!(cell_text(cells[1]), "2");
    }

    #[test]
    fn cell_text_strips_nested_markup() {
        let td = "<td>\n  <a href=\"/lag/fbk\"><span>Frölunda</span>&nbsp;HC</a>\n</td>";
        assert_eq!(cell_text(td), "Frölunda HC");
    }

    #[test]
    fn missing_closer_yields_none() {
        assert!(next_tag_block_ci("<table><tr>", "table", 0).is_none());
        assert_eq!(find_tag_ci("<p>x</p><Table><tr>", "table", 0), Some(8));
    }

    #[test]
    fn block_offsets_survive_mixed_case_and_multibyte_text() {
        let doc = "<TR><TD>Växjö</TD><td>Örebro</Td></TR><tr class=x><tD>Malmö</td></tr>";
        let rows = tag_blocks_ci(doc, "tr");
        assert_eq!(rows, vec![
            "<TR><TD>Växjö</TD><td>Örebro</Td></TR>",
            "<tr class=x><tD>Malmö</td></tr>",
        ]);

        let cells: Vec<String> = tag_blocks_ci(rows[0], "TD").into_iter().map(cell_text).collect();
        assert_eq!(cells, vec!["Växjö", "Örebro"]);

        let mut walked = Vec::new();
        let mut pos = 0;
        while let Some((s, e)) = next_tag_block_ci(doc, "tr", pos) {
            walked.push(&doc[s..e]);
            pos = e;
        }
        assert_eq!(walked, rows);
    }
}
