/// Strips HTML tags, comments and `<script>`/`<style>` bodies from client
/// supplied text, drops control characters (newlines survive) and trims.
///
/// Tags are removed wherever they appear, text between them is kept, and a
/// `<` that cannot start a tag (`2 < 3`, `a<3`) is left alone.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match markup_len(tail) {
            Some(len) => rest = &tail[len..],
            None => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    out.retain(|c| c == '\n' || !c.is_control());
    out.trim().to_owned()
}

// byte length of the markup at the start of `s` (which begins with '<'),
// None when that '<' is plain text
fn markup_len(s: &str) -> Option<usize> {
    let after = &s[1..];

    if let Some(comment) = after.strip_prefix("!--") {
        return Some(comment.find("-->").map_or(s.len(), |end| 4 + end + 3));
    }

    let first = after.chars().next()?;
    let name_start = match first {
        '/' => &after[1..],
        '!' | '?' => return Some(tag_end(s)),
        c if c.is_ascii_alphabetic() => after,
        _ => return None,
    };
    if !name_start.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let end = tag_end(s);
    if first == '/' {
        return Some(end);
    }

    let name: String = name_start
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    if name != "script" && name != "style" {
        return Some(end);
    }

    // raw text elements lose their body too
    let body = &s[end..];
    let closing = format!("</{name}");
    match body.to_ascii_lowercase().find(&closing) {
        Some(at) => Some(end + at + tag_end(&body[at..])),
        None => Some(s.len()),
    }
}

// index just past the '>' closing the tag at the start of `s`; an attribute
// value quoted after '=' may contain '>'. Unterminated tags run to the end.
fn tag_end(s: &str) -> usize {
    let mut quote = None;
    let mut prev = '<';
    for (i, c) in s.char_indices().skip(1) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if (c == '"' || c == '\'') && prev == '=' => quote = Some(c),
            None if c == '>' => return i + 1,
            None => {}
        }
        if !c.is_whitespace() {
            prev = c;
        }
    }
    s.len()
}
