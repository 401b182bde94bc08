//! Single-pass placeholder scanner.
//!
//! A placeholder is `{{` + identifier + `}}` with no inner whitespace. The
//! identifier starts with a Unicode letter or `_` and continues with letters,
//! digits or `_`. Everything else, including malformed braces, is literal.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    /// The identifier between the braces.
    Placeholder(&'a str),
}

impl Segment<'_> {
    /// Number of bytes this segment spans in the scanned text.
    pub fn source_len(&self) -> usize {
        match self {
            Segment::Literal(s) => s.len(),
            Segment::Placeholder(name) => name.len() + 4,
        }
    }
}

pub fn segments(text: &str) -> Segments<'_> {
    Segments { text, pos: 0 }
}

/// Identifiers of every placeholder in `text`, in order, repeats included.
pub fn placeholders(text: &str) -> impl Iterator<Item = &str> {
    segments(text).filter_map(|s| match s {
        Segment::Placeholder(name) => Some(name),
        Segment::Literal(_) => None,
    })
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Matches a placeholder at the very start of `s`; returns the identifier and
/// the byte length of the whole token.
fn placeholder_at(s: &str) -> Option<(&str, usize)> {
    let body = s.strip_prefix("{{")?;
    if !body.chars().next().is_some_and(is_ident_start) {
        return None;
    }
    let end = body.find(|c: char| !is_ident_continue(c)).unwrap_or(body.len());
    body[end..].starts_with("}}").then(|| (&body[..end], end + 4))
}

#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let rest = &self.text[self.pos..];
        if rest.is_empty() {
            return None;
        }
        if let Some((name, len)) = placeholder_at(rest) {
            self.pos += len;
            return Some(Segment::Placeholder(name));
        }

        // literal up to the next `{{` that opens a valid placeholder
        let mut from = 0;
        let end = loop {
            match rest[from..].find("{{") {
                None => break rest.len(),
                Some(off) => {
                    let at = from + off;
                    if at > 0 && placeholder_at(&rest[at..]).is_some() {
                        break at;
                    }
                    from = at + 1;
                }
            }
        };
        self.pos += end;
        Some(Segment::Literal(&rest[..end]))
    }
}
