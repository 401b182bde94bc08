use pest::Parser;
use pest::iterators::Pair;

use crate::html::is_void_element;
use crate::{Props, VNode};

#[derive(pest_derive::Parser)]
#[grammar = "fragment.pest"]
struct FragmentParser;

/// Parses template markup into its top-level nodes, in source order.
///
/// The tokenizer is strict about the shape of each tag, so an unterminated
/// tag or quoted attribute is an error. Nesting is forgiving, the way a
/// browser builds a fragment:
///
/// - end tags match their start tag ignoring ASCII case;
/// - an end tag closes every element opened after its match, and an end tag
///   with no open match is dropped;
/// - some start tags close an open sibling first (`li`, `p`, table cells);
/// - elements still open at the end of input are closed there.
///
/// Comments are kept, doctypes are dropped, tag and attribute names are
/// lowercased, `<x/>` closes immediately, and character references are
/// decoded everywhere except inside `script` and `style`.
pub fn parse_fragment(source: &str) -> Result<Vec<VNode>, String> {
    let mut pairs = FragmentParser::parse(Rule::fragment, source).map_err(|e| e.to_string())?;
    let fragment = pairs.next().ok_or_else(|| "empty fragment".to_string())?;

    let mut builder = TreeBuilder::default();
    for token in fragment.into_inner() {
        match token.as_rule() {
            Rule::text => builder.append(VNode::Text(decode_entities(token.as_str()))),
            Rule::comment => {
                let body = token.into_inner().next().map(|p| p.as_str()).unwrap_or("");
                builder.append(VNode::Comment(body.to_string()));
            }
            Rule::raw_element => builder.raw_element(token),
            Rule::start_tag => builder.start_tag(token),
            Rule::end_tag => {
                let name = token.into_inner().next().map(|p| p.as_str()).unwrap_or("");
                builder.end_tag(&name.to_ascii_lowercase());
            }
            // EOI
            _ => {}
        }
    }
    Ok(builder.finish())
}

/// An element whose end tag has not been seen yet.
#[derive(Debug)]
struct OpenElement {
    tag: String,
    props: Props,
    children: Vec<VNode>,
}

impl OpenElement {
    fn new(tag: String, props: Props) -> Self {
        Self {
            tag,
            props,
            children: Vec::new(),
        }
    }

    fn into_vnode(self) -> VNode {
        VNode::Element {
            tag: self.tag,
            props: self.props,
            children: self.children,
        }
    }
}

/// Start tags that close an open `p` first.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "menu", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// Elements an implied `p` end never looks past.
const PARAGRAPH_BOUNDARY: &[&str] = &[
    "button", "caption", "object", "table", "td", "template", "th",
];

/// For a start tag, the open elements it implicitly ends and the elements
/// the search stops at.
fn implied_end(tag: &str) -> Option<(&'static [&'static str], &'static [&'static str])> {
    let rule: (&'static [&'static str], &'static [&'static str]) = match tag {
        "li" => (&["li"], &["ol", "ul", "menu"]),
        "dt" | "dd" => (&["dt", "dd"], &["dl"]),
        "option" => (&["option"], &["select", "datalist", "optgroup"]),
        "optgroup" => (&["optgroup", "option"], &["select"]),
        "thead" | "tbody" | "tfoot" => (&["thead", "tbody", "tfoot"], &["table"]),
        "tr" => (&["tr"], &["table", "thead", "tbody", "tfoot"]),
        "td" | "th" => (&["td", "th"], &["tr", "table"]),
        _ => return None,
    };
    Some(rule)
}

/// Rebuilds nesting from the token stream with a stack of open elements.
#[derive(Debug, Default)]
struct TreeBuilder {
    roots: Vec<VNode>,
    open: Vec<OpenElement>,
}

impl TreeBuilder {
    fn append(&mut self, node: VNode) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    /// Closes open elements until only `depth` remain.
    fn close_to(&mut self, depth: usize) {
        while self.open.len() > depth {
            if let Some(element) = self.open.pop() {
                self.append(element.into_vnode());
            }
        }
    }

    /// Closes the innermost open element named in `targets`, unless one of
    /// `boundaries` is open inside it.
    fn close_nearest(&mut self, targets: &[&str], boundaries: &[&str]) {
        for depth in (0..self.open.len()).rev() {
            let tag = self.open[depth].tag.as_str();
            if targets.contains(&tag) {
                self.close_to(depth);
                return;
            }
            if boundaries.contains(&tag) {
                return;
            }
        }
    }

    fn start_tag(&mut self, token: Pair<Rule>) {
        let mut tag = String::new();
        let mut props = Props::new();
        let mut self_closing = false;
        for part in token.into_inner() {
            match part.as_rule() {
                Rule::tag_name => tag = part.as_str().to_ascii_lowercase(),
                Rule::attribute => insert_attr(&mut props, part),
                Rule::self_closing => self_closing = true,
                _ => {}
            }
        }

        if CLOSES_PARAGRAPH.contains(&tag.as_str()) {
            self.close_nearest(&["p"], PARAGRAPH_BOUNDARY);
        }
        if let Some((targets, boundaries)) = implied_end(&tag) {
            self.close_nearest(targets, boundaries);
        }

        let element = OpenElement::new(tag, props);
        if self_closing || is_void_element(&element.tag) {
            self.append(element.into_vnode());
        } else {
            self.open.push(element);
        }
    }

    fn end_tag(&mut self, name: &str) {
        if let Some(depth) = self.open.iter().rposition(|e| e.tag == name) {
            self.close_to(depth);
        }
    }

    fn raw_element(&mut self, token: Pair<Rule>) {
        let mut element = OpenElement::new(String::new(), Props::new());
        for part in token.into_inner() {
            match part.as_rule() {
                // the second `raw_name` is the end tag
                Rule::raw_name if element.tag.is_empty() => {
                    element.tag = part.as_str().to_ascii_lowercase();
                }
                Rule::attribute => insert_attr(&mut element.props, part),
                Rule::raw_text if !part.as_str().is_empty() => {
                    let raw = part.as_str();
                    let content = if matches!(element.tag.as_str(), "textarea" | "title") {
                        decode_entities(raw)
                    } else {
                        raw.to_string()
                    };
                    element.children.push(VNode::Text(content));
                }
                _ => {}
            }
        }
        self.append(element.into_vnode());
    }

    fn finish(mut self) -> Vec<VNode> {
        self.close_to(0);
        self.roots
    }
}

/// Adds one parsed attribute; the first occurrence of a name wins, as in HTML.
fn insert_attr(props: &mut Props, attr: Pair<Rule>) {
    let mut name = String::new();
    let mut value = String::new();
    for part in attr.into_inner() {
        match part.as_rule() {
            Rule::attr_name => name = part.as_str().to_ascii_lowercase(),
            Rule::dq_value | Rule::sq_value | Rule::unquoted_value => {
                value = decode_entities(part.as_str())
            }
            _ => {}
        }
    }
    if props.get(&name).is_none() {
        props.insert(name, value);
    }
}

/// Longest reference we try to decode, `&` and `;` included.
const MAX_REFERENCE_LEN: usize = 12;

pub fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let decoded = tail
            .find(';')
            .filter(|&end| end < MAX_REFERENCE_LEN)
            .and_then(|end| decode_reference(&tail[1..end]).map(|ch| (ch, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
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

/// Named references this decoder knows. Any other name is kept verbatim.
const NAMED_REFERENCES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("iexcl", '\u{a1}'),
    ("cent", '\u{a2}'),
    ("pound", '\u{a3}'),
    ("yen", '\u{a5}'),
    ("sect", '\u{a7}'),
    ("copy", '\u{a9}'),
    ("laquo", '\u{ab}'),
    ("shy", '\u{ad}'),
    ("reg", '\u{ae}'),
    ("deg", '\u{b0}'),
    ("plusmn", '\u{b1}'),
    ("sup2", '\u{b2}'),
    ("sup3", '\u{b3}'),
    ("micro", '\u{b5}'),
    ("para", '\u{b6}'),
    ("middot", '\u{b7}'),
    ("raquo", '\u{bb}'),
    ("frac14", '\u{bc}'),
    ("frac12", '\u{bd}'),
    ("frac34", '\u{be}'),
    ("iquest", '\u{bf}'),
    ("times", '\u{d7}'),
    ("divide", '\u{f7}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'),
    ("bull", '\u{2022}'),
    ("hellip", '\u{2026}'),
    ("euro", '\u{20ac}'),
    ("trade", '\u{2122}'),
    ("larr", '\u{2190}'),
    ("uarr", '\u{2191}'),
    ("rarr", '\u{2192}'),
    ("darr", '\u{2193}'),
    ("harr", '\u{2194}'),
];

fn decode_reference(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        // NUL, surrogates and out-of-range code points
        return Some(match code {
            0 => char::REPLACEMENT_CHARACTER,
            _ => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
        });
    }
    NAMED_REFERENCES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, ch)| ch)
}
