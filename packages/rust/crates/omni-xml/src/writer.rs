//! Serialization of an [`Element`] tree back into a document.

use crate::element::Element;

/// Declaration line written at the top of every document.
pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>\n";

/// Render `root` as a complete document, declaration included.
#[must_use]
pub fn to_document_string(root: &Element) -> String {
    let mut out = String::from(XML_DECLARATION);
    write_element(&mut out, root);
    out
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.tag());
    for (name, value) in element.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(out, value, true);
        out.push('"');
    }

    let text = element.text().filter(|t| !t.is_empty());
    if text.is_none() && element.is_empty() {
        out.push_str(" />");
    } else {
        out.push('>');
        if let Some(text) = text {
            escape_into(out, text, false);
        }
        for child in element.children() {
            write_element(out, child);
        }
        out.push_str("</");
        out.push_str(element.tag());
        out.push('>');
    }

    if let Some(tail) = element.tail() {
        escape_into(out, tail, false);
    }
}

fn escape_into(out: &mut String, raw: &str, attribute: bool) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\n' if attribute => out.push_str("&#10;"),
            '\r' if attribute => out.push_str("&#13;"),
            '\t' if attribute => out.push_str("&#09;"),
            _ => out.push(ch),
        }
    }
}
