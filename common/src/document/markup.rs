//! Serializes a [`FormLayout`] to a single self-contained HTML page.
//!
//! The page references nothing outside itself: styles are inline and
//! signatures are embedded as data URLs, so it renders with no network or
//! filesystem access.

use crate::document::layout::{
    FormLayout, HeaderRow, PlacementItem, SignatureMark, SignatureSlot, REQUIRED_DOCUMENTS,
    REQUIRED_DOCUMENTS_LABEL, REQUIRED_DOCUMENTS_NUMBER, SIGNATURE_MAX_HEIGHT_PX,
    SIGNATURE_MAX_WIDTH_PX,
};

const STYLE: &str = "@page { size: A4; margin: 15mm; }\n\
body { font-family: Arial, sans-serif; font-size: 11px; color: #000; }\n\
h1 { font-size: 15px; text-align: center; margin: 0; }\n\
p.subtitle { text-align: center; margin: 2px 0 12px 0; }\n\
table { border-collapse: collapse; width: 100%; }\n\
td { vertical-align: top; padding: 1px 4px; }\n\
td.label { width: 32%; }\n\
td.separator { width: 2%; }\n\
td.number { width: 4%; }\n\
td.column { width: 50%; }\n\
td.signature { width: 50%; text-align: center; }\n\
div.signature-placeholder { height: 80px; width: 180px; margin: 0 auto; border-bottom: 1px solid #000; }\n\
img.signature { display: block; margin: 0 auto; }\n\
p.notes, p.attachment, p.closing { margin: 4px 0; }\n";

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escapes `input` and keeps its line breaks.
fn escape_multiline(input: &str) -> String {
    input
        .lines()
        .map(escape_html)
        .collect::<Vec<_>>()
        .join("<br>")
}

pub fn write_markup(layout: &FormLayout) -> String {
    let mut out = String::with_capacity(8 * 1024);

    out.push_str("<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(layout.title)));
    out.push_str(&format!("<style>\n{}</style>\n</head>\n<body>\n", STYLE));

    out.push_str(&format!("<h1>{}</h1>\n", escape_html(layout.title)));
    out.push_str(&format!(
        "<p class=\"subtitle\">{}</p>\n",
        escape_html(layout.subtitle)
    ));

    write_header(&mut out, &layout.header);

    out.push_str("<table class=\"columns\">\n<tr>\n<td class=\"column\">\n");
    write_checklist(&mut out, layout);
    out.push_str("</td>\n<td class=\"column\">\n");
    for item in &layout.placements {
        write_placement(&mut out, item);
    }
    out.push_str("</td>\n</tr>\n</table>\n");

    out.push_str("<p><strong>Catatan:</strong></p>\n");
    out.push_str(&format!(
        "<p class=\"notes\">{}</p>\n",
        escape_multiline(&layout.notes)
    ));
    out.push_str(&format!(
        "<p class=\"attachment\">{}</p>\n",
        escape_html(layout.attachment_notice)
    ));
    out.push_str(&format!(
        "<p class=\"closing\">{}</p>\n",
        escape_html(layout.closing)
    ));

    out.push_str("<table class=\"signatures\">\n<tr>\n");
    for slot in &layout.signatures {
        write_signature(&mut out, slot);
    }
    out.push_str("</tr>\n</table>\n</body>\n</html>\n");

    out
}

fn write_header(out: &mut String, rows: &[HeaderRow]) {
    out.push_str("<table class=\"header\">\n");
    for row in rows {
        out.push_str(&format!(
            "<tr><td class=\"label\">{}</td><td class=\"separator\">:</td><td class=\"value\">{}</td></tr>\n",
            escape_html(row.label),
            escape_multiline(&row.value)
        ));
    }
    out.push_str("</table>\n");
}

fn write_checklist(out: &mut String, layout: &FormLayout) {
    out.push_str("<table class=\"checklist\">\n");
    for item in &layout.obligations {
        out.push_str(&format!(
            "<tr><td class=\"number\">{}.</td><td class=\"item\">{}</td><td class=\"separator\">:</td><td class=\"answer\">{}</td></tr>\n",
            item.number,
            escape_html(item.label),
            item.answer
        ));
    }
    out.push_str("</table>\n");

    out.push_str(&format!(
        "<p class=\"item\">{}. {}:</p>\n<ol type=\"a\" class=\"documents\">\n",
        REQUIRED_DOCUMENTS_NUMBER,
        escape_html(REQUIRED_DOCUMENTS_LABEL)
    ));
    for document in REQUIRED_DOCUMENTS {
        out.push_str(&format!("<li>{}</li>\n", escape_html(document)));
    }
    out.push_str("</ol>\n");
}

fn write_placement(out: &mut String, item: &PlacementItem) {
    out.push_str(&format!(
        "<p class=\"item\">{}. {}: <span class=\"selection\">{}</span></p>\n<ul class=\"clauses\">\n",
        item.number,
        escape_html(item.label),
        escape_html(item.selection)
    ));
    for clause in &item.clauses {
        out.push_str(&format!("<li>{}</li>\n", escape_html(clause)));
    }
    out.push_str("</ul>\n");
}

fn write_signature(out: &mut String, slot: &SignatureSlot) {
    out.push_str(&format!(
        "<td class=\"signature\">\n<p class=\"heading\">{}</p>\n",
        escape_html(&slot.heading)
    ));
    match &slot.mark {
        SignatureMark::Image(image) => out.push_str(&format!(
            "<img class=\"signature\" src=\"{}\" alt=\"Tanda tangan {}\" style=\"max-width: {}px; max-height: {}px;\">\n",
            escape_html(image.as_str()),
            escape_html(&slot.heading),
            SIGNATURE_MAX_WIDTH_PX,
            SIGNATURE_MAX_HEIGHT_PX
        )),
        SignatureMark::Line => out.push_str("<div class=\"signature-placeholder\"></div>\n"),
    }
    out.push_str(&format!(
        "<p class=\"name\">{}</p>\n</td>\n",
        escape_html(&slot.name)
    ));
}
