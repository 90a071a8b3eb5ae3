//! Kindle dictionary markup.
//!
//! Entries follow the `idx:` vocabulary of the Kindle Publishing
//! Guidelines: the headword is the `idx:orth` value and every inflected form
//! becomes an `idx:iform`, so looking up `psa` on the device lands on `pies`.

use std::fmt::Write as _;

use crate::aspect::AspectLink;
use crate::inflection::DerivedForm;
use crate::lemma::Lemma;

const DOCUMENT_HEAD: &str = r#"<html xmlns:math="http://exslt.org/math" xmlns:svg="http://www.w3.org/2000/svg"
xmlns:tl="https://kindlegen.s3.amazonaws.com/AmazonKindlePublishingGuidelines.pdf"
xmlns:saxon="http://saxon.sf.net/" xmlns:xs="http://www.w3.org/2001/XMLSchema"
xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
xmlns:cx="https://kindlegen.s3.amazonaws.com/AmazonKindlePublishingGuidelines.pdf"
xmlns:dc="http://purl.org/dc/elements/1.1/"
xmlns:mbp="https://kindlegen.s3.amazonaws.com/AmazonKindlePublishingGuidelines.pdf"
xmlns:mmc="https://kindlegen.s3.amazonaws.com/AmazonKindlePublishingGuidelines.pdf"
xmlns:idx="https://kindlegen.s3.amazonaws.com/AmazonKindlePublishingGuidelines.pdf">
<head><meta http-equiv="Content-Type" content="text/html; charset=utf-8"></head>
<body>
<mbp:frameset>
"#;

const DOCUMENT_TAIL: &str = "\n</mbp:frameset>\n</body>\n</html>\n";

/// Separator between entries of one document.
pub const ENTRY_SEPARATOR: &str = "\n<hr/>\n";

/// Makes Wiktionary text safe inside element content and quoted attribute
/// values (`idx:orth value`, `idx:iform name`, OPF metadata).
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// An aspect link together with the document that holds its target.
#[derive(Debug, Clone, Copy)]
pub struct AspectReference<'a> {
    /// The resolved link.
    pub link: &'a AspectLink,
    /// File name of the markup document containing the target entry.
    pub chunk_file: &'a str,
}

/// The `idx:infl` block for `forms`, or an empty string when there are none.
pub fn inflection_markup(forms: &[DerivedForm]) -> String {
    if forms.is_empty() {
        return String::new();
    }
    let mut out = String::from("<idx:infl>\n");
    for form in forms {
        let _ = writeln!(
            out,
            r#"<idx:iform name="{}" value="{}"/>"#,
            escape_html(&form.tag_string),
            escape_html(&form.surface_form)
        );
    }
    out.push_str("</idx:infl>\n");
    out
}

/// Wraps rendered entries into one complete markup document.
pub fn render_document(entries: &[String]) -> String {
    let mut out = String::from(DOCUMENT_HEAD);
    out.push_str(&entries.join(ENTRY_SEPARATOR));
    out.push_str(DOCUMENT_TAIL);
    out
}

impl Lemma {
    /// The `<li>` items of the definition list.
    pub fn definitions_markup(&self) -> String {
        self.definitions()
            .iter()
            .map(|definition| format!("<li>{}</li>", escape_html(&definition.text)))
            .collect()
    }

    /// The complete `idx:entry` for this lemma.
    ///
    /// `forms` are the inflections to list; `aspect` adds a cross-reference
    /// to the other aspect of a verb.
    pub fn lemma_markup(&self, forms: &[DerivedForm], aspect: Option<AspectReference<'_>>) -> String {
        let headword = escape_html(self.headword());
        let mut out = String::new();

        out.push_str("<idx:entry name=\"Polish\" scriptable=\"yes\" spell=\"yes\">\n");
        let _ = writeln!(
            out,
            r#"<idx:short><a id="{}"></a>"#,
            escape_html(self.dictionary_id().unwrap_or_default())
        );
        let _ = writeln!(out, r#"<idx:orth value="{headword}"><b>{headword}</b>"#);
        out.push_str(&inflection_markup(forms));
        out.push_str("</idx:orth>\n");
        let _ = writeln!(
            out,
            "<div><i>{}</i></div>",
            escape_html(&capitalize(self.morph_category()))
        );
        if let Some(AspectReference { link, chunk_file }) = aspect {
            let _ = writeln!(
                out,
                r##"<div><i>{}</i>: <a href="{}#{}">{}</a></div>"##,
                escape_html(&link.tag),
                escape_html(chunk_file),
                escape_html(&link.target_id),
                escape_html(&link.form)
            );
        }
        if !self.machine_translated().is_empty() {
            let _ = writeln!(
                out,
                "<div><small><i>{}</i></small></div>",
                escape_html(self.machine_translated())
            );
        }
        let _ = writeln!(out, "<div><ol>{}</ol></div>", self.definitions_markup());
        out.push_str("</idx:short>\n</idx:entry>");
        out
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
