//! OPF package document handed to `kindlegen`.

use std::fmt::Write as _;

use crate::config::DictionaryConfig;
use crate::markup::escape_html;

/// Renders the OPF 2.0 package listing every chunk document in order.
pub fn render_opf(config: &DictionaryConfig, chunk_files: &[String]) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str(
        "<package version=\"2.0\" xmlns=\"http://www.idpf.org/2007/opf\" unique-identifier=\"BookId\">\n",
    );
    out.push_str("<metadata>\n<dc-metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n");
    let _ = writeln!(out, "<dc:title>{}</dc:title>", escape_html(&config.title));
    let _ = writeln!(
        out,
        "<dc:language>{}</dc:language>",
        escape_html(&config.in_language)
    );
    let _ = writeln!(
        out,
        "<dc:identifier id=\"BookId\">{}</dc:identifier>",
        escape_html(&config.output_stem)
    );
    out.push_str("</dc-metadata>\n<x-metadata>\n");
    let _ = writeln!(
        out,
        "<DictionaryInLanguage>{}</DictionaryInLanguage>",
        escape_html(&config.in_language)
    );
    let _ = writeln!(
        out,
        "<DictionaryOutLanguage>{}</DictionaryOutLanguage>",
        escape_html(&config.out_language)
    );
    out.push_str("</x-metadata>\n</metadata>\n<manifest>\n");
    for (index, file) in chunk_files.iter().enumerate() {
        let _ = writeln!(
            out,
            "<item id=\"dictionary{}\" href=\"{}\" media-type=\"application/xhtml+xml\"/>",
            index + 1,
            escape_html(file)
        );
    }
    out.push_str("</manifest>\n<spine>\n");
    for index in 1..=chunk_files.len() {
        let _ = writeln!(out, "<itemref idref=\"dictionary{index}\"/>");
    }
    out.push_str("</spine>\n</package>\n");
    out
}
