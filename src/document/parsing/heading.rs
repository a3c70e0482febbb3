//! Heading detection
//!
//! A paragraph is a heading marker when its style name follows the Word
//! "Heading" naming convention (`Heading 1`, `heading 2`, `Heading`). The
//! name comes from the styles part, so localized style identifiers such as
//! `berschrift1` still resolve to `heading 1`. Paragraphs whose style has no
//! name fall back to the identifier. No text heuristics are applied:
//! unstyled bold lines stay paragraphs.

use std::collections::HashMap;

/// Style identifier of a docx-rs paragraph, if it has one
pub(crate) fn paragraph_style_id(para: &docx_rs::Paragraph) -> Option<String> {
    para.property.style.as_ref().map(|style| style.val.clone())
}

/// Map of style identifier to display name for every named style
pub(crate) fn style_names(styles: &docx_rs::Styles) -> HashMap<String, String> {
    styles
        .styles
        .iter()
        .filter_map(|style| {
            // `Name` keeps its value private; its serde form is the bare string
            let name = serde_json::to_value(&style.name).ok()?;
            let name = name.as_str()?.trim();
            (!name.is_empty()).then(|| (style.style_id.clone(), name.to_string()))
        })
        .collect()
}

/// Check a style name against the heading prefix, ignoring ASCII case
pub fn is_heading_style(style: Option<&str>, prefix: &str) -> bool {
    let Some(style) = style else {
        return false;
    };

    !prefix.is_empty()
        && style
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
