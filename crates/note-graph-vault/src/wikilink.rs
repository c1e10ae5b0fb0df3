//! Wikilink extraction from Markdown note bodies.

use note_graph_core::LinkRef;

/// Links and embeds found in one note body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedLinks {
    /// Plain `[[target]]` links.
    pub links: Vec<LinkRef>,
    /// `![[target]]` embeds (attachments, transclusions).
    pub embeds: Vec<LinkRef>,
}

/// Drop a `#heading` or `#^block` fragment from a link target.
///
/// Both vault implementations resolve fragment links against the note they
/// point into, so the fragment itself never participates in lookup.
pub(crate) fn strip_fragment(target: &str) -> &str {
    target.split_once('#').map_or(target, |(t, _)| t)
}

/// Extract `[[wikilinks]]` and `![[embeds]]` from a note body.
///
/// Supported forms: `[[target]]`, `[[target|alias]]`, `[[target#heading]]`,
/// `[[target#^block]]`. The fragment is stripped from the target; an alias
/// becomes the display text, otherwise the target text is displayed as-is.
pub fn extract_wikilinks(content: &str) -> ExtractedLinks {
    let mut out = ExtractedLinks::default();

    let bytes = content.as_bytes();
    let mut pos = 0;
    while let Some(open) = content[pos..].find("[[") {
        let open = pos + open;
        let Some(close) = content[open + 2..].find("]]") else {
            break;
        };
        let close = open + 2 + close;
        let inner = &content[open + 2..close];
        pos = close + 2;

        let is_embed = open > 0 && bytes[open - 1] == b'!';

        let (target, alias) = match inner.split_once('|') {
            Some((t, a)) => (t, Some(a)),
            None => (inner, None),
        };
        let target = strip_fragment(target).trim();

        if target.is_empty() {
            continue;
        }

        let link = match alias {
            Some(alias) if !alias.trim().is_empty() => LinkRef::with_alias(target, alias.trim()),
            _ => LinkRef::new(target),
        };

        if is_embed {
            out.embeds.push(link);
        } else {
            out.links.push(link);
        }
    }

    out
}
