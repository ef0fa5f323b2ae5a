//! Markup stripping for text fragments destined for a plain-text tagged format.
//!
//! Upstream parsers hand over field values that may still carry inline markup
//! (formatting tags, math wrappers, stray entities). [`detag`] classifies every
//! tag in a fragment into three buckets: *danger* tags whose whole subtree is
//! deleted, *keep* tags left structurally intact, and everything else, which is
//! unwrapped so only its text survives. Small-caps (`<sc>`) text is upper-cased
//! on unwrap to approximate the rendering in a plain-text target.

use once_cell::sync::Lazy;
use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use tracing::debug;

/// Tags whose content is destructive or unwanted; deleted with all descendants.
const DANGER_TAGS: &[&str] = &["php", "script", "css"];

/// Double-escaped entities like `&amp;gt;` collapse back to `&gt;`.
static FIX_AMPERSAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"&amp;(.*?);").unwrap());

/// Strip markup from `fragment`, preserving the tags named in `tags_keep`.
///
/// Never fails: a fragment that cannot be walked as markup (mismatched tags,
/// bare `<` characters) degrades to a raw passthrough of the original text,
/// with only the string-level cleanups applied.
pub fn detag(fragment: &str, tags_keep: &[&str]) -> String {
    let stripped = match strip_tags(fragment, tags_keep) {
        Some(s) => s,
        None => {
            debug!("fragment could not be walked as markup, passing through raw");
            fragment.to_string()
        }
    };

    let fixed = FIX_AMPERSAND.replace_all(&stripped, "&$1;");
    fixed
        .replace('\n', " ")
        .replace("  ", " ")
        .replace("&nbsp;", " ")
}

/// Walk the fragment's tags, returning `None` on any structural failure.
///
/// Text content is carried through byte-for-byte (no entity expansion) so the
/// ampersand repair in [`detag`] still sees the original escapes.
fn strip_tags(fragment: &str, tags_keep: &[&str]) -> Option<String> {
    let mut reader = Reader::from_str(fragment);
    let mut out = String::with_capacity(fragment.len());
    // depth of enclosing <sc> elements being unwrapped
    let mut smallcaps_depth = 0usize;

    loop {
        match reader.read_event().ok()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
                if DANGER_TAGS.contains(&name.as_str()) {
                    reader.read_to_end(e.name()).ok()?;
                } else if tags_keep.contains(&name.as_str()) {
                    out.push('<');
                    out.push_str(&String::from_utf8_lossy(&e));
                    out.push('>');
                } else if name == "sc" {
                    smallcaps_depth += 1;
                }
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
                if tags_keep.contains(&name.as_str()) {
                    out.push_str("</");
                    out.push_str(&name);
                    out.push('>');
                } else if name == "sc" {
                    smallcaps_depth = smallcaps_depth.saturating_sub(1);
                }
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
                if tags_keep.contains(&name.as_str()) {
                    out.push('<');
                    out.push_str(&String::from_utf8_lossy(&e));
                    out.push_str("/>");
                }
            }
            Event::Text(e) => {
                let text = String::from_utf8_lossy(&e);
                if smallcaps_depth > 0 {
                    out.push_str(&text.to_uppercase());
                } else {
                    out.push_str(&text);
                }
            }
            Event::CData(e) => {
                out.push_str(&String::from_utf8_lossy(&e));
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    Some(out)
}
