use std::borrow::Cow;

// control characters that may not appear in XML 1.0 text are replaced by this
const CONTROL_REPLACEMENT: char = ' ';

const CDATA_SPLIT: &str = "]]><![CDATA[";

fn predefined_entity(b: u8) -> Option<&'static str> {
    match b {
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        b'&' => Some("&amp;"),
        b'"' => Some("&quot;"),
        b'\'' => Some("&apos;"),
        _ => None,
    }
}

/// Escape the five XML-significant characters.
///
/// Unescaped runs are copied as whole slices. If nothing needs escaping the
/// content is returned as is.
pub(crate) fn serialize_predefined_entities(content: &str) -> Cow<'_, str> {
    let mut result = String::new();
    let mut start = 0;
    // all of the escaped characters are ASCII, so byte positions are always
    // on a char boundary
    for (i, b) in content.bytes().enumerate() {
        if let Some(entity) = predefined_entity(b) {
            result.push_str(&content[start..i]);
            result.push_str(entity);
            start = i + 1;
        }
    }

    if result.is_empty() {
        content.into()
    } else {
        result.push_str(&content[start..]);
        result.into()
    }
}

fn is_restricted_control(c: char) -> bool {
    c < ' ' && !matches!(c, '\t' | '\n' | '\r')
}

/// Replace control characters that XML 1.0 does not allow by a space.
pub(crate) fn sanitize_control_characters(content: &str) -> Cow<'_, str> {
    if !content.chars().any(is_restricted_control) {
        return content.into();
    }
    content
        .chars()
        .map(|c| {
            if is_restricted_control(c) {
                CONTROL_REPLACEMENT
            } else {
                c
            }
        })
        .collect::<String>()
        .into()
}

/// Split any `]]>` in CDATA content over two sections.
///
/// `brackets` is the number of `]` (at most two) that ended the content
/// written so far into the same section, so a terminator spread over two
/// writes is split as well.
pub(crate) fn split_cdata_terminators<'a>(content: &'a str, brackets: &mut u8) -> Cow<'a, str> {
    let mut result = String::new();
    let mut start = 0;
    for (i, b) in content.bytes().enumerate() {
        match b {
            b']' => *brackets = (*brackets + 1).min(2),
            b'>' if *brackets == 2 => {
                result.push_str(&content[start..i]);
                result.push_str(CDATA_SPLIT);
                start = i;
                *brackets = 0;
            }
            _ => *brackets = 0,
        }
    }

    if result.is_empty() {
        content.into()
    } else {
        result.push_str(&content[start..]);
        result.into()
    }
}
