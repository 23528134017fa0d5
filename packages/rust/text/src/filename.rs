//! Filesystem-safe name components (Windows rules are the strictest, so we follow them).

/// Default maximum length of a sanitized component, in characters.
pub const DEFAULT_MAX_LEN: usize = 120;

const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

fn strip_trailing_dots_spaces(s: &str) -> &str {
    s.trim_end_matches([' ', '.'])
}

/// Make `input` safe to use as (part of) a filename on Windows, macOS and Linux.
///
/// `ё`/`Ё` become `е`/`Е`, forbidden characters (`<>:"/\|?*` and ASCII control
/// characters) become spaces, whitespace collapses, trailing dots/spaces go,
/// reserved device names get a `_` prefix, and the result is cut to `max_len`
/// characters. Never returns an empty string.
pub fn sanitize_filename_component(input: &str, max_len: usize) -> String {
    let replaced: String = input
        .chars()
        .map(|c| match c {
            'ё' => 'е',
            'Ё' => 'Е',
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => ' ',
            c if c.is_ascii_control() => ' ',
            c => c,
        })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut s = strip_trailing_dots_spaces(&collapsed).to_string();

    if s.is_empty() {
        s = "Unknown".into();
    }

    if RESERVED_NAMES.contains(&s.to_uppercase().as_str()) {
        s.insert(0, '_');
    }

    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len).collect();
        s = strip_trailing_dots_spaces(&truncated).to_string();
        if s.is_empty() {
            s = "Unknown".into();
        }
    }

    s
}
