use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal cells.
pub fn display_width(s: &str) -> u16 {
    UnicodeWidthStr::width(s) as u16
}
