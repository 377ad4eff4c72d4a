//! Arabic-Indic digit rendering.

/// Replace ASCII digits with Arabic-Indic digits, leaving everything else
/// alone. Used for verse references and dates shown inside Arabic text.
pub fn to_arabic_digits(text: &str) -> String {
    const DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => DIGITS[d as usize],
            _ => c,
        })
        .collect()
}
