//! String casing helpers used by the scripting surface.
//!
//! Property names cross the scripting boundary in three spellings:
//! hyphenated (`caps-lock`), camel case (`capsLock`), and capitalized
//! words (`Caps Lock`). These helpers convert between them.

use alloc::string::String;

/// Capitalizes the first letter of every word: `hello world` -> `Hello World`.
///
/// # Examples
///
/// ```
/// use sv_utils::strings::capitalize;
///
/// assert_eq!(capitalize("hello world"), "Hello World");
/// assert_eq!(capitalize("already Upper"), "Already Upper");
/// ```
pub fn capitalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if at_word_start && c.is_ascii_lowercase() {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

/// Camelizes a hyphenated string: `caps-lock` -> `capsLock`.
///
/// # Examples
///
/// ```
/// use sv_utils::strings::camelize;
///
/// assert_eq!(camelize("caps-lock"), "capsLock");
/// assert_eq!(camelize("fill-color"), "fillColor");
/// ```
pub fn camelize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = false;
    for c in input.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts a camelized string to a hyphenated one: `CapsLock` -> `caps-lock`.
///
/// # Examples
///
/// ```
/// use sv_utils::strings::hyphenate;
///
/// assert_eq!(hyphenate("CapsLock"), "caps-lock");
/// assert_eq!(hyphenate("fillColor"), "fill-color");
/// ```
pub fn hyphenate(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev_lower = false;
    for c in input.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            prev_lower = c.is_lowercase();
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_words() {
        assert_eq!(capitalize("hello world"), "Hello World");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("a-b c"), "A-B C");
    }

    #[test]
    fn camelize_hyphenated() {
        assert_eq!(camelize("caps-lock"), "capsLock");
        assert_eq!(camelize("plain"), "plain");
        assert_eq!(camelize("a-b-c"), "aBC");
    }

    #[test]
    fn hyphenate_camelized() {
        assert_eq!(hyphenate("CapsLock"), "caps-lock");
        assert_eq!(hyphenate("capsLock"), "caps-lock");
        assert_eq!(hyphenate("plain"), "plain");
    }

    #[test]
    fn casing_round_trip() {
        assert_eq!(camelize(&hyphenate("strokeColor")), "strokeColor");
    }
}
