//! Display-title derivation from file and directory names.

/// Derive a display title from a file stem.
///
/// Separators (`-`, `_`) become spaces and the first letter is uppercased:
/// "my-page" → "My page".
pub fn filename_to_title(stem: &str) -> String {
    let spaced = stem.replace(['-', '_'], " ");
    capitalize(&spaced)
}

/// Uppercase the letter starting every alphabetic run, keeping separators:
/// "my-posts" → "My-Posts".
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;

    for c in name.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_to_title_hyphens() {
        assert_eq!(filename_to_title("my-page"), "My page");
    }

    #[test]
    fn test_filename_to_title_underscores() {
        assert_eq!(filename_to_title("release_notes"), "Release notes");
    }

    #[test]
    fn test_filename_to_title_mixed_separators() {
        assert_eq!(filename_to_title("a-b_c"), "A b c");
    }

    #[test]
    fn test_filename_to_title_lowercases_rest() {
        assert_eq!(filename_to_title("README"), "Readme");
    }

    #[test]
    fn test_filename_to_title_empty() {
        assert_eq!(filename_to_title(""), "");
    }

    #[test]
    fn test_title_case_single_word() {
        assert_eq!(title_case("posts"), "Posts");
    }

    #[test]
    fn test_title_case_keeps_separators() {
        assert_eq!(title_case("my-posts"), "My-Posts");
        assert_eq!(title_case("my_posts"), "My_Posts");
    }

    #[test]
    fn test_title_case_already_cased() {
        assert_eq!(title_case("MY-POSTS"), "My-Posts");
    }

    #[test]
    fn test_capitalize_unicode() {
        assert_eq!(capitalize("über"), "Über");
    }
}
