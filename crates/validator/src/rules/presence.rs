//! Presence and length rules.
//!
//! Both trim the value before looking at it: a field holding only
//! whitespace counts as empty.

crate::rule! {
    /// Fails when the trimmed value is empty.
    pub Required => Required;
    check(value) { !value.trim().is_empty() }
    message(locale) { locale.messages().value_required.clone() }
}

crate::rule! {
    /// Fails when the trimmed value has fewer than `min` characters.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MinLength { min: usize } => MinLength;
    check(self, value) { value.trim().chars().count() >= self.min }
    message(self, locale) { locale.messages().too_short(self.min, locale.plurals()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;
    use crate::rules::Rule;

    #[test]
    fn required() {
        assert!(Required.check("a"));
        assert!(Required.check("  a  "));
        assert!(!Required.check(""));
        assert!(!Required.check(" \t\n"));
    }

    #[test]
    fn min_length_counts_trimmed_chars() {
        let rule = MinLength::new(3);
        assert!(rule.check("abc"));
        assert!(rule.check("  abc  "));
        assert!(!rule.check(" ab "));
        assert!(rule.check("ёжик"));
        assert!(!MinLength::new(1).check("   "));
        assert!(MinLength::new(0).check(""));
    }

    #[test]
    fn min_length_message() {
        let rule = MinLength::new(3);
        assert_eq!(
            rule.message(&Locale::russian()),
            "Минимальное количество символов в этом поле — 3 символа."
        );
        assert_eq!(
            rule.message(&Locale::english()),
            "This field should contain at least 3 characters."
        );
    }
}
