const ABBREVIATIONS: [(&str, &str); 3] = [("st", "street"), ("rd", "road"), ("ave", "avenue")];

/// Builds the comparable form of a postal address: the four parts joined,
/// lowercased, common street abbreviations expanded and everything except
/// `a-z0-9` removed. Missing parts count as empty.
pub fn normalize_address(
    street: Option<&str>,
    city: Option<&str>,
    state: Option<&str>,
    zip: Option<&str>,
) -> String {
    let joined = [street, city, state, zip]
        .iter()
        .map(|part| part.unwrap_or(""))
        .collect::<Vec<_>>()
        .join(", ");
    let lowered = joined.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    expand_abbreviations(&collapsed)
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
        .collect()
}

fn expand_abbreviations(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut word = String::new();

    for ch in input.chars() {
        if is_word_char(ch) {
            word.push(ch);
            continue;
        }
        flush_word(&mut out, &mut word);
        out.push(ch);
    }
    flush_word(&mut out, &mut word);

    out
}

fn flush_word(out: &mut String, word: &mut String) {
    if word.is_empty() {
        return;
    }
    let expanded = ABBREVIATIONS
        .iter()
        .find(|(short, _)| *short == word.as_str())
        .map(|(_, long)| *long)
        .unwrap_or(word.as_str());
    out.push_str(expanded);
    word.clear();
}

// Word boundaries follow ASCII word characters, so "1st" stays intact while
// "st." is expanded.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::normalize_address;

    fn street_only(value: &str) -> String {
        normalize_address(Some(value), None, None, None)
    }

    #[test]
    fn normalize_address_expands_and_strips() {
        let value = normalize_address(
            Some("123 Main St"),
            Some("Springfield"),
            Some("IL"),
            Some("62704"),
        );
        assert_eq!(value, "123mainstreetspringfieldil62704");
    }

    #[test]
    fn normalize_address_expands_each_abbreviation() {
        assert_eq!(street_only("9 Oak Rd"), "9oakroad");
        assert_eq!(street_only("500 Fifth Ave."), "500fifthavenue");
        assert_eq!(street_only("12  ELM   st"), "12elmstreet");
    }

    #[test]
    fn normalize_address_only_replaces_whole_words() {
        assert_eq!(street_only("1st Stone Ave"), "1ststoneavenue");
        assert_eq!(street_only("Ardmore Rdx"), "ardmorerdx");
        assert_eq!(street_only("St_Rd"), "strd");
    }

    #[test]
    fn normalize_address_is_empty_when_all_parts_blank() {
        assert_eq!(normalize_address(None, None, None, None), "");
        assert_eq!(
            normalize_address(Some("  "), Some(""), None, Some("\t")),
            ""
        );
    }

    #[test]
    fn normalize_address_is_idempotent() {
        let inputs = [
            ("123 Main St", "Springfield", "IL", "62704"),
            ("Apt 4B, 77 Sunset Blvd", "Los Angeles", "CA", "90028"),
            ("1 Infinite Loop", "", "", ""),
            ("PO Box 12", "Rd Town", "", "00000"),
        ];
        for (street, city, state, zip) in inputs {
            let once = normalize_address(Some(street), Some(city), Some(state), Some(zip));
            let twice = street_only(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn normalize_address_is_deterministic() {
        let first = normalize_address(Some("4 Rue St"), Some("Québec"), None, None);
        let second = normalize_address(Some("4 Rue St"), Some("Québec"), None, None);
        assert_eq!(first, second);
        assert_eq!(first, "4ruestreetqubec");
    }
}
