/// Derive a human-readable label from a wire field key.
///
/// Splits camelCase, snake_case, and kebab-case keys into words and
/// title-cases each word. Runs of uppercase letters are kept together as
/// acronyms, and digit runs become their own word.
///
/// # Examples
///
/// ```
/// use ixsd_util::strings::display_label;
///
/// assert_eq!(display_label("invoiceNumber"), "Invoice Number");
/// assert_eq!(display_label("vendor_name"), "Vendor Name");
/// assert_eq!(display_label("po-box"), "Po Box");
/// assert_eq!(display_label("lineItems2"), "Line Items 2");
/// assert_eq!(display_label("DINNumber"), "DIN Number");
/// ```
pub fn display_label(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = key.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch == '_' || ch == '-' || ch == ' ' || ch == '.' {
            flush(&mut words, &mut current);
            continue;
        }
        if !current.is_empty() {
            let prev = chars[i - 1];
            let boundary = (ch.is_uppercase() && prev.is_lowercase())
                || (ch.is_ascii_digit() != prev.is_ascii_digit())
                // End of an acronym run: "DINNumber" splits before the 'N'
                // that starts "Number".
                || (ch.is_lowercase()
                    && prev.is_uppercase()
                    && current.chars().count() > 1);
            if boundary {
                if ch.is_lowercase() && prev.is_uppercase() {
                    // The previous uppercase letter belongs to this word,
                    // not the acronym run before it.
                    let head = current.pop().unwrap_or_default();
                    flush(&mut words, &mut current);
                    current.push(head);
                } else {
                    flush(&mut words, &mut current);
                }
            }
        }
        current.push(ch);
    }
    flush(&mut words, &mut current);

    words
        .iter()
        .map(|w| titlecase(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

fn titlecase(word: &str) -> String {
    // Acronyms (all uppercase) stay as-is.
    if word.chars().all(|c| !c.is_lowercase()) {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
