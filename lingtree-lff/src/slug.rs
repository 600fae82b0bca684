//! Filesystem-safe rendering of display names
//!
//! Directory names embed a normalized form of the node's display name so that
//! trees stay browsable, while the trailing `.id` suffix carries the actual
//! identity. The normalization is lossy on purpose: lowercase, fold common
//! Latin diacritics to ASCII, drop everything that is not `[a-z0-9]`.

/// Normalize a display name into its slug form.
///
/// `slug("Ömie")` is `"omie"`, `slug("Bininj Gun-Wok")` is `"bininjgunwok"`.
/// The result can be empty for names with no foldable characters; callers that
/// build directory names still get a valid name from the `.id` suffix.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        for lower in c.to_lowercase() {
            match fold(lower) {
                Some(folded) => out.push_str(folded),
                None if lower.is_ascii_alphanumeric() => out.push(lower),
                None => {}
            }
        }
    }
    out
}

/// ASCII fold for the diacritics that actually occur in languoid names.
/// Anything not listed here and not ASCII alphanumeric is dropped.
fn fold(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ę' | 'ě' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'ĩ' | 'ɨ' => "i",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' | 'ø' => "o",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ũ' => "u",
        'ý' | 'ÿ' => "y",
        'ç' | 'ć' | 'č' => "c",
        'ñ' | 'ń' | 'ň' => "n",
        'š' | 'ś' => "s",
        'ž' | 'ź' | 'ż' => "z",
        'ď' | 'đ' | 'ð' => "d",
        'ğ' => "g",
        'ł' => "l",
        'ŕ' | 'ř' => "r",
        'ť' => "t",
        'ŋ' => "ng",
        'þ' => "th",
        'æ' => "ae",
        'œ' => "oe",
        'ß' => "ss",
        'ʼ' | '’' | '\'' => "",
        _ => return None,
    };
    Some(folded)
}
