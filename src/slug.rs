//! URL-safe identifiers derived from primary-language labels.

/// Turn a label into a lowercase, ASCII-only slug.
///
/// Cyrillic letters are transliterated, whitespace and `-`/`_` become single
/// dashes and any other character is dropped. May return an empty string.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        let mapped: &str = if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
            continue;
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_dash = true;
            continue;
        } else {
            transliterate(ch)
        };

        if mapped.is_empty() {
            continue;
        }
        if pending_dash && !out.is_empty() {
            out.push('-');
        }
        pending_dash = false;
        out.push_str(mapped);
    }

    out
}

fn transliterate(ch: char) -> &'static str {
    match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'ґ' => "g",
        'д' => "d",
        'е' => "e",
        'є' => "ye",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'і' => "i",
        'ї' => "yi",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sh",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => "",
    }
}

/// Derive a slug from `label`, using `fallback` when nothing URL-safe remains.
pub fn base_slug(label: &str, fallback: &str) -> String {
    let slug = slugify(label);
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

/// Find the first free slug in the sequence `base`, `base-2`, `base-3`, ...
///
/// `is_taken` is asked about each candidate in order.
pub fn unique_slug<E>(
    base: &str,
    mut is_taken: impl FnMut(&str) -> Result<bool, E>,
) -> Result<String, E> {
    if !is_taken(base)? {
        return Ok(base.to_string());
    }

    let mut suffix = 2usize;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !is_taken(&candidate)? {
            return Ok(candidate);
        }
        suffix += 1;
    }
}
