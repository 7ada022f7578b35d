use std::cmp::Ordering;

// Primary strength folding for the Latin letters found in course and
// module names: accents and case are ignored on the first pass.
fn fold(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'a',
        'ç' | 'Ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => 'i',
        'ñ' | 'Ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => 'u',
        'ý' | 'ÿ' | 'Ý' => 'y',
        c => c.to_lowercase().next().unwrap_or(c),
    }
}

fn primary(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(|c| match c {
        'æ' | 'Æ' => ['a', 'e'].into_iter().take(2),
        'œ' | 'Œ' => ['o', 'e'].into_iter().take(2),
        c => [fold(c), '\0'].into_iter().take(1),
    })
}

/// Locale-aware string ordering.
///
/// Strings are first compared ignoring case and diacritics; only when
/// those are equal does the raw code point order decide.
pub fn compare(a: &str, b: &str) -> Ordering {
    primary(a).cmp(primary(b)).then_with(|| a.cmp(b))
}
