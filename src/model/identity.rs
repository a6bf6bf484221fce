/// Derives the stable rider identifier from a raw result-sheet name:
/// lowercase, then strip everything outside `[a-z0-9]`.
///
/// Differently-spelled names that fold to the same identifier are merged
/// into one rider. There is no separate canonicalization step; result
/// sheets spell the same rider inconsistently ("McGrath, J." vs
/// "J McGrath") and the fold is what unifies them.
pub fn rider_id(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
