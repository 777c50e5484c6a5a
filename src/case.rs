//! Case conversion for field names: user input keys (snake_case, kebab-case) -> camelCase wire names, and camelCase -> human labels.

/// Convert a single identifier from snake_case or kebab-case to camelCase.
/// e.g. "client_id" -> "clientId", "start-date" -> "startDate". camelCase input is returned unchanged.
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = !out.is_empty();
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Turn a camelCase wire name into a column label.
/// e.g. "reservationDate" -> "Reservation Date", "make" -> "Make".
pub fn humanize(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else if c == '_' {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}
