/// Format an f64 so that parsing the text yields the same value and the same kind.
///
/// Finite values use the shortest round-trip digits from `ryu`, which always carry a `.`
/// or an exponent, so `1.0` stays a float. Non-finite values use `inf`, `-inf` and `nan`.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        return String::from("nan");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "inf" } else { "-inf" });
    }
    let mut buf = ryu::Buffer::new();
    buf.format_finite(value).to_owned()
}

/// Strip `_` digit separators from a validated numeric token.
pub(crate) fn strip_separators(token: &str) -> std::borrow::Cow<'_, str> {
    if token.contains('_') {
        std::borrow::Cow::Owned(token.chars().filter(|&c| c != '_').collect())
    } else {
        std::borrow::Cow::Borrowed(token)
    }
}
