/// Local name of an IRI: the text after the last `#` when there is one,
/// otherwise after the last `/`, otherwise the whole string.
pub fn extract_last_part(uri: &str) -> &str {
    uri.rsplit_once('#')
        .or_else(|| uri.rsplit_once('/'))
        .map_or(uri, |(_, last)| last)
}
