/// Whether an `expires` query value is in the past relative to `now`.
///
/// Absent, empty and `0` values never expire. Anything that is not an
/// integer unix timestamp counts as expired.
pub fn has_expired(expires: Option<&str>, now: i64) -> bool {
    match expires.map(str::trim) {
        None | Some("") | Some("0") => false,
        Some(value) => match value.parse::<i64>() {
            Ok(timestamp) => now > timestamp,
            Err(_) => true,
        },
    }
}
