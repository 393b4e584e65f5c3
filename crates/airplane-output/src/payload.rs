//! Single-line JSON encoding of output values.

use serde::Serialize;

use crate::Result;

/// Encode `value` as compact, single-line JSON.
///
/// `<`, `>` and `&` are written as-is; the output is never embedded in HTML.
/// Line breaks inside strings come out escaped, and the result carries no
/// terminator of its own. Non-finite floats become `null`, which is how
/// `serde_json` renders them.
///
/// # Errors
///
/// Returns [`crate::Error::Serialization`] if the value has no JSON form, e.g.
/// a map keyed by something other than strings or integers.
pub fn encode_payload<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    Ok(strip_terminator(json))
}

fn strip_terminator(mut json: String) -> String {
    while json.ends_with(['\n', '\r']) {
        json.pop();
    }
    json
}
