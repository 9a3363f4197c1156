//! Serializer for exec-form argument arrays.
//!
//! Hand-rolled so elements join with `", "` and only quotes and
//! backslashes gain escapes; the decode side lives in the parser crate.

pub(crate) fn serialize_string_array(items: &[String]) -> String {
    let mut out = String::from("[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('"');
        for c in item.chars() {
            if matches!(c, '"' | '\\') {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('"');
    }
    out.push(']');
    out
}
