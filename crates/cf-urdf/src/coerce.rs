//! Primitive coercion of raw attribute and text values.
//!
//! Every function here is total: bad or missing input falls back to the
//! caller's default instead of failing.

use crate::types::{Rgba, Vector3};
use crate::xml::XmlValue;

/// Parse a decimal string, or return `default` if it is absent or not a number.
///
/// Surrounding whitespace is ignored. `NaN` counts as not a number.
#[must_use]
pub fn parse_number(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
        .unwrap_or(default)
}

/// Parse a whitespace-separated triple.
///
/// A missing value or a token count other than three yields `default` as a
/// whole. With exactly three tokens each component falls back on its own to
/// the matching component of `default`.
#[must_use]
pub fn parse_vector3(raw: Option<&str>, default: Vector3) -> Vector3 {
    match split_exact::<3>(raw) {
        Some([x, y, z]) => Vector3::new(
            parse_number(Some(x), default.x),
            parse_number(Some(y), default.y),
            parse_number(Some(z), default.z),
        ),
        None => default,
    }
}

/// Parse a whitespace-separated `r g b a` quadruple, with the same fallback
/// rules as [`parse_vector3`].
#[must_use]
pub fn parse_rgba(raw: Option<&str>, default: Rgba) -> Rgba {
    match split_exact::<4>(raw) {
        Some(tokens) => {
            let mut rgba = default;
            for (component, token) in rgba.iter_mut().zip(tokens) {
                *component = parse_number(Some(token), *component);
            }
            rgba
        }
        None => default,
    }
}

fn split_exact<const N: usize>(raw: Option<&str>) -> Option<[&str; N]> {
    let mut tokens = raw?.split_whitespace();
    let mut out = [""; N];
    for slot in &mut out {
        *slot = tokens.next()?;
    }
    tokens.next().is_none().then_some(out)
}

/// View an absent, single or repeated element as a slice.
///
/// A [`XmlValue::List`] is returned as-is, any other value as a one-element
/// slice borrowing it, and `None` as an empty slice.
#[must_use]
pub fn ensure_array(value: Option<&XmlValue>) -> &[XmlValue] {
    match value {
        None => &[],
        Some(XmlValue::List(items)) => items.as_slice(),
        Some(single) => std::slice::from_ref(single),
    }
}

/// Read attribute `name` of `node`, given the tree's attribute-key prefix.
///
/// Returns `None` for a missing node, a node that is not an element, or a
/// missing attribute.
#[must_use]
pub fn get_attribute<'a>(node: Option<&'a XmlValue>, name: &str, prefix: &str) -> Option<&'a str> {
    let node = node?.as_node()?;
    let value = node.iter().find_map(|(key, value)| {
        key.strip_prefix(prefix)
            .filter(|rest| *rest == name)
            .map(|_| value)
    })?;
    match value {
        XmlValue::Text(s) => Some(s.as_str()),
        _ => None,
    }
}

/// Text content of an element, whichever shape the tree builder gave it.
///
/// Handles an element node with a text entry, a bare string and a bare
/// number. Anything else has no text.
#[must_use]
pub fn get_text(value: Option<&XmlValue>, text_key: &str) -> Option<String> {
    match value? {
        XmlValue::Text(s) => Some(s.clone()),
        XmlValue::Number(n) => Some(n.to_string()),
        XmlValue::Node(node) => match node.get(text_key)? {
            XmlValue::Text(s) => Some(s.clone()),
            XmlValue::Number(n) => Some(n.to_string()),
            _ => None,
        },
        XmlValue::List(_) => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::xml::XmlNode;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_number_defaults() {
        for d in [0.0, -1.5, 42.0] {
            assert_eq!(parse_number(None, d), d);
            assert_eq!(parse_number(Some("notanumber"), d), d);
            assert_eq!(parse_number(Some(""), d), d);
            assert_eq!(parse_number(Some("NaN"), d), d);
        }
        assert_relative_eq!(parse_number(Some(" 3.25 "), 0.0), 3.25);
        assert_relative_eq!(parse_number(Some("-1e-3"), 0.0), -0.001);
    }

    #[test]
    fn test_parse_vector3_component_independence() {
        let v = parse_vector3(Some("1.0 abc 3.0"), Vector3::zeros());
        assert_eq!(v, Vector3::new(1.0, 0.0, 3.0));

        let v = parse_vector3(Some("x 2 y"), Vector3::new(7.0, 8.0, 9.0));
        assert_eq!(v, Vector3::new(7.0, 2.0, 9.0));
    }

    #[test]
    fn test_parse_vector3_whole_fallback() {
        let d = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(parse_vector3(Some("1.0 2.0"), d), d);
        assert_eq!(parse_vector3(Some("1 2 3 4"), d), d);
        assert_eq!(parse_vector3(None, d), d);
        assert_eq!(parse_vector3(Some("   "), d), d);
    }

    #[test]
    fn test_parse_vector3_extra_whitespace() {
        let v = parse_vector3(Some("  1\t2\n 3  "), Vector3::zeros());
        assert_eq!(v, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_parse_rgba() {
        assert_eq!(
            parse_rgba(Some("0 0 1 1"), [0.0, 0.0, 0.0, 1.0]),
            [0.0, 0.0, 1.0, 1.0]
        );
        assert_eq!(
            parse_rgba(Some("0.5 bad 0.5 0.2"), [0.0, 0.9, 0.0, 1.0]),
            [0.5, 0.9, 0.5, 0.2]
        );
        assert_eq!(parse_rgba(Some("1 1 1"), [0.0, 0.0, 0.0, 1.0]), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_ensure_array_shapes() {
        assert!(ensure_array(None).is_empty());

        let single = XmlValue::Text("a".into());
        let slice = ensure_array(Some(&single));
        assert_eq!(slice.len(), 1);
        assert!(std::ptr::eq(&slice[0], &single));

        let list = XmlValue::List(vec![XmlValue::Number(1.0), XmlValue::Number(2.0)]);
        let slice = ensure_array(Some(&list));
        match &list {
            XmlValue::List(items) => assert!(std::ptr::eq(slice, items.as_slice())),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_get_attribute() {
        let mut node = XmlNode::new();
        node.insert("@_name", XmlValue::Text("base".into()));
        node.insert("name", XmlValue::Text("child element".into()));
        let value = XmlValue::Node(node);

        assert_eq!(get_attribute(Some(&value), "name", "@_"), Some("base"));
        assert_eq!(get_attribute(Some(&value), "type", "@_"), None);
        assert_eq!(get_attribute(None, "name", "@_"), None);
        assert_eq!(
            get_attribute(Some(&XmlValue::Text("x".into())), "name", "@_"),
            None
        );
    }

    #[test]
    fn test_get_text_shapes() {
        let mut node = XmlNode::new();
        node.insert("@_unit", XmlValue::Text("rad".into()));
        node.insert("#text", XmlValue::Text("SimpleTransmission".into()));

        assert_eq!(
            get_text(Some(&XmlValue::Node(node)), "#text").as_deref(),
            Some("SimpleTransmission")
        );
        assert_eq!(
            get_text(Some(&XmlValue::Text("plain".into())), "#text").as_deref(),
            Some("plain")
        );
        assert_eq!(
            get_text(Some(&XmlValue::Number(50.0)), "#text").as_deref(),
            Some("50")
        );
        assert_eq!(get_text(None, "#text"), None);
        assert_eq!(get_text(Some(&XmlValue::Node(XmlNode::new())), "#text"), None);
    }
}
