use super::types::ParamMap;
use crate::introspect::ParamSignature;

/// Pattern token for one required positional segment.
pub const REQUIRED_SEGMENT: &str = "/..";
/// Pattern token for one optional positional segment (inside the bracket).
pub const OPTIONAL_SEGMENT: &str = "/..";

/// Build the parameter map and route parameter pattern of a method.
///
/// Every parameter is recorded as required (`true`) unless it declares a
/// default value.
///
/// ```
/// use autoroute::introspect::ParamSignature;
/// use autoroute::reader::infer_params;
///
/// let (params, pattern) = infer_params(&[
///     ParamSignature::required("a"),
///     ParamSignature::required("b"),
///     ParamSignature::optional("c"),
/// ]);
/// assert_eq!(pattern, "/../..[/..]");
/// assert_eq!(params.get("c"), Some(false));
/// ```
#[must_use]
pub fn infer_params(params: &[ParamSignature]) -> (ParamMap, String) {
    let map: ParamMap = params
        .iter()
        .map(|p| (p.name.as_str(), !p.has_default))
        .collect();
    let pattern = route_param_pattern(params.iter().map(|p| !p.has_default));
    (map, pattern)
}

/// Render the compact pattern for a sequence of "required?" flags.
///
/// Leading required parameters render as `/..` each. From the first optional
/// parameter on, everything sits inside a single `[...]` bracket, so
/// `[required, optional, optional]` renders as `/..[/../..]`. A required
/// parameter that follows an optional one is rendered inside the bracket too;
/// the linter reports such signatures.
#[must_use]
pub fn route_param_pattern<I>(required: I) -> String
where
    I: IntoIterator<Item = bool>,
{
    let mut pattern = String::new();
    let mut in_optional = false;

    for is_required in required {
        if !in_optional && !is_required {
            pattern.push('[');
            in_optional = true;
        }
        pattern.push_str(if in_optional {
            OPTIONAL_SEGMENT
        } else {
            REQUIRED_SEGMENT
        });
    }

    if in_optional {
        pattern.push(']');
    }
    pattern
}
