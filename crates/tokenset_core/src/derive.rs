//! The derivation pass: fills dependent fields from their resolved siblings.

use std::sync::Arc;

use crate::attribute::Fields;
use crate::token::Slot;
use crate::token_type::TokenType;

/// Runs one left-to-right pass over the declared attributes of `ty`.
///
/// An unconditional `derive` fills a nil slot. Otherwise a
/// `derive_if_requested` replaces a requested slot when it yields a non-nil
/// value and leaves the marker in place when it declines. A field only sees
/// values derived for fields declared before it.
pub(crate) fn run(ty: &TokenType, fields: &mut [(Arc<str>, Slot)]) {
    for (name, spec) in ty.attributes() {
        let Some(position) = fields.iter().position(|(n, _)| n == name) else {
            continue;
        };
        let is_nil = fields[position].1.is_nil();
        let is_requested = fields[position].1.is_requested();

        let derived = match (&spec.derive, &spec.derive_if_requested) {
            (Some(derive), _) if is_nil => Some(derive(&Fields::new(fields))),
            (_, Some(derive)) if is_requested => {
                derive(&Fields::new(fields)).filter(|v| !v.is_nil())
            }
            _ => None,
        };

        if let Some(value) = derived {
            fields[position].1 = Slot::Value(value);
        }
    }
}
