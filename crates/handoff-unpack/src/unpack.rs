//! Crystal unpacking
//!
//! Applies every symmetry operator to every atom and keeps the results
//! whose rounded location has not been seen before. Two locations collide
//! when they agree to two decimal places in every coordinate; collisions
//! keep the first atom generated, in operator-major order.

use crate::error::UnpackError;
use crate::operator::SymmetryOperator;
use handoff_document::{kind_of, Document, DocumentError};
use serde_json::{json, Value};
use std::collections::HashSet;

/// An atom extracted from the packed crystal
#[derive(Debug, Clone)]
struct Atom {
    location: [f64; 3],
    element: Value,
    label: Value,
}

/// Unpack a packed crystal document
///
/// Expects top-level fields `symmetry` (array of operator strings),
/// `atoms` (array of atom objects), and `unitcell` (copied through
/// unchanged). Produces a document with the deduplicated `atoms` list and
/// the original `unitcell`.
///
/// # Errors
/// - [`UnpackError::Shape`] if a required field is absent or mistyped
/// - [`UnpackError::Operator`] if a symmetry string does not parse
/// - [`UnpackError::Atom`] if an atom entry has an unexpected shape
pub fn unpack(crystal: &Document) -> Result<Document, UnpackError> {
    let operators = parse_operators(crystal)?;
    let atoms = extract_atoms(crystal)?;
    let unitcell = require_field(crystal, "unitcell")
        .map_err(UnpackError::Shape)?
        .clone();

    let mut unpacked: Vec<Value> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for operator in &operators {
        for atom in &atoms {
            let location = operator.apply(atom.location);
            let collision_key = format!(
                "{:.2},{:.2},{:.2}",
                location[0], location[1], location[2]
            );
            if seen.insert(collision_key) {
                unpacked.push(json!({
                    "location": location,
                    "element": atom.element,
                    "label": atom.label
                }));
            }
        }
    }

    tracing::debug!(
        operators = operators.len(),
        packed = atoms.len(),
        unique = unpacked.len(),
        "unpacked crystal"
    );

    Ok(Document::new(json!({
        "atoms": unpacked,
        "unitcell": unitcell
    })))
}

/// Fetch a required top-level field
fn require_field<'a>(doc: &'a Document, field: &'static str) -> Result<&'a Value, DocumentError> {
    match doc.root() {
        Value::Object(map) => map
            .get(field)
            .ok_or_else(|| DocumentError::field_missing(field)),
        other => Err(DocumentError::NotAnObject {
            actual: kind_of(other),
        }),
    }
}

fn parse_operators(crystal: &Document) -> Result<Vec<SymmetryOperator>, UnpackError> {
    let value = require_field(crystal, "symmetry").map_err(UnpackError::Shape)?;
    let items = value.as_array().ok_or_else(|| {
        UnpackError::Shape(DocumentError::wrong_type("symmetry", "array", value))
    })?;

    items
        .iter()
        .map(|item| {
            let text = item.as_str().ok_or_else(|| {
                UnpackError::Shape(DocumentError::wrong_type("symmetry", "string", item))
            })?;
            text.parse().map_err(|source| UnpackError::Operator {
                operator: text.to_string(),
                source,
            })
        })
        .collect()
}

fn extract_atoms(crystal: &Document) -> Result<Vec<Atom>, UnpackError> {
    let value = require_field(crystal, "atoms").map_err(UnpackError::Shape)?;
    let items = value
        .as_array()
        .ok_or_else(|| UnpackError::Shape(DocumentError::wrong_type("atoms", "array", value)))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| extract_atom(item).map_err(|source| UnpackError::Atom { index, source }))
        .collect()
}

fn extract_atom(value: &Value) -> Result<Atom, DocumentError> {
    let map = value
        .as_object()
        .ok_or_else(|| DocumentError::wrong_type("atoms", "object", value))?;

    let location_value = map
        .get("location")
        .ok_or_else(|| DocumentError::field_missing("location"))?;
    let coords = location_value
        .as_array()
        .ok_or_else(|| DocumentError::wrong_type("location", "array", location_value))?;
    if coords.len() != 3 {
        return Err(DocumentError::wrong_type(
            "location",
            "array of 3 numbers",
            location_value,
        ));
    }

    let mut location = [0.0; 3];
    for (slot, coord) in location.iter_mut().zip(coords) {
        *slot = coord
            .as_f64()
            .ok_or_else(|| DocumentError::wrong_type("location", "number", coord))?;
    }

    let element = map
        .get("element")
        .cloned()
        .ok_or_else(|| DocumentError::field_missing("element"))?;
    let label = map
        .get("label")
        .cloned()
        .ok_or_else(|| DocumentError::field_missing("label"))?;

    Ok(Atom {
        location,
        element,
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn crystal(value: Value) -> Document {
        Document::new(value)
    }

    #[test]
    fn identity_keeps_distinct_atoms() {
        let doc = crystal(json!({
            "symmetry": ["x,y,z"],
            "atoms": [
                {"location": [0.0, 0.0, 0.0], "element": "C", "label": "C1"},
                {"location": [0.5, 0.5, 0.5], "element": "O", "label": "O1"}
            ],
            "unitcell": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        }));

        let out = unpack(&doc).unwrap();
        assert_eq!(
            out.get_path("atoms"),
            Some(&json!([
                {"location": [0.0, 0.0, 0.0], "element": "C", "label": "C1"},
                {"location": [0.5, 0.5, 0.5], "element": "O", "label": "O1"}
            ]))
        );
    }

    #[test]
    fn inversion_collision_is_deduplicated() {
        // The inversion maps [0.5, 0.5, 0.5] onto itself modulo 1.
        let doc = crystal(json!({
            "symmetry": ["x,y,z", "-x,-y,-z"],
            "atoms": [{"location": [0.5, 0.5, 0.5], "element": "C", "label": "C1"}],
            "unitcell": []
        }));

        let out = unpack(&doc).unwrap();
        let atoms = out.get_path("atoms").unwrap().as_array().unwrap();
        assert_eq!(atoms.len(), 1);
    }

    #[test]
    fn symmetry_expands_the_atom_list_operator_major() {
        let doc = crystal(json!({
            "symmetry": ["x,y,z", "x+1/2,y,z"],
            "atoms": [
                {"location": [0.0, 0.0, 0.0], "element": "C", "label": "C1"},
                {"location": [0.25, 0.0, 0.0], "element": "O", "label": "O1"}
            ],
            "unitcell": []
        }));

        let out = unpack(&doc).unwrap();
        let labels: Vec<&str> = out
            .get_path("atoms")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["label"].as_str().unwrap())
            .collect();
        // First all images of operator one, then operator two.
        assert_eq!(labels, ["C1", "O1", "C1", "O1"]);
    }

    #[test]
    fn collision_test_rounds_to_two_decimals() {
        let doc = crystal(json!({
            "symmetry": ["x,y,z"],
            "atoms": [
                {"location": [0.121, 0.0, 0.0], "element": "C", "label": "C1"},
                {"location": [0.1249, 0.0, 0.0], "element": "C", "label": "C2"}
            ],
            "unitcell": []
        }));

        let out = unpack(&doc).unwrap();
        let atoms = out.get_path("atoms").unwrap().as_array().unwrap();
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0]["label"], json!("C1"));
    }

    #[test]
    fn unitcell_passes_through_unchanged() {
        let unitcell = json!([[16.1, 0.0, 0.0], [0.0, 16.1, 0.0], [0.0, 0.0, 16.1]]);
        let doc = crystal(json!({
            "symmetry": ["x,y,z"],
            "atoms": [],
            "unitcell": unitcell.clone()
        }));

        let out = unpack(&doc).unwrap();
        assert_eq!(out.get_path("unitcell"), Some(&unitcell));
    }

    #[test]
    fn missing_symmetry_field_is_a_shape_error() {
        let doc = crystal(json!({"atoms": [], "unitcell": []}));
        let err = unpack(&doc).unwrap_err();
        assert!(matches!(
            err,
            UnpackError::Shape(DocumentError::FieldMissing(_))
        ));
    }

    #[test]
    fn non_array_atoms_is_a_shape_error() {
        let doc = crystal(json!({
            "symmetry": ["x,y,z"],
            "atoms": "C1",
            "unitcell": []
        }));
        let err = unpack(&doc).unwrap_err();
        assert!(matches!(
            err,
            UnpackError::Shape(DocumentError::WrongType { .. })
        ));
    }

    #[test]
    fn malformed_operator_names_the_offender() {
        let doc = crystal(json!({
            "symmetry": ["x,y,z", "x,q,z"],
            "atoms": [],
            "unitcell": []
        }));
        let err = unpack(&doc).unwrap_err();
        match err {
            UnpackError::Operator { operator, .. } => assert_eq!(operator, "x,q,z"),
            other => panic!("expected operator error, got {other:?}"),
        }
    }

    #[test]
    fn atom_without_label_names_its_index() {
        let doc = crystal(json!({
            "symmetry": ["x,y,z"],
            "atoms": [
                {"location": [0.0, 0.0, 0.0], "element": "C", "label": "C1"},
                {"location": [0.5, 0.5, 0.5], "element": "O"}
            ],
            "unitcell": []
        }));
        let err = unpack(&doc).unwrap_err();
        match err {
            UnpackError::Atom { index, .. } => assert_eq!(index, 1),
            other => panic!("expected atom error, got {other:?}"),
        }
    }

    #[test]
    fn short_location_is_rejected() {
        let doc = crystal(json!({
            "symmetry": ["x,y,z"],
            "atoms": [{"location": [0.0, 0.0], "element": "C", "label": "C1"}],
            "unitcell": []
        }));
        assert!(matches!(
            unpack(&doc).unwrap_err(),
            UnpackError::Atom { index: 0, .. }
        ));
    }
}
