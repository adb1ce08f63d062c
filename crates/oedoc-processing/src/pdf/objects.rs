//! Small lopdf helpers for reading page attributes.

use lopdf::{Document, Object, ObjectId};

use super::stamper::StampError;

/// Convert a lopdf numeric object (Integer or Real) to f64.
pub(crate) fn object_to_f64(obj: &Object) -> Result<f64, StampError> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(f) => Ok(*f as f64),
        _ => Err(StampError::InvalidPage(format!("expected number, got {obj:?}"))),
    }
}

/// Follow a single indirect reference, if `obj` is one.
pub(crate) fn dereference<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object, StampError> {
    match obj {
        Object::Reference(id) => doc
            .get_object(*id)
            .map_err(|e| StampError::InvalidPage(format!("dangling reference {id:?}: {e}"))),
        other => Ok(other),
    }
}

/// Look up a key in the page dictionary, walking up the page tree
/// (via /Parent) if the key is not found on the page itself.
pub(crate) fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>, StampError> {
    let mut current_id = page_id;
    // Bounded so a cyclic /Parent chain cannot loop forever.
    for _ in 0..64 {
        let dict = doc
            .get_object(current_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| StampError::InvalidPage(format!("failed to get page dictionary: {e}")))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(parent_obj) => {
                current_id = parent_obj.as_reference().map_err(|e| {
                    StampError::InvalidPage(format!("invalid /Parent reference: {e}"))
                })?;
            }
            Err(_) => return Ok(None),
        }
    }
    Err(StampError::InvalidPage("page tree is too deep".to_string()))
}

/// Page width and height from the (possibly inherited) MediaBox.
pub(crate) fn page_size(doc: &Document, page_id: ObjectId) -> Result<(f64, f64), StampError> {
    let media_box = resolve_inherited(doc, page_id, b"MediaBox")?
        .ok_or(StampError::MissingMediaBox)?;
    let array = dereference(doc, media_box)?
        .as_array()
        .map_err(|e| StampError::InvalidPage(format!("MediaBox is not an array: {e}")))?;
    if array.len() != 4 {
        return Err(StampError::InvalidPage(format!(
            "expected 4-element MediaBox, got {}",
            array.len()
        )));
    }
    let x0 = object_to_f64(dereference(doc, &array[0])?)?;
    let y0 = object_to_f64(dereference(doc, &array[1])?)?;
    let x1 = object_to_f64(dereference(doc, &array[2])?)?;
    let y1 = object_to_f64(dereference(doc, &array[3])?)?;
    Ok(((x1 - x0).abs(), (y1 - y0).abs()))
}

/// Raw `/Rotate` value of the page, 0 when absent.
pub(crate) fn page_rotation(doc: &Document, page_id: ObjectId) -> Result<i64, StampError> {
    match resolve_inherited(doc, page_id, b"Rotate")? {
        Some(obj) => dereference(doc, obj)?
            .as_i64()
            .map_err(|e| StampError::InvalidPage(format!("Rotate is not an integer: {e}"))),
        None => Ok(0),
    }
}
