use std::collections::{HashMap, HashSet};

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::domain::Heading;

/// Walk the top level of the document's outline tree.
///
/// Child entries (sub-headings) are never descended into, and titles
/// containing a "." are dropped as numbered sub-sections that leaked into the
/// top level. A document without an outline yields an empty sequence.
pub fn read_outline(doc: &Document) -> Vec<Heading> {
    let page_numbers: HashMap<ObjectId, u32> = doc
        .get_pages()
        .into_iter()
        .map(|(number, id)| (id, number))
        .collect();

    let Ok(catalog) = doc.catalog() else {
        return Vec::new();
    };
    let Some(root) = catalog.get(b"Outlines").ok().and_then(|o| as_dict(doc, o)) else {
        return Vec::new();
    };

    let mut headings = Vec::new();
    let mut visited: HashSet<ObjectId> = HashSet::new();
    let mut next = root.get(b"First").ok().cloned();

    while let Some(node_obj) = next {
        let Ok(node_id) = node_obj.as_reference() else {
            break;
        };
        // outline chains in malformed files can loop
        if !visited.insert(node_id) {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        if let Some(title) = node.get(b"Title").ok().and_then(|o| decode_text(doc, o)) {
            if !title.contains('.') {
                if let Some(page) = destination_page(doc, node, &page_numbers) {
                    headings.push(Heading::new(title, page));
                }
            }
        }

        next = node.get(b"Next").ok().cloned();
    }

    headings
}

/// Resolve an outline item's target to a 1-indexed page number.
///
/// Handles direct `Dest` arrays and `GoTo` actions; named destinations are
/// skipped, which drops the entry rather than failing the whole outline.
fn destination_page(
    doc: &Document,
    node: &Dictionary,
    page_numbers: &HashMap<ObjectId, u32>,
) -> Option<u32> {
    let dest = node
        .get(b"Dest")
        .ok()
        .cloned()
        .or_else(|| {
            let action = node.get(b"A").ok().and_then(|o| as_dict(doc, o))?;
            action.get(b"D").ok().cloned()
        })?;

    let dest = resolve(doc, &dest);
    let array = match dest {
        Object::Array(items) => items,
        _ => return None,
    };

    let page_ref = array.first()?.as_reference().ok()?;
    page_numbers.get(&page_ref).copied()
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

fn as_dict<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Dictionary> {
    resolve(doc, object).as_dict().ok()
}

fn decode_text(doc: &Document, object: &Object) -> Option<String> {
    match resolve(doc, object) {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        _ => None,
    }
}

/// PDF text strings are either UTF-16BE with a BOM or single-byte encoded.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&utf16)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::decode_pdf_string;

    #[test]
    fn decodes_utf16be_titles() {
        let bytes = [0xFE, 0xFF, 0x00, 0x49, 0x00, 0x6E, 0x00, 0x74, 0x00, 0x72, 0x00, 0x6F];
        assert_eq!(decode_pdf_string(&bytes), "Intro");
    }

    #[test]
    fn passes_plain_bytes_through() {
        assert_eq!(decode_pdf_string(b"Methods"), "Methods");
    }
}
