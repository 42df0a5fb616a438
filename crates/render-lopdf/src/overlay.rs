use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use quire_render_core::RenderError;

/// Appends `content_stream` to the page's `/Contents`, so it is painted on top
/// of everything already there.
pub fn overlay_content(
    doc: &mut Document,
    page_id: ObjectId,
    content_stream: Vec<u8>,
) -> Result<(), RenderError> {
    let stream = Stream::new(dictionary! {}, content_stream);
    let new_content_id = doc.add_object(Object::Stream(stream));

    let page_dict = doc
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| RenderError::Pdf(format!("page {:?}: {}", page_id, e)))?;

    let mut contents = match page_dict.get(b"Contents") {
        Ok(Object::Array(existing)) => existing.clone(),
        Ok(single) => vec![single.clone()],
        Err(_) => {
            return Err(RenderError::Pdf(format!(
                "Page {:?} is missing a /Contents key.",
                page_id
            )));
        }
    };
    contents.push(Object::Reference(new_content_id));
    page_dict.set("Contents", Object::Array(contents));

    Ok(())
}
