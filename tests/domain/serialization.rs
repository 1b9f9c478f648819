use content_domain::{
    ObjectEditor, PropertyValue, SerializationManager, SerializedDocument, SerializedObjectRepository,
};

use crate::fixtures::{day, Blog, PostInput};

#[test]
fn every_scalar_kind_round_trips_through_the_document() {
    let blog = Blog::new();
    let s = blog.session();
    let events = blog.events();
    let editor = ObjectEditor::new(&s, &events);

    let post = blog.post(
        &editor,
        PostInput {
            url: Some("/posts/one"),
            titles: vec![(blog.neutral, "One"), (blog.de, "Eins")],
            views: Some(12),
            rating: Some(4.25),
            published: Some(day(3)),
            ..Default::default()
        },
    );

    let row = s.serialized_object_with_key(blog.en, post.id).unwrap().unwrap();
    assert_eq!(row.class_id, blog.post.id);
    assert_eq!(row.url_property_string_value.as_deref(), Some("/posts/one"));

    let document = SerializedDocument::decode(&row.serialized_properties).unwrap();
    let codes: Vec<&str> = document.properties().iter().map(|p| p.code.as_str()).collect();
    assert_eq!(codes, vec!["url", "title", "views", "rating", "published"]);
    assert_eq!(document.get("title"), Some(&PropertyValue::from("One")));
    assert_eq!(document.get("views"), Some(&PropertyValue::Integer(12)));
    assert_eq!(document.get("rating"), Some(&PropertyValue::Decimal(4.25)));
    assert_eq!(document.get("published"), Some(&PropertyValue::DateTime(day(3))));

    let german = s.serialized_object_with_key(blog.de, post.id).unwrap().unwrap();
    let document = SerializedDocument::decode(&german.serialized_properties).unwrap();
    assert_eq!(document.get("title"), Some(&PropertyValue::from("Eins")));
}

#[test]
fn document_size_matches_present_scalar_rows() {
    let blog = Blog::new();
    let s = blog.session();
    let events = blog.events();
    let editor = ObjectEditor::new(&s, &events);

    let post = blog.post(
        &editor,
        PostInput {
            titles: vec![(blog.neutral, "Only a title")],
            ..Default::default()
        },
    );

    let row = s.serialized_object_with_key(blog.en, post.id).unwrap().unwrap();
    let document = SerializedDocument::decode(&row.serialized_properties).unwrap();
    assert_eq!(document.len(), 1);
    assert_eq!(row.url_property_string_value, None);
}

#[test]
fn reserializing_is_byte_identical() {
    let blog = Blog::new();
    let s = blog.session();
    let events = blog.events();
    let editor = ObjectEditor::new(&s, &events);

    let post = blog.post(
        &editor,
        PostInput {
            url: Some("/same"),
            titles: vec![(blog.neutral, "Same")],
            rating: Some(0.1 + 0.2),
            published: Some(day(9)),
            ..Default::default()
        },
    );
    let before = s.serialized_object_with_key(blog.en, post.id).unwrap().unwrap();

    SerializationManager::new(&s, &blog.config)
        .serialize_object(&post)
        .unwrap();
    let after = s.serialized_object_with_key(blog.en, post.id).unwrap().unwrap();

    assert_eq!(before.serialized_properties, after.serialized_properties);
    assert_eq!(before, after);
}
