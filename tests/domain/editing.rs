use content_domain::schema::{DataTypeParameter, Object};
use content_domain::sqlite::SqliteSession;
use content_domain::{
    set_data_type_parameter_values, CultureRepository, DataTypeRepository, DomainError, MemberEditor,
    MemberRepository, ObjectEditor, ObjectEventHandler, ObjectInput, ObjectRepository, PropertyInput, PropertyValue,
    Result, SerializedDocument, SerializedObjectRepository,
};

use crate::fixtures::{Blog, PostInput};

fn title(s: &SqliteSession<'_>, culture: i64, object_id: i64) -> Option<PropertyValue> {
    let row = s.serialized_object_with_key(culture, object_id).unwrap()?;
    let document = SerializedDocument::decode(&row.serialized_properties).unwrap();
    document.get("title").cloned()
}

struct Veto;

impl<'c> ObjectEventHandler<SqliteSession<'c>> for Veto {
    fn priority(&self) -> i32 {
        2000
    }

    fn on_object_edited(&self, _: &SqliteSession<'c>, _: Option<&Object>, _: &Object) -> Result<()> {
        Err(DomainError::Validation("vetoed".into()))
    }
}

#[test]
fn edits_rebuild_the_cache_row() {
    let blog = Blog::new();
    let s = blog.session();
    let events = blog.events();
    let editor = ObjectEditor::new(&s, &events);

    let post = blog.post(
        &editor,
        PostInput {
            titles: vec![(blog.neutral, "draft")],
            ..Default::default()
        },
    );
    assert_eq!(title(&s, blog.en, post.id), Some(PropertyValue::from("draft")));

    let input = ObjectInput::new()
        .property(
            blog.member("post.title"),
            PropertyInput::Localized(vec![(blog.en, "final".into())]),
        )
        .property(blog.member("post.views"), PropertyInput::Integer(3));
    editor.edit(post.id, &input).unwrap();

    assert_eq!(title(&s, blog.en, post.id), Some(PropertyValue::from("final")));
    assert_eq!(title(&s, blog.de, post.id), Some(PropertyValue::from("draft")));
    // the dictionary is reused, not replaced
    let property = s
        .property_by_object_and_member(post.id, blog.member("post.title"))
        .unwrap()
        .unwrap();
    let dictionary_id = property.string_value_id.unwrap();
    assert_eq!(s.localizations_by_dictionary(dictionary_id).unwrap().len(), 2);
}

#[test]
fn failing_handler_rolls_the_edit_back() {
    let blog = Blog::new();
    let s = blog.session();
    let events = blog.events();
    let editor = ObjectEditor::new(&s, &events);
    let post = blog.post(
        &editor,
        PostInput {
            titles: vec![(blog.neutral, "kept")],
            ..Default::default()
        },
    );

    let mut vetoing = blog.events();
    vetoing.register(Veto);
    let input = ObjectInput::new().property(blog.member("post.title"), blog.neutral_text("lost"));
    let err = ObjectEditor::new(&s, &vetoing).edit(post.id, &input).unwrap_err();

    assert_eq!(err, DomainError::Validation("vetoed".into()));
    assert_eq!(title(&s, blog.en, post.id), Some(PropertyValue::from("kept")));
    let dictionary_id = s
        .property_by_object_and_member(post.id, blog.member("post.title"))
        .unwrap()
        .unwrap()
        .string_value_id
        .unwrap();
    assert_eq!(
        s.localized_value(dictionary_id, blog.en, blog.neutral).unwrap().as_deref(),
        Some("kept")
    );
}

#[test]
fn wrong_kind_or_foreign_member_is_rejected() {
    let blog = Blog::new();
    let s = blog.session();
    let events = blog.events();
    let editor = ObjectEditor::new(&s, &events);

    let wrong_kind = ObjectInput::new().property(blog.member("post.title"), PropertyInput::Integer(1));
    let err = editor.create(blog.post.id, &wrong_kind).unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(s.objects_by_class(blog.post.id).unwrap().is_empty());

    let foreign = ObjectInput::new().property(blog.member("country.name"), blog.neutral_text("x"));
    let err = editor.create(blog.post.id, &foreign).unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let country = blog.country(&editor, "Chile");
    let bad_relation = ObjectInput::new().relation(blog.member("post.author"), [country.id]);
    let err = editor.create(blog.post.id, &bad_relation).unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn relations_are_replaced_per_member() {
    let blog = Blog::new();
    let s = blog.session();
    let events = blog.events();
    let editor = ObjectEditor::new(&s, &events);

    let chile = blog.country(&editor, "Chile");
    let alice = blog.person(&editor, "Alice", &chile);
    let bob = blog.person(&editor, "Bob", &chile);
    let post = blog.post(
        &editor,
        PostInput {
            author: Some(alice.id),
            ..Default::default()
        },
    );

    let input = ObjectInput::new().relation(blog.member("post.author"), [bob.id]);
    editor.edit(post.id, &input).unwrap();

    let relations = s.relations_by_foreign(post.id).unwrap();
    assert_eq!(relations.len(), 1);
    assert_eq!(relations[0].primary_id, bob.id);
}

#[test]
fn delete_removes_rows_relations_and_cache() {
    let blog = Blog::new();
    let s = blog.session();
    let events = blog.events();
    let editor = ObjectEditor::new(&s, &events);

    let chile = blog.country(&editor, "Chile");
    let alice = blog.person(&editor, "Alice", &chile);
    let post = blog.post(
        &editor,
        PostInput {
            titles: vec![(blog.neutral, "gone")],
            author: Some(alice.id),
            ..Default::default()
        },
    );
    let dictionary_id = s
        .property_by_object_and_member(post.id, blog.member("post.title"))
        .unwrap()
        .unwrap()
        .string_value_id
        .unwrap();

    editor.delete(post.id).unwrap();

    assert!(matches!(
        s.object_with_key(post.id),
        Err(DomainError::NotFound { entity: "object", .. })
    ));
    assert!(s.properties_by_object(post.id).unwrap().is_empty());
    assert!(s.relations_by_primary(alice.id).unwrap().is_empty());
    assert!(s.serialized_object_with_key(blog.en, post.id).unwrap().is_none());
    assert!(s.localizations_by_dictionary(dictionary_id).unwrap().is_empty());
    // the author is untouched
    assert!(s.serialized_object_with_key(blog.en, alice.id).unwrap().is_some());
}

#[test]
fn deleting_a_member_drops_its_properties() {
    let blog = Blog::new();
    let s = blog.session();
    let events = blog.events();
    let editor = ObjectEditor::new(&s, &events);
    let post = blog.post(
        &editor,
        PostInput {
            titles: vec![(blog.neutral, "t")],
            views: Some(5),
            ..Default::default()
        },
    );

    let generation = blog.cache.generation();
    let rebuilt = MemberEditor::new(&s, &events)
        .delete(blog.member("post.title"))
        .unwrap();
    assert_eq!(rebuilt, vec![post.clone()]);
    assert!(blog.cache.generation() > generation);

    let remaining: Vec<i64> = s
        .properties_by_object(post.id)
        .unwrap()
        .into_iter()
        .map(|p| p.member_id)
        .collect();
    assert_eq!(remaining, vec![blog.member("post.views")]);
    assert!(s.member_with_key(blog.member("post.title")).is_err());

    for culture in [blog.en, blog.de] {
        let row = s.serialized_object_with_key(culture, post.id).unwrap().unwrap();
        let document = SerializedDocument::decode(&row.serialized_properties).unwrap();
        assert_eq!(document.get("title"), None);
        assert_eq!(document.get("views"), Some(&PropertyValue::Integer(5)));
    }
}

#[test]
fn failed_member_deletion_keeps_member_and_cache() {
    let blog = Blog::new();
    let s = blog.session();
    let events = blog.events();
    let editor = ObjectEditor::new(&s, &events);
    let post = blog.post(
        &editor,
        PostInput {
            titles: vec![(blog.neutral, "t")],
            ..Default::default()
        },
    );

    let mut vetoing = blog.events();
    vetoing.register(Veto);
    let result = MemberEditor::new(&s, &vetoing).delete(blog.member("post.title"));

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(s.member_with_key(blog.member("post.title")).is_ok());
    assert_eq!(title(&s, blog.en, post.id), Some(PropertyValue::from("t")));
}

#[test]
fn data_type_parameter_values_are_upserted() {
    let blog = Blog::new();
    let s = blog.session();
    let member = s.member_with_key(blog.member("post.title")).unwrap();
    let data_type_id = member.property_data_type_id.unwrap();

    let mut max_length = DataTypeParameter {
        id: 0,
        data_type_id,
        java_script_editor_type: "numericBox".into(),
        code: "maxLength".into(),
        name: "Max length".into(),
    };
    s.create_data_type_parameter(&mut max_length).unwrap();

    set_data_type_parameter_values(&s, member.id, &[(max_length.id, "64".into())]).unwrap();
    set_data_type_parameter_values(&s, member.id, &[(max_length.id, "128".into())]).unwrap();

    let values = s.data_type_parameter_values_by_member(member.id).unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value, "128");

    // a parameter of another data type
    let views = s.member_with_key(blog.member("post.views")).unwrap();
    let err = set_data_type_parameter_values(&s, views.id, &[(max_length.id, "1".into())]).unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}
