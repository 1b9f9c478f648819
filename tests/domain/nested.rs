use content_domain::query::{Params, Sorting};
use content_domain::schema::{Class, StorageDataType};
use content_domain::sql::Direction;
use content_domain::{
    load_nested_objects, view_object, ClassRepository, DataSourceArgs, NestedObjectLoader,
    ObjectEditor, ObjectInput, ObjectRepository, PropertyValue, SerializedObjectRepository, ViewObject,
};

use crate::queries::posts;

fn post_views(w: &crate::queries::Posts) -> Vec<ViewObject> {
    let params = Params::none().sorted(Sorting::new(
        StorageDataType::Integer,
        w.blog.member("post.views"),
        Direction::Asc,
    ));
    w.blog
        .session()
        .serialized_objects_by_class(w.blog.en, w.blog.post.id, &params)
        .unwrap()
        .iter()
        .map(view_object)
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn author_and_country_are_nested() {
    let w = posts();
    let s = w.blog.session();
    let roots = post_views(&w);

    let expanded = NestedObjectLoader::new(&s, w.blog.en)
        .expand(roots, "author/country")
        .unwrap();
    assert_eq!(expanded.len(), 4);

    for post in &expanded {
        let authors = post.objects("author").unwrap();
        assert_eq!(authors.len(), 1);
        let author = &authors[0];
        assert_eq!(author.class_id, w.blog.person.id);

        let countries = author.objects("country").unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].scalar("name"), Some(&PropertyValue::from("Norway")));
    }

    let last = expanded.last().unwrap();
    assert_eq!(last.id, w.p4);
    assert_eq!(last.objects("author").unwrap()[0].id, w.bob.id);
    assert_eq!(
        last.objects("author").unwrap()[0].scalar("name"),
        Some(&PropertyValue::from("Bob"))
    );
}

#[test]
fn paths_sharing_a_prefix_extend_loaded_objects() {
    let w = posts();
    let s = w.blog.session();
    let args = DataSourceArgs::new().with("NestedXPaths", "Author\r\nauthor/COUNTRY");

    let expanded = load_nested_objects(&s, w.blog.en, post_views(&w), &args).unwrap();

    let author = &expanded[0].objects("author").unwrap()[0];
    assert_eq!(author.id, w.alice.id);
    assert!(author.objects("country").is_some());
}

#[test]
fn unknown_segments_contribute_nothing() {
    let w = posts();
    let s = w.blog.session();

    let expanded = NestedObjectLoader::new(&s, w.blog.en)
        .expand(post_views(&w), "editor/country\ntitle")
        .unwrap();

    for post in &expanded {
        assert!(post.get("editor").is_none());
        // scalar members are not relations
        assert!(post.objects("title").is_none());
    }
}

#[test]
fn subclass_instances_share_the_batch_of_their_parent_class() {
    let w = posts();
    let s = w.blog.session();
    let events = w.blog.events();
    let editor = ObjectEditor::new(&s, &events);

    let mut employee = Class::new("employee", "Employee").with_parent(w.blog.person.id);
    s.create_class(&mut employee).unwrap();
    let norway = s.relations_by_foreign(w.alice.id).unwrap()[0].primary_id;
    let input = ObjectInput::new()
        .property(w.blog.member("person.name"), w.blog.neutral_text("Carol"))
        .relation(w.blog.member("person.country"), [norway]);
    let carol = editor.create(employee.id, &input).unwrap();

    let authors = ObjectInput::new().relation(w.blog.member("post.author"), [w.alice.id, carol.id]);
    editor.edit(w.p1, &authors).unwrap();

    let p1 = view_object(&s.serialized_object_with_key(w.blog.en, w.p1).unwrap().unwrap()).unwrap();
    let expanded = NestedObjectLoader::new(&s, w.blog.en)
        .expand(vec![p1], "author/country")
        .unwrap();

    let authors = expanded[0].objects("author").unwrap();
    let mut ids: Vec<i64> = authors.iter().map(|author| author.id).collect();
    ids.sort();
    assert_eq!(ids, vec![w.alice.id, carol.id]);
    for author in authors {
        let countries = author.objects("country").unwrap();
        assert_eq!(countries[0].scalar("name"), Some(&PropertyValue::from("Norway")));
    }
}
