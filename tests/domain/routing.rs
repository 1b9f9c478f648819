use std::sync::{Arc, Mutex};

use content_domain::schema::Object;
use content_domain::sqlite::{SqliteSession, SqliteStorage};
use content_domain::{
    DomainConfig, ObjectEditor, ObjectEventHandler, ObjectInput, PropertyInput, PropertyValue, Result,
    SerializedObjectRepository, UrlResolver,
};

use crate::fixtures::{Blog, PostInput};
use crate::queries::posts;

/// Resolves a URL on a second connection while the edit is still open.
struct ConcurrentReader {
    storage: Mutex<SqliteStorage>,
    resolver: UrlResolver,
    culture_id: i64,
    seen: Arc<Mutex<Option<PropertyValue>>>,
}

impl<'c> ObjectEventHandler<SqliteSession<'c>> for ConcurrentReader {
    fn priority(&self) -> i32 {
        2000
    }

    fn on_object_edited(&self, _: &SqliteSession<'c>, _: Option<&Object>, _: &Object) -> Result<()> {
        let storage = self.storage.lock().unwrap();
        let view = self.resolver.resolve(&storage.session(), self.culture_id, "/posts/one")?;
        *self.seen.lock().unwrap() = view.and_then(|view| view.scalar("title").cloned());
        Ok(())
    }
}

#[test]
fn resolves_urls_case_insensitively() {
    let w = posts();
    let s = w.blog.session();
    let resolver = UrlResolver::new(w.blog.cache.clone());

    let view = resolver.resolve(&s, w.blog.en, "/posts/ONE").unwrap().unwrap();
    assert_eq!(view.id, w.p1);
    assert_eq!(view.scalar("title"), Some(&PropertyValue::from("apple")));
    assert!(resolver.resolve(&s, w.blog.en, "/missing").unwrap().is_none());
}

#[test]
fn edits_invalidate_memoized_lookups() {
    let w = posts();
    let s = w.blog.session();
    let resolver = UrlResolver::new(w.blog.cache.clone());

    let before = resolver.resolve(&s, w.blog.en, "/posts/one").unwrap().unwrap();
    assert_eq!(before.scalar("title"), Some(&PropertyValue::from("apple")));

    // a raw write bypassing the edit workflow is not seen: the lookup is memoized
    let mut row = s.serialized_object_with_key(w.blog.en, w.p1).unwrap().unwrap();
    row.serialized_properties = "[]".to_string();
    s.edit_serialized_object(&row).unwrap();
    let cached = resolver.resolve(&s, w.blog.en, "/posts/one").unwrap().unwrap();
    assert_eq!(cached, before);

    let generation = w.blog.cache.generation();
    let events = w.blog.events();
    let editor = ObjectEditor::new(&s, &events);
    let input = ObjectInput::new().property(
        w.blog.member("post.title"),
        PropertyInput::Localized(vec![(w.blog.en, "avocado".into())]),
    );
    editor.edit(w.p1, &input).unwrap();
    assert!(w.blog.cache.generation() > generation);

    let after = resolver.resolve(&s, w.blog.en, "/posts/one").unwrap().unwrap();
    assert_eq!(after.scalar("title"), Some(&PropertyValue::from("avocado")));
    assert_eq!(after.scalar("views"), Some(&PropertyValue::Integer(30)));
}

#[test]
fn reads_during_an_open_edit_are_not_memoized_past_commit() {
    let dir = std::env::temp_dir().join(format!("content-domain-routing-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("blog.db");
    let _ = std::fs::remove_file(&path);

    let mut config = DomainConfig::default();
    config.database.path = Some(path.to_string_lossy().into_owned());
    edit_with_concurrent_reader(config);
    let _ = std::fs::remove_dir_all(&dir);
}

fn edit_with_concurrent_reader(config: DomainConfig) {
    let blog = Blog::with_config(config.clone());
    let s = blog.session();
    let post = {
        let events = blog.events();
        let editor = ObjectEditor::new(&s, &events);
        blog.post(
            &editor,
            PostInput {
                url: Some("/posts/one"),
                titles: vec![(blog.neutral, "apple")],
                ..Default::default()
            },
        )
    };

    let seen = Arc::new(Mutex::new(None));
    let mut events = blog.events();
    events.register(ConcurrentReader {
        storage: Mutex::new(SqliteStorage::open(&config).unwrap()),
        resolver: UrlResolver::new(blog.cache.clone()),
        culture_id: blog.en,
        seen: seen.clone(),
    });
    let editor = ObjectEditor::new(&s, &events);
    let input = ObjectInput::new().property(
        blog.member("post.title"),
        PropertyInput::Localized(vec![(blog.en, "avocado".into())]),
    );
    editor.edit(post.id, &input).unwrap();

    // the second connection only saw committed rows
    assert_eq!(*seen.lock().unwrap(), Some(PropertyValue::from("apple")));

    let resolver = UrlResolver::new(blog.cache.clone());
    let view = resolver.resolve(&s, blog.en, "/posts/one").unwrap().unwrap();
    assert_eq!(view.scalar("title"), Some(&PropertyValue::from("avocado")));
}
