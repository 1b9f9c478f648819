//! A small blog schema: Country <- Person.country, Person <- Post.author.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use content_domain::schema::{Class, Culture, DataType, Member, Object, StorageDataType};
use content_domain::sqlite::{SqliteSession, SqliteStorage};
use content_domain::{
    ClassRepository, CultureRepository, DataTypeRepository, DomainConfig, MemberRepository, MemoCache,
    ObjectEditor, ObjectEvents, ObjectInput, PropertyInput, SerializedObjectRebuilder,
};

pub struct Blog {
    pub storage: SqliteStorage,
    pub config: DomainConfig,
    pub cache: Arc<MemoCache>,
    pub neutral: i64,
    pub en: i64,
    pub de: i64,
    pub country: Class,
    pub person: Class,
    pub post: Class,
    members: HashMap<String, Member>,
}

impl Blog {
    pub fn new() -> Self {
        Self::with_config(DomainConfig::default())
    }

    pub fn with_config(config: DomainConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let storage = SqliteStorage::open(&config).unwrap();

        let (neutral, en, de, country, person, post, members) = {
            let s = storage.session();

            let mut neutral = Culture::neutral();
            s.create_culture(&mut neutral).unwrap();
            assert_eq!(neutral.id, config.neutral_culture_id);
            let mut en = Culture::new("en", "English");
            s.create_culture(&mut en).unwrap();
            let mut de = Culture::new("de", "Deutsch");
            s.create_culture(&mut de).unwrap();

            let mut kinds = HashMap::new();
            for kind in [
                StorageDataType::Integer,
                StorageDataType::Decimal,
                StorageDataType::String,
                StorageDataType::DateTime,
            ] {
                let mut data_type = DataType::new(kind, kind.as_str());
                s.create_data_type(&mut data_type).unwrap();
                kinds.insert(kind, data_type.id);
            }

            let mut country = Class::new("country", "Country");
            s.create_class(&mut country).unwrap();
            let mut person = Class::new("person", "Person");
            s.create_class(&mut person).unwrap();
            let mut content = Class::new("content", "Content");
            s.create_class(&mut content).unwrap();
            let mut post = Class::new("post", "Post").with_parent(content.id);
            s.create_class(&mut post).unwrap();

            let text = kinds[&StorageDataType::String];
            let definitions = vec![
                ("country", Member::property(country.id, "name", text)),
                ("person", Member::property(person.id, "name", text)),
                ("person", Member::relation(person.id, "country", country.id)),
                // inherited by posts
                ("post", Member::property(content.id, "url", text).at_position(1)),
                ("post", Member::property(post.id, "title", text).at_position(2)),
                ("post", Member::property(post.id, "views", kinds[&StorageDataType::Integer]).at_position(3)),
                ("post", Member::property(post.id, "rating", kinds[&StorageDataType::Decimal]).at_position(4)),
                ("post", Member::property(post.id, "published", kinds[&StorageDataType::DateTime]).at_position(5)),
                ("post", Member::relation(post.id, "Author", person.id).at_position(6)),
            ];

            let mut members = HashMap::new();
            for (class, mut member) in definitions {
                s.create_member(&mut member).unwrap();
                members.insert(format!("{}.{}", class, member.code.to_lowercase()), member);
            }

            (neutral.id, en.id, de.id, country, person, post, members)
        };

        Self {
            storage,
            config,
            cache: Arc::new(MemoCache::new()),
            neutral,
            en,
            de,
            country,
            person,
            post,
            members,
        }
    }

    pub fn session(&self) -> SqliteSession<'_> {
        self.storage.session()
    }

    /// Handlers as wired in production: only the cache rebuilder.
    pub fn events<'c>(&self) -> ObjectEvents<SqliteSession<'c>> {
        let mut events = ObjectEvents::new();
        events.register(SerializedObjectRebuilder::new(self.config.clone(), self.cache.clone()));
        events
    }

    /// Member id by `"class.code"`, e.g. `"post.title"`.
    pub fn member(&self, key: &str) -> i64 {
        self.members[key].id
    }

    pub fn neutral_text(&self, text: &str) -> PropertyInput {
        PropertyInput::Localized(vec![(self.neutral, text.to_string())])
    }

    pub fn country(&self, editor: &ObjectEditor<'_, SqliteSession<'_>>, name: &str) -> Object {
        let input = ObjectInput::new().property(self.member("country.name"), self.neutral_text(name));
        editor.create(self.country.id, &input).unwrap()
    }

    pub fn person(&self, editor: &ObjectEditor<'_, SqliteSession<'_>>, name: &str, country: &Object) -> Object {
        let input = ObjectInput::new()
            .property(self.member("person.name"), self.neutral_text(name))
            .relation(self.member("person.country"), [country.id]);
        editor.create(self.person.id, &input).unwrap()
    }

    pub fn post(&self, editor: &ObjectEditor<'_, SqliteSession<'_>>, post: PostInput) -> Object {
        let mut input = ObjectInput::new();
        if let Some(url) = post.url {
            input = input.property(self.member("post.url"), self.neutral_text(url));
        }
        if !post.titles.is_empty() {
            let texts = post
                .titles
                .iter()
                .map(|(culture, text)| (*culture, text.to_string()))
                .collect();
            input = input.property(self.member("post.title"), PropertyInput::Localized(texts));
        }
        if let Some(views) = post.views {
            input = input.property(self.member("post.views"), PropertyInput::Integer(views));
        }
        if let Some(rating) = post.rating {
            input = input.property(self.member("post.rating"), PropertyInput::Decimal(rating));
        }
        if let Some(published) = post.published {
            input = input.property(self.member("post.published"), PropertyInput::DateTime(published));
        }
        if let Some(author) = post.author {
            input = input.relation(self.member("post.author"), [author]);
        }
        editor.create(self.post.id, &input).unwrap()
    }
}

#[derive(Default)]
pub struct PostInput {
    pub url: Option<&'static str>,
    pub titles: Vec<(i64, &'static str)>,
    pub views: Option<i64>,
    pub rating: Option<f64>,
    pub published: Option<DateTime<Utc>>,
    pub author: Option<i64>,
}

pub fn day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
}
