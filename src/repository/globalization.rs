use crate::error::Result;
use crate::schema::{Culture, Localization};

pub trait CultureRepository {
    /// Fails with `NotFound` for an unknown id.
    fn culture_with_key(&self, id: i64) -> Result<Culture>;

    fn cultures(&self) -> Result<Vec<Culture>>;

    /// Cultures that get serialized objects (all but the neutral one).
    fn not_neutral_cultures(&self) -> Result<Vec<Culture>>;

    fn create_culture(&self, culture: &mut Culture) -> Result<()>;

    /// Create an empty dictionary and return its id.
    fn create_dictionary(&self) -> Result<i64>;

    /// Removes the dictionary and all its localizations.
    fn delete_dictionary(&self, id: i64) -> Result<()>;

    fn localizations_by_dictionary(&self, dictionary_id: i64) -> Result<Vec<Localization>>;

    /// Insert or overwrite the text of a dictionary in one culture.
    fn set_localization(&self, dictionary_id: i64, culture_id: i64, value: &str) -> Result<()>;

    /// Text in `culture_id`, else in `fallback_culture_id`.
    fn localized_value(
        &self,
        dictionary_id: i64,
        culture_id: i64,
        fallback_culture_id: i64,
    ) -> Result<Option<String>>;
}
