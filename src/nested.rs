//! Nested Object Loader: expands relation members of view objects along
//! slash-separated member-code paths.
//!
//! ```text
//! author/country
//! tags
//! ```
//!
//! Each line is one path. For every root, `author` loads the objects the
//! root points to through its `author` relation member, then `country` is
//! loaded the same way for each of them.

use std::collections::{BTreeSet, HashSet};

use log::{debug, warn};

use crate::document::{ViewObject, ViewValue};
use crate::error::{DomainError, Result};
use crate::query::Params;
use crate::repository::{ClassRepository, MemberRepository, SerializedObjectRepository};
use crate::schema::Member;

pub struct NestedObjectLoader<'a, S: ?Sized> {
    storage: &'a S,
    culture_id: i64,
}

impl<'a, S> NestedObjectLoader<'a, S>
where
    S: ClassRepository + MemberRepository + SerializedObjectRepository + ?Sized,
{
    pub fn new(storage: &'a S, culture_id: i64) -> Self {
        Self { storage, culture_id }
    }

    /// Populate the relation members named by `path_expression` on `roots`.
    ///
    /// Every object of a batch must be an instance of one class, subclasses
    /// included. Segments naming no relation member of that class are skipped.
    pub fn expand(&self, mut roots: Vec<ViewObject>, path_expression: &str) -> Result<Vec<ViewObject>> {
        if roots.is_empty() {
            return Ok(roots);
        }

        for path in parse_paths(path_expression)? {
            self.expand_path(&mut roots, &path)?;
        }
        Ok(roots)
    }

    fn expand_path(&self, objects: &mut [ViewObject], segments: &[String]) -> Result<()> {
        let Some((segment, rest)) = segments.split_first() else {
            return Ok(());
        };
        let Some(class_id) = self.batch_class(objects)? else {
            return Ok(());
        };

        let Some(member) = self.relation_member(class_id, segment)? else {
            warn!("class {} has no relation member {:?}, skipping", class_id, segment);
            return Ok(());
        };

        for object in objects.iter_mut() {
            // a sibling path with the same prefix may have loaded this member already
            if let Some(loaded) = object.objects_mut(&member.code) {
                self.expand_path(loaded, rest)?;
                continue;
            }

            let mut related = self
                .storage
                .primary_serialized_objects(self.culture_id, object.id, Some(member.id), &Params::none())?
                .iter()
                .map(ViewObject::from_serialized)
                .collect::<Result<Vec<_>>>()?;
            debug!(
                "object {}: {} related through {}",
                object.id,
                related.len(),
                member.code
            );

            self.expand_path(&mut related, rest)?;
            object.set(member.code.clone(), ViewValue::Objects(related));
        }
        Ok(())
    }

    /// The class every object of the batch is an instance of: the most
    /// derived class that all object classes equal or inherit from. Objects
    /// without a shared ancestor are a precondition failure.
    fn batch_class(&self, objects: &[ViewObject]) -> Result<Option<i64>> {
        let classes: BTreeSet<i64> = objects.iter().map(|object| object.class_id).collect();
        if classes.len() <= 1 {
            return Ok(classes.into_iter().next());
        }

        let mut chains = Vec::with_capacity(classes.len());
        for class_id in &classes {
            chains.push(self.ancestry(*class_id)?);
        }
        // chains start at the object class, so the first shared entry of any
        // chain is the most derived common class
        let common = chains[0]
            .iter()
            .find(|candidate| chains.iter().all(|chain| chain.contains(*candidate)))
            .copied();

        match common {
            Some(class_id) => Ok(Some(class_id)),
            None => Err(DomainError::Precondition(format!(
                "nested batch mixes unrelated classes {:?}",
                classes
            ))),
        }
    }

    /// `class_id` followed by its parent chain.
    fn ancestry(&self, class_id: i64) -> Result<Vec<i64>> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(class_id);
        while let Some(id) = next {
            if !visited.insert(id) {
                return Err(DomainError::Validation(format!(
                    "class {} has a cyclic parent chain",
                    class_id
                )));
            }
            chain.push(id);
            next = self.storage.class_with_key(id)?.parent_id;
        }
        Ok(chain)
    }

    fn relation_member(&self, class_id: i64, code: &str) -> Result<Option<Member>> {
        Ok(self
            .storage
            .members_by_class_including_parent(class_id)?
            .into_iter()
            .find(|member| member.is_relation() && member.code.eq_ignore_ascii_case(code)))
    }
}

/// Split an expression into paths of member codes.
///
/// Blank lines and empty segments are ignored; a segment with characters
/// other than ASCII letters, digits, `_` or `-` is a validation error.
pub fn parse_paths(path_expression: &str) -> Result<Vec<Vec<String>>> {
    let mut paths = Vec::new();

    for line in path_expression.lines() {
        let mut path = Vec::new();
        for segment in line.split('/').map(str::trim).filter(|s| !s.is_empty()) {
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                return Err(DomainError::Validation(format!(
                    "malformed path segment {:?} in {:?}",
                    segment, line
                )));
            }
            path.push(segment.to_string());
        }
        if !path.is_empty() {
            paths.push(path);
        }
    }

    Ok(paths)
}
