use std::collections::HashSet;

use rusqlite::{params, params_from_iter};

use crate::error::{DomainError, Result};
use crate::repository::{ClassRepository, MemberRepository, Transactional};
use crate::schema::{Class, Member};

use super::records::{self, placeholders};
use super::SqliteSession;

const MEMBER_ORDER: &str = "ORDER BY \"Position\" IS NULL, \"Position\", \"Id\"";

impl ClassRepository for SqliteSession<'_> {
    fn class_with_key(&self, id: i64) -> Result<Class> {
        records::select_one(self.conn, "WHERE \"Id\" = ?1", params![id])?
            .ok_or_else(|| DomainError::not_found("class", id))
    }

    fn classes(&self) -> Result<Vec<Class>> {
        records::select(self.conn, "ORDER BY \"Id\"", [])
    }

    fn classes_by_parent(&self, parent_id: i64) -> Result<Vec<Class>> {
        records::select(self.conn, "WHERE \"ClassId\" = ?1 ORDER BY \"Id\"", params![parent_id])
    }

    fn create_class(&self, class: &mut Class) -> Result<()> {
        if let Some(id) = records::insert(self.conn, class)? {
            class.id = id;
        }
        Ok(())
    }

    fn edit_class(&self, class: &Class) -> Result<()> {
        match records::update(self.conn, class)? {
            0 => Err(DomainError::not_found("class", class.id)),
            _ => Ok(()),
        }
    }

    fn delete_class(&self, id: i64) -> Result<()> {
        match records::delete::<Class>(self.conn, &[&id])? {
            0 => Err(DomainError::not_found("class", id)),
            _ => Ok(()),
        }
    }
}

impl MemberRepository for SqliteSession<'_> {
    fn member_with_key(&self, id: i64) -> Result<Member> {
        records::select_one(self.conn, "WHERE \"Id\" = ?1", params![id])?
            .ok_or_else(|| DomainError::not_found("member", id))
    }

    fn members_by_class(&self, class_id: i64) -> Result<Vec<Member>> {
        let clause = format!("WHERE \"ClassId\" = ?1 {}", MEMBER_ORDER);
        records::select(self.conn, &clause, params![class_id])
    }

    fn members_by_class_including_parent(&self, class_id: i64) -> Result<Vec<Member>> {
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
            let class = self.class_with_key(id)?;
            chain.push(class.id);
            next = class.parent_id;
        }

        let clause = format!(
            "WHERE \"ClassId\" IN ({}) {}",
            placeholders(1, chain.len()),
            MEMBER_ORDER
        );
        records::select(self.conn, &clause, params_from_iter(chain.iter()))
    }

    fn create_member(&self, member: &mut Member) -> Result<()> {
        if let Some(id) = records::insert(self.conn, member)? {
            member.id = id;
        }
        Ok(())
    }

    fn edit_member(&self, member: &Member) -> Result<()> {
        match records::update(self.conn, member)? {
            0 => Err(DomainError::not_found("member", member.id)),
            _ => Ok(()),
        }
    }

    fn delete_member(&self, id: i64) -> Result<()> {
        self.transaction(|session| {
            // String properties own their dictionaries; the rest cascades.
            let dictionaries: Vec<i64> = {
                let mut statement = session.conn.prepare_cached(
                    "SELECT \"StringValueId\" FROM \"Properties\" \
                     WHERE \"MemberId\" = ?1 AND \"StringValueId\" IS NOT NULL",
                )?;
                let rows = statement.query_map(params![id], |row| row.get(0))?;
                rows.collect::<rusqlite::Result<_>>()?
            };

            session
                .conn
                .execute("DELETE FROM \"Properties\" WHERE \"MemberId\" = ?1", params![id])?;
            for dictionary_id in dictionaries {
                session
                    .conn
                    .execute("DELETE FROM \"Dictionaries\" WHERE \"Id\" = ?1", params![dictionary_id])?;
            }

            match records::delete::<Member>(session.conn, &[&id])? {
                0 => Err(DomainError::not_found("member", id)),
                _ => Ok(()),
            }
        })
    }
}
