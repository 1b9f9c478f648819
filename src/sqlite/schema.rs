use rusqlite::Connection;

use crate::error::Result;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS "Cultures" (
    "Id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "Code" TEXT NOT NULL UNIQUE,
    "Name" TEXT NOT NULL,
    "IsNeutral" INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS "Dictionaries" (
    "Id" INTEGER PRIMARY KEY AUTOINCREMENT
);

CREATE TABLE IF NOT EXISTS "Localizations" (
    "Id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "DictionaryId" INTEGER NOT NULL REFERENCES "Dictionaries" ("Id") ON DELETE CASCADE,
    "CultureId" INTEGER NOT NULL REFERENCES "Cultures" ("Id"),
    "Value" TEXT NOT NULL,
    UNIQUE ("DictionaryId", "CultureId")
);

CREATE TABLE IF NOT EXISTS "Classes" (
    "Id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "ClassId" INTEGER REFERENCES "Classes" ("Id"),
    "Code" TEXT NOT NULL UNIQUE,
    "Name" TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS "DataTypes" (
    "Id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "StorageDataType" TEXT NOT NULL
        CHECK ("StorageDataType" IN ('integer', 'decimal', 'string', 'datetime')),
    "JavaScriptEditorType" TEXT NOT NULL,
    "Name" TEXT NOT NULL,
    "Position" INTEGER
);

CREATE TABLE IF NOT EXISTS "DataTypeParameters" (
    "Id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "DataTypeId" INTEGER NOT NULL REFERENCES "DataTypes" ("Id") ON DELETE CASCADE,
    "JavaScriptEditorType" TEXT NOT NULL,
    "Code" TEXT NOT NULL,
    "Name" TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS "Members" (
    "Id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "ClassId" INTEGER NOT NULL REFERENCES "Classes" ("Id") ON DELETE CASCADE,
    "Code" TEXT NOT NULL,
    "Name" TEXT NOT NULL,
    "Position" INTEGER,
    "PropertyDataTypeId" INTEGER REFERENCES "DataTypes" ("Id"),
    "RelationClassId" INTEGER REFERENCES "Classes" ("Id"),
    UNIQUE ("ClassId", "Code")
);

CREATE TABLE IF NOT EXISTS "DataTypeParameterValues" (
    "Id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "DataTypeParameterId" INTEGER NOT NULL REFERENCES "DataTypeParameters" ("Id") ON DELETE CASCADE,
    "MemberId" INTEGER NOT NULL REFERENCES "Members" ("Id") ON DELETE CASCADE,
    "Value" TEXT NOT NULL,
    UNIQUE ("DataTypeParameterId", "MemberId")
);

CREATE TABLE IF NOT EXISTS "Objects" (
    "Id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "ClassId" INTEGER NOT NULL REFERENCES "Classes" ("Id")
);

CREATE TABLE IF NOT EXISTS "Properties" (
    "Id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "ObjectId" INTEGER NOT NULL REFERENCES "Objects" ("Id") ON DELETE CASCADE,
    "MemberId" INTEGER NOT NULL REFERENCES "Members" ("Id") ON DELETE CASCADE,
    "IntegerValue" INTEGER,
    "DecimalValue" REAL,
    "StringValueId" INTEGER REFERENCES "Dictionaries" ("Id"),
    "DateTimeValue" TEXT,
    UNIQUE ("ObjectId", "MemberId")
);

CREATE TABLE IF NOT EXISTS "Relations" (
    "Id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "MemberId" INTEGER NOT NULL REFERENCES "Members" ("Id") ON DELETE CASCADE,
    "PrimaryId" INTEGER NOT NULL REFERENCES "Objects" ("Id") ON DELETE CASCADE,
    "ForeignId" INTEGER NOT NULL REFERENCES "Objects" ("Id") ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS "SerializedObjects" (
    "CultureId" INTEGER NOT NULL REFERENCES "Cultures" ("Id"),
    "ObjectId" INTEGER NOT NULL REFERENCES "Objects" ("Id") ON DELETE CASCADE,
    "ClassId" INTEGER NOT NULL REFERENCES "Classes" ("Id"),
    "UrlPropertyStringValue" TEXT,
    "SerializedProperties" TEXT NOT NULL,
    PRIMARY KEY ("CultureId", "ObjectId")
);

CREATE INDEX IF NOT EXISTS "IX_Properties_MemberId" ON "Properties" ("MemberId");
CREATE INDEX IF NOT EXISTS "IX_Relations_ForeignId" ON "Relations" ("ForeignId", "MemberId");
CREATE INDEX IF NOT EXISTS "IX_Relations_PrimaryId" ON "Relations" ("PrimaryId", "MemberId");
CREATE INDEX IF NOT EXISTS "IX_SerializedObjects_ClassId" ON "SerializedObjects" ("CultureId", "ClassId");
CREATE INDEX IF NOT EXISTS "IX_SerializedObjects_Url" ON "SerializedObjects" ("CultureId", "UrlPropertyStringValue");
"#;

/// Create every table and index that does not exist yet.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
