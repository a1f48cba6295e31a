/// Employee primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Project ids are the document store's native id rendered as a hex string.
pub type DocumentId = String;
