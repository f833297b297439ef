use chrono::NaiveDateTime;

/// Storage format for `created_time` / `updated_time` (local time, second precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub created_time: NaiveDateTime,
    pub updated_time: NaiveDateTime,
}

impl Note {
    pub fn created_str(&self) -> String {
        self.created_time.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn updated_str(&self) -> String {
        self.updated_time.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Ordering for the list command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Id,
    CreateTime,
    UpdateTime,
}

impl SortKey {
    pub const ALL: &'static [SortKey] = &[SortKey::Id, SortKey::CreateTime, SortKey::UpdateTime];

    /// Parse user input. Only the exact labels are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().find(|key| key.label() == s).copied()
    }

    /// Parse with fallback to `Id` for anything unrecognized
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CreateTime => "create time",
            Self::UpdateTime => "update time",
        }
    }

    pub fn to_sql_column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CreateTime => "created_time",
            Self::UpdateTime => "updated_time",
        }
    }
}
