//! Resource model - healthcare providers and services listed in the directory
//!
//! A resource is created once by an explicit submission. The only field that
//! changes afterwards is the recommendation counter, and it only goes up.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::Sqlite;
use sqlx::{Executor, SqlitePool};

use crate::common::ResourceId;
use crate::domains::resources::data::ValidatedResource;

/// Resource category enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Clinic,
    Dentist,
    Pharmacy,
    #[serde(rename = "Support Group")]
    SupportGroup,
    Hospital,
    #[serde(rename = "Wellness Center")]
    WellnessCenter,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Clinic,
        Category::Dentist,
        Category::Pharmacy,
        Category::SupportGroup,
        Category::Hospital,
        Category::WellnessCenter,
    ];

    /// Label as stored and displayed
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Clinic => "Clinic",
            Category::Dentist => "Dentist",
            Category::Pharmacy => "Pharmacy",
            Category::SupportGroup => "Support Group",
            Category::Hospital => "Hospital",
            Category::WellnessCenter => "Wellness Center",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    /// Exact, case-sensitive match on the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("Invalid category: {}", s))
    }
}

// Stored as its TEXT label
impl sqlx::Type<Sqlite> for Category {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <str as sqlx::Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <str as sqlx::Type<Sqlite>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, Sqlite> for Category {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<'q, Sqlite>>::encode(self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, Sqlite> for Category {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let label = <&str as sqlx::Decode<'r, Sqlite>>::decode(value)?;
        label.parse::<Category>().map_err(Into::into)
    }
}

/// Resource - a listed healthcare provider or service
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub category: Category,
    pub country: String,
    pub description: String,
    pub region: String,
    pub lat: f64,
    pub lon: f64,
    #[sqlx(rename = "recommendations")]
    pub recommendation_count: i64,
}

// Legacy rows may carry NULL counters or descriptions; read them as 0 and "".
macro_rules! resource_columns {
    () => {
        "id, name, category, country, COALESCE(description, '') AS description, region, \
         lat, lon, COALESCE(recommendations, 0) AS recommendations"
    };
}

impl Resource {
    /// Check whether a resource row exists
    pub async fn exists<'e, E>(id: ResourceId, executor: E) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM healthcare_resources WHERE id = ?)",
        )
        .bind(id)
        .fetch_one(executor)
        .await
    }

    /// Search resources by region
    ///
    /// `region` matches anywhere inside the stored region, ignoring ASCII
    /// case. `None` returns every resource. Ordered by recommendations
    /// (highest first), then name.
    pub async fn search<'e, E>(region: Option<&str>, executor: E) -> Result<Vec<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Self>(concat!(
            "SELECT ",
            resource_columns!(),
            r#"
            FROM healthcare_resources
            WHERE (?1 IS NULL OR instr(lower(region), lower(?1)) > 0)
            ORDER BY COALESCE(recommendations, 0) DESC, name ASC, id ASC
            "#
        ))
        .bind(region)
        .fetch_all(executor)
        .await
    }

    /// Create a new resource
    ///
    /// Only accepts input that already passed validation.
    pub async fn create(input: &ValidatedResource, pool: &SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(concat!(
            r#"
            INSERT INTO healthcare_resources (name, category, country, description, region, lat, lon)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING "#,
            resource_columns!()
        ))
        .bind(&input.name)
        .bind(input.category)
        .bind(&input.country)
        .bind(&input.description)
        .bind(&input.region)
        .bind(input.lat)
        .bind(input.lon)
        .fetch_one(pool)
        .await
    }

    /// Add one recommendation and return the updated row
    ///
    /// A single statement does the read-modify-write and the read-back, so
    /// concurrent recommenders never lose updates and callers never observe
    /// a half-applied increment. Returns `None` when no row has this id.
    pub async fn increment_recommendations(
        id: ResourceId,
        pool: &SqlitePool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(concat!(
            r#"
            UPDATE healthcare_resources
            SET recommendations = COALESCE(recommendations, 0) + 1
            WHERE id = ?
            RETURNING "#,
            resource_columns!()
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
