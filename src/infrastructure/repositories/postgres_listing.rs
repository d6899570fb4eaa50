// src/infrastructure/repositories/postgres_listing.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::listing::{
    ContactEmail, Listing, ListingDescription, ListingId, ListingImages, ListingPredicate,
    ListingRepository, ListingTitle, ListingUpdate, NewListing, OwnerId, PageWindow, Price,
    SortDirection, SortKey, SortSpec,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

const COLUMNS: &str = "id, title, description, images, category, price, condition, status, \
     contact_email, contact_phone, location, meeting_point, owner_id, created_at, updated_at";

/// Paged reads count and fetch inside one snapshot, so `total` always
/// describes the same rows the page was cut from.
const SNAPSHOT_ISOLATION: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

#[derive(Clone)]
pub struct PostgresListingRepository {
    pool: PgPool,
}

impl PostgresListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ListingRow {
    id: Uuid,
    title: String,
    description: String,
    images: Vec<String>,
    category: String,
    price: f64,
    condition: String,
    status: String,
    contact_email: String,
    contact_phone: Option<String>,
    location: Option<String>,
    meeting_point: Option<String>,
    owner_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ListingRow> for Listing {
    type Error = DomainError;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        Ok(Listing {
            id: ListingId::new(row.id),
            title: ListingTitle::new(row.title)?,
            description: ListingDescription::new(row.description)?,
            images: ListingImages::new(row.images)?,
            category: row.category.parse()?,
            price: Price::new(row.price)?,
            condition: row.condition.parse()?,
            status: row.status.parse()?,
            contact_email: ContactEmail::new(row.contact_email)?,
            contact_phone: row.contact_phone,
            location: row.location,
            meeting_point: row.meeting_point,
            owner_id: OwnerId::new(row.owner_id)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn push_clause(builder: &mut QueryBuilder<'_, Postgres>, has_where: &mut bool) {
    builder.push(if *has_where { " AND " } else { " WHERE " });
    *has_where = true;
}

/// Escapes LIKE metacharacters so user input is matched literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

impl PostgresListingRepository {
    fn apply_conditions(builder: &mut QueryBuilder<'_, Postgres>, predicate: &ListingPredicate) {
        let mut has_where = false;

        if let Some(owner) = &predicate.owner_id {
            push_clause(builder, &mut has_where);
            builder.push("owner_id = ");
            builder.push_bind(owner.as_str().to_string());
        }
        if let Some(status) = predicate.status {
            push_clause(builder, &mut has_where);
            builder.push("status = ");
            builder.push_bind(status.as_str());
        }
        if let Some(category) = predicate.category {
            push_clause(builder, &mut has_where);
            builder.push("category = ");
            builder.push_bind(category.as_str());
        }
        if let Some(condition) = predicate.condition {
            push_clause(builder, &mut has_where);
            builder.push("condition = ");
            builder.push_bind(condition.as_str());
        }
        if let Some(min) = predicate.min_price {
            push_clause(builder, &mut has_where);
            builder.push("price >= ");
            builder.push_bind(min);
        }
        if let Some(max) = predicate.max_price {
            push_clause(builder, &mut has_where);
            builder.push("price <= ");
            builder.push_bind(max);
        }
        if let Some(term) = &predicate.search {
            let pattern = like_pattern(term);
            push_clause(builder, &mut has_where);
            builder.push("(title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR description ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR category ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(fragment) = &predicate.location {
            push_clause(builder, &mut has_where);
            builder.push("location ILIKE ");
            builder.push_bind(like_pattern(fragment));
        }
    }

    fn apply_ordering(builder: &mut QueryBuilder<'_, Postgres>, sort: SortSpec) {
        let column = match sort.key {
            SortKey::CreatedAt => "created_at",
            SortKey::Price => "price",
            SortKey::Title => "title COLLATE \"C\"",
        };
        let direction = match sort.direction {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };
        builder.push(format!(" ORDER BY {column} {direction}, id {direction}"));
    }

    async fn begin_snapshot(&self) -> DomainResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sqlx::query(SNAPSHOT_ISOLATION)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        Ok(tx)
    }

    async fn count(conn: &mut PgConnection, predicate: &ListingPredicate) -> DomainResult<u64> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM listings");
        Self::apply_conditions(&mut builder, predicate);

        let total: i64 = builder
            .build_query_scalar()
            .fetch_one(conn)
            .await
            .map_err(map_sqlx)?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    fn into_listings(rows: Vec<ListingRow>) -> DomainResult<Vec<Listing>> {
        rows.into_iter()
            .map(Listing::try_from)
            .collect::<Result<Vec<_>, _>>()
    }
}

#[async_trait]
impl ListingRepository for PostgresListingRepository {
    async fn create(&self, listing: NewListing) -> DomainResult<Listing> {
        let NewListing {
            title,
            description,
            images,
            category,
            price,
            condition,
            status,
            contact_email,
            contact_phone,
            location,
            meeting_point,
            owner_id,
            created_at,
        } = listing;

        let row = sqlx::query_as::<_, ListingRow>(&format!(
            "INSERT INTO listings (id, title, description, images, category, price, condition, status,
                 contact_email, contact_phone, location, meeting_point, owner_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $14)
             RETURNING {COLUMNS}"
        ))
        .bind(ListingId::generate().as_uuid())
        .bind(title.into_inner())
        .bind(description.into_inner())
        .bind(images.into_inner())
        .bind(category.as_str())
        .bind(price.value())
        .bind(condition.as_str())
        .bind(status.as_str())
        .bind(contact_email.into_inner())
        .bind(contact_phone)
        .bind(location)
        .bind(meeting_point)
        .bind(String::from(owner_id))
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Listing::try_from(row)
    }

    async fn find_by_id(&self, id: ListingId) -> DomainResult<Option<Listing>> {
        let row = sqlx::query_as::<_, ListingRow>(&format!(
            "SELECT {COLUMNS} FROM listings WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Listing::try_from).transpose()
    }

    async fn find_many(
        &self,
        predicate: &ListingPredicate,
        sort: SortSpec,
        window: PageWindow,
    ) -> DomainResult<(Vec<Listing>, u64)> {
        let mut tx = self.begin_snapshot().await?;
        let total = Self::count(&mut tx, predicate).await?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM listings"));
        Self::apply_conditions(&mut builder, predicate);
        Self::apply_ordering(&mut builder, sort);
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(window.limit));
        builder.push(" OFFSET ");
        builder.push_bind(i64::try_from(window.skip).unwrap_or(i64::MAX));

        let rows = builder
            .build_query_as::<ListingRow>()
            .fetch_all(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok((Self::into_listings(rows)?, total))
    }

    async fn sample_many(
        &self,
        predicate: &ListingPredicate,
        limit: u32,
    ) -> DomainResult<(Vec<Listing>, u64)> {
        let mut tx = self.begin_snapshot().await?;
        let total = Self::count(&mut tx, predicate).await?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM listings"));
        Self::apply_conditions(&mut builder, predicate);
        builder.push(" ORDER BY random() LIMIT ");
        builder.push_bind(i64::from(limit));

        let rows = builder
            .build_query_as::<ListingRow>()
            .fetch_all(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok((Self::into_listings(rows)?, total))
    }

    async fn update_by_id(&self, update: ListingUpdate) -> DomainResult<Listing> {
        let ListingUpdate {
            id,
            title,
            description,
            images,
            category,
            price,
            condition,
            status,
            contact_email,
            contact_phone,
            location,
            meeting_point,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE listings SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title.into_inner());
        }
        if let Some(description) = description {
            builder.push(", description = ");
            builder.push_bind(description.into_inner());
        }
        if let Some(images) = images {
            builder.push(", images = ");
            builder.push_bind(images.into_inner());
        }
        if let Some(category) = category {
            builder.push(", category = ");
            builder.push_bind(category.as_str());
        }
        if let Some(price) = price {
            builder.push(", price = ");
            builder.push_bind(price.value());
        }
        if let Some(condition) = condition {
            builder.push(", condition = ");
            builder.push_bind(condition.as_str());
        }
        if let Some(status) = status {
            builder.push(", status = ");
            builder.push_bind(status.as_str());
        }
        if let Some(email) = contact_email {
            builder.push(", contact_email = ");
            builder.push_bind(email.into_inner());
        }
        if let Some(phone) = contact_phone {
            builder.push(", contact_phone = ");
            builder.push_bind(phone);
        }
        if let Some(location) = location {
            builder.push(", location = ");
            builder.push_bind(location);
        }
        if let Some(meeting_point) = meeting_point {
            builder.push(", meeting_point = ");
            builder.push_bind(meeting_point);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id.as_uuid());
        builder.push(format!(" RETURNING {COLUMNS}"));

        let row = builder
            .build_query_as::<ListingRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("listing not found".into()))?;

        Listing::try_from(row)
    }

    async fn delete_by_id(&self, id: ListingId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("listing not found".into()));
        }
        Ok(())
    }
}
