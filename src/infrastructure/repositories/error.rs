use crate::domain::errors::DomainError;

const CNT_LISTING_PRICE: &str = "listings_price_range_chk";
const CNT_LISTING_CATEGORY: &str = "listings_category_chk";
const CNT_LISTING_CONDITION: &str = "listings_condition_chk";
const CNT_LISTING_STATUS: &str = "listings_status_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_LISTING_PRICE => {
                        DomainError::invalid("price", "must be greater than 0 and at most 100000")
                    }
                    CNT_LISTING_CATEGORY => DomainError::invalid("category", "unknown category"),
                    CNT_LISTING_CONDITION => {
                        DomainError::invalid("condition", "unknown condition")
                    }
                    CNT_LISTING_STATUS => DomainError::invalid("status", "unknown status"),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("listing not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
