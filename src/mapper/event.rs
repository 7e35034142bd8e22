//! Event rows in `events`, venue links in `events_rel`.

use super::Repository;
use crate::model::{Event, Page};
use crate::sql::Statement;
use crate::store::{Gateway, StoreError};
use async_trait::async_trait;
use chrono::{NaiveDateTime, TimeZone, Utc};

/// Relation kind code for a venue link.
pub const VENUE_RELATION: &str = "v";

const SELECT_BY_ID: &str = "SELECT name, date FROM events WHERE id = $1";
const SELECT_PAGE: &str = "SELECT id, name FROM events ORDER BY id LIMIT $1 OFFSET $2";
const INSERT: &str = "INSERT INTO events (name, date) VALUES ($1, $2) RETURNING id";
const INSERT_RELATION: &str = "INSERT INTO events_rel (events_id, rel_id, type) VALUES ($1, $2, $3)";
const UPDATE: &str = "UPDATE events SET name = $1, date = $2 WHERE id = $3";
const DELETE: &str = "DELETE FROM events WHERE id = $1";

pub struct EventMapper {
    gateway: Gateway,
}

impl EventMapper {
    pub fn new(gateway: Gateway) -> Self {
        EventMapper { gateway }
    }
}

fn stored_date(event: &Event) -> Result<NaiveDateTime, StoreError> {
    event
        .date
        .map(|d| d.naive_utc())
        .ok_or(StoreError::MissingField("date"))
}

fn insert_statement(event: &Event) -> Result<Statement, StoreError> {
    Ok(Statement::new(INSERT)
        .bind(event.name.as_str())
        .bind(stored_date(event)?))
}

/// The `events_rel` insert for a freshly created event, if it names a venue.
fn relation_statement(event_id: i64, event: &Event) -> Option<Statement> {
    event.venue_ref().map(|venue_id| {
        Statement::new(INSERT_RELATION)
            .bind(event_id)
            .bind(venue_id)
            .bind(VENUE_RELATION)
    })
}

fn update_statement(id: i64, event: &Event) -> Result<Statement, StoreError> {
    Ok(Statement::new(UPDATE)
        .bind(event.name.as_str())
        .bind(stored_date(event)?)
        .bind(id))
}

#[async_trait]
impl Repository<Event> for EventMapper {
    async fn fetch_by_id(&self, id: i64) -> Result<Event, StoreError> {
        let (name, date): (String, NaiveDateTime) = self
            .gateway
            .query_one(&Statement::new(SELECT_BY_ID).bind(id))
            .await?;
        Ok(Event {
            id,
            name,
            date: Some(Utc.from_utc_datetime(&date)),
            ..Event::default()
        })
    }

    async fn fetch_page(&self, page: Page) -> Result<Vec<Event>, StoreError> {
        let stmt = Statement::new(SELECT_PAGE).bind(page.limit).bind(page.offset);
        let rows: Vec<(i64, String)> = self.gateway.query_many(&stmt).await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| Event {
                id,
                name,
                ..Event::default()
            })
            .collect())
    }

    /// The event row and its venue link commit together or not at all.
    async fn create(&self, mut event: Event) -> Result<Event, StoreError> {
        let insert = insert_statement(&event)?;
        let mut tx = self.gateway.begin().await?;
        let (id,): (i64,) = tx.query_one(&insert).await?;
        if let Some(link) = relation_statement(id, &event) {
            tx.exec(&link).await?;
        }
        tx.commit().await?;
        tracing::debug!(event_id = id, venue_id = ?event.venue_ref(), "event created");
        event.id = id;
        Ok(event)
    }

    async fn update(&self, id: i64, event: &Event) -> Result<u64, StoreError> {
        self.gateway.exec(&update_statement(id, event)?).await
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        self.gateway.exec(&Statement::new(DELETE).bind(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Venue;
    use crate::sql::BindValue;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn sample() -> Event {
        Event {
            name: "test event".into(),
            date: Some(Utc.with_ymd_and_hms(2018, 3, 14, 15, 55, 58).unwrap()),
            ..Event::default()
        }
    }

    fn wall_clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 3, 14)
            .unwrap()
            .and_hms_opt(15, 55, 58)
            .unwrap()
    }

    #[test]
    fn insert_binds_name_and_utc_wall_clock() {
        let stmt = insert_statement(&sample()).unwrap();
        assert_eq!(stmt.sql, INSERT);
        assert_eq!(
            stmt.params,
            vec![BindValue::Text("test event".into()), BindValue::Timestamp(wall_clock())]
        );
    }

    #[test]
    fn relation_only_for_positive_venue() {
        let mut event = sample();
        assert!(relation_statement(1, &event).is_none());

        event.venue = Venue {
            id: 123,
            name: "Code Node".into(),
            ..Venue::default()
        };
        let link = relation_statement(1, &event).unwrap();
        assert_eq!(
            link.params,
            vec![BindValue::Int(1), BindValue::Int(123), BindValue::Text("v".into())]
        );
        assert_eq!(link.placeholder_count(), 3);
    }

    #[test]
    fn update_takes_id_argument_not_body_id() {
        let mut event = sample();
        event.id = 99;
        let stmt = update_statement(7, &event).unwrap();
        assert_eq!(stmt.params.last(), Some(&BindValue::Int(7)));
    }

    #[test]
    fn missing_date_is_rejected_before_storage() {
        let mut event = sample();
        event.date = None;
        assert_matches!(insert_statement(&event), Err(StoreError::MissingField("date")));
    }
}
