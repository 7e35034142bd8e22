//! Event and the records it references on the wire.
//!
//! Only `name`, `date` and `venue.id` reach storage. Sponsors and talks are
//! accepted and echoed back but have no storage path.

use super::Resource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// `None` when the row was loaded without its date (page listings).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Venue,
    #[serde(default)]
    pub sponsors: Vec<Sponsor>,
    #[serde(default)]
    pub talks: Vec<Talk>,
}

impl Event {
    /// Venue id to link, if one was supplied. Ids `<= 0` mean no venue.
    pub fn venue_ref(&self) -> Option<i64> {
        (self.venue.id > 0).then_some(self.venue.id)
    }
}

impl Resource for Event {
    const NAME: &'static str = "Event";
    const SLUG: &'static str = "event";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    /// Any name is accepted; `date` backs a NOT NULL column.
    fn validate(&self) -> Result<(), &'static str> {
        if self.date.is_none() {
            return Err("date is required");
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub capacity: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sponsor {
    pub id: i64,
    pub name: String,
    pub contribution: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Talk {
    pub id: i64,
    pub name: String,
    pub speaker: Speaker,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Speaker {
    pub id: i64,
    pub name: String,
    pub twitter: String,
    pub github: String,
    pub bio: String,
    pub avatar: String,
}
