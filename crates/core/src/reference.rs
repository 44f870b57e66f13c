use crate::error::ReferenceError;
use crate::traits::ReferenceApi;
use chrono::{DateTime, Utc};

/// The three lookup lists the search surface is built from. Loaded once per
/// session and read-only afterwards; if any list fails to load the whole
/// store is unavailable and search must stay blocked.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    schools: Vec<String>,
    cities: Vec<String>,
    zipcodes: Vec<String>,
    fetched_at: DateTime<Utc>,
}

impl ReferenceData {
    /// Issues the three fetches concurrently; the first failure aborts the
    /// load. No retry, the caller decides whether to start over.
    pub async fn load<A>(api: &A) -> Result<Self, ReferenceError>
    where
        A: ReferenceApi + Sync,
    {
        let (schools, cities, zipcodes) = tokio::try_join!(
            api.fetch_schools(),
            api.fetch_cities(),
            api.fetch_zipcodes()
        )?;

        Ok(Self {
            schools,
            cities,
            zipcodes,
            fetched_at: Utc::now(),
        })
    }

    pub fn schools(&self) -> &[String] {
        &self.schools
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn zipcodes(&self) -> &[String] {
        &self.zipcodes
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn school_count(&self) -> usize {
        self.schools.len()
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    pub fn zipcode_count(&self) -> usize {
        self.zipcodes.len()
    }
}
