pub mod analyze;
pub mod check;
pub mod checkin;
pub mod circles;
pub mod data;
pub mod fingerprint;
pub mod ingredients;
pub mod matrix;
pub mod onboard;
pub mod prefs;
pub mod products;
pub mod routine;
pub mod scan;

use crate::config::{AppConfig, OutputFormat};
use crate::error::{CliError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use skinprint::core::catalog::Catalog;
use skinprint::core::io::store::{Store, keys};
use skinprint::core::models::checkin::Checkin;
use skinprint::core::models::ingredient::Ingredient;
use skinprint::core::models::preferences::UserPreferences;
use skinprint::core::models::product::Product;
use skinprint::core::models::routine::{Routine, RoutineSlot};
use skinprint::workflows::progress;
use tracing::{debug, info};

/// Everything a command needs: the catalog, the user's store and output settings.
pub struct AppContext {
    pub catalog: Catalog,
    pub store: Store,
    pub format: OutputFormat,
    pub default_time: RoutineSlot,
}

impl AppContext {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                info!("Loading catalog from {:?}", path);
                Catalog::load(path)?
            }
            None => Catalog::builtin(),
        };
        debug!(
            ingredients = catalog.ingredients().len(),
            products = catalog.products().len(),
            "Catalog ready."
        );

        info!("Opening store at {:?}", &config.store_path);
        let store = Store::open(&config.store_path)?;

        Ok(Self {
            catalog,
            store,
            format: config.output_format,
            default_time: config.default_time,
        })
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.store.get(key).unwrap_or_default()
    }

    /// Writes `value` under `key`. An existing entry that does not decode as `T` is left
    /// untouched and reported.
    fn persist<T: Serialize + DeserializeOwned>(&mut self, key: &str, value: &T) -> Result<()> {
        self.store.try_get::<T>(key)?;
        self.store.set(key, value)?;
        self.store.save()?;
        debug!("Saved '{}' to {:?}", key, self.store.path());
        Ok(())
    }

    pub fn preferences(&self) -> UserPreferences {
        self.load(keys::USER_PREFERENCES)
    }

    pub fn save_preferences(&mut self, preferences: &UserPreferences) -> Result<()> {
        self.persist(keys::USER_PREFERENCES, preferences)
    }

    pub fn routine(&self) -> Routine {
        self.load(keys::USER_ROUTINE)
    }

    pub fn save_routine(&mut self, routine: &Routine) -> Result<()> {
        self.persist(keys::USER_ROUTINE, routine)
    }

    /// Stored check-ins, oldest first.
    pub fn checkins(&self) -> Vec<Checkin> {
        let mut checkins: Vec<Checkin> = self.load(keys::CHECKINS);
        progress::sort_by_date(&mut checkins);
        checkins
    }

    pub fn save_checkins(&mut self, checkins: &[Checkin]) -> Result<()> {
        self.persist(keys::CHECKINS, &checkins.to_vec())
    }

    pub fn save_value<T: Serialize + DeserializeOwned>(&mut self, key: &str, value: &T) -> Result<()> {
        self.persist(key, value)
    }

    pub fn value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.store.get(key)
    }

    pub fn ingredient(&self, identifier: &str) -> Result<&Ingredient> {
        self.catalog
            .resolve_ingredient(identifier)
            .ok_or_else(|| CliError::NotFound {
                kind: "ingredient",
                id: identifier.to_string(),
            })
    }

    pub fn product(&self, id: &str) -> Result<&Product> {
        self.catalog.product_by_id(id).ok_or_else(|| CliError::NotFound {
            kind: "product",
            id: id.to_string(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::context;
    use super::*;
    use chrono::{TimeZone, Utc};
    use skinprint::core::io::store::StoreError;
    use tempfile::tempdir;

    #[test]
    fn state_round_trips_through_the_store_file() {
        let tmp = tempdir().unwrap();
        let mut ctx = context(tmp.path());
        let mut prefs = ctx.preferences();
        prefs.add_liked("ceramides");
        ctx.save_preferences(&prefs).unwrap();

        let reopened = context(tmp.path());
        assert!(reopened.preferences().liked.contains("ceramides"));
    }

    #[test]
    fn checkins_are_returned_oldest_first() {
        let tmp = tempdir().unwrap();
        let mut ctx = context(tmp.path());
        let later = Checkin::new(Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap());
        let earlier = Checkin::new(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());
        ctx.save_checkins(&[later.clone(), earlier.clone()]).unwrap();
        assert_eq!(ctx.checkins(), vec![earlier, later]);
    }

    #[test]
    fn unreadable_history_is_not_overwritten() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("store.json");
        let original = r#"{
  "checkins": [
    {"date": "2024-03-01T08:00:00Z", "breakout": 1},
    {"date": "2024-03-02T08:00:00Z", "breakout": 2},
    {"date": "2024-03-03T08:00:00Z", "breakout": -1}
  ]
}
"#;
        std::fs::write(&path, original).unwrap();

        let mut ctx = context(tmp.path());
        assert!(ctx.checkins().is_empty());

        let checkin = Checkin::new(Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap());
        let err = ctx.save_checkins(&[checkin]).unwrap_err();
        assert!(matches!(err, CliError::Store(StoreError::Entry { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn unreadable_preferences_block_saving_preferences() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("store.json");
        std::fs::write(&path, r#"{"user_preferences": {"liked": 7}}"#).unwrap();

        let mut ctx = context(tmp.path());
        let prefs = ctx.preferences();
        assert!(matches!(
            ctx.save_preferences(&prefs),
            Err(CliError::Store(StoreError::Entry { .. }))
        ));
    }

    #[test]
    fn unknown_ids_are_not_found_errors() {
        let tmp = tempdir().unwrap();
        let ctx = context(tmp.path());
        assert!(matches!(
            ctx.product("product-99"),
            Err(CliError::NotFound { kind: "product", .. })
        ));
        assert_eq!(ctx.ingredient("Retinol").unwrap().id, "retinol");
    }
}
