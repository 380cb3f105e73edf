//! Place use cases.

use crate::error::AppError;
use crate::model::{NewPlace, Place};
use crate::service::{TripService, LIST_LIMIT};
use crate::store::{from_document, to_document, Filter, FindQuery, RecordStore, Sort, PLACES};

pub struct PlaceService;

impl PlaceService {
    /// Persist a place under an existing trip. NotFound ("Trip not found") otherwise.
    pub async fn create(
        store: &dyn RecordStore,
        trip_id: &str,
        input: NewPlace,
    ) -> Result<Place, AppError> {
        let trip = TripService::get(store, trip_id).await?;
        let place = Place::new(&trip, input)?;
        store.insert_one(PLACES, to_document(&place)?).await?;
        tracing::info!(trip_id = %trip.id, place_id = %place.id, "place created");
        Ok(place)
    }

    /// Places of one trip, oldest first, at most [`LIST_LIMIT`]. An unknown trip
    /// yields an empty list, not NotFound.
    pub async fn list_by_trip(store: &dyn RecordStore, trip_id: &str) -> Result<Vec<Place>, AppError> {
        let query = FindQuery::new(Filter::eq("trip_id", trip_id))
            .sort(Sort::asc("created_at"))
            .limit(LIST_LIMIT);
        let docs = store.find_many(PLACES, &query).await?;
        docs.into_iter()
            .map(|d| from_document(d).map_err(AppError::from))
            .collect()
    }

    /// Delete by global place id, regardless of trip.
    pub async fn delete(store: &dyn RecordStore, place_id: &str) -> Result<(), AppError> {
        let deleted = store.delete_one(PLACES, &Filter::eq("id", place_id)).await?;
        if deleted == 0 {
            return Err(AppError::place_not_found());
        }
        tracing::info!(place_id = %place_id, "place deleted");
        Ok(())
    }

    /// Cascade step of trip deletion. Returns how many places were removed.
    pub(crate) async fn delete_for_trip(store: &dyn RecordStore, trip_id: &str) -> Result<u64, AppError> {
        Ok(store.delete_many(PLACES, &Filter::eq("trip_id", trip_id)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewTrip;
    use crate::store::{MemoryStore, RecordStore};

    fn new_place(name: &str) -> NewPlace {
        NewPlace {
            name: name.into(),
            description: String::new(),
        }
    }

    async fn store_with_trip() -> (MemoryStore, String) {
        let store = MemoryStore::new();
        let trip = TripService::create(&store, NewTrip { name: "Paris".into() })
            .await
            .unwrap();
        (store, trip.id)
    }

    #[tokio::test]
    async fn create_for_missing_trip_persists_nothing() {
        let store = MemoryStore::new();
        let missing = crate::model::new_id();
        let err = PlaceService::create(&store, &missing, new_place("Louvre"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Trip not found");
        let all = store.find_many(PLACES, &FindQuery::default()).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn list_is_in_creation_order() {
        let (store, trip_id) = store_with_trip().await;
        let mut created = Vec::new();
        for name in ["A", "B", "C"] {
            created.push(PlaceService::create(&store, &trip_id, new_place(name)).await.unwrap());
        }
        let listed = PlaceService::list_by_trip(&store, &trip_id).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(listed, created);
    }

    #[tokio::test]
    async fn list_only_returns_own_places() {
        let (store, trip_id) = store_with_trip().await;
        let other = TripService::create(&store, NewTrip { name: "Rome".into() }).await.unwrap();
        PlaceService::create(&store, &trip_id, new_place("Louvre")).await.unwrap();
        PlaceService::create(&store, &other.id, new_place("Colosseum")).await.unwrap();

        let listed = PlaceService::list_by_trip(&store, &other.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Colosseum");
        assert!(PlaceService::list_by_trip(&store, "unknown").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_capped() {
        let (store, trip_id) = store_with_trip().await;
        for i in 0..LIST_LIMIT + 3 {
            PlaceService::create(&store, &trip_id, new_place(&format!("p{}", i))).await.unwrap();
        }
        let listed = PlaceService::list_by_trip(&store, &trip_id).await.unwrap();
        assert_eq!(listed.len(), LIST_LIMIT);
        assert_eq!(listed[0].name, "p0");
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let (store, trip_id) = store_with_trip().await;
        let place = PlaceService::create(&store, &trip_id, new_place("Louvre")).await.unwrap();
        PlaceService::delete(&store, &place.id).await.unwrap();
        let err = PlaceService::delete(&store, &place.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Place not found");
    }

    #[tokio::test]
    async fn create_keeps_description() {
        let (store, trip_id) = store_with_trip().await;
        let place = PlaceService::create(
            &store,
            &trip_id,
            NewPlace {
                name: "Louvre".into(),
                description: "Mona Lisa".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(place.description, "Mona Lisa");
        assert_eq!(place.trip_id, trip_id);
    }
}
