//! Trip use cases.

use crate::error::AppError;
use crate::model::{NewTrip, Trip};
use crate::service::{PlaceService, LIST_LIMIT};
use crate::store::{from_document, to_document, Filter, FindQuery, RecordStore, Sort, TRIPS};

pub struct TripService;

impl TripService {
    /// Persist a new trip with server-assigned id and timestamp.
    pub async fn create(store: &dyn RecordStore, input: NewTrip) -> Result<Trip, AppError> {
        let trip = Trip::new(input)?;
        store.insert_one(TRIPS, to_document(&trip)?).await?;
        tracing::info!(trip_id = %trip.id, "trip created");
        Ok(trip)
    }

    /// All trips, newest first, at most [`LIST_LIMIT`].
    pub async fn list(store: &dyn RecordStore) -> Result<Vec<Trip>, AppError> {
        let query = FindQuery::new(Filter::all())
            .sort(Sort::desc("created_at"))
            .limit(LIST_LIMIT);
        let docs = store.find_many(TRIPS, &query).await?;
        docs.into_iter()
            .map(|d| from_document(d).map_err(AppError::from))
            .collect()
    }

    pub async fn get(store: &dyn RecordStore, trip_id: &str) -> Result<Trip, AppError> {
        let doc = store
            .find_one(TRIPS, &Filter::eq("id", trip_id))
            .await?
            .ok_or_else(AppError::trip_not_found)?;
        Ok(from_document(doc)?)
    }

    /// Remove the trip's places, then the trip. NotFound when no trip was removed.
    pub async fn delete(store: &dyn RecordStore, trip_id: &str) -> Result<(), AppError> {
        let places = PlaceService::delete_for_trip(store, trip_id).await?;
        let deleted = store.delete_one(TRIPS, &Filter::eq("id", trip_id)).await?;
        if deleted == 0 {
            return Err(AppError::trip_not_found());
        }
        tracing::info!(trip_id = %trip_id, places, "trip deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewPlace;
    use crate::store::MemoryStore;

    fn new_trip(name: &str) -> NewTrip {
        NewTrip { name: name.into() }
    }

    #[tokio::test]
    async fn create_assigns_id_and_time() {
        let store = MemoryStore::new();
        let before = chrono::Utc::now();
        let trip = TripService::create(&store, new_trip("Paris")).await.unwrap();
        assert!(!trip.id.is_empty());
        assert_eq!(trip.name, "Paris");
        assert!(trip.created_at >= before);
        assert_eq!(TripService::get(&store, &trip.id).await.unwrap(), trip);
    }

    #[tokio::test]
    async fn names_need_not_be_unique() {
        let store = MemoryStore::new();
        let a = TripService::create(&store, new_trip("Paris")).await.unwrap();
        let b = TripService::create(&store, new_trip("Paris")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(TripService::list(&store).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryStore::new();
        let mut created = Vec::new();
        for i in 0..7 {
            created.push(TripService::create(&store, new_trip(&format!("trip {}", i))).await.unwrap());
        }
        let listed = TripService::list(&store).await.unwrap();
        assert_eq!(listed.len(), created.len());
        assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(listed[0].id, created.last().unwrap().id);
        assert_eq!(listed.last().unwrap().id, created[0].id);
    }

    #[tokio::test]
    async fn list_is_capped() {
        let store = MemoryStore::new();
        for i in 0..LIST_LIMIT + 1 {
            TripService::create(&store, new_trip(&format!("trip {}", i))).await.unwrap();
        }
        assert_eq!(TripService::list(&store).await.unwrap().len(), LIST_LIMIT);
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let store = MemoryStore::new();
        let err = TripService::get(&store, "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Trip not found");
    }

    #[tokio::test]
    async fn delete_cascades_to_places() {
        let store = MemoryStore::new();
        let trip = TripService::create(&store, new_trip("Paris")).await.unwrap();
        for name in ["Louvre", "Orsay"] {
            PlaceService::create(&store, &trip.id, NewPlace { name: name.into(), description: String::new() })
                .await
                .unwrap();
        }
        TripService::delete(&store, &trip.id).await.unwrap();
        assert!(matches!(TripService::get(&store, &trip.id).await, Err(AppError::NotFound(_))));
        assert!(PlaceService::list_by_trip(&store, &trip.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_leaves_others_alone() {
        let store = MemoryStore::new();
        let trip = TripService::create(&store, new_trip("Paris")).await.unwrap();
        let place = PlaceService::create(&store, &trip.id, NewPlace { name: "Louvre".into(), description: String::new() })
            .await
            .unwrap();

        let err = TripService::delete(&store, "missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Trip not found");
        assert_eq!(TripService::get(&store, &trip.id).await.unwrap(), trip);
        assert_eq!(PlaceService::list_by_trip(&store, &trip.id).await.unwrap(), vec![place]);
    }

    #[tokio::test]
    async fn storage_faults_propagate() {
        let store = MemoryStore::new();
        store.close().await;
        assert!(matches!(
            TripService::create(&store, new_trip("Paris")).await,
            Err(AppError::Store(_))
        ));
        assert!(matches!(TripService::list(&store).await, Err(AppError::Store(_))));
        assert!(matches!(TripService::delete(&store, "x").await, Err(AppError::Store(_))));
    }
}
