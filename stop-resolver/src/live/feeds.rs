//! Sessions for the three kinds of live consumer.
//!
//! - direction screens: a service's stops split by direction
//! - map screens: deduplicated stops around a point
//! - vehicle overlays: positions, optionally for one service

use std::sync::Arc;

use tracing::info_span;

use crate::config::ResolverConfig;
use crate::domain::{Coordinate, Stop, Vehicle};
use crate::resolve::{DirectionAssignment, dedupe_nearby, resolve_directions, vehicles_for_service};
use crate::transit::{FetchError, TransitSource};

use super::session::PollingSession;

/// Keep a service's outbound/inbound split up to date.
///
/// The configured unclassified policy is applied before publishing.
pub fn direction_feed<S, OnUpdate, OnError>(
    source: Arc<S>,
    service_id: impl Into<String>,
    config: &ResolverConfig,
    on_update: OnUpdate,
    on_error: OnError,
) -> PollingSession<DirectionAssignment>
where
    S: TransitSource + 'static,
    OnUpdate: FnMut(Arc<DirectionAssignment>) + Send + 'static,
    OnError: FnMut(&FetchError) + Send + 'static,
{
    let service_id = service_id.into();
    let policy = config.unclassified_policy;

    let span = info_span!("direction_feed", service = %service_id);
    let _entered = span.enter();

    PollingSession::start(
        move || {
            let source = Arc::clone(&source);
            async move { source.stops().await }
        },
        move |catalog: Vec<Stop>| resolve_directions(&catalog, &service_id).apply_policy(policy),
        config.refresh_interval,
        on_update,
        on_error,
    )
}

/// Keep the map markers around `center` up to date.
pub fn nearby_feed<S, OnUpdate, OnError>(
    source: Arc<S>,
    center: Coordinate,
    config: &ResolverConfig,
    on_update: OnUpdate,
    on_error: OnError,
) -> PollingSession<Vec<Stop>>
where
    S: TransitSource + 'static,
    OnUpdate: FnMut(Arc<Vec<Stop>>) + Send + 'static,
    OnError: FnMut(&FetchError) + Send + 'static,
{
    let max_distance_m = config.nearby_radius_m;
    let merge_radius_m = config.merge_radius_m;

    let span = info_span!(
        "nearby_feed",
        lat = center.latitude(),
        lon = center.longitude()
    );
    let _entered = span.enter();

    PollingSession::start(
        move || {
            let source = Arc::clone(&source);
            async move { source.stops().await }
        },
        move |catalog: Vec<Stop>| dedupe_nearby(&catalog, center, max_distance_m, merge_radius_m),
        config.refresh_interval,
        on_update,
        on_error,
    )
}

/// Keep vehicle positions up to date, for one service or all of them.
pub fn vehicle_feed<S, OnUpdate, OnError>(
    source: Arc<S>,
    service_name: Option<String>,
    config: &ResolverConfig,
    on_update: OnUpdate,
    on_error: OnError,
) -> PollingSession<Vec<Vehicle>>
where
    S: TransitSource + 'static,
    OnUpdate: FnMut(Arc<Vec<Vehicle>>) + Send + 'static,
    OnError: FnMut(&FetchError) + Send + 'static,
{
    let span = info_span!("vehicle_feed", service = service_name.as_deref().unwrap_or("*"));
    let _entered = span.enter();

    PollingSession::start(
        move || {
            let source = Arc::clone(&source);
            async move { source.vehicles().await }
        },
        move |vehicles: Vec<Vehicle>| vehicles_for_service(&vehicles, service_name.as_deref()),
        config.refresh_interval,
        on_update,
        on_error,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transit::{MockTransitClient, StopDto, VehicleDto};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn stop_dto(id: u64, name: &str, lat: f64, lon: f64, services: &[&str]) -> StopDto {
        StopDto {
            stop_id: id,
            atco_code: format!("620{id}"),
            name: name.to_string(),
            latitude: Some(lat),
            longitude: Some(lon),
            services: Some(services.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    fn vehicle_dto(id: &str, service: &str) -> VehicleDto {
        VehicleDto {
            vehicle_id: id.to_string(),
            latitude: Some(55.95),
            longitude: Some(-3.19),
            service_name: Some(service.to_string()),
            ..Default::default()
        }
    }

    fn source() -> Arc<MockTransitClient> {
        let mut leith = stop_dto(3, "Leith Walk", 55.9630, -3.1770, &["22"]);
        leith.direction = Some("N".to_string());

        Arc::new(MockTransitClient::from_dtos(
            vec![
                stop_dto(1, "Princes St (Stop IK)", 55.9519, -3.1960, &["22 "]),
                stop_dto(2, "Princes St (Stop IF)", 55.9521, -3.1955, &[" 22"]),
                leith,
                stop_dto(4, "Waverley", 55.9520, -3.1890, &["10"]),
                stop_dto(5, "Waverley", 55.95205, -3.18905, &["10"]),
            ],
            vec![vehicle_dto("a", "22"), vehicle_dto("b", "10")],
        ))
    }

    fn config() -> ResolverConfig {
        ResolverConfig::default().with_refresh_interval(Duration::from_secs(10))
    }

    #[tokio::test(start_paused = true)]
    async fn direction_feed_publishes_assignment() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = direction_feed(
            source(),
            "22",
            &config(),
            move |a: Arc<DirectionAssignment>| {
                let _ = tx.send(a);
            },
            |_| {},
        );

        let assignment = rx.recv().await.unwrap();
        let ids = |stops: &[Stop]| stops.iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids(&assignment.outbound), vec![1]);
        assert_eq!(ids(&assignment.inbound), vec![2, 3]);

        session.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn nearby_feed_merges_duplicates() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let center = Coordinate::new(55.9520, -3.1890).unwrap();
        let session = nearby_feed(
            source(),
            center,
            &config(),
            move |stops: Arc<Vec<Stop>>| {
                let _ = tx.send(stops);
            },
            |_| {},
        );

        let stops = rx.recv().await.unwrap();
        let waverley = stops.iter().filter(|s| s.name == "Waverley").count();
        assert_eq!(waverley, 1);
        // Leith Walk is ~1.4 km away
        assert!(stops.iter().all(|s| s.name != "Leith Walk"));

        session.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn vehicle_feed_replaces_positions_each_cycle() {
        let mock = source();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = vehicle_feed(
            Arc::clone(&mock),
            Some("22".to_string()),
            &config(),
            move |vehicles: Arc<Vec<Vehicle>>| {
                let _ = tx.send(vehicles);
            },
            |_| {},
        );

        let first = rx.recv().await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "a");

        mock.set_vehicles(vec![vehicle_dto("c", "22"), vehicle_dto("d", "22")])
            .await;
        let second = rx.recv().await.unwrap();
        let ids: Vec<&str> = second.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d"]);

        session.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn unclassified_policy_applied() {
        let mock = Arc::new(MockTransitClient::from_dtos(
            vec![stop_dto(9, "Queen St", 55.955, -3.2, &["22"])],
            Vec::new(),
        ));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = direction_feed(
            mock,
            "22",
            &config().with_unclassified_policy(crate::resolve::UnclassifiedPolicy::Keep),
            move |a: Arc<DirectionAssignment>| {
                let _ = tx.send(a);
            },
            |_| {},
        );

        let assignment = rx.recv().await.unwrap();
        assert!(assignment.outbound.is_empty());
        assert_eq!(assignment.unclassified.len(), 1);

        session.shutdown().await;
    }
}
