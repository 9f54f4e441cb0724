//! Route-planning form

use crate::core::api;
use crate::core::app::Dashboard;
use crate::core::network::{ApiRequest, Transport};
use crate::map::Canonicalizer;
use crate::session::events::Panel;
use crate::session::messages::FormMsg;

use super::FormError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteForm {
    pub lat_min: String,
    pub lon_min: String,
    pub lat_max: String,
    pub lon_max: String,
    /// Serialized mission area, refreshed from the canonical slot at submit
    pub area_geojson: String,
}

impl RouteForm {
    fn bounds(&self) -> [&str; 4] {
        [&self.lat_min, &self.lon_min, &self.lat_max, &self.lon_max]
    }

    /// Sync the area field from the canonical geometry, then build the request
    ///
    /// Blank bounds are taken from the geometry for this request only; the
    /// typed fields are never overwritten.
    pub fn build_request(&mut self, canonical: &Canonicalizer) -> Result<ApiRequest, FormError> {
        self.area_geojson = canonical.serialized();

        let derived = canonical
            .current_geometry()
            .and_then(|geometry| geometry.bounds())
            .map(|bounds| [bounds.south, bounds.west, bounds.north, bounds.east]);

        let mut resolved: [String; 4] = Default::default();
        for (index, typed) in self.bounds().into_iter().enumerate() {
            resolved[index] = match (typed.trim(), derived) {
                ("", Some(derived)) => derived[index].to_string(),
                ("", None) => {
                    return Err(FormError::guard(
                        "Draw a mission area or enter all four bounds before planning a route.",
                    ));
                }
                (typed, _) => typed.to_string(),
            };
        }

        Ok(api::plan_route(
            resolved.each_ref().map(String::as_str),
            &self.area_geojson,
        ))
    }
}

pub async fn submit_route<T: Transport>(app: &Dashboard<T>) {
    let ticket = app.sequencer.issue_submit(Panel::Mission);
    let request = app.forms.borrow_mut().route.build_request(&app.geometry);
    super::submit(app, ticket, FormMsg::PlanRoute, request).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::activity::LogSink;
    use crate::core::testing::{self, Reply};
    use crate::domain::{Geometry, LatLng, close_ring};
    use crate::map::LeafletEvent;
    use crate::map::leaflet::LeafletLayer;
    use crate::session::messages::Msg;
    use serde_json::json;
    use std::rc::Rc;

    fn polygon() -> Vec<LatLng> {
        vec![
            LatLng::new(51.50, -0.13),
            LatLng::new(51.50, -0.12),
            LatLng::new(51.51, -0.12),
        ]
    }

    #[test]
    fn bounds_fill_from_geometry_and_keep_typed_values() {
        let canonical = Canonicalizer::new(Rc::new(LogSink::default()));
        canonical.set_geometry(Some(Geometry::polygon(close_ring(&polygon()))));

        let mut form = RouteForm {
            lat_min: "51.4".into(),
            ..RouteForm::default()
        };
        let request = form.build_request(&canonical).unwrap();
        assert_eq!(request.field("lat_min"), Some("51.4"));
        assert_eq!(request.field("lon_min"), Some("-0.13"));
        assert_eq!(request.field("lat_max"), Some("51.51"));
        assert_eq!(request.field("lon_max"), Some("-0.12"));
        assert_eq!(request.field("area_geojson"), Some(canonical.serialized().as_str()));
    }

    #[test]
    fn no_geometry_and_missing_bounds_is_a_guard_failure() {
        let canonical = Canonicalizer::new(Rc::new(LogSink::default()));
        let mut form = RouteForm {
            lat_min: "1".into(),
            lon_min: "2".into(),
            ..RouteForm::default()
        };
        assert!(matches!(form.build_request(&canonical), Err(FormError::Guard(_))));
    }

    #[test]
    fn stale_area_text_is_replaced() {
        let canonical = Canonicalizer::new(Rc::new(LogSink::default()));
        let mut form = RouteForm {
            lat_min: "1".into(),
            lon_min: "2".into(),
            lat_max: "3".into(),
            lon_max: "4".into(),
            area_geojson: "{\"type\":\"Polygon\",\"coordinates\":[]}".into(),
        };
        let request = form.build_request(&canonical).unwrap();
        assert_eq!(request.field("area_geojson"), None);
        assert!(form.area_geojson.is_empty());
    }

    #[tokio::test]
    async fn polygon_drawn_after_touching_form_is_submitted() {
        let (app, _probes) = testing::dashboard();
        app.with_forms(|forms| {
            forms.route.lat_min = "51.0".into();
            forms.route.lon_min = "-1.0".into();
            forms.route.lat_max = "52.0".into();
            forms.route.lon_max = "0.0".into();
        });

        app.update(Msg::leaflet(LeafletEvent::Created(LeafletLayer::Polygon {
            latlngs: polygon(),
        })))
        .await;
        let expected = serde_json::to_string(&Geometry::polygon(close_ring(&polygon()))).unwrap();

        app.client.transport().reply(Reply::json(json!({"commands": ["takeoff", "land"]})));
        app.update(Msg::plan_route()).await;

        let requests = app.client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, api::PLAN_ROUTE);
        assert_eq!(requests[0].field("area_geojson"), Some(expected.as_str()));
        assert_eq!(requests[0].field("lat_min"), Some("51.0"));
        assert!(app.output(Panel::Mission).unwrap().contains("\"takeoff\""));
    }

    #[tokio::test]
    async fn deleted_area_no_longer_fills_bounds() {
        let (app, _probes) = testing::dashboard();
        app.update(Msg::leaflet(LeafletEvent::Created(LeafletLayer::Polygon {
            latlngs: polygon(),
        })))
        .await;
        app.client.transport().reply(Reply::json(json!({"commands": []})));
        app.update(Msg::plan_route()).await;
        assert_eq!(app.client.transport().requests()[0].field("lat_min"), Some("51.5"));
        assert!(app.with_forms(|forms| forms.route.lat_min.is_empty()));

        app.update(Msg::leaflet(LeafletEvent::Deleted)).await;
        app.update(Msg::plan_route()).await;

        assert_eq!(app.client.transport().requests().len(), 1);
        assert_eq!(
            app.output(Panel::Mission).as_deref(),
            Some("Draw a mission area or enter all four bounds before planning a route.")
        );
    }

    #[tokio::test]
    async fn guard_failure_sends_nothing() {
        let (app, _probes) = testing::dashboard();
        app.update(Msg::plan_route()).await;

        assert!(app.client.transport().requests().is_empty());
        assert_eq!(
            app.output(Panel::Mission).as_deref(),
            Some("Draw a mission area or enter all four bounds before planning a route.")
        );
    }

    #[tokio::test]
    async fn backend_rejection_is_shown_in_output() {
        let (app, _probes) = testing::dashboard();
        app.with_forms(|forms| {
            forms.route = RouteForm {
                lat_min: "1".into(),
                lon_min: "2".into(),
                lat_max: "3".into(),
                lon_max: "4".into(),
                area_geojson: String::new(),
            };
        });
        app.client
            .transport()
            .reply(Reply::status(400, r#"{"detail": "Bounds are inverted"}"#));
        app.update(Msg::plan_route()).await;

        assert_eq!(
            app.output(Panel::Mission).as_deref(),
            Some("Route planning failed: Bounds are inverted")
        );
    }
}
