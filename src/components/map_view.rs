use std::time::Duration;

use gloo_timers::future::sleep;
use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Array, Reflect};
use leptos::logging::{error, log};
use leptos::*;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::models::hotel::Hotel;

// Leaflet, loaded from a script tag in index.html.
#[wasm_bindgen]
extern "C" {
    type LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn leaflet_map(container_id: &str) -> LeafletMap;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &Array, zoom: u8);

    type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &TileLayer, map: &LeafletMap);

    type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn marker(coords: &Array) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to_map(this: &Marker, map: &LeafletMap);

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Marker, content: &str);

    #[wasm_bindgen(method)]
    fn remove(this: &Marker);
}

const TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
// Continental US until the first search lands.
const DEFAULT_CENTER: (f64, f64) = (39.8, -98.6);
const DEFAULT_ZOOM: u8 = 4;
const CITY_ZOOM: u8 = 12;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions {
    attribution: String,
    max_zoom: u8,
}

/// Map of the current search results. The widget itself is external; this
/// component owns the container element, replaces the marker set whenever
/// the hotel list changes, and recenters on the first result.
#[component]
pub fn MapView(hotels: ReadSignal<Vec<Hotel>>) -> impl IntoView {
    let container_id = format!("map-{}", uuid::Uuid::new_v4());
    let map_handle = store_value(None::<JsValue>);
    let markers = store_value(Vec::<JsValue>::new());

    // The script tag and the container element both arrive on their own
    // schedule; retry until both exist, then give up quietly so headless
    // environments without Leaflet still render the rest of the page.
    {
        let container_id = container_id.clone();
        spawn_local(async move {
            let mut retries = 0;
            loop {
                if leaflet_available() && document().get_element_by_id(&container_id).is_some() {
                    let map = leaflet_map(&container_id);
                    map.set_view(&lat_lng(DEFAULT_CENTER.0, DEFAULT_CENTER.1), DEFAULT_ZOOM);
                    let options = tile_options();
                    tile_layer(TILE_URL, &options).add_to(&map);
                    map_handle.set_value(Some(map.into()));
                    // Markers for hotels that arrived while the widget was
                    // still loading.
                    render_markers(map_handle, markers, &hotels.get_untracked());
                    log!("map initialized");
                    break;
                }
                retries += 1;
                if retries >= 10 {
                    error!("map widget unavailable, markers will not be shown");
                    break;
                }
                sleep(Duration::from_millis(100)).await;
            }
        });
    }

    create_effect(move |_| {
        let hotels = hotels.get();
        render_markers(map_handle, markers, &hotels);
    });

    view! { <div class="map" id=container_id></div> }
}

fn render_markers(
    map_handle: StoredValue<Option<JsValue>>,
    markers: StoredValue<Vec<JsValue>>,
    hotels: &[Hotel],
) {
    map_handle.with_value(|handle| {
        let Some(handle) = handle else { return };
        let map: &LeafletMap = handle.unchecked_ref();

        markers.update_value(|old| {
            for pin in old.drain(..) {
                pin.unchecked_ref::<Marker>().remove();
            }
        });

        let mut placed = Vec::with_capacity(hotels.len());
        for hotel in hotels {
            let pin = marker(&lat_lng(hotel.lat, hotel.lng));
            pin.bind_popup(&format!("{}, {}", hotel.name, hotel.city));
            pin.add_to_map(map);
            placed.push(pin.into());
        }
        markers.set_value(placed);

        if let Some(first) = hotels.first() {
            map.set_view(&lat_lng(first.lat, first.lng), CITY_ZOOM);
        }
    });
}

fn lat_lng(lat: f64, lng: f64) -> Array {
    let pair = Array::new();
    pair.push(&JsValue::from_f64(lat));
    pair.push(&JsValue::from_f64(lng));
    pair
}

fn tile_options() -> JsValue {
    let options = TileOptions {
        attribution: "\u{a9} OpenStreetMap contributors".to_string(),
        max_zoom: 19,
    };
    <JsValue as JsValueSerdeExt>::from_serde(&options).unwrap_or(JsValue::NULL)
}

fn leaflet_available() -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str("L")).unwrap_or(false)
}
