use std::sync::Arc;

use parking_lot::Mutex;
use vosettings_core::{
    event_bus, AppEvent, EventBus, EventCategory, EventFilter, SettingValue, SettingsEvent,
    UiEvent, VariantMap,
};

fn settings_data() -> AppEvent {
    let mut data = VariantMap::new();
    data.insert("videoDumbMode".into(), SettingValue::Bool(false));
    data.insert("syncMode".into(), SettingValue::Int(1));
    AppEvent::Settings(SettingsEvent::SettingsData(data))
}

fn recorder(bus: &EventBus, filter: EventFilter) -> Arc<Mutex<Vec<AppEvent>>> {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    bus.subscribe(filter, move |event| sink.lock().push(event.clone()));
    received
}

#[test]
fn test_category_filter() {
    let bus = EventBus::new();
    let ui = recorder(&bus, EventFilter::Categories(vec![EventCategory::Ui]));
    let everything = recorder(&bus, EventFilter::All);

    assert_eq!(bus.publish(&settings_data()), 1);
    assert_eq!(bus.publish(&AppEvent::Ui(UiEvent::WindowClosed)), 2);

    assert_eq!(*ui.lock(), vec![AppEvent::Ui(UiEvent::WindowClosed)]);
    assert_eq!(
        *everything.lock(),
        vec![settings_data(), AppEvent::Ui(UiEvent::WindowClosed)]
    );
}

#[test]
fn test_events_arrive_in_publish_order() {
    let bus = EventBus::new();
    let received = recorder(&bus, EventFilter::All);

    for index in 0..3 {
        bus.publish(&AppEvent::Ui(UiEvent::PageChanged {
            index,
            title: format!("page {}", index),
        }));
    }

    let indices: Vec<usize> = received
        .lock()
        .iter()
        .filter_map(|event| match event {
            AppEvent::Ui(UiEvent::PageChanged { index, .. }) => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_global_bus_is_shared() {
    let id = event_bus().subscribe(EventFilter::All, |_| {});
    assert!(event_bus().subscriber_count() >= 1);
    assert!(event_bus().unsubscribe(id));
}
