//! Driving a widget host from tokio with paused time.
#![cfg(feature = "tokio")]

use std::time::Duration;

use disappearing_label::{DisappearingLabel, Point, Rect, Widget, WidgetHost};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn test_label_hides_after_timeout() {
    let mut host = WidgetHost::with_tokio_clock();
    let id = host.insert(DisappearingLabel::new(host.timer_host()));

    assert_eq!(host.run_for(ms(1999)).await, 0);
    assert!(host.widget::<DisappearingLabel>(id).unwrap().is_visible());

    assert_eq!(host.run_for(ms(1)).await, 1);
    assert!(!host.widget::<DisappearingLabel>(id).unwrap().is_visible());
}

#[tokio::test(start_paused = true)]
async fn test_hover_holds_message() {
    let mut host = WidgetHost::with_tokio_clock();
    let mut label = DisappearingLabel::new(host.timer_host());
    label.set_geometry(Rect::new(0.0, 0.0, 100.0, 20.0));
    let id = host.insert(label);

    host.run_for(ms(500)).await;
    host.pointer_moved(Point::new(10.0, 10.0));
    assert_eq!(host.run_for(ms(10_000)).await, 0);

    host.pointer_left_window();
    assert_eq!(host.run_for(ms(2000)).await, 1);
    assert!(!host.widget::<DisappearingLabel>(id).unwrap().is_visible());
}
