//! Integration tests for the viewer session driven through TestHarness.
//!
//! Covers the load lifecycle, stale-result protection and error surfacing.

use std::time::Duration;

use blueprint_viewer_lib::fixtures::{self, ScriptedDecoder};
use blueprint_viewer_lib::harness::TestHarness;
use blueprint_viewer_lib::scene::shadow_casters;
use blueprint_viewer_lib::state::{ViewerConfig, ViewerStatus};
use glam::Vec3;
use shared::ViewerContent;

fn model_config(locator: &str) -> ViewerConfig {
    ViewerConfig {
        model: Some(locator.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_harness_idle_without_content() {
    let h = TestHarness::with_config(ViewerConfig {
        show_test_objects: false,
        ..Default::default()
    });
    assert_eq!(h.status(), ViewerStatus::Idle);
    assert_eq!(h.draw_count(), 0);
    assert_eq!(h.overlay().summary.objects, 0);
}

#[test]
fn test_harness_initial_model_loads_to_ready() {
    let decoder = ScriptedDecoder::new();
    decoder.succeed(
        "a.glb",
        fixtures::box_scene(Vec3::new(-2.0, 0.0, -1.0), Vec3::new(4.0, 6.0, 3.0)),
    );
    let mut h = TestHarness::with_decoder(model_config("a.glb"), decoder);

    assert_eq!(h.status(), ViewerStatus::Loading);
    assert!(h.settle());
    assert_eq!(h.status(), ViewerStatus::Ready);

    let meta = h.meta().unwrap();
    assert_eq!(meta.size, [6.0, 6.0, 4.0]);
    assert_eq!(meta.center, [1.0, 3.0, 1.0]);
    assert_eq!(h.model_offset(), Some(Vec3::new(-1.0, 0.0, -1.0)));

    let overlay = h.overlay();
    assert_eq!(overlay.summary.size, "6.00 × 6.00 × 4.00");
    assert_eq!(overlay.summary.fps, Some(60));
    assert!(overlay.loading.is_none());
}

#[test]
fn test_harness_progress_shown_while_loading() {
    let mut h = TestHarness::new();
    let gate = h
        .decoder()
        .gated("slow.glb", fixtures::unit_box_scene());
    h.set_model("slow.glb");

    assert!(h.step_until(|h| h.overlay().loading == Some(Some(10.0))));
    assert_eq!(h.status(), ViewerStatus::Loading);

    gate.release();
    assert!(h.settle());
    assert_eq!(h.status(), ViewerStatus::Ready);
}

#[test]
fn test_harness_switch_while_pending_keeps_only_latest() {
    let mut h = TestHarness::new();
    let gate_a = h
        .decoder()
        .gated("a.glb", fixtures::box_scene(Vec3::ZERO, Vec3::splat(8.0)));
    h.add_box_model("b.glb", Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));

    h.set_model("a.glb");
    h.step();
    h.set_model("b.glb");
    assert_eq!(h.status(), ViewerStatus::Loading);

    assert!(h.settle());
    gate_a.release();
    h.wait(Duration::from_millis(20));
    for _ in 0..5 {
        h.step();
    }

    assert_eq!(h.content(), &ViewerContent::Model("b.glb".into()));
    assert_eq!(h.meta().unwrap().size, [1.0, 2.0, 3.0]);
    assert_eq!(h.status(), ViewerStatus::Ready);
}

#[test]
fn test_harness_finished_but_unpolled_result_is_dropped() {
    let mut h = TestHarness::new();
    h.add_box_model("a.glb", Vec3::ZERO, Vec3::splat(8.0));
    h.add_box_model("b.glb", Vec3::ZERO, Vec3::ONE);

    h.set_model("a.glb");
    // a.glb decodes in the background but is never polled
    h.wait(Duration::from_millis(50));
    h.set_model("b.glb");

    assert!(h.settle());
    assert_eq!(h.meta().unwrap().size, [1.0, 1.0, 1.0]);
}

#[test]
fn test_harness_decode_failure_surfaces_as_error() {
    let mut h = TestHarness::new();
    h.add_failure("broken.glb", "unexpected end of buffer");
    h.set_model("broken.glb");

    assert!(h.settle());
    assert_eq!(h.status(), ViewerStatus::Error);
    assert_eq!(
        h.error(),
        Some("Failed to decode asset: unexpected end of buffer")
    );
    assert!(h.overlay().error_banner.is_some());
    assert!(h.meta().is_none());
}

#[test]
fn test_harness_unknown_asset_is_error_not_stuck() {
    let mut h = TestHarness::new();
    h.set_model("missing.glb");
    assert!(h.settle());
    assert_eq!(h.status(), ViewerStatus::Error);
}

#[test]
fn test_harness_error_cleared_by_next_locator() {
    let mut h = TestHarness::new();
    h.add_failure("broken.glb", "boom");
    h.add_box_model("good.glb", Vec3::ZERO, Vec3::ONE);

    h.set_model("broken.glb");
    h.settle();
    assert_eq!(h.status(), ViewerStatus::Error);

    h.set_model("good.glb");
    assert_eq!(h.status(), ViewerStatus::Loading);
    assert!(h.error().is_none());
    assert!(h.settle());
    assert_eq!(h.status(), ViewerStatus::Ready);
}

#[test]
fn test_harness_repeat_locator_uses_cache() {
    let mut h = TestHarness::new();
    h.add_box_model("a.glb", Vec3::ZERO, Vec3::ONE);
    h.add_box_model("b.glb", Vec3::ZERO, Vec3::ONE);

    h.set_model("a.glb");
    h.settle();
    h.set_model("b.glb");
    h.settle();
    h.set_model("a.glb");
    h.settle();

    assert_eq!(h.status(), ViewerStatus::Ready);
    assert_eq!(h.decode_count(), 2);
}

#[test]
fn test_harness_preload_then_show_without_decoding_again() {
    let mut h = TestHarness::new();
    h.add_box_model("next.glb", Vec3::ZERO, Vec3::ONE);
    h.preload("next.glb");
    assert!(h.step_until(|h| h.session().loader().cached("next.glb").is_some()));
    assert_eq!(h.content(), &ViewerContent::Placeholder);

    h.set_model("next.glb");
    h.step();
    assert_eq!(h.status(), ViewerStatus::Ready);
    assert_eq!(h.decode_count(), 1);
}

#[test]
fn test_harness_display_options_reprepare_model() {
    let mut h = TestHarness::new();
    h.add_box_model("a.glb", Vec3::new(-2.0, 0.0, -1.0), Vec3::new(4.0, 6.0, 3.0));
    h.set_model("a.glb");
    h.settle();

    h.session_mut().set_display_options(false, true, false);
    assert_eq!(h.model_offset(), Some(Vec3::ZERO));
    let items = h.session().render_items();
    assert!(items.iter().all(|i| !i.cast_shadow && i.receive_shadow));
}

#[test]
fn test_harness_receive_toggle_controls_ground_shadow() {
    let mut h = TestHarness::new();
    h.add_box_model("a.glb", Vec3::ZERO, Vec3::ONE);
    h.set_model("a.glb");
    h.settle();
    assert_eq!(shadow_casters(&h.session().render_items()), vec![0]);

    h.session_mut().set_display_options(true, false, true);
    assert!(shadow_casters(&h.session().render_items()).is_empty());

    h.clear_model();
    assert_eq!(shadow_casters(&h.session().render_items()), vec![0, 1, 2]);
}

#[test]
fn test_harness_hiding_test_objects_goes_idle() {
    let mut h = TestHarness::new();
    h.set_show_test_objects(false);
    assert_eq!(h.status(), ViewerStatus::Idle);
    h.set_show_test_objects(true);
    assert_eq!(h.status(), ViewerStatus::Ready);
}

#[test]
fn test_harness_test_objects_animate_only_when_shown() {
    let mut h = TestHarness::new();
    h.step();
    h.step();
    let spun = h.session().test_objects().cube_rotation();
    assert!(spun > 0.0);

    h.add_box_model("a.glb", Vec3::ZERO, Vec3::ONE);
    h.set_model("a.glb");
    h.settle();
    assert_eq!(h.session().test_objects().cube_rotation(), spun);
}

#[test]
fn test_harness_environment_change_keeps_status() {
    use blueprint_viewer_lib::viewport::lighting::Environment;

    let mut h = TestHarness::new();
    h.session_mut().set_environment(Environment::Sunset);
    h.step();
    assert_eq!(h.session().config().environment, Environment::Sunset);
    assert_eq!(h.status(), ViewerStatus::Ready);
    assert_eq!(h.draw_count(), 4);
}
