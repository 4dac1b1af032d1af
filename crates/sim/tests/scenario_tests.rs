use std::path::PathBuf;

use adaptive_long_core::parameters::SLC_CONFIRMED;
use adaptive_long_sim::{
    run_scenario, CycleRunner, LongitudinalSim, MemorySink, NullSink, Scenario, TimeMode,
};

fn load(name: &str) -> Scenario {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(format!("{name}.json"));
    Scenario::load(&path).unwrap()
}

#[tokio::test]
async fn curve_activates_conditional_mode() {
    let scenario = load("curve");
    let summary = run_scenario(&scenario, TimeMode::FreeRunning, &mut NullSink)
        .await
        .unwrap();

    assert_eq!(summary.cycles, scenario.cycles());
    assert!(summary.mode_activations >= 1);
    assert!(summary.causes.contains_key("Curve"));
    assert!(!summary.collided);
}

#[tokio::test]
async fn slower_lead_is_detected() {
    let scenario = load("slower_lead");
    let summary = run_scenario(&scenario, TimeMode::FreeRunning, &mut NullSink)
        .await
        .unwrap();

    assert!(summary.slower_lead_cycles > 0);
    assert!(summary.causes.contains_key("SlowerLead"));
    assert!(summary.min_gap.is_some());
}

#[tokio::test]
async fn speed_limit_waits_for_confirmation() {
    let scenario = load("speed_limit");
    let mut runner = CycleRunner::from_scenario(&scenario).unwrap();
    let mut vehicle = LongitudinalSim::from_scenario(&scenario);
    let mut sink = MemorySink::new();

    runner.run(&mut vehicle, &mut sink).await.unwrap();
    let messages = sink.messages();
    assert_eq!(messages.len(), scenario.cycles());

    // 10 s: new limit announced at 5 s, not yet confirmed
    let held = &messages[200];
    assert!((held.speed_limit - 26.8).abs() < 1e-3);
    assert!((held.unconfirmed_speed_limit - 17.9).abs() < 1e-3);

    let last = messages.last().unwrap();
    assert!((last.speed_limit - 17.9).abs() < 1e-3);
    assert!(last.v_cruise < 17.9);
    assert_eq!(runner.store().get_bool(SLC_CONFIRMED), Ok(false));
}

#[tokio::test]
async fn aggressive_lead_then_custom_profile() {
    let scenario = load("aggressive_lead");
    let summary = run_scenario(&scenario, TimeMode::FreeRunning, &mut NullSink)
        .await
        .unwrap();

    assert!(summary.profiles.contains_key("Aggressive"));
    assert!(summary.profiles.contains_key("Custom"));
}

#[tokio::test]
async fn plan_messages_stay_within_invariants() {
    for name in ["curve", "slower_lead", "speed_limit", "aggressive_lead"] {
        let scenario = load(name);
        let mut sink = MemorySink::new();
        run_scenario(&scenario, TimeMode::FreeRunning, &mut sink)
            .await
            .unwrap();

        for message in sink.messages() {
            assert!(message.max_acceleration >= message.min_acceleration, "{name}");
            assert!(message.t_follow > 0.0 && message.t_follow.is_finite(), "{name}");
            assert!(message.acceleration_jerk.is_finite(), "{name}");
            assert!(message.v_cruise >= 0.0, "{name}");
            assert!(message.valid, "{name}");
        }
    }
}
